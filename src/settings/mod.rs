// ── Settings persistence ──────────────────────────────────────────────────────
//
// Reads and writes `%APPDATA%\UptimeClock\settings.json`.
// No `unsafe` — pure safe Rust + serde_json.
//
// The only setting is the last window placement, so the window reopens where
// the user left it.  Every failure path degrades to defaults: a missing,
// malformed, or implausible file simply means the window opens at the
// default position.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Root of the JSON settings file.
#[derive(Serialize, Deserialize)]
struct SettingsFile {
    version: u32,
    placement: Placement,
}

/// Outer window rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Placement {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Placement {
    /// Reject dimensions no real monitor produces, so a corrupt file can
    /// never create an invisible or absurd window.
    fn is_plausible(&self) -> bool {
        (120..=16_384).contains(&self.width)
            && (120..=16_384).contains(&self.height)
            && (-32_768..=32_767).contains(&self.x)
            && (-32_768..=32_767).contains(&self.y)
    }
}

// ── Format version ────────────────────────────────────────────────────────────

const SETTINGS_VERSION: u32 = 1;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the settings file:
/// `%APPDATA%\UptimeClock\settings.json`.
///
/// Returns `None` if the `APPDATA` environment variable is not set.
fn settings_path() -> Option<PathBuf> {
    let appdata = std::env::var_os("APPDATA")?;
    let mut p = PathBuf::from(appdata);
    p.push("UptimeClock");
    p.push("settings.json");
    Some(p)
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write the window placement to the settings file.
///
/// Creates the `UptimeClock` directory if it does not exist.
/// The caller (`window.rs`) silently discards any returned error.
pub(crate) fn save(placement: Placement) -> io::Result<()> {
    let path = settings_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "APPDATA not set"))?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let sf = SettingsFile {
        version: SETTINGS_VERSION,
        placement,
    };

    let file = fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, &sf).map_err(io::Error::other)
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read the saved window placement.
///
/// Returns `None` on any error: file missing, JSON parse failure, an
/// unrecognised version number, or an implausible rectangle.  The window then
/// opens at its default position and size.
pub(crate) fn load() -> Option<Placement> {
    let path = settings_path()?;
    let data = fs::read(&path).ok()?;
    let sf: SettingsFile = serde_json::from_slice(&data).ok()?;
    if sf.version != SETTINGS_VERSION || !sf.placement.is_plausible() {
        return None;
    }
    Some(sf.placement)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> Placement {
        Placement {
            x: 120,
            y: 80,
            width: 480,
            height: 320,
        }
    }

    #[test]
    fn roundtrip() {
        let sf = SettingsFile {
            version: SETTINGS_VERSION,
            placement: placement(),
        };
        let json = serde_json::to_string(&sf).expect("serialize");
        let sf2: SettingsFile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(sf2.version, SETTINGS_VERSION);
        assert_eq!(sf2.placement, placement());
    }

    /// A settings file with an unrecognised version number must be rejected
    /// by `load()`.  Test the parse-and-check logic directly.
    #[test]
    fn wrong_version_is_rejected() {
        let sf = SettingsFile {
            version: 99,
            placement: placement(),
        };
        let json = serde_json::to_string(&sf).expect("serialize");
        let parsed: SettingsFile = serde_json::from_str(&json).expect("deserialize");
        // load() would return None for this version; assert the condition directly.
        assert_ne!(parsed.version, SETTINGS_VERSION);
    }

    #[test]
    fn negative_position_on_a_left_monitor_is_plausible() {
        let p = Placement {
            x: -1920,
            y: 0,
            width: 480,
            height: 320,
        };
        assert!(p.is_plausible());
    }

    #[test]
    fn implausible_rectangles_are_rejected() {
        let mut p = placement();
        p.width = 0;
        assert!(!p.is_plausible());

        let mut p = placement();
        p.height = 100_000;
        assert!(!p.is_plausible());

        let mut p = placement();
        p.x = 1_000_000;
        assert!(!p.is_plausible());
    }

    #[test]
    fn malformed_json_fails_to_parse() {
        assert!(serde_json::from_str::<SettingsFile>("{\"version\":1}").is_err());
    }
}
