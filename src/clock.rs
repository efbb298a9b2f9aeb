// ── Clock display state ───────────────────────────────────────────────────────
//
// A single `ClockDisplay` is created with the main window and owned by the
// platform layer for the window's lifetime.  All mutations happen on the UI
// thread — there is no global mutable state.  No Win32 imports here; the
// platform layer feeds in wall-clock time and uptime and reads back the
// formatted strings and layout metrics.

use std::time::Duration;

use chrono::NaiveDateTime;

// ── Formats & capacities ──────────────────────────────────────────────────────

/// Clock format: `03/30/2023 12:34:56 AM` (22 chars).
const CLOCK_FMT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Maximum clock string length.  `CLOCK_FMT` always renders exactly this many
/// characters; anything longer is treated as a formatting failure.
pub(crate) const CLOCK_TEXT_CAP: usize = 22;

/// Maximum uptime string length: `365 d, 23 hr, 59 min, 59 sec` (28 chars).
/// Holds through a three-digit day count.  If Windows has really been running
/// longer than that without rebooting, we've got other problems.
pub(crate) const UPTIME_TEXT_CAP: usize = 28;

// ── Unit conversions ──────────────────────────────────────────────────────────

const MSEC_PER_SEC: u64 = 1000;
const MSEC_PER_MIN: u64 = MSEC_PER_SEC * 60;
const MSEC_PER_HR: u64 = MSEC_PER_MIN * 60;
const MSEC_PER_DAY: u64 = MSEC_PER_HR * 24;

// ── Formatting ────────────────────────────────────────────────────────────────

/// Format a local date+time as `MM/DD/YYYY hh:mm:ss AM/PM`.
pub(crate) fn format_clock(t: &NaiveDateTime) -> String {
    t.format(CLOCK_FMT).to_string()
}

/// Format a millisecond uptime as `D d, H hr, M min, S sec`.
///
/// Decomposes `ms` exactly: days, then hours, minutes, and seconds from the
/// successive remainders.  Fields are not zero-padded.
pub(crate) fn format_uptime(ms: u64) -> String {
    let days = ms / MSEC_PER_DAY;
    let rem = ms % MSEC_PER_DAY;
    let hours = rem / MSEC_PER_HR;
    let rem = rem % MSEC_PER_HR;
    let minutes = rem / MSEC_PER_MIN;
    let rem = rem % MSEC_PER_MIN;
    let seconds = rem / MSEC_PER_SEC;
    format!("{days} d, {hours} hr, {minutes} min, {seconds} sec")
}

/// Time remaining until the next whole-second boundary.
///
/// `subsec_ms` is the sub-second component of the current time in
/// milliseconds.  Returns zero exactly at the boundary, so a caller already
/// on the boundary starts its timer immediately.
pub(crate) fn delay_to_next_second(subsec_ms: u64) -> Duration {
    let rem = subsec_ms % MSEC_PER_SEC;
    Duration::from_millis((MSEC_PER_SEC - rem) % MSEC_PER_SEC)
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Vertical layout metrics derived from the client-area height.
///
/// The display is a block of four text lines — clock, blank, label, uptime —
/// centered vertically in the client area.  The clock line uses the primary
/// height, the other three the secondary height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    /// Clock line cell height: client height / 8.
    pub(crate) primary_height: i32,
    /// Label / uptime / blank line cell height: client height / 12.
    pub(crate) secondary_height: i32,
    /// Top edge of the block within the client area.
    pub(crate) block_top: i32,
}

impl Layout {
    /// Compute layout metrics for a client area `height` pixels tall.
    /// Integer division throughout; a zero or tiny height yields zero-height
    /// lines, which the paint path skips.
    pub(crate) fn compute(height: i32) -> Self {
        let primary_height = height / 8;
        let secondary_height = height / 12;
        let block_height = primary_height + 3 * secondary_height;
        Self {
            primary_height,
            secondary_height,
            block_top: (height - block_height) / 2,
        }
    }
}

// ── ClockDisplay ──────────────────────────────────────────────────────────────

/// State behind the clock window: the two display strings, the last known
/// client-area dimensions, and whether the periodic refresh is running.
///
/// Passed by mutable reference through the WndProc handlers so that all
/// display logic sees a single, explicit state root.
#[derive(Debug)]
pub(crate) struct ClockDisplay {
    /// Formatted local date+time, at most `CLOCK_TEXT_CAP` chars.
    pub(crate) clock_text: String,
    /// Formatted uptime, at most `UPTIME_TEXT_CAP` chars.
    pub(crate) uptime_text: String,
    /// Last known client-area width in pixels.
    pub(crate) width: i32,
    /// Last known client-area height in pixels.
    pub(crate) height: i32,
    /// True only while the window is visible and the 1 s timer is running.
    pub(crate) refresh_active: bool,
}

impl ClockDisplay {
    /// A fresh display with empty strings; the first `show()` populates them
    /// before the window ever paints text.
    pub(crate) fn new() -> Self {
        Self {
            clock_text: String::new(),
            uptime_text: String::new(),
            width: 0,
            height: 0,
            refresh_active: false,
        }
    }

    /// The window is about to become visible: refresh both strings
    /// immediately (before the first timer tick) and mark the refresh active.
    pub(crate) fn show(&mut self, now: &NaiveDateTime, uptime_ms: u64) {
        self.refresh_active = true;
        self.tick(now, uptime_ms);
    }

    /// The window is about to be hidden: the periodic refresh stops.
    pub(crate) fn hide(&mut self) {
        self.refresh_active = false;
    }

    /// One refresh: recompute both strings.
    ///
    /// A result that exceeds its capacity is discarded for this tick — the
    /// stale text remains displayed until the next successful refresh.
    pub(crate) fn tick(&mut self, now: &NaiveDateTime, uptime_ms: u64) {
        let clock = format_clock(now);
        if clock.len() <= CLOCK_TEXT_CAP {
            self.clock_text = clock;
        }
        let uptime = format_uptime(uptime_ms);
        if uptime.len() <= UPTIME_TEXT_CAP {
            self.uptime_text = uptime;
        }
    }

    /// Record new client-area dimensions.
    pub(crate) fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    /// Layout metrics for the current dimensions.
    pub(crate) fn layout(&self) -> Layout {
        Layout::compute(self.height)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .expect("valid date")
            .and_hms_opt(h, mi, s)
            .expect("valid time")
    }

    #[test]
    fn clock_format_midnight_is_12_am() {
        let t = at(2023, 3, 30, 0, 34, 56);
        assert_eq!(format_clock(&t), "03/30/2023 12:34:56 AM");
    }

    #[test]
    fn clock_format_afternoon() {
        let t = at(2023, 12, 1, 15, 5, 9);
        assert_eq!(format_clock(&t), "12/01/2023 03:05:09 PM");
    }

    #[test]
    fn clock_format_is_always_22_chars() {
        for &(h, mi, s) in &[(0, 0, 0), (11, 59, 59), (12, 0, 0), (23, 59, 59)] {
            let t = at(2024, 2, 29, h, mi, s);
            assert_eq!(format_clock(&t).len(), CLOCK_TEXT_CAP);
        }
    }

    #[test]
    fn uptime_one_day_one_hour() {
        // 90000000 = 86400000 + 3600000
        assert_eq!(format_uptime(90_000_000), "1 d, 1 hr, 0 min, 0 sec");
    }

    #[test]
    fn uptime_one_of_each() {
        assert_eq!(format_uptime(3_661_000), "0 d, 1 hr, 1 min, 1 sec");
    }

    #[test]
    fn uptime_zero() {
        assert_eq!(format_uptime(0), "0 d, 0 hr, 0 min, 0 sec");
    }

    #[test]
    fn uptime_decomposes_exactly() {
        // days*86400000 + hours*3600000 + minutes*60000 + seconds*1000
        // + (ms mod 1000) must reconstruct the input.
        for &ms in &[0u64, 999, 1_000, 59_999, 86_399_999, 86_400_000, 123_456_789_012] {
            let s = format_uptime(ms);
            let fields: Vec<u64> = s
                .split(|c: char| !c.is_ascii_digit())
                .filter(|p| !p.is_empty())
                .map(|p| p.parse().expect("numeric field"))
                .collect();
            let [d, h, m, sec] = fields[..] else {
                panic!("expected 4 fields in {s:?}");
            };
            assert_eq!(
                d * MSEC_PER_DAY + h * MSEC_PER_HR + m * MSEC_PER_MIN + sec * MSEC_PER_SEC
                    + ms % MSEC_PER_SEC,
                ms
            );
        }
    }

    #[test]
    fn uptime_fits_cap_through_999_days() {
        // Worst case below 1000 days: every field at its widest.
        let ms = 999 * MSEC_PER_DAY + 23 * MSEC_PER_HR + 59 * MSEC_PER_MIN + 59 * MSEC_PER_SEC;
        let s = format_uptime(ms);
        assert_eq!(s, "999 d, 23 hr, 59 min, 59 sec");
        assert_eq!(s.len(), UPTIME_TEXT_CAP);
    }

    #[test]
    fn delay_is_zero_on_the_boundary() {
        assert_eq!(delay_to_next_second(0), Duration::ZERO);
    }

    #[test]
    fn delay_complements_the_subsecond_part() {
        assert_eq!(delay_to_next_second(1), Duration::from_millis(999));
        assert_eq!(delay_to_next_second(250), Duration::from_millis(750));
        assert_eq!(delay_to_next_second(999), Duration::from_millis(1));
        // Sub-second input is taken modulo one second.
        assert_eq!(delay_to_next_second(1_250), Duration::from_millis(750));
    }

    #[test]
    fn layout_uses_integer_division() {
        let l = Layout::compute(480);
        assert_eq!(l.primary_height, 60); // 480 / 8
        assert_eq!(l.secondary_height, 40); // 480 / 12
        // Block = 60 + 3*40 = 180; top = (480 - 180) / 2.
        assert_eq!(l.block_top, 150);

        let l = Layout::compute(100);
        assert_eq!(l.primary_height, 12);
        assert_eq!(l.secondary_height, 8);
    }

    #[test]
    fn layout_zero_height_is_degenerate_not_panicking() {
        let l = Layout::compute(0);
        assert_eq!(l.primary_height, 0);
        assert_eq!(l.secondary_height, 0);
        assert_eq!(l.block_top, 0);
    }

    #[test]
    fn show_refreshes_before_the_first_tick() {
        let mut d = ClockDisplay::new();
        assert!(!d.refresh_active);
        d.show(&at(2023, 3, 30, 0, 34, 56), 3_661_000);
        assert!(d.refresh_active);
        assert_eq!(d.clock_text, "03/30/2023 12:34:56 AM");
        assert_eq!(d.uptime_text, "0 d, 1 hr, 1 min, 1 sec");
    }

    #[test]
    fn hide_stops_refresh_and_show_resumes() {
        let mut d = ClockDisplay::new();
        d.show(&at(2023, 3, 30, 0, 34, 56), 0);
        d.hide();
        assert!(!d.refresh_active);
        d.show(&at(2023, 3, 30, 0, 35, 0), 1_000);
        assert!(d.refresh_active);
        assert_eq!(d.clock_text, "03/30/2023 12:35:00 AM");
    }

    #[test]
    fn overlong_uptime_keeps_stale_text() {
        let mut d = ClockDisplay::new();
        d.tick(&at(2023, 3, 30, 0, 34, 56), 0);
        assert_eq!(d.uptime_text, "0 d, 0 hr, 0 min, 0 sec");

        // 10000 days, 23:59:59 formats to 30 chars — over the cap, so the
        // update is skipped and the previous text stands.
        let ms = 10_000 * MSEC_PER_DAY + 23 * MSEC_PER_HR + 59 * MSEC_PER_MIN + 59 * MSEC_PER_SEC;
        assert!(format_uptime(ms).len() > UPTIME_TEXT_CAP);
        d.tick(&at(2023, 3, 30, 0, 34, 57), ms);
        assert_eq!(d.uptime_text, "0 d, 0 hr, 0 min, 0 sec");
        assert_eq!(d.clock_text, "03/30/2023 12:34:57 AM");
    }

    #[test]
    fn resize_updates_layout() {
        let mut d = ClockDisplay::new();
        d.resize(640, 360);
        assert_eq!(d.width, 640);
        assert_eq!(d.height, 360);
        assert_eq!(d.layout(), Layout::compute(360));
    }
}
