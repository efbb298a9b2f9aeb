// ── Optional-capability resolution ────────────────────────────────────────────
//
// Resolved once at startup into an immutable `Capabilities` value that the
// window owns, instead of process-wide globals.  Nothing here is fatal: every
// capability degrades to a lesser one.

#![allow(unsafe_code)]

use windows::{
    core::{s, w},
    Win32::System::{
        LibraryLoader::{GetModuleHandleW, GetProcAddress},
        Power::{
            SetThreadExecutionState, ES_CONTINUOUS, ES_DISPLAY_REQUIRED, ES_SYSTEM_REQUIRED,
        },
        SystemInformation::GetTickCount,
    },
};

/// `GetTickCount64` — milliseconds since boot, 64-bit.
type TickCount64Fn = unsafe extern "system" fn() -> u64;

// ── Capabilities ──────────────────────────────────────────────────────────────

/// The OS entry points this process resolved at startup.
pub(crate) struct Capabilities {
    uptime: UptimeSource,
}

/// Where uptime readings come from.
enum UptimeSource {
    /// `GetTickCount64`, resolved from kernel32.
    Precise(TickCount64Fn),
    /// `GetTickCount` — 32-bit, rolls over after ~49.7 days.  Only used when
    /// the 64-bit entry point cannot be resolved.
    Coarse,
}

/// Resolve every optional capability.  Never fails; unresolvable entry points
/// fall back to their lesser alternative.
pub(crate) fn resolve() -> Capabilities {
    let uptime = match resolve_tick_count_64() {
        Some(f) => UptimeSource::Precise(f),
        None => UptimeSource::Coarse,
    };

    #[cfg(debug_assertions)]
    eprintln!(
        "[uclock] uptime source: {}",
        match uptime {
            UptimeSource::Precise(_) => "GetTickCount64",
            UptimeSource::Coarse => "GetTickCount (32-bit fallback)",
        }
    );

    Capabilities { uptime }
}

fn resolve_tick_count_64() -> Option<TickCount64Fn> {
    // SAFETY: kernel32 is mapped into every Win32 process for its lifetime;
    // the module handle does not need to be freed.
    let module = unsafe { GetModuleHandleW(w!("kernel32.dll")) }.ok()?;

    // SAFETY: module is valid and the procedure name is a null-terminated
    // ANSI string literal.
    let proc = unsafe { GetProcAddress(module, s!("GetTickCount64")) }?;

    // SAFETY: GetTickCount64's documented signature is `ULONGLONG WINAPI ()`,
    // which matches TickCount64Fn exactly.
    Some(unsafe { std::mem::transmute::<unsafe extern "system" fn() -> isize, TickCount64Fn>(proc) })
}

impl Capabilities {
    /// Milliseconds since boot, from the best source this host offers.
    pub(crate) fn uptime_ms(&self) -> u64 {
        match self.uptime {
            // SAFETY: the pointer was resolved from kernel32 at startup and
            // kernel32 stays mapped for the process lifetime.
            UptimeSource::Precise(f) => unsafe { f() },
            // SAFETY: GetTickCount reads a shared counter; no preconditions.
            UptimeSource::Coarse => unsafe { GetTickCount() } as u64,
        }
    }
}

// ── Keep-awake ────────────────────────────────────────────────────────────────

/// Block (or re-allow) screen blanking and sleep timeouts while the clock is
/// on screen.  Best-effort: the return value is ignored, and a host without
/// the capability simply keeps its normal timeouts.
pub(crate) fn keep_awake(enable: bool) {
    let flags = if enable {
        ES_CONTINUOUS | ES_DISPLAY_REQUIRED | ES_SYSTEM_REQUIRED
    } else {
        ES_CONTINUOUS
    };
    // SAFETY: SetThreadExecutionState takes no pointers and only adjusts the
    // calling thread's execution-state flags.
    unsafe {
        SetThreadExecutionState(flags);
    }
}
