// ── Platform abstraction layer ────────────────────────────────────────────────
//
// Everything the clock needs from the OS — window, timer, render surface,
// clock sources — lives behind this module.  No `unsafe` lives here; all
// Win32 FFI is confined to the `win32` sub-module and never leaks outward.

pub mod win32;
