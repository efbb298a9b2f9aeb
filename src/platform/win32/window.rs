// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the clock window class and create the top-level window.
//   • Run the Win32 message loop.
//   • Dispatch WM_CREATE, WM_SHOWWINDOW, WM_TIMER, WM_SIZE, WM_PAINT,
//     WM_KEYDOWN, WM_CLOSE, WM_DESTROY.
//   • Double-buffered GDI rendering of the clock / uptime block.
//   • Expose a safe error-dialog helper for use by main().

#![allow(unsafe_code)]

use std::{cell::RefCell, collections::HashMap, ffi::c_void};

use chrono::Local;
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, COLORREF, FALSE, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{
            BeginPaint, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreateFontIndirectW,
            DeleteDC, DeleteObject, DrawTextW, EndPaint, FillRect, InvalidateRect, SelectObject,
            SetBkMode, SetTextColor, DEFAULT_CHARSET, DT_CENTER, DT_NOPREFIX, DT_SINGLELINE, HDC,
            HFONT, LOGFONTW, PAINTSTRUCT, SRCCOPY, TRANSPARENT,
        },
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Input::KeyboardAndMouse::{GetKeyState, VK_CONTROL, VK_ESCAPE},
            WindowsAndMessaging::{
                CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
                GetMessage, GetSysColor, GetSysColorBrush, GetWindowRect, KillTimer, LoadCursorW,
                LoadIconW, MessageBoxW, PostQuitMessage, RegisterClassExW, SetForegroundWindow,
                SetTimer, ShowWindow, TranslateMessage, UpdateWindow, COLOR_BTNFACE, COLOR_BTNTEXT,
                CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, HMENU, IDC_ARROW,
                IDI_APPLICATION, MB_ICONERROR, MB_OK, MSG, SW_SHOW, WINDOW_EX_STYLE, WM_CLOSE,
                WM_CREATE, WM_DESTROY, WM_ERASEBKGND, WM_KEYDOWN, WM_PAINT, WM_SHOWWINDOW,
                WM_SIZE, WM_TIMER, WNDCLASSEXW, WS_OVERLAPPEDWINDOW,
            },
        },
    },
};

use crate::{
    clock::{self, ClockDisplay},
    error::{Result, UclockError},
    settings,
};

use super::{caps, caps::Capabilities, dpi};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register the clock window class.
const CLASS_NAME: PCWSTR = w!("UclockMainWindow");

/// Title bar text.
const APP_TITLE: PCWSTR = w!("Uptime Clock");

/// Default client width in 96-DPI pixels, scaled to the system DPI when no
/// saved placement exists.
const DEFAULT_WIDTH: i32 = 480;

/// Default client height in 96-DPI pixels.
const DEFAULT_HEIGHT: i32 = 320;

/// Static caption above the uptime line.
const UPTIME_LABEL: &str = "System Uptime";

/// Face used for both display fonts.  The font mapper substitutes the
/// system dialog font.
const FONT_FACE: &str = "MS Shell Dlg";

// ── Refresh timer ─────────────────────────────────────────────────────────────

const IDT_REFRESH: usize = 1;
const REFRESH_INTERVAL_MS: u32 = 1000;

// ── Per-window state ──────────────────────────────────────────────────────────

/// Everything the WndProc needs for one clock window: the pure display state,
/// the capabilities resolved at startup, and the two GDI fonts.
struct ClockWindow {
    display: ClockDisplay,
    caps: Capabilities,
    font_primary: HFONT,
    font_secondary: HFONT,
}

thread_local! {
    /// Window-handle → state map, owned by the windowing code.  All access is
    /// from the UI thread (the only thread that runs the message loop), so a
    /// RefCell suffices.
    static WINDOWS: RefCell<HashMap<isize, ClockWindow>> = RefCell::new(HashMap::new());
}

/// Run `f` against the state of `hwnd`, if the window is registered.
fn with_window<R>(hwnd: HWND, f: impl FnOnce(&mut ClockWindow) -> R) -> Option<R> {
    WINDOWS.with_borrow_mut(|map| map.get_mut(&(hwnd.0 as isize)).map(f))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Register the clock window class, create the window, and drive the message
/// loop until the user closes the application.
///
/// Records a startup timestamp and logs elapsed time (debug builds only) once
/// the window is first shown on screen.
pub(crate) fn run() -> Result<()> {
    // Startup benchmark harness — only compiled in debug builds so the
    // variable is never unused in release mode.
    #[cfg(debug_assertions)]
    let t0 = std::time::Instant::now();

    dpi::init();

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime and never fails in practice.
    let hmodule = unsafe { GetModuleHandleW(None) }.map_err(UclockError::from)?;

    // HINSTANCE and HMODULE represent the same underlying value on Windows
    // (guaranteed by the Win32 ABI).
    let hinstance = HINSTANCE(hmodule.0);

    register_class(hinstance)?;

    // Resolve optional OS entry points exactly once; the window owns the
    // result for its whole lifetime.
    let hwnd = create_window(hinstance, caps::resolve())?;

    // Block screen blanking and sleep timeouts while the clock is on screen.
    caps::keep_awake(true);

    // SAFETY: hwnd was just returned by CreateWindowExW and is valid.
    // ShowWindow returns the previous visibility state; SetForegroundWindow
    // and UpdateWindow return success BOOLs — all intentionally ignored here.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
        let _ = UpdateWindow(hwnd);
    }

    // Startup milestone — window is now visible on screen.
    #[cfg(debug_assertions)]
    eprintln!("[uclock] window visible in {:.1} ms", t0.elapsed().as_secs_f64() * 1000.0);

    let result = message_loop();

    // Re-allow screen blanking and sleep timeouts.
    caps::keep_awake(false);

    result
}

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
/// Used by `main()` when `run()` returns an error.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();
    let title_wide: Vec<u16> = "Uptime Clock — Fatal Error"
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();

    // SAFETY: msg_wide and title_wide are valid null-terminated UTF-16 strings
    // that remain allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    // Return value (button pressed) is intentionally unused for an error dialog.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: LoadIconW with IDI_APPLICATION always succeeds; it loads the
    // built-in application icon resource, which exists on all Windows versions.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }.map_err(UclockError::from)?;

    // SAFETY: LoadCursorW with IDC_ARROW always succeeds; the arrow cursor is
    // a built-in resource guaranteed to exist on all Windows versions.
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(UclockError::from)?;

    // SAFETY: GetSysColorBrush always returns a valid system brush, which must
    // not be deleted.
    let bg_brush = unsafe { GetSysColorBrush(COLOR_BTNFACE) };

    let wndclass = WNDCLASSEXW {
        // WNDCLASSEXW is ~72 bytes; the cast to u32 is always lossless.
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        // CS_HREDRAW | CS_VREDRAW: repaint on resize, since the font sizes
        // derive from the client height.
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        hbrBackground: bg_brush,
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }

    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

fn create_window(hinstance: HINSTANCE, caps: Capabilities) -> Result<HWND> {
    // Reopen where the user left the window; fall back to a DPI-scaled
    // default when there is no (plausible) saved placement.
    let (x, y, width, height) = match settings::load() {
        Some(p) => (p.x, p.y, p.width, p.height),
        None => {
            let dpi = dpi::get_system_dpi();
            (
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                dpi::scale(DEFAULT_WIDTH, dpi),
                dpi::scale(DEFAULT_HEIGHT, dpi),
            )
        }
    };

    // Ownership of the capabilities passes through lpCreateParams; WM_CREATE
    // reclaims the box exactly once.
    let caps = Box::into_raw(Box::new(caps));

    // SAFETY: CLASS_NAME was just registered; hinstance is the exe's module.
    // HWND::default() (null parent) creates a top-level window.
    // HMENU::default() (null menu) — the clock window has no menu bar.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            APP_TITLE,
            WS_OVERLAPPEDWINDOW,
            x,
            y,
            width,
            height,
            HWND::default(),
            HMENU::default(),
            hinstance,
            Some(caps as *const c_void),
        )
    };

    if hwnd == HWND::default() {
        return Err(last_error("CreateWindowExW"));
    }

    Ok(hwnd)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop() -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; HWND::default() retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessage(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            // GetMessage returns -1 on error.
            -1 => return Err(last_error("GetMessage")),
            // Returns 0 when WM_QUIT is retrieved — exit the loop cleanly.
            0 => break,
            // Any other value: a normal message to dispatch.
            _ => unsafe {
                // SAFETY: msg was populated by a successful GetMessage call.
                // TranslateMessage return value (whether it generated WM_CHAR)
                // and DispatchMessageW's LRESULT are intentionally unused.
                let _ = TranslateMessage(&msg);
                let _ = DispatchMessageW(&msg);
            },
        }
    }

    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // ── Lifecycle ─────────────────────────────────────────────────────────
        WM_CREATE => on_create(hwnd, lparam),

        WM_SHOWWINDOW => {
            // wparam nonzero: the window is about to become visible.
            if wparam.0 != 0 {
                start_clock(hwnd);
            } else {
                stop_clock(hwnd);
            }
            LRESULT(0)
        }

        WM_CLOSE => {
            // SAFETY: hwnd is the window being closed; DestroyWindow triggers
            // WM_DESTROY, which posts WM_QUIT via PostQuitMessage.
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            on_destroy(hwnd);
            // SAFETY: PostQuitMessage with exit code 0 is always safe to call
            // from WM_DESTROY. It posts WM_QUIT to the thread's message queue.
            PostQuitMessage(0);
            LRESULT(0)
        }

        // ── Refresh ───────────────────────────────────────────────────────────
        WM_TIMER => {
            if wparam.0 == IDT_REFRESH {
                refresh(hwnd);
            }
            LRESULT(0)
        }

        // ── Layout ────────────────────────────────────────────────────────────
        WM_SIZE => {
            // lparam low word = new client width, high word = new client height.
            let width = (lparam.0 & 0xFFFF) as i32;
            let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
            with_window(hwnd, |win| {
                win.display.resize(width, height);
                relayout(win);
            });
            // SAFETY: hwnd is valid; berase FALSE because WM_PAINT repaints
            // the entire client area from the back buffer.
            let _ = InvalidateRect(hwnd, None, FALSE);
            LRESULT(0)
        }

        // ── Painting ──────────────────────────────────────────────────────────
        WM_PAINT => {
            with_window(hwnd, |win| {
                // SAFETY: hwnd is valid for the duration of this handler and
                // win borrows state that outlives the paint cycle.
                unsafe { paint(hwnd, win) }
            });
            LRESULT(0)
        }

        // The whole client area is repainted from the back buffer, so there
        // is nothing to erase.  Claiming the erase avoids a background-fill
        // flash between resize and repaint.
        WM_ERASEBKGND => LRESULT(1),

        // ── Keyboard ──────────────────────────────────────────────────────────
        WM_KEYDOWN => {
            if is_close_key(wparam) {
                // SAFETY: same as WM_CLOSE handler.
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            } else {
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
        }

        // Default processing for all unhandled messages.
        // SAFETY: hwnd and message parameters are valid — provided by Windows.
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

// ── Message handlers ──────────────────────────────────────────────────────────

/// WM_CREATE: take ownership of the capabilities handed through
/// `CREATESTRUCTW::lpCreateParams` and register the window's state.
/// Returning -1 aborts window creation, which surfaces as a
/// `CreateWindowExW` failure in `create_window`.
fn on_create(hwnd: HWND, lparam: LPARAM) -> LRESULT {
    let cs = lparam.0 as *const CREATESTRUCTW;
    if cs.is_null() {
        return LRESULT(-1);
    }

    // SAFETY: for WM_CREATE, lparam points to the CREATESTRUCTW Windows
    // built for this CreateWindowExW call.
    let params = unsafe { (*cs).lpCreateParams } as *mut Capabilities;
    if params.is_null() {
        return LRESULT(-1);
    }

    // SAFETY: params came from Box::into_raw in create_window and ownership
    // transfers here exactly once.
    let caps = unsafe { Box::from_raw(params) };

    let mut win = ClockWindow {
        display: ClockDisplay::new(),
        caps: *caps,
        font_primary: HFONT::default(),
        font_secondary: HFONT::default(),
    };

    // Initial layout from the freshly created client area; WM_SIZE keeps it
    // current afterwards.
    let mut rect = RECT::default();
    // SAFETY: hwnd is the window under construction and rect is a valid
    // out-pointer for the duration of the call.
    if unsafe { GetClientRect(hwnd, &mut rect) }.is_ok() {
        win.display.resize(rect.right, rect.bottom);
        relayout(&mut win);
    }

    WINDOWS.with_borrow_mut(|map| map.insert(hwnd.0 as isize, win));
    LRESULT(0)
}

/// WM_DESTROY: remember the placement, stop the refresh, and release the
/// window's state and GDI fonts.
fn on_destroy(hwnd: HWND) {
    save_placement(hwnd);

    // SAFETY: hwnd is still valid during WM_DESTROY; failure just means no
    // timer was running.
    unsafe {
        let _ = KillTimer(hwnd, IDT_REFRESH);
    }

    if let Some(win) = WINDOWS.with_borrow_mut(|map| map.remove(&(hwnd.0 as isize))) {
        delete_font(win.font_primary);
        delete_font(win.font_secondary);
    }
}

/// The window is about to become visible: align the first refresh to a
/// whole-second boundary, update the display immediately, and start the
/// periodic timer.
fn start_clock(hwnd: HWND) {
    // Single timed wait to the next second boundary (at most one second, on
    // the UI thread by design) so every subsequent tick lands just after a
    // second rollover.
    let delay = clock::delay_to_next_second(u64::from(Local::now().timestamp_subsec_millis()));
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }

    with_window(hwnd, |win| {
        let now = Local::now().naive_local();
        let uptime = win.caps.uptime_ms();
        win.display.show(&now, uptime);
    });

    // SAFETY: hwnd is valid; a zero return means the timer could not be
    // created, in which case the display stays static until the next show.
    let timer = unsafe { SetTimer(hwnd, IDT_REFRESH, REFRESH_INTERVAL_MS, None) };
    if timer == 0 {
        with_window(hwnd, |win| win.display.hide());
    }

    // SAFETY: hwnd is valid; the back buffer repaints the full client area.
    let _ = unsafe { InvalidateRect(hwnd, None, FALSE) };
}

/// The window is about to be hidden: stop the periodic refresh.
fn stop_clock(hwnd: HWND) {
    with_window(hwnd, |win| win.display.hide());

    // SAFETY: hwnd is valid; failure just means no timer was running.
    unsafe {
        let _ = KillTimer(hwnd, IDT_REFRESH);
    }
}

/// One timer tick: recompute both strings and request a repaint.
fn refresh(hwnd: HWND) {
    with_window(hwnd, |win| {
        let now = Local::now().naive_local();
        let uptime = win.caps.uptime_ms();
        win.display.tick(&now, uptime);
    });

    // SAFETY: hwnd is valid; berase FALSE because WM_PAINT repaints the
    // entire client area from the back buffer.
    let _ = unsafe { InvalidateRect(hwnd, None, FALSE) };
}

/// Escape, or W while Ctrl is held, closes the window.
fn is_close_key(wparam: WPARAM) -> bool {
    let key = wparam.0 as u16;
    if key == VK_ESCAPE.0 {
        return true;
    }
    // SAFETY: GetKeyState only reads the calling thread's keyboard state.
    let ctrl_down = unsafe { GetKeyState(VK_CONTROL.0 as i32) } < 0;
    ctrl_down && key == u16::from(b'W')
}

/// Persist the current outer window rectangle.  Errors are deliberately
/// discarded; placement restore is best-effort.
fn save_placement(hwnd: HWND) {
    let mut rect = RECT::default();
    // SAFETY: hwnd is valid for the duration of this handler and rect is a
    // valid out-pointer.
    if unsafe { GetWindowRect(hwnd, &mut rect) }.is_err() {
        return;
    }
    let _ = settings::save(settings::Placement {
        x: rect.left,
        y: rect.top,
        width: rect.right - rect.left,
        height: rect.bottom - rect.top,
    });
}

// ── Fonts ─────────────────────────────────────────────────────────────────────

/// Recreate both display fonts from the current layout metrics.
/// Called on creation and whenever the client area changes size.
fn relayout(win: &mut ClockWindow) {
    let layout = win.display.layout();
    replace_font(&mut win.font_primary, layout.primary_height);
    replace_font(&mut win.font_secondary, layout.secondary_height);
}

/// Swap `slot` for a freshly created font of the given cell height, deleting
/// the old font.  On creation failure the old font is kept, so the display
/// degrades to a stale size rather than no text.
fn replace_font(slot: &mut HFONT, height: i32) {
    let new = create_display_font(height);
    if new.is_invalid() {
        return;
    }
    delete_font(*slot);
    *slot = new;
}

fn create_display_font(height: i32) -> HFONT {
    let mut lf = LOGFONTW {
        lfHeight: height,
        lfWeight: 400, // FW_REGULAR
        lfCharSet: DEFAULT_CHARSET,
        ..Default::default()
    };
    for (dst, src) in lf.lfFaceName.iter_mut().zip(FONT_FACE.encode_utf16()) {
        *dst = src;
    }

    // SAFETY: lf is fully initialised and lfFaceName is null-terminated
    // (FONT_FACE is shorter than the 32-WCHAR field).
    unsafe { CreateFontIndirectW(&lf) }
}

fn delete_font(font: HFONT) {
    if font.is_invalid() {
        return;
    }
    // SAFETY: font was created by create_display_font and is no longer
    // selected into any DC.
    unsafe {
        let _ = DeleteObject(font);
    }
}

// ── Painting ──────────────────────────────────────────────────────────────────

/// WM_PAINT: render the display into a memory DC and blit it once.
/// Drawing straight to the window DC flickers visibly at 1 Hz refresh.
unsafe fn paint(hwnd: HWND, win: &ClockWindow) {
    let mut ps = PAINTSTRUCT::default();
    let hdc = BeginPaint(hwnd, &mut ps);

    let width = win.display.width;
    let height = win.display.height;
    if width > 0 && height > 0 {
        let mem_dc = CreateCompatibleDC(hdc);
        let bitmap = CreateCompatibleBitmap(hdc, width, height);
        if !mem_dc.is_invalid() && !bitmap.is_invalid() {
            let old_bitmap = SelectObject(mem_dc, bitmap);
            draw_display(mem_dc, win);
            // A failed blit leaves the previous frame on screen; the next
            // tick repaints.
            let _ = BitBlt(hdc, 0, 0, width, height, mem_dc, 0, 0, SRCCOPY);
            SelectObject(mem_dc, old_bitmap);
        }
        if !bitmap.is_invalid() {
            let _ = DeleteObject(bitmap);
        }
        if !mem_dc.is_invalid() {
            let _ = DeleteDC(mem_dc);
        }
    }

    let _ = EndPaint(hwnd, &ps);
}

/// Fill the background and draw the centered 4-line block: clock, blank
/// line, label, uptime.
unsafe fn draw_display(hdc: HDC, win: &ClockWindow) {
    let display = &win.display;
    let layout = display.layout();

    let full = RECT {
        left: 0,
        top: 0,
        right: display.width,
        bottom: display.height,
    };
    FillRect(hdc, &full, GetSysColorBrush(COLOR_BTNFACE));

    SetBkMode(hdc, TRANSPARENT);
    SetTextColor(hdc, COLORREF(GetSysColor(COLOR_BTNTEXT)));

    let mut top = layout.block_top;
    draw_line(hdc, win.font_primary, &display.clock_text, top, layout.primary_height, display.width);

    // Blank line between the clock and the uptime caption.
    top += layout.primary_height + layout.secondary_height;
    draw_line(hdc, win.font_secondary, UPTIME_LABEL, top, layout.secondary_height, display.width);

    top += layout.secondary_height;
    draw_line(hdc, win.font_secondary, &display.uptime_text, top, layout.secondary_height, display.width);
}

/// Draw one horizontally centered line of text in its own cell.
unsafe fn draw_line(hdc: HDC, font: HFONT, text: &str, top: i32, height: i32, width: i32) {
    if height <= 0 || text.is_empty() || font.is_invalid() {
        return;
    }

    let old_font = SelectObject(hdc, font);
    let mut wide: Vec<u16> = text.encode_utf16().collect();
    let mut rect = RECT {
        left: 0,
        top,
        right: width,
        bottom: top + height,
    };
    // Draw failures are ignored; the next tick redraws.
    DrawTextW(hdc, &mut wide, &mut rect, DT_CENTER | DT_SINGLELINE | DT_NOPREFIX);
    SelectObject(hdc, old_font);
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `UclockError`.
///
/// Call immediately after a Win32 function that signals failure — `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> UclockError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    // It is always safe to call and never fails.
    let code = unsafe { GetLastError() };
    UclockError::Win32 {
        function,
        code: code.0,
    }
}
