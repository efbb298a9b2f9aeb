// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible startup operations return `error::Result<T>`.  No panics in
// production paths; errors surface as user-facing dialogs (see
// `platform::win32::window::show_error_dialog`).

/// Every error that uclock can produce.
#[derive(Debug)]
pub enum UclockError {
    /// A Win32 API call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },
}

impl std::fmt::Display for UclockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
        }
    }
}

impl std::error::Error for UclockError {}

// Convert a windows-crate error (HRESULT) directly into a UclockError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
impl From<windows::core::Error> for UclockError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        // Win32 errors appear as 0x8007xxxx HRESULTs.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UclockError>;
