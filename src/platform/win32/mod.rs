// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is the only module in the crate where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::Win32::{
    Foundation::GetLastError,
    UI::WindowsAndMessaging::HMENU,
};

use crate::{error::MenuError, platform::RawMenu};

// ── Sub-modules ───────────────────────────────────────────────────────────────

mod menu; // CreateMenu, InsertMenuItemW, GetMenuItemInfoW, …
mod shell; // SHFormatDateTimeW, StrFormatKBSizeW

pub use menu::Win32Menus;
pub use shell::Win32Shell;

// ── Handle conversion ─────────────────────────────────────────────────────────

fn to_hmenu(menu: RawMenu) -> HMENU {
    HMENU(menu.get() as *mut c_void)
}

fn from_hmenu(hmenu: HMENU) -> Option<RawMenu> {
    RawMenu::new(hmenu.0 as usize)
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `MenuError`.
///
/// Call immediately after a Win32 function that signals failure: `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> MenuError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    // It is always safe to call and never fails.
    let code = unsafe { GetLastError() };
    MenuError::Native {
        function,
        code: code.0,
    }
}

/// Tag a windows-crate error with the failing function.
///
/// The crate already folded `GetLastError()` into an HRESULT; unwrap
/// `HRESULT_FROM_WIN32` so callers see the same code `last_error` reports.
fn native(function: &'static str, e: windows::core::Error) -> MenuError {
    let hr = e.code().0 as u32;
    let code = if hr & 0xFFFF_0000 == 0x8007_0000 {
        hr & 0xFFFF
    } else {
        hr
    };
    MenuError::Native { function, code }
}
