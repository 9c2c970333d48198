// ── Win32 shell formatters ────────────────────────────────────────────────────

#![allow(unsafe_code)]

use windows::Win32::{
    Foundation::FILETIME,
    UI::Shell::{SHFormatDateTimeW, StrFormatKBSizeW},
};

use crate::{
    error::{MenuError, Result},
    platform::ShellApi,
    shell::DateFormat,
};

/// The Windows shell's own formatters, honouring the user's locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Shell;

impl Win32Shell {
    pub fn new() -> Self {
        Self
    }
}

/// Text up to the first NUL.
fn until_nul(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

impl ShellApi for Win32Shell {
    fn format_date_time(
        &self,
        filetime: u64,
        flags: DateFormat,
        capacity: usize,
    ) -> Result<String> {
        let ft = FILETIME {
            dwLowDateTime: filetime as u32,
            dwHighDateTime: (filetime >> 32) as u32,
        };
        let mut buf = vec![0u16; capacity];
        // The call may rewrite the flags; this is a local copy.
        let mut flags = flags.bits();

        // SAFETY: `ft` is a valid FILETIME, `flags` a writable u32, and `buf`
        // a writable buffer whose length is passed alongside it.
        let written = unsafe { SHFormatDateTimeW(&ft, Some(&mut flags as *mut u32), &mut buf) };
        if written == 0 {
            return Err(MenuError::Format {
                function: "SHFormatDateTime",
                reason: "Couldn't convert date to a string".to_owned(),
            });
        }
        // Some Windows versions leave the terminator out of `written`, so the
        // buffer is measured instead of trusting the count.
        Ok(until_nul(&buf))
    }

    fn format_kb_size(&self, size: i64, capacity: usize) -> Result<String> {
        let mut buf = vec![0u16; capacity];
        // SAFETY: `buf` is writable and its length is passed alongside it.
        let out = unsafe { StrFormatKBSizeW(size, &mut buf) };
        if out.is_null() {
            return Err(MenuError::Format {
                function: "StrFormatKBSize",
                reason: format!("couldn't format {size} as a size"),
            });
        }
        Ok(until_nul(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilobytes_end_with_unit() {
        let s = Win32Shell::new().format_kb_size(3023 * 1024, 64).unwrap();
        assert!(s.starts_with("3") && s.ends_with("KB"), "{s}");
    }

    #[test]
    fn date_is_non_empty() {
        // 2059-05-13T04:36:06Z
        let ft = 144_644_997_660_000_000u64;
        let s = Win32Shell::new()
            .format_date_time(ft, DateFormat::DEFAULT, 512)
            .unwrap();
        assert!(s.contains("2059"), "{s}");
    }
}
