// ── Shell string formatting ───────────────────────────────────────────────────
//
// Stateless helpers over `SHFormatDateTime` and `StrFormatKBSize`.  Both write
// into fixed-size buffers; output that does not fit is an error rather than a
// truncated string.

use bitflags::bitflags;
use chrono::{DateTime, Utc};

use crate::{
    error::{MenuError, Result},
    platform::ShellApi,
};

/// Buffer size, in UTF-16 units, handed to `SHFormatDateTime`.
pub const DATE_BUFFER_LEN: usize = 512;

/// Buffer size, in UTF-16 units, handed to `StrFormatKBSize`.
pub const SIZE_BUFFER_LEN: usize = 64;

/// Seconds between 1601-01-01 (FILETIME epoch) and 1970-01-01 (Unix epoch).
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

/// FILETIME resolution: 100 ns ticks per second.
const TICKS_PER_SEC: i64 = 10_000_000;

bitflags! {
    /// `FDTF_*` flags for `SHFormatDateTime`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DateFormat: u32 {
        /// e.g. `4:36 AM`
        const SHORTTIME          = 0x0001;
        /// e.g. `5/13/2059`
        const SHORTDATE          = 0x0002;
        /// e.g. `Tuesday, May 13, 2059`
        const LONGDATE           = 0x0004;
        /// e.g. `4:36:06 AM`
        const LONGTIME           = 0x0008;
        /// Replace the date with "Today"/"Yesterday" where it applies.
        const RELATIVE           = 0x0010;
        const LTRDATE            = 0x0100;
        const RTLDATE            = 0x0200;
        const NOAUTOREADINGORDER = 0x0400;

        const DEFAULT = Self::SHORTDATE.bits() | Self::SHORTTIME.bits();
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Convert a UTC timestamp to a FILETIME tick count.
///
/// Fails for instants before 1601-01-01, which FILETIME cannot represent.
pub fn to_filetime(date: DateTime<Utc>) -> Result<u64> {
    let secs = date.timestamp() + FILETIME_UNIX_OFFSET_SECS;
    let ticks = secs
        .checked_mul(TICKS_PER_SEC)
        .and_then(|t| t.checked_add(i64::from(date.timestamp_subsec_nanos() / 100)))
        .filter(|t| *t >= 0);
    match ticks {
        Some(t) => Ok(t as u64),
        None => Err(MenuError::Format {
            function: "SHFormatDateTime",
            reason: format!("{date} cannot be expressed as a FILETIME"),
        }),
    }
}

/// Inverse of [`to_filetime`].
pub fn from_filetime(ticks: u64) -> Option<DateTime<Utc>> {
    let ticks = i64::try_from(ticks).ok()?;
    let secs = ticks / TICKS_PER_SEC - FILETIME_UNIX_OFFSET_SECS;
    let nanos = (ticks % TICKS_PER_SEC) as u32 * 100;
    DateTime::from_timestamp(secs, nanos)
}

/// Format a date the way the Windows shell displays it.
///
/// Example output for 2059-05-13 04:36:06 on an en-US system:
///
/// | flags                              | result                            |
/// |------------------------------------|-----------------------------------|
/// | `DEFAULT`                          | `5/13/2059 4:36 AM`               |
/// | `LONGDATE \| SHORTTIME`            | `Tuesday, May 13, 2059, 4:36 AM`  |
/// | `LONGDATE \| LONGTIME \| RELATIVE` | `Today, May 13, 2059, 4:36:06 AM` |
///
/// The result is bounded by [`DATE_BUFFER_LEN`].  Corresponds to
/// `SHFormatDateTime`.
pub fn format_date_time<S: ShellApi>(
    shell: &S,
    date: DateTime<Utc>,
    flags: DateFormat,
) -> Result<String> {
    let filetime = to_filetime(date)?;
    shell.format_date_time(filetime, flags, DATE_BUFFER_LEN)
}

/// Format a byte count as a size in kilobytes, e.g. `3,023 KB`.
///
/// Corresponds to `StrFormatKBSize`; the exact digit grouping depends on the
/// backend's locale.  The count is in bytes and partial kilobytes round up,
/// so `3023` formats as `3 KB`; `3,023 KB` is the output for `3023 * 1024`
/// bytes.
pub fn format_filesize_kilobytes<S: ShellApi>(shell: &S, file_size: i64) -> Result<String> {
    shell.format_kb_size(file_size, SIZE_BUFFER_LEN)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
