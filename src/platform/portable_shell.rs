// ── Portable shell formatter ──────────────────────────────────────────────────
//
// Reproduces the en-US output of `SHFormatDateTime` and `StrFormatKBSize`
// without the Windows shell.  Dates are rendered in UTC; there is no time zone
// database behind this backend.

use chrono::{Days, NaiveDate, Utc};

use super::ShellApi;
use crate::{
    error::{MenuError, Result},
    shell::{from_filetime, DateFormat},
};

/// en-US shell formatter available on every target.
#[derive(Debug, Clone, Default)]
pub struct PortableShell {
    today: Option<NaiveDate>,
}

impl PortableShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the date that `DateFormat::RELATIVE` compares against.
    /// Without it the current UTC date is used.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn relative_word(&self, date: NaiveDate) -> Option<&'static str> {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        if date == today {
            Some("Today")
        } else if today.checked_sub_days(Days::new(1)) == Some(date) {
            Some("Yesterday")
        } else {
            None
        }
    }
}

/// Fail if `text` plus its terminator does not fit in `capacity` UTF-16 units.
fn fit(function: &'static str, text: String, capacity: usize) -> Result<String> {
    if text.encode_utf16().count() < capacity {
        Ok(text)
    } else {
        Err(MenuError::Format {
            function,
            reason: format!("result does not fit in {capacity} characters"),
        })
    }
}

/// Insert `,` between groups of three digits.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl ShellApi for PortableShell {
    fn format_date_time(
        &self,
        filetime: u64,
        flags: DateFormat,
        capacity: usize,
    ) -> Result<String> {
        const FUNCTION: &str = "SHFormatDateTime";
        let date = from_filetime(filetime).ok_or_else(|| MenuError::Format {
            function: FUNCTION,
            reason: "Couldn't convert date to a string".to_owned(),
        })?;

        // Neither a date nor a time requested: the shell falls back to DEFAULT.
        let wanted = DateFormat::SHORTDATE
            | DateFormat::LONGDATE
            | DateFormat::SHORTTIME
            | DateFormat::LONGTIME;
        let flags = if flags.intersects(wanted) {
            flags
        } else {
            flags | DateFormat::DEFAULT
        };

        let relative = if flags.contains(DateFormat::RELATIVE) {
            self.relative_word(date.date_naive())
        } else {
            None
        };

        let long_date = flags.contains(DateFormat::LONGDATE);
        let date_part = if long_date {
            let rest = date.format("%B %-d, %Y");
            Some(match relative {
                Some(word) => format!("{word}, {rest}"),
                None => format!("{}, {rest}", date.format("%A")),
            })
        } else if flags.contains(DateFormat::SHORTDATE) {
            Some(match relative {
                Some(word) => word.to_owned(),
                None => date.format("%-m/%-d/%Y").to_string(),
            })
        } else {
            None
        };

        let time_part = if flags.contains(DateFormat::LONGTIME) {
            Some(date.format("%-I:%M:%S %p").to_string())
        } else if flags.contains(DateFormat::SHORTTIME) {
            Some(date.format("%-I:%M %p").to_string())
        } else {
            None
        };

        let text = match (date_part, time_part) {
            (Some(d), Some(t)) if long_date => format!("{d}, {t}"),
            (Some(d), Some(t)) => format!("{d} {t}"),
            (Some(d), None) => d,
            (None, Some(t)) => t,
            (None, None) => String::new(),
        };
        fit(FUNCTION, text, capacity)
    }

    fn format_kb_size(&self, size: i64, capacity: usize) -> Result<String> {
        const FUNCTION: &str = "StrFormatKBSize";
        let bytes = u64::try_from(size).map_err(|_| MenuError::Format {
            function: FUNCTION,
            reason: format!("negative file size {size}"),
        })?;
        let kilobytes = bytes.div_ceil(1024);
        fit(FUNCTION, format!("{} KB", group_thousands(kilobytes)), capacity)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::shell::to_filetime;

    fn filetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> u64 {
        to_filetime(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()).unwrap()
    }

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn empty_flags_fall_back_to_default() {
        let shell = PortableShell::new();
        let ft = filetime(2059, 5, 13, 4, 36, 6);
        assert_eq!(
            shell.format_date_time(ft, DateFormat::empty(), 512).unwrap(),
            "5/13/2059 4:36 AM"
        );
    }

    #[test]
    fn afternoon_uses_pm() {
        let shell = PortableShell::new();
        let ft = filetime(2012, 12, 1, 16, 5, 0);
        assert_eq!(
            shell.format_date_time(ft, DateFormat::SHORTTIME, 512).unwrap(),
            "4:05 PM"
        );
    }

    #[test]
    fn relative_short_date_says_yesterday() {
        let shell = PortableShell::new().with_today(NaiveDate::from_ymd_opt(2059, 5, 14).unwrap());
        let ft = filetime(2059, 5, 13, 4, 36, 6);
        assert_eq!(
            shell
                .format_date_time(ft, DateFormat::DEFAULT | DateFormat::RELATIVE, 512)
                .unwrap(),
            "Yesterday 4:36 AM"
        );
    }

    #[test]
    fn relative_flag_ignored_for_older_dates() {
        let shell = PortableShell::new().with_today(NaiveDate::from_ymd_opt(2060, 1, 1).unwrap());
        let ft = filetime(2059, 5, 13, 4, 36, 6);
        assert_eq!(
            shell
                .format_date_time(ft, DateFormat::SHORTDATE | DateFormat::RELATIVE, 512)
                .unwrap(),
            "5/13/2059"
        );
    }

    #[test]
    fn output_must_fit_the_buffer() {
        let shell = PortableShell::new();
        let ft = filetime(2059, 5, 13, 4, 36, 6);
        let err = shell.format_date_time(ft, DateFormat::DEFAULT, 8).unwrap_err();
        assert_eq!(err.function(), Some("SHFormatDateTime"));

        let err = shell.format_kb_size(1 << 40, 4).unwrap_err();
        assert_eq!(err.function(), Some("StrFormatKBSize"));
    }

    #[test]
    fn zero_and_negative_sizes() {
        let shell = PortableShell::new();
        assert_eq!(shell.format_kb_size(0, 64).unwrap(), "0 KB");
        assert_eq!(shell.format_kb_size(1, 64).unwrap(), "1 KB");
        assert!(shell.format_kb_size(-1, 64).is_err());
    }
}
