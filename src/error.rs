// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in menuwright return `error::Result<T>`.  Nothing
// catches or retries; every failure reaches the immediate caller unchanged.
// Broken invariants (e.g. a sub-menu item without a nested menu) panic instead.

/// Every error that menuwright can produce.
#[derive(Debug)]
pub enum MenuError {
    /// A native menu call returned a failure code.
    Native {
        /// The name of the failing function, e.g. `"GetMenuItemInfo"`.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// A shell formatting call could not produce a string.
    Format {
        function: &'static str,
        reason: String,
    },

    /// Native item metadata fits none of separator, sub-menu or command.
    UnclassifiableItem {
        /// Raw `fType` bits read from the item.
        kind: u32,
        has_sub_menu: bool,
    },

    /// A sub-menu was offered to a parent by a wrapper that does not own it.
    SubMenuNotOwned {
        /// Raw handle value of the refused menu.
        menu: usize,
    },

    /// A menu template could not be parsed or written.
    Template(serde_json::Error),
}

impl MenuError {
    /// The native function that failed, if the error came from one.
    pub fn function(&self) -> Option<&'static str> {
        match self {
            Self::Native { function, .. } | Self::Format { function, .. } => Some(*function),
            Self::UnclassifiableItem { .. } | Self::SubMenuNotOwned { .. } | Self::Template(_) => {
                None
            }
        }
    }
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::Format { function, reason } => write!(f, "{function} failed: {reason}"),
            Self::UnclassifiableItem { kind, has_sub_menu } => write!(
                f,
                "menu item is neither separator, sub-menu nor command \
                 (type {kind:#x}, sub-menu {has_sub_menu})"
            ),
            Self::SubMenuNotOwned { menu } => write!(
                f,
                "menu {menu:#x} is not owned here and cannot become a sub-menu"
            ),
            Self::Template(e) => write!(f, "menu template error: {e}"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Template(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(e: serde_json::Error) -> Self {
        Self::Template(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_error_names_function_and_code() {
        let e = MenuError::Native {
            function: "GetMenuItemInfo",
            code: 1456,
        };
        assert_eq!(e.to_string(), "GetMenuItemInfo failed (error 0x000005b0)");
        assert_eq!(e.function(), Some("GetMenuItemInfo"));
    }

    #[test]
    fn refused_sub_menu_names_the_handle() {
        let e = MenuError::SubMenuNotOwned { menu: 0x1010 };
        assert_eq!(
            e.to_string(),
            "menu 0x1010 is not owned here and cannot become a sub-menu"
        );
        assert_eq!(e.function(), None);
    }

    #[test]
    fn template_error_exposes_source() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e = MenuError::from(json_err);
        assert!(std::error::Error::source(&e).is_some());
        assert_eq!(e.function(), None);
    }
}
