// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 FFI).
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Ownership-aware facades over the Win32 menu API and two Shell formatters.
//!
//! * [`Menu`] wraps a native menu handle that is either owned (destroyed on
//!   drop) or fostered (owned elsewhere).
//! * [`ItemPosition`] locates an entry by index or command ID and re-reads the
//!   native item on every access.
//! * [`MenuVisitor`] dispatches over the three entry kinds: separator,
//!   command and sub-menu.  [`Selectable`] adapts a [`SelectableVisitor`],
//!   which handles commands and sub-menus with one method.
//! * [`shell`] formats dates and file sizes the way Explorer does.
//!
//! Every native call goes through a backend: [`Win32Menus`] / [`Win32Shell`]
//! on Windows, or the portable [`MemoryMenus`] / [`PortableShell`] anywhere.
//!
//! ```
//! use menuwright::{ItemDescription, Menu, MemoryMenus, SelectableItem};
//! use menuwright::menu::item::CommandItem;
//!
//! let api = MemoryMenus::new();
//! let file = Menu::popup(api.clone())?;
//! file.append(ItemDescription::command("E&xit", 1001))?;
//!
//! let exit = CommandItem::new(file.by_id(1001));
//! assert_eq!(exit.text()?, "E&xit");
//! # Ok::<(), menuwright::MenuError>(())
//! ```

pub mod error;
pub mod menu;
pub mod platform;
pub mod shell;

pub use error::{MenuError, Result};
pub use menu::{
    handle::{MenuHandle, Ownership},
    item::{Button, CheckMark, SelectableItem},
    position::ItemPosition,
    template::{ItemTemplate, MenuTemplate},
    visitor::{Item, MenuVisitor, Selectable, SelectableVisitor},
    ItemDescription, Items, Menu,
};
pub use platform::{
    memory::MemoryMenus, portable_shell::PortableShell, Locator, MenuApi, RawMenu,
    Selectability, ShellApi,
};
pub use shell::{format_date_time, format_filesize_kilobytes, DateFormat};

#[cfg(windows)]
pub use platform::win32::{Win32Menus, Win32Shell};
