// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface that the rest of the crate uses to talk to
// the native menu manager and the shell formatter.  No `unsafe` lives here;
// all Win32 FFI is confined to the `win32` sub-module and never leaks outward.
//
// Backends:
//   • `win32`          – one Win32 call per method (Windows only)
//   • `memory`         – in-process model of the menu manager, every target
//   • `portable_shell` – en-US shell formatter, every target

use std::{fmt, num::NonZeroUsize};

use bitflags::bitflags;

use crate::{error::Result, shell::DateFormat};

pub mod memory;
pub mod portable_shell;

#[cfg(windows)]
pub mod win32;

// ── Handles and locators ──────────────────────────────────────────────────────

/// A native menu handle value (`HMENU`).  Never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawMenu(NonZeroUsize);

impl RawMenu {
    /// Wrap a raw handle value; `None` for the null handle.
    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Addresses one entry of a menu, either by zero-based index or by command ID.
///
/// IDs survive reordering of the menu; indices do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    Position(u32),
    Command(u32),
}

impl Locator {
    /// Value of the `fByPosition` argument the native calls expect.
    pub fn by_position(self) -> bool {
        matches!(self, Self::Position(_))
    }

    pub fn value(self) -> u32 {
        match self {
            Self::Position(v) | Self::Command(v) => v,
        }
    }
}

// ── MENUITEMINFO mirror ───────────────────────────────────────────────────────

bitflags! {
    /// `MIIM_*`: which `ItemInfo` fields a call reads or writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InfoMask: u32 {
        const STATE   = 0x0001;
        const ID      = 0x0002;
        const SUBMENU = 0x0004;
        const STRING  = 0x0040;
        const FTYPE   = 0x0100;
    }
}

bitflags! {
    /// `MFT_*`: the item's type bits.  An empty set is `MFT_STRING`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ItemType: u32 {
        const BITMAP        = 0x0004;
        const MENUBARBREAK  = 0x0020;
        const MENUBREAK     = 0x0040;
        const OWNERDRAW     = 0x0100;
        const RADIOCHECK    = 0x0200;
        const SEPARATOR     = 0x0800;
        const RIGHTORDER    = 0x2000;
        const RIGHTJUSTIFY  = 0x4000;
    }
}

bitflags! {
    /// `MFS_*`: the item's state bits.  `MFS_GRAYED` is `GRAYED | DISABLED`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ItemState: u32 {
        const GRAYED   = 0x0001;
        const DISABLED = 0x0002;
        const CHECKED  = 0x0008;
        const HILITE   = 0x0080;
        const DEFAULT  = 0x1000;
    }
}

bitflags! {
    /// `GMDI_*` flags for `GetMenuDefaultItem`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DefaultItemFlags: u32 {
        const USE_DISABLED    = 0x0001;
        const GO_INTO_POPUPS  = 0x0002;
    }
}

/// How an item responds to selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selectability {
    Enabled,
    /// Unselectable but drawn normally.
    Disabled,
    /// Unselectable and drawn grayed out.
    Grayed,
}

impl Selectability {
    pub(crate) fn state_bits(self) -> ItemState {
        match self {
            Self::Enabled => ItemState::empty(),
            Self::Disabled => ItemState::DISABLED,
            Self::Grayed => ItemState::GRAYED | ItemState::DISABLED,
        }
    }
}

/// Rust-side copy of `MENUITEMINFOW`.  Only fields named in `mask` carry data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInfo {
    pub mask: InfoMask,
    pub kind: ItemType,
    pub state: ItemState,
    pub id: u32,
    pub sub_menu: Option<RawMenu>,
    pub text: Option<String>,
}

// ── Backend traits ────────────────────────────────────────────────────────────

/// The native menu manager.
///
/// Each method is a single native call.  Failures come back as
/// `MenuError::Native` naming the native function and carrying its error
/// code; nothing is retried or interpreted.
pub trait MenuApi: Clone + fmt::Debug {
    fn create_menu(&self) -> Result<RawMenu>;
    fn create_popup_menu(&self) -> Result<RawMenu>;
    /// Destroys `menu` and, recursively, every sub-menu attached to it.
    fn destroy_menu(&self, menu: RawMenu) -> Result<()>;

    /// Insert before the item at `at`.  `Position(n)` with `n >= count`
    /// appends.
    fn insert_menu_item(&self, menu: RawMenu, at: Locator, info: &ItemInfo) -> Result<()>;
    fn get_menu_item_info(&self, menu: RawMenu, at: Locator, mask: InfoMask) -> Result<ItemInfo>;
    fn set_menu_item_info(&self, menu: RawMenu, at: Locator, info: &ItemInfo) -> Result<()>;
    /// Detach the item; an attached sub-menu is not destroyed.
    fn remove_menu(&self, menu: RawMenu, at: Locator) -> Result<()>;

    fn get_menu_item_count(&self, menu: RawMenu) -> Result<u32>;
    fn is_menu(&self, menu: RawMenu) -> bool;
    fn enable_menu_item(&self, menu: RawMenu, at: Locator, state: Selectability) -> Result<()>;

    /// Position of the default item, or `None` if the menu has none.
    fn get_menu_default_item(&self, menu: RawMenu, flags: DefaultItemFlags) -> Option<u32>;
    /// `None` clears the default item.
    fn set_menu_default_item(&self, menu: RawMenu, item: Option<Locator>) -> Result<()>;
}

/// The shell's string formatters.
///
/// `capacity` is the size of the caller's buffer in UTF-16 units, including
/// the terminator; output that does not fit is a formatting failure.
pub trait ShellApi {
    /// `filetime` counts 100 ns intervals since 1601-01-01 UTC.
    fn format_date_time(&self, filetime: u64, flags: DateFormat, capacity: usize)
        -> Result<String>;
    fn format_kb_size(&self, size: i64, capacity: usize) -> Result<String>;
}
