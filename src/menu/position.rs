// ── Item position ─────────────────────────────────────────────────────────────
//
// A locator, not a snapshot: every read and write goes back to the native
// menu.  Two positions built at different times may disagree if the menu
// changed in between, and a by-position locator follows whatever item sits at
// that index now.

use crate::{
    error::Result,
    platform::{InfoMask, ItemInfo, Locator, MenuApi, RawMenu},
};

/// One entry of a native menu, addressed by index or by command ID.
#[derive(Debug, Clone)]
pub struct ItemPosition<A: MenuApi> {
    api: A,
    menu: RawMenu,
    at: Locator,
}

impl<A: MenuApi> ItemPosition<A> {
    pub fn new(api: A, menu: RawMenu, at: Locator) -> Self {
        Self { api, menu, at }
    }

    pub fn by_index(api: A, menu: RawMenu, index: u32) -> Self {
        Self::new(api, menu, Locator::Position(index))
    }

    pub fn by_id(api: A, menu: RawMenu, id: u32) -> Self {
        Self::new(api, menu, Locator::Command(id))
    }

    pub fn locator(&self) -> Locator {
        self.at
    }

    /// The menu this position was resolved against.  For a by-ID locator the
    /// item may actually live in one of that menu's sub-menus.
    pub fn menu_raw(&self) -> RawMenu {
        self.menu
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the fields named by `mask` from the native menu.
    pub fn get(&self, mask: InfoMask) -> Result<ItemInfo> {
        self.api.get_menu_item_info(self.menu, self.at, mask)
    }

    /// Write the fields named by `info.mask` back to the native menu.
    pub fn set(&self, info: &ItemInfo) -> Result<()> {
        self.api.set_menu_item_info(self.menu, self.at, info)
    }
}
