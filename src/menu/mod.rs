// ── Menus ─────────────────────────────────────────────────────────────────────
//
// `Menu` is an ordered view over a native menu handle.  It keeps no copy of
// item state: inserts, enable/disable and default-item changes go straight to
// the native menu, and reads come straight back from it.

pub mod handle;
pub mod item;
pub mod position;
pub mod template;
pub mod visitor;

use log::trace;

use crate::{
    error::{MenuError, Result},
    platform::{
        DefaultItemFlags, InfoMask, ItemInfo, ItemType, Locator, MenuApi, RawMenu, Selectability,
    },
};
use handle::{MenuHandle, Ownership};
use position::ItemPosition;

// ── Item descriptions ─────────────────────────────────────────────────────────

/// A new entry to insert into a menu.
#[derive(Debug)]
pub enum ItemDescription<A: MenuApi> {
    Command {
        text: String,
        id: u32,
    },
    Separator,
    /// Inserting consumes `menu` and hands its ownership to the parent, which
    /// destroys it along with itself.  `menu` must be owning.
    SubMenu {
        text: String,
        id: u32,
        menu: Menu<A>,
    },
}

impl<A: MenuApi> ItemDescription<A> {
    pub fn command(text: impl Into<String>, id: u32) -> Self {
        Self::Command {
            text: text.into(),
            id,
        }
    }

    pub fn separator() -> Self {
        Self::Separator
    }

    pub fn sub_menu(text: impl Into<String>, id: u32, menu: Menu<A>) -> Self {
        Self::SubMenu {
            text: text.into(),
            id,
            menu,
        }
    }

    fn into_native(self) -> (ItemInfo, Option<Menu<A>>) {
        match self {
            Self::Command { text, id } => (
                ItemInfo {
                    mask: InfoMask::FTYPE | InfoMask::ID | InfoMask::STRING,
                    id,
                    text: Some(text),
                    ..ItemInfo::default()
                },
                None,
            ),
            Self::Separator => (
                ItemInfo {
                    mask: InfoMask::FTYPE,
                    kind: ItemType::SEPARATOR,
                    ..ItemInfo::default()
                },
                None,
            ),
            Self::SubMenu { text, id, menu } => (
                ItemInfo {
                    mask: InfoMask::FTYPE | InfoMask::ID | InfoMask::STRING | InfoMask::SUBMENU,
                    id,
                    sub_menu: Some(menu.raw()),
                    text: Some(text),
                    ..ItemInfo::default()
                },
                Some(menu),
            ),
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

/// A menu bar, drop-down or context menu.
///
/// Equality compares native handles, so an owning menu equals any foster view
/// of it.
#[derive(Debug)]
pub struct Menu<A: MenuApi> {
    handle: MenuHandle<A>,
}

impl<A: MenuApi> PartialEq for Menu<A> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<A: MenuApi> Eq for Menu<A> {}

impl<A: MenuApi> Menu<A> {
    /// Create an empty menu bar.
    pub fn new(api: A) -> Result<Self> {
        Ok(Self::from_handle(MenuHandle::create(api)?))
    }

    /// Create an empty drop-down or context menu.
    pub fn popup(api: A) -> Result<Self> {
        Ok(Self::from_handle(MenuHandle::create_popup(api)?))
    }

    /// View a menu owned elsewhere; dropping the view leaves it alive.
    pub fn foster(api: A, raw: RawMenu) -> Self {
        Self::from_handle(MenuHandle::foster(api, raw))
    }

    pub fn from_handle(handle: MenuHandle<A>) -> Self {
        Self { handle }
    }

    /// A non-owning view of this menu.
    pub fn foster_view(&self) -> Self {
        Self::foster(self.api().clone(), self.raw())
    }

    pub fn raw(&self) -> RawMenu {
        self.handle.raw()
    }

    pub fn api(&self) -> &A {
        self.handle.api()
    }

    pub fn ownership(&self) -> Ownership {
        self.handle.ownership()
    }

    /// Give up ownership and return the raw handle; see [`MenuHandle::into_raw`].
    pub fn into_raw(self) -> RawMenu {
        self.handle.into_raw()
    }

    /// Whether the handle still refers to a live native menu.
    pub fn valid(&self) -> bool {
        self.api().is_menu(self.raw())
    }

    /// Number of entries, separators included.
    pub fn size(&self) -> Result<u32> {
        self.api().get_menu_item_count(self.raw())
    }

    /// Iterate over the entries by position.
    ///
    /// The iterator is bounded by the entry count at the time of the call and
    /// is lazy: nothing is read from an entry until it is used.  Positions
    /// shift if the menu is changed while iterating.
    pub fn iter(&self) -> Result<Items<A>> {
        Ok(Items {
            api: self.api().clone(),
            menu: self.raw(),
            next: 0,
            end: self.size()?,
        })
    }

    /// The entry at `index`.  Not checked until used.
    pub fn item(&self, index: u32) -> ItemPosition<A> {
        ItemPosition::by_index(self.api().clone(), self.raw(), index)
    }

    /// The entry whose command ID is `id`, searching nested menus as well.
    /// Not checked until used.
    pub fn by_id(&self, id: u32) -> ItemPosition<A> {
        ItemPosition::by_id(self.api().clone(), self.raw(), id)
    }

    /// Insert `description` before the entry at `index`, or at the end for
    /// `None`.  Returns the new entry's position.
    ///
    /// A sub-menu must be handed over by its owner: a foster view is refused
    /// with [`MenuError::SubMenuNotOwned`], since the parent would destroy a
    /// menu that someone else still owns.
    pub fn insert(
        &self,
        description: ItemDescription<A>,
        index: Option<u32>,
    ) -> Result<ItemPosition<A>> {
        if let ItemDescription::SubMenu { menu, .. } = &description {
            if menu.ownership() != Ownership::Owned {
                return Err(MenuError::SubMenuNotOwned {
                    menu: menu.raw().get(),
                });
            }
        }
        let count = self.size()?;
        let index = index.map_or(count, |i| i.min(count));
        let (info, child) = description.into_native();

        trace!("insert {:?} at {index} in menu {:#x}", info.kind, self.raw().get());
        self.api().insert_menu_item(self.raw(), Locator::Position(index), &info)?;

        // The parent now destroys the child; dropping an owning child here
        // would destroy it twice.
        if let Some(child) = child {
            child.into_raw();
        }
        Ok(self.item(index))
    }

    /// Add `description` after the last entry.
    pub fn append(&self, description: ItemDescription<A>) -> Result<ItemPosition<A>> {
        self.insert(description, None)
    }

    /// Detach an entry from the menu.
    ///
    /// If the entry opened a nested menu, that menu survives and is returned as
    /// an owning `Menu`.
    pub fn remove(&self, at: Locator) -> Result<Option<Menu<A>>> {
        let nested = self
            .api()
            .get_menu_item_info(self.raw(), at, InfoMask::SUBMENU)?
            .sub_menu;
        self.api().remove_menu(self.raw(), at)?;
        Ok(nested.map(|raw| Self::from_handle(MenuHandle::adopt(self.api().clone(), raw))))
    }

    pub fn enable_item(&self, at: Locator, state: Selectability) -> Result<()> {
        self.api().enable_menu_item(self.raw(), at, state)
    }

    /// The default (bold) entry, if any.  Disabled defaults are reported too.
    pub fn default_item(&self) -> Option<ItemPosition<A>> {
        self.api()
            .get_menu_default_item(self.raw(), DefaultItemFlags::USE_DISABLED)
            .map(|index| self.item(index))
    }

    /// Make `at` the default entry, or clear the default with `None`.
    pub fn set_default_item(&self, at: Option<Locator>) -> Result<()> {
        self.api().set_menu_default_item(self.raw(), at)
    }
}

// ── Items ─────────────────────────────────────────────────────────────────────

/// Positional iterator over a menu's entries; see [`Menu::iter`].
///
/// Clone it to walk the same range again.
#[derive(Debug, Clone)]
pub struct Items<A: MenuApi> {
    api: A,
    menu: RawMenu,
    next: u32,
    end: u32,
}

impl<A: MenuApi> Iterator for Items<A> {
    type Item = ItemPosition<A>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let position = ItemPosition::by_index(self.api.clone(), self.menu, self.next);
        self.next += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.end - self.next) as usize;
        (left, Some(left))
    }
}

impl<A: MenuApi> ExactSizeIterator for Items<A> {}

// ── Tests ─────────────────────────────────────────────────────────────────────
