// ── In-process menu manager ───────────────────────────────────────────────────
//
// `MemoryMenus` models the parts of the Win32 menu manager that the facade
// relies on: handle validity, by-position vs by-command addressing (by-command
// searches nested menus depth-first), recursive destruction of sub-menus, and
// the error codes Win32 reports.  No `unsafe`.
//
// Clones share one registry, so a menu created through one clone is visible
// through every other.  `Rc` keeps the whole model on one thread, like the
// native handles it stands in for.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use log::trace;

use super::{
    DefaultItemFlags, InfoMask, ItemInfo, ItemState, ItemType, Locator, MenuApi, RawMenu,
    Selectability,
};
use crate::error::{MenuError, Result};

// ── Win32 error codes reproduced by the model ────────────────────────────────

pub const ERROR_INVALID_PARAMETER: u32 = 87;
pub const ERROR_INVALID_MENU_HANDLE: u32 = 1401;
pub const ERROR_MENU_ITEM_NOT_FOUND: u32 = 1456;

/// First handle value handed out; keeps handles visibly non-null.
const FIRST_HANDLE: usize = 0x1000;
const HANDLE_STRIDE: usize = 0x10;

// ── Registry ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct ItemRecord {
    kind: ItemType,
    state: ItemState,
    id: u32,
    sub_menu: Option<RawMenu>,
    text: String,
}

#[derive(Debug, Default)]
struct MenuRecord {
    popup: bool,
    items: Vec<ItemRecord>,
}

#[derive(Debug)]
struct Registry {
    next_handle: usize,
    menus: HashMap<RawMenu, MenuRecord>,
    /// Destruction count per handle, for tests.  Entries are never removed,
    /// so this grows by one for every menu ever destroyed.
    destroyed: HashMap<RawMenu, u32>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            next_handle: FIRST_HANDLE,
            menus: HashMap::new(),
            destroyed: HashMap::new(),
        }
    }
}

impl Registry {
    fn allocate(&mut self, popup: bool) -> RawMenu {
        let raw = RawMenu::new(self.next_handle)
            .unwrap_or_else(|| unreachable!("handles start above zero"));
        self.next_handle += HANDLE_STRIDE;
        self.menus.insert(
            raw,
            MenuRecord {
                popup,
                items: Vec::new(),
            },
        );
        raw
    }

    fn menu(&self, function: &'static str, menu: RawMenu) -> Result<&MenuRecord> {
        self.menus.get(&menu).ok_or(MenuError::Native {
            function,
            code: ERROR_INVALID_MENU_HANDLE,
        })
    }

    /// Resolve `at` to the menu that holds the item and its index there.
    fn resolve(&self, function: &'static str, menu: RawMenu, at: Locator) -> Result<(RawMenu, usize)> {
        let record = self.menu(function, menu)?;
        let found = match at {
            Locator::Position(index) => {
                let index = index as usize;
                (index < record.items.len()).then_some((menu, index))
            }
            Locator::Command(id) => self.find_command(menu, id),
        };
        found.ok_or(MenuError::Native {
            function,
            code: ERROR_MENU_ITEM_NOT_FOUND,
        })
    }

    fn find_command(&self, menu: RawMenu, id: u32) -> Option<(RawMenu, usize)> {
        let record = self.menus.get(&menu)?;
        for (index, item) in record.items.iter().enumerate() {
            if item.id == id && !item.kind.contains(ItemType::SEPARATOR) {
                return Some((menu, index));
            }
            if let Some(found) = item.sub_menu.and_then(|sub| self.find_command(sub, id)) {
                return Some(found);
            }
        }
        None
    }

    fn item_mut(&mut self, menu: RawMenu, index: usize) -> &mut ItemRecord {
        // Callers resolve (menu, index) first; both are valid here.
        &mut self
            .menus
            .get_mut(&menu)
            .unwrap_or_else(|| unreachable!("resolved menu vanished"))
            .items[index]
    }

    /// Validate the nested menu `info` would attach to `parent`: it must exist
    /// and must not be `parent` or one of `parent`'s ancestors.
    fn check_sub_menu(
        &self,
        function: &'static str,
        parent: RawMenu,
        info: &ItemInfo,
    ) -> Result<()> {
        if !info.mask.contains(InfoMask::SUBMENU) {
            return Ok(());
        }
        let Some(sub) = info.sub_menu else {
            return Ok(());
        };
        self.menu(function, sub)?;
        if self.reaches(sub, parent) {
            return Err(MenuError::Native {
                function,
                code: ERROR_INVALID_PARAMETER,
            });
        }
        Ok(())
    }

    /// Whether `target` is `from` or nested anywhere below it.
    fn reaches(&self, from: RawMenu, target: RawMenu) -> bool {
        let mut pending = vec![from];
        let mut seen = Vec::new();
        while let Some(menu) = pending.pop() {
            if menu == target {
                return true;
            }
            if seen.contains(&menu) {
                continue;
            }
            seen.push(menu);
            if let Some(record) = self.menus.get(&menu) {
                pending.extend(record.items.iter().filter_map(|item| item.sub_menu));
            }
        }
        false
    }

    fn destroy(&mut self, menu: RawMenu) -> Result<()> {
        let record = self.menus.remove(&menu).ok_or(MenuError::Native {
            function: "DestroyMenu",
            code: ERROR_INVALID_MENU_HANDLE,
        })?;
        *self.destroyed.entry(menu).or_default() += 1;
        for sub in record.items.iter().filter_map(|item| item.sub_menu) {
            // A sub-menu may already be gone if its handle was destroyed
            // directly while still attached; Windows tolerates that too.
            let _ = self.destroy(sub);
        }
        Ok(())
    }
}

fn apply(item: &mut ItemRecord, info: &ItemInfo) {
    if info.mask.contains(InfoMask::FTYPE) {
        item.kind = info.kind;
    }
    if info.mask.contains(InfoMask::STATE) {
        item.state = info.state;
    }
    if info.mask.contains(InfoMask::ID) {
        item.id = info.id;
    }
    if info.mask.contains(InfoMask::SUBMENU) {
        item.sub_menu = info.sub_menu;
    }
    if info.mask.contains(InfoMask::STRING) {
        item.text = info.text.clone().unwrap_or_default();
    }
}

// ── MemoryMenus ───────────────────────────────────────────────────────────────

/// Portable stand-in for the Win32 menu manager.
#[derive(Debug, Clone, Default)]
pub struct MemoryMenus {
    registry: Rc<RefCell<Registry>>,
}

impl MemoryMenus {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `menu` has been destroyed.
    pub fn destroy_count(&self, menu: RawMenu) -> u32 {
        self.registry
            .borrow()
            .destroyed
            .get(&menu)
            .copied()
            .unwrap_or(0)
    }

    /// Number of menus that exist and have not been destroyed.
    pub fn live_menus(&self) -> usize {
        self.registry.borrow().menus.len()
    }

    /// Whether `menu` was created with `create_popup_menu`.
    pub fn is_popup(&self, menu: RawMenu) -> bool {
        self.registry
            .borrow()
            .menus
            .get(&menu)
            .is_some_and(|record| record.popup)
    }
}

impl MenuApi for MemoryMenus {
    fn create_menu(&self) -> Result<RawMenu> {
        Ok(self.registry.borrow_mut().allocate(false))
    }

    fn create_popup_menu(&self) -> Result<RawMenu> {
        Ok(self.registry.borrow_mut().allocate(true))
    }

    fn destroy_menu(&self, menu: RawMenu) -> Result<()> {
        self.registry.borrow_mut().destroy(menu)
    }

    fn insert_menu_item(&self, menu: RawMenu, at: Locator, info: &ItemInfo) -> Result<()> {
        const FUNCTION: &str = "InsertMenuItem";
        let mut registry = self.registry.borrow_mut();
        let (target, index) = match at {
            Locator::Position(index) => {
                let len = registry.menu(FUNCTION, menu)?.items.len();
                (menu, (index as usize).min(len))
            }
            Locator::Command(_) => registry.resolve(FUNCTION, menu, at)?,
        };
        registry.check_sub_menu(FUNCTION, target, info)?;

        let mut item = ItemRecord::default();
        apply(&mut item, info);
        trace!("insert {:?} into menu {:#x} at {index}", item.kind, target.get());
        registry
            .menus
            .get_mut(&target)
            .unwrap_or_else(|| unreachable!("resolved menu vanished"))
            .items
            .insert(index, item);
        Ok(())
    }

    fn get_menu_item_info(&self, menu: RawMenu, at: Locator, mask: InfoMask) -> Result<ItemInfo> {
        let registry = self.registry.borrow();
        let (target, index) = registry.resolve("GetMenuItemInfo", menu, at)?;
        let item = &registry.menus[&target].items[index];

        let mut info = ItemInfo {
            mask,
            ..ItemInfo::default()
        };
        if mask.contains(InfoMask::FTYPE) {
            info.kind = item.kind;
        }
        if mask.contains(InfoMask::STATE) {
            info.state = item.state;
        }
        if mask.contains(InfoMask::ID) {
            info.id = item.id;
        }
        if mask.contains(InfoMask::SUBMENU) {
            info.sub_menu = item.sub_menu;
        }
        if mask.contains(InfoMask::STRING) {
            info.text = Some(item.text.clone());
        }
        Ok(info)
    }

    fn set_menu_item_info(&self, menu: RawMenu, at: Locator, info: &ItemInfo) -> Result<()> {
        const FUNCTION: &str = "SetMenuItemInfo";
        let mut registry = self.registry.borrow_mut();
        let (target, index) = registry.resolve(FUNCTION, menu, at)?;
        registry.check_sub_menu(FUNCTION, target, info)?;
        apply(registry.item_mut(target, index), info);
        Ok(())
    }

    fn remove_menu(&self, menu: RawMenu, at: Locator) -> Result<()> {
        let mut registry = self.registry.borrow_mut();
        let (target, index) = registry.resolve("RemoveMenu", menu, at)?;
        if let Some(record) = registry.menus.get_mut(&target) {
            record.items.remove(index);
        }
        Ok(())
    }

    fn get_menu_item_count(&self, menu: RawMenu) -> Result<u32> {
        let registry = self.registry.borrow();
        let len = registry.menu("GetMenuItemCount", menu)?.items.len();
        u32::try_from(len).map_err(|_| MenuError::Native {
            function: "GetMenuItemCount",
            code: ERROR_INVALID_PARAMETER,
        })
    }

    fn is_menu(&self, menu: RawMenu) -> bool {
        self.registry.borrow().menus.contains_key(&menu)
    }

    fn enable_menu_item(&self, menu: RawMenu, at: Locator, state: Selectability) -> Result<()> {
        let mut registry = self.registry.borrow_mut();
        let (target, index) = registry.resolve("EnableMenuItem", menu, at)?;
        let item = registry.item_mut(target, index);
        item.state.remove(ItemState::GRAYED | ItemState::DISABLED);
        item.state.insert(state.state_bits());
        Ok(())
    }

    /// `GO_INTO_POPUPS` is accepted but not followed; the position returned
    /// is always one of `menu`'s own items.
    fn get_menu_default_item(&self, menu: RawMenu, flags: DefaultItemFlags) -> Option<u32> {
        let registry = self.registry.borrow();
        let record = registry.menus.get(&menu)?;
        let (index, item) = record
            .items
            .iter()
            .enumerate()
            .find(|(_, item)| item.state.contains(ItemState::DEFAULT))?;
        let disabled = item.state.intersects(ItemState::GRAYED | ItemState::DISABLED);
        if disabled && !flags.contains(DefaultItemFlags::USE_DISABLED) {
            return None;
        }
        u32::try_from(index).ok()
    }

    fn set_menu_default_item(&self, menu: RawMenu, item: Option<Locator>) -> Result<()> {
        const FUNCTION: &str = "SetMenuDefaultItem";
        let mut registry = self.registry.borrow_mut();
        // The default item must belong to `menu` itself, not a nested menu.
        let index = match item {
            None => None,
            Some(at) => match registry.resolve(FUNCTION, menu, at)? {
                (target, index) if target == menu => Some(index),
                _ => {
                    return Err(MenuError::Native {
                        function: FUNCTION,
                        code: ERROR_MENU_ITEM_NOT_FOUND,
                    })
                }
            },
        };
        let record = registry
            .menus
            .get_mut(&menu)
            .ok_or(MenuError::Native {
                function: FUNCTION,
                code: ERROR_INVALID_MENU_HANDLE,
            })?;
        for (i, entry) in record.items.iter_mut().enumerate() {
            entry.state.set(ItemState::DEFAULT, Some(i) == index);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
