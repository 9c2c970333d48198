// ── Win32 menu shim ───────────────────────────────────────────────────────────
//
// One Win32 call per `MenuApi` method (reading an item caption takes two: one
// to size the buffer, one to fill it).  Failure signals become
// `MenuError::Native` carrying the function name; success values pass through
// untouched.

#![allow(unsafe_code)]

use windows::{
    core::PWSTR,
    Win32::{
        Foundation::BOOL,
        UI::WindowsAndMessaging::{
            CreateMenu, CreatePopupMenu, DestroyMenu, EnableMenuItem, GetMenuDefaultItem,
            GetMenuItemCount, GetMenuItemInfoW, InsertMenuItemW, IsMenu, RemoveMenu,
            SetMenuDefaultItem, SetMenuItemInfoW, GET_MENU_DEFAULT_ITEM_FLAGS, MENUITEMINFOW,
            MENU_ITEM_FLAGS, MENU_ITEM_MASK, MENU_ITEM_STATE, MENU_ITEM_TYPE, MF_BYCOMMAND,
            MF_BYPOSITION, MF_DISABLED, MF_ENABLED, MF_GRAYED,
        },
    },
};

use log::debug;

use super::{from_hmenu, last_error, native, to_hmenu};
use crate::{
    error::Result,
    platform::{
        DefaultItemFlags, InfoMask, ItemInfo, ItemState, ItemType, Locator, MenuApi, RawMenu,
        Selectability,
    },
};

/// `GetMenuDefaultItem` returns this when the menu has no default item.
const NO_DEFAULT_ITEM: u32 = u32::MAX;

/// The Win32 menu manager.  Stateless; every clone talks to the same USER32.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Menus;

impl Win32Menus {
    pub fn new() -> Self {
        Self
    }
}

fn by_flag(at: Locator) -> MENU_ITEM_FLAGS {
    if at.by_position() {
        MF_BYPOSITION
    } else {
        MF_BYCOMMAND
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Build a `MENUITEMINFOW` from `info`.  `text_buf` must outlive every use
/// of the returned struct; its pointer is stored in `dwTypeData`.
fn to_native(info: &ItemInfo, text_buf: &mut Vec<u16>) -> MENUITEMINFOW {
    let mut mii = MENUITEMINFOW {
        // MENUITEMINFOW is ~80 bytes; the cast to u32 is always lossless.
        cbSize: std::mem::size_of::<MENUITEMINFOW>() as u32,
        fMask: MENU_ITEM_MASK(info.mask.bits()),
        fType: MENU_ITEM_TYPE(info.kind.bits()),
        fState: MENU_ITEM_STATE(info.state.bits()),
        wID: info.id,
        hSubMenu: info.sub_menu.map(to_hmenu).unwrap_or_default(),
        ..Default::default()
    };
    if info.mask.contains(InfoMask::STRING) {
        *text_buf = to_wide(info.text.as_deref().unwrap_or_default());
        mii.dwTypeData = PWSTR(text_buf.as_mut_ptr());
        mii.cch = (text_buf.len() - 1) as u32;
    }
    mii
}

impl MenuApi for Win32Menus {
    fn create_menu(&self) -> Result<RawMenu> {
        // SAFETY: CreateMenu has no preconditions; it fails only when the
        // system is out of resources, in which case the error propagates.
        let hmenu = unsafe { CreateMenu() }.map_err(|e| native("CreateMenu", e))?;
        let raw = from_hmenu(hmenu).ok_or_else(|| last_error("CreateMenu"))?;
        debug!("CreateMenu -> {:#x}", raw.get());
        Ok(raw)
    }

    fn create_popup_menu(&self) -> Result<RawMenu> {
        // SAFETY: same as create_menu.
        let hmenu = unsafe { CreatePopupMenu() }.map_err(|e| native("CreatePopupMenu", e))?;
        let raw = from_hmenu(hmenu).ok_or_else(|| last_error("CreatePopupMenu"))?;
        debug!("CreatePopupMenu -> {:#x}", raw.get());
        Ok(raw)
    }

    fn destroy_menu(&self, menu: RawMenu) -> Result<()> {
        // SAFETY: DestroyMenu validates the handle itself and fails with
        // ERROR_INVALID_MENU_HANDLE on a stale one; no memory is touched here.
        unsafe { DestroyMenu(to_hmenu(menu)) }.map_err(|e| native("DestroyMenu", e))
    }

    fn insert_menu_item(&self, menu: RawMenu, at: Locator, info: &ItemInfo) -> Result<()> {
        let mut text = Vec::new();
        let mii = to_native(info, &mut text);
        // SAFETY: `mii` is fully initialised with cbSize set; `text` is a
        // null-terminated UTF-16 buffer that outlives the call.
        unsafe { InsertMenuItemW(to_hmenu(menu), at.value(), at.by_position(), &mii) }
            .map_err(|e| native("InsertMenuItem", e))
    }

    fn get_menu_item_info(&self, menu: RawMenu, at: Locator, mask: InfoMask) -> Result<ItemInfo> {
        let mut mii = MENUITEMINFOW {
            cbSize: std::mem::size_of::<MENUITEMINFOW>() as u32,
            fMask: MENU_ITEM_MASK(mask.bits()),
            ..Default::default()
        };
        // SAFETY: `mii` is a valid, writable MENUITEMINFOW; with dwTypeData
        // null the call only reports the caption length in `cch`.
        unsafe { GetMenuItemInfoW(to_hmenu(menu), at.value(), at.by_position(), &mut mii) }
            .map_err(|e| native("GetMenuItemInfo", e))?;

        let mut text = None;
        if mask.contains(InfoMask::STRING) {
            let mut buf = vec![0u16; mii.cch as usize + 1];
            mii.dwTypeData = PWSTR(buf.as_mut_ptr());
            mii.cch = buf.len() as u32;
            // SAFETY: `buf` holds cch + 1 units and outlives the call; the
            // function writes at most `cch` units including the terminator.
            unsafe { GetMenuItemInfoW(to_hmenu(menu), at.value(), at.by_position(), &mut mii) }
                .map_err(|e| native("GetMenuItemInfo", e))?;
            let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
            text = Some(String::from_utf16_lossy(&buf[..len]));
        }

        Ok(ItemInfo {
            mask,
            kind: ItemType::from_bits_retain(mii.fType.0),
            state: ItemState::from_bits_retain(mii.fState.0),
            id: mii.wID,
            sub_menu: from_hmenu(mii.hSubMenu),
            text,
        })
    }

    fn set_menu_item_info(&self, menu: RawMenu, at: Locator, info: &ItemInfo) -> Result<()> {
        let mut text = Vec::new();
        let mii = to_native(info, &mut text);
        // SAFETY: as in insert_menu_item.
        unsafe { SetMenuItemInfoW(to_hmenu(menu), at.value(), at.by_position(), &mii) }
            .map_err(|e| native("SetMenuItemInfo", e))
    }

    fn remove_menu(&self, menu: RawMenu, at: Locator) -> Result<()> {
        // SAFETY: RemoveMenu validates both the handle and the item.
        unsafe { RemoveMenu(to_hmenu(menu), at.value(), by_flag(at)) }
            .map_err(|e| native("RemoveMenu", e))
    }

    fn get_menu_item_count(&self, menu: RawMenu) -> Result<u32> {
        // SAFETY: GetMenuItemCount validates the handle and returns -1 on error.
        let count = unsafe { GetMenuItemCount(to_hmenu(menu)) };
        u32::try_from(count).map_err(|_| last_error("GetMenuItemCount"))
    }

    fn is_menu(&self, menu: RawMenu) -> bool {
        // SAFETY: IsMenu exists precisely to test arbitrary handle values.
        unsafe { IsMenu(to_hmenu(menu)) }.as_bool()
    }

    fn enable_menu_item(&self, menu: RawMenu, at: Locator, state: Selectability) -> Result<()> {
        let enable = match state {
            Selectability::Enabled => MF_ENABLED,
            Selectability::Disabled => MF_DISABLED,
            Selectability::Grayed => MF_GRAYED,
        };
        // SAFETY: EnableMenuItem validates the handle and item.
        let previous = unsafe { EnableMenuItem(to_hmenu(menu), at.value(), enable | by_flag(at)) };
        // The return value is the previous state; only -1 means "no such item".
        if previous == BOOL(-1) {
            return Err(last_error("EnableMenuItem"));
        }
        Ok(())
    }

    fn get_menu_default_item(&self, menu: RawMenu, flags: DefaultItemFlags) -> Option<u32> {
        // SAFETY: GetMenuDefaultItem validates the handle and returns -1 on error.
        let position = unsafe {
            GetMenuDefaultItem(
                to_hmenu(menu),
                1,
                GET_MENU_DEFAULT_ITEM_FLAGS(flags.bits()),
            )
        };
        (position != NO_DEFAULT_ITEM).then_some(position)
    }

    fn set_menu_default_item(&self, menu: RawMenu, item: Option<Locator>) -> Result<()> {
        // (u32::MAX, by position) clears the default item.
        let (value, by_position) = match item {
            Some(at) => (at.value(), u32::from(at.by_position())),
            None => (u32::MAX, 1),
        };
        // SAFETY: SetMenuDefaultItem validates the handle and item.
        unsafe { SetMenuDefaultItem(to_hmenu(menu), value, by_position) }
            .map_err(|e| native("SetMenuDefaultItem", e))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_read_back_caption() {
        let api = Win32Menus::new();
        let menu = api.create_popup_menu().expect("CreatePopupMenu");
        let info = ItemInfo {
            mask: InfoMask::FTYPE | InfoMask::ID | InfoMask::STRING,
            id: 1001,
            text: Some("E&xit".to_owned()),
            ..ItemInfo::default()
        };
        api.insert_menu_item(menu, Locator::Position(0), &info)
            .expect("InsertMenuItem");

        let read = api
            .get_menu_item_info(menu, Locator::Command(1001), InfoMask::ID | InfoMask::STRING)
            .expect("GetMenuItemInfo");
        assert_eq!(read.id, 1001);
        assert_eq!(read.text.as_deref(), Some("E&xit"));
        assert_eq!(api.get_menu_item_count(menu).unwrap(), 1);

        api.destroy_menu(menu).expect("DestroyMenu");
        assert!(!api.is_menu(menu));
    }

    #[test]
    fn missing_item_names_the_function() {
        let api = Win32Menus::new();
        let menu = api.create_menu().expect("CreateMenu");
        let err = api
            .get_menu_item_info(menu, Locator::Position(7), InfoMask::ID)
            .unwrap_err();
        assert_eq!(err.function(), Some("GetMenuItemInfo"));
        api.destroy_menu(menu).expect("DestroyMenu");
    }
}
