// ── Menu item views ───────────────────────────────────────────────────────────
//
// Each view wraps an `ItemPosition` and re-reads the native item on every
// query.  Commands and sub-menus share their selectable behaviour through
// `SelectableCore`; separators have none of it.

mod command;
mod separator;
mod sub_menu;

pub use command::CommandItem;
pub use separator::SeparatorItem;
pub use sub_menu::SubMenuItem;

use crate::{
    error::Result,
    menu::position::ItemPosition,
    platform::{InfoMask, ItemInfo, ItemState, ItemType, MenuApi, Selectability},
};

/// Whether the item draws its check glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMark {
    Visible,
    Hidden,
}

/// The exclusive-choice visual an item is configured with.
///
/// Win32 has no separate "checkbox" type: a non-radio item counts as a
/// checkbox while its check mark is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Plain,
    CheckBox,
    /// Drawn with a bullet (`MFT_RADIOCHECK`) instead of a tick.
    Radio,
}

/// Behaviour shared by every item the user can select.
///
/// Each call is a round-trip to the native menu and can fail with the native
/// error.
pub trait SelectableItem {
    /// The item's command ID.  Used to find it again after it moves.
    fn id(&self) -> Result<u32>;
    /// The item's caption, including any `&` mnemonic markers.
    fn text(&self) -> Result<String>;
    fn set_text(&self, text: &str) -> Result<()>;

    fn set_selectability(&self, state: Selectability) -> Result<()>;
    fn set_check_mark(&self, state: CheckMark) -> Result<()>;
    fn set_button(&self, button: Button) -> Result<()>;

    fn button(&self) -> Result<Button>;
    fn is_selectable(&self) -> Result<bool>;
    fn check_mark_is_visible(&self) -> Result<bool>;
    fn is_highlighted(&self) -> Result<bool>;

    /// Chaining form of [`set_selectability`](Self::set_selectability).
    fn selectability(&self, state: Selectability) -> Result<&Self>
    where
        Self: Sized,
    {
        self.set_selectability(state)?;
        Ok(self)
    }

    /// Chaining form of [`set_check_mark`](Self::set_check_mark).
    fn check_mark_visibility(&self, state: CheckMark) -> Result<&Self>
    where
        Self: Sized,
    {
        self.set_check_mark(state)?;
        Ok(self)
    }
}

// ── SelectableCore ────────────────────────────────────────────────────────────

/// Implementation of [`SelectableItem`] over an item position.
#[derive(Debug, Clone)]
pub struct SelectableCore<A: MenuApi> {
    position: ItemPosition<A>,
}

impl<A: MenuApi> SelectableCore<A> {
    pub fn new(position: ItemPosition<A>) -> Self {
        Self { position }
    }

    pub fn position(&self) -> &ItemPosition<A> {
        &self.position
    }

    fn state(&self) -> Result<ItemState> {
        Ok(self.position.get(InfoMask::STATE)?.state)
    }

    fn kind(&self) -> Result<ItemType> {
        Ok(self.position.get(InfoMask::FTYPE)?.kind)
    }

    fn write_state(&self, state: ItemState) -> Result<()> {
        self.position.set(&ItemInfo {
            mask: InfoMask::STATE,
            state,
            ..ItemInfo::default()
        })
    }

    fn write_kind(&self, kind: ItemType) -> Result<()> {
        self.position.set(&ItemInfo {
            mask: InfoMask::FTYPE,
            kind,
            ..ItemInfo::default()
        })
    }
}

impl<A: MenuApi> SelectableItem for SelectableCore<A> {
    fn id(&self) -> Result<u32> {
        Ok(self.position.get(InfoMask::ID)?.id)
    }

    fn text(&self) -> Result<String> {
        Ok(self.position.get(InfoMask::STRING)?.text.unwrap_or_default())
    }

    fn set_text(&self, text: &str) -> Result<()> {
        self.position.set(&ItemInfo {
            mask: InfoMask::STRING,
            text: Some(text.to_owned()),
            ..ItemInfo::default()
        })
    }

    fn set_selectability(&self, selectability: Selectability) -> Result<()> {
        let mut state = self.state()?;
        state.remove(ItemState::GRAYED | ItemState::DISABLED);
        state.insert(selectability.state_bits());
        self.write_state(state)
    }

    fn set_check_mark(&self, check: CheckMark) -> Result<()> {
        let mut state = self.state()?;
        state.set(ItemState::CHECKED, check == CheckMark::Visible);
        self.write_state(state)
    }

    fn set_button(&self, button: Button) -> Result<()> {
        let mut kind = self.kind()?;
        kind.set(ItemType::RADIOCHECK, button == Button::Radio);
        self.write_kind(kind)?;
        match button {
            Button::Radio => Ok(()),
            Button::CheckBox => self.set_check_mark(CheckMark::Visible),
            Button::Plain => self.set_check_mark(CheckMark::Hidden),
        }
    }

    fn button(&self) -> Result<Button> {
        let info = self.position.get(InfoMask::FTYPE | InfoMask::STATE)?;
        Ok(if info.kind.contains(ItemType::RADIOCHECK) {
            Button::Radio
        } else if info.state.contains(ItemState::CHECKED) {
            Button::CheckBox
        } else {
            Button::Plain
        })
    }

    fn is_selectable(&self) -> Result<bool> {
        Ok(!self
            .state()?
            .intersects(ItemState::GRAYED | ItemState::DISABLED))
    }

    fn check_mark_is_visible(&self) -> Result<bool> {
        Ok(self.state()?.contains(ItemState::CHECKED))
    }

    fn is_highlighted(&self) -> Result<bool> {
        Ok(self.state()?.contains(ItemState::HILITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{memory::MemoryMenus, Locator};

    fn fixture() -> (MemoryMenus, SelectableCore<MemoryMenus>) {
        let api = MemoryMenus::new();
        let menu = api.create_popup_menu().unwrap();
        let info = ItemInfo {
            mask: InfoMask::ID | InfoMask::STRING,
            id: 42,
            text: Some("&Word Wrap".to_owned()),
            ..ItemInfo::default()
        };
        api.insert_menu_item(menu, Locator::Position(0), &info).unwrap();
        let core = SelectableCore::new(ItemPosition::by_id(api.clone(), menu, 42));
        (api, core)
    }

    #[test]
    fn fresh_item_is_selectable_unchecked_unhighlighted() {
        let (_api, core) = fixture();
        assert!(core.is_selectable().unwrap());
        assert!(!core.check_mark_is_visible().unwrap());
        assert!(!core.is_highlighted().unwrap());
        assert_eq!(core.button().unwrap(), Button::Plain);
        assert_eq!(core.id().unwrap(), 42);
        assert_eq!(core.text().unwrap(), "&Word Wrap");
    }

    #[test]
    fn selectability_round_trips_through_native_flags() {
        let (_api, core) = fixture();
        core.selectability(Selectability::Disabled).unwrap();
        assert!(!core.is_selectable().unwrap());
        core.selectability(Selectability::Enabled).unwrap();
        assert!(core.is_selectable().unwrap());
        core.selectability(Selectability::Grayed).unwrap();
        assert!(!core.is_selectable().unwrap());
    }

    #[test]
    fn selectability_leaves_check_mark_alone() {
        let (_api, core) = fixture();
        core.check_mark_visibility(CheckMark::Visible)
            .and_then(|c| c.selectability(Selectability::Grayed))
            .unwrap();
        assert!(core.check_mark_is_visible().unwrap());
        assert!(!core.is_selectable().unwrap());
    }

    #[test]
    fn button_kinds() {
        let (_api, core) = fixture();
        core.set_button(Button::CheckBox).unwrap();
        assert_eq!(core.button().unwrap(), Button::CheckBox);
        assert!(core.check_mark_is_visible().unwrap());

        core.set_button(Button::Radio).unwrap();
        assert_eq!(core.button().unwrap(), Button::Radio);

        core.set_button(Button::Plain).unwrap();
        assert_eq!(core.button().unwrap(), Button::Plain);
        assert!(!core.check_mark_is_visible().unwrap());
    }

    #[test]
    fn highlight_comes_from_native_state() {
        let (api, core) = fixture();
        let hilite = ItemInfo {
            mask: InfoMask::STATE,
            state: ItemState::HILITE,
            ..ItemInfo::default()
        };
        api.set_menu_item_info(core.position().menu_raw(), Locator::Command(42), &hilite)
            .unwrap();
        assert!(core.is_highlighted().unwrap());
    }

    #[test]
    fn rename() {
        let (_api, core) = fixture();
        core.set_text("Word &Wrap\tAlt+Z").unwrap();
        assert_eq!(core.text().unwrap(), "Word &Wrap\tAlt+Z");
    }
}
