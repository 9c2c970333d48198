use super::{Button, CheckMark, SelectableCore, SelectableItem};
use crate::{
    error::Result,
    menu::{position::ItemPosition, Menu},
    platform::{InfoMask, MenuApi, Selectability},
};

/// An item that opens a nested menu.
#[derive(Debug, Clone)]
pub struct SubMenuItem<A: MenuApi> {
    core: SelectableCore<A>,
}

impl<A: MenuApi> SubMenuItem<A> {
    pub fn new(position: ItemPosition<A>) -> Self {
        Self {
            core: SelectableCore::new(position),
        }
    }

    pub fn position(&self) -> &ItemPosition<A> {
        self.core.position()
    }

    /// The nested menu, as a non-owning view.  The parent menu still owns it.
    ///
    /// # Panics
    ///
    /// If the item has no nested menu, which cannot happen for an item that
    /// classified as a sub-menu.
    pub fn menu(&self) -> Result<Menu<A>> {
        let position = self.core.position();
        let raw = position
            .get(InfoMask::SUBMENU)?
            .sub_menu
            .expect("sub-menu item has no nested menu");
        Ok(Menu::foster(position.api().clone(), raw))
    }
}

impl<A: MenuApi> SelectableItem for SubMenuItem<A> {
    fn id(&self) -> Result<u32> {
        self.core.id()
    }

    fn text(&self) -> Result<String> {
        self.core.text()
    }

    fn set_text(&self, text: &str) -> Result<()> {
        self.core.set_text(text)
    }

    fn set_selectability(&self, state: Selectability) -> Result<()> {
        self.core.set_selectability(state)
    }

    fn set_check_mark(&self, state: CheckMark) -> Result<()> {
        self.core.set_check_mark(state)
    }

    fn set_button(&self, button: Button) -> Result<()> {
        self.core.set_button(button)
    }

    fn button(&self) -> Result<Button> {
        self.core.button()
    }

    fn is_selectable(&self) -> Result<bool> {
        self.core.is_selectable()
    }

    fn check_mark_is_visible(&self) -> Result<bool> {
        self.core.check_mark_is_visible()
    }

    fn is_highlighted(&self) -> Result<bool> {
        self.core.is_highlighted()
    }
}
