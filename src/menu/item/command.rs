use super::{Button, CheckMark, SelectableCore, SelectableItem};
use crate::{
    error::Result,
    menu::position::ItemPosition,
    platform::{MenuApi, Selectability},
};

/// A leaf item that issues a command when chosen.
#[derive(Debug, Clone)]
pub struct CommandItem<A: MenuApi> {
    core: SelectableCore<A>,
}

impl<A: MenuApi> CommandItem<A> {
    pub fn new(position: ItemPosition<A>) -> Self {
        Self {
            core: SelectableCore::new(position),
        }
    }

    pub fn position(&self) -> &ItemPosition<A> {
        self.core.position()
    }
}

impl<A: MenuApi> SelectableItem for CommandItem<A> {
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
