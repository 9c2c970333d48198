use crate::{menu::position::ItemPosition, platform::MenuApi};

/// A horizontal rule between groups of items.
///
/// Separators cannot be selected and carry no ID, check mark or button, so
/// none of those queries exist on this type.
#[derive(Debug, Clone)]
pub struct SeparatorItem<A: MenuApi> {
    position: ItemPosition<A>,
}

impl<A: MenuApi> SeparatorItem<A> {
    pub fn new(position: ItemPosition<A>) -> Self {
        Self { position }
    }

    pub fn position(&self) -> &ItemPosition<A> {
        &self.position
    }
}
