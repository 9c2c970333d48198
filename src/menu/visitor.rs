// ── Item classification and visitor dispatch ──────────────────────────────────
//
// A native menu entry is one of three shapes.  `classify` reads the item's type
// bits and nested-menu handle and picks the shape in this order:
//   1. separator  (`MFT_SEPARATOR`)
//   2. sub-menu   (nested menu handle present)
//   3. command    (anything else)
// An entry flagged as a separator that also carries a nested menu matches
// none of them and is reported instead of being coerced.

use crate::{
    error::{MenuError, Result},
    menu::{
        item::{CommandItem, SelectableItem, SeparatorItem, SubMenuItem},
        position::ItemPosition,
    },
    platform::{InfoMask, ItemType, MenuApi},
};

/// A classified menu entry.
#[derive(Debug, Clone)]
pub enum Item<A: MenuApi> {
    Separator(SeparatorItem<A>),
    Command(CommandItem<A>),
    SubMenu(SubMenuItem<A>),
}

impl<A: MenuApi> Item<A> {
    /// The entry's selectable behaviour; `None` for separators.
    pub fn as_selectable(&self) -> Option<&dyn SelectableItem> {
        match self {
            Self::Separator(_) => None,
            Self::Command(item) => Some(item),
            Self::SubMenu(item) => Some(item),
        }
    }

    pub fn accept<V: MenuVisitor<A>>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Separator(item) => visitor.visit_separator(item),
            Self::Command(item) => visitor.visit_command(item),
            Self::SubMenu(item) => visitor.visit_sub_menu(item),
        }
    }
}

/// Callbacks for each kind of menu entry.
pub trait MenuVisitor<A: MenuApi> {
    type Output;

    fn visit_separator(&mut self, item: &SeparatorItem<A>) -> Self::Output;
    fn visit_command(&mut self, item: &CommandItem<A>) -> Self::Output;
    fn visit_sub_menu(&mut self, item: &SubMenuItem<A>) -> Self::Output;
}

/// A visitor that handles commands and sub-menus alike.
///
/// Wrap it in [`Selectable`] to pass it where a [`MenuVisitor`] is expected.
pub trait SelectableVisitor<A: MenuApi> {
    type Output;

    fn on_separator(&mut self, item: &SeparatorItem<A>) -> Self::Output;
    fn on_selectable(&mut self, item: &dyn SelectableItem) -> Self::Output;
}

/// Adapts a [`SelectableVisitor`] into a [`MenuVisitor`]: commands and
/// sub-menus both go to `on_selectable`.
#[derive(Debug, Clone, Default)]
pub struct Selectable<V>(pub V);

impl<V> Selectable<V> {
    pub fn into_inner(self) -> V {
        self.0
    }
}

impl<A: MenuApi, V: SelectableVisitor<A>> MenuVisitor<A> for Selectable<V> {
    type Output = V::Output;

    fn visit_separator(&mut self, item: &SeparatorItem<A>) -> Self::Output {
        self.0.on_separator(item)
    }

    fn visit_command(&mut self, item: &CommandItem<A>) -> Self::Output {
        self.0.on_selectable(item)
    }

    fn visit_sub_menu(&mut self, item: &SubMenuItem<A>) -> Self::Output {
        self.0.on_selectable(item)
    }
}

impl<A: MenuApi> ItemPosition<A> {
    /// Read the entry's native metadata and build the matching view.
    pub fn classify(&self) -> Result<Item<A>> {
        let info = self.get(InfoMask::FTYPE | InfoMask::SUBMENU)?;
        let separator = info.kind.contains(ItemType::SEPARATOR);
        match (separator, info.sub_menu) {
            (true, None) => Ok(Item::Separator(SeparatorItem::new(self.clone()))),
            (true, Some(_)) => Err(MenuError::UnclassifiableItem {
                kind: info.kind.bits(),
                has_sub_menu: true,
            }),
            (false, Some(_)) => Ok(Item::SubMenu(SubMenuItem::new(self.clone()))),
            (false, None) => Ok(Item::Command(CommandItem::new(self.clone()))),
        }
    }

    /// Classify the entry and hand the matching view to `visitor`.
    pub fn accept<V: MenuVisitor<A>>(&self, visitor: &mut V) -> Result<V::Output> {
        Ok(self.classify()?.accept(visitor))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        menu::{item::Button, ItemDescription, Menu},
        platform::{memory::MemoryMenus, ItemInfo, Locator, Selectability},
    };

    #[derive(Debug, PartialEq, Eq)]
    enum Kind {
        Separator,
        Command,
        SubMenu,
    }

    struct KindOf;

    impl<A: MenuApi> MenuVisitor<A> for KindOf {
        type Output = Kind;

        fn visit_separator(&mut self, _: &SeparatorItem<A>) -> Kind {
            Kind::Separator
        }

        fn visit_command(&mut self, _: &CommandItem<A>) -> Kind {
            Kind::Command
        }

        fn visit_sub_menu(&mut self, _: &SubMenuItem<A>) -> Kind {
            Kind::SubMenu
        }
    }

    /// Reads the ID of any selectable item; separators have none.
    struct IdOf;

    impl<A: MenuApi> SelectableVisitor<A> for IdOf {
        type Output = Option<u32>;

        fn on_separator(&mut self, _: &SeparatorItem<A>) -> Option<u32> {
            None
        }

        fn on_selectable(&mut self, item: &dyn SelectableItem) -> Option<u32> {
            item.id().ok()
        }
    }

    struct Disable;

    impl<A: MenuApi> SelectableVisitor<A> for Disable {
        type Output = Result<()>;

        fn on_separator(&mut self, _: &SeparatorItem<A>) -> Result<()> {
            panic!("separator unexpected");
        }

        fn on_selectable(&mut self, item: &dyn SelectableItem) -> Result<()> {
            item.set_selectability(Selectability::Disabled)
        }
    }

    fn sample() -> (MemoryMenus, Menu<MemoryMenus>, Menu<MemoryMenus>) {
        let api = MemoryMenus::new();
        let menu = Menu::popup(api.clone()).unwrap();
        let child = Menu::popup(api.clone()).unwrap();
        let child_view = child.foster_view();
        menu.append(ItemDescription::command("&Open", 100)).unwrap();
        menu.append(ItemDescription::separator()).unwrap();
        menu.append(ItemDescription::sub_menu("&Recent", 200, child))
            .unwrap();
        (api, menu, child_view)
    }

    #[test]
    fn command_classifies_as_command_with_its_id() {
        let (_api, menu, _) = sample();
        let pos = menu.item(0);
        assert_eq!(pos.accept(&mut KindOf).unwrap(), Kind::Command);
        assert_eq!(pos.accept(&mut Selectable(IdOf)).unwrap(), Some(100));
    }

    #[test]
    fn separator_classifies_as_separator_only() {
        let (_api, menu, _) = sample();
        let pos = menu.item(1);
        assert_eq!(pos.accept(&mut KindOf).unwrap(), Kind::Separator);
        assert_eq!(pos.accept(&mut Selectable(IdOf)).unwrap(), None);
        assert!(pos.classify().unwrap().as_selectable().is_none());
    }

    #[test]
    fn sub_menu_yields_its_nested_menu() {
        let (_api, menu, child) = sample();
        let pos = menu.item(2);
        assert_eq!(pos.accept(&mut KindOf).unwrap(), Kind::SubMenu);
        match pos.classify().unwrap() {
            Item::SubMenu(item) => {
                let nested = item.menu().unwrap();
                assert!(nested.valid());
                assert_eq!(nested, child);
                assert_eq!(item.id().unwrap(), 200);
            }
            other => panic!("expected sub-menu, got {other:?}"),
        }
    }

    #[test]
    fn generic_handler_covers_commands_and_sub_menus() {
        let (_api, menu, _) = sample();
        menu.item(0).accept(&mut Selectable(Disable)).unwrap().unwrap();
        menu.item(2).accept(&mut Selectable(Disable)).unwrap().unwrap();
        for index in [0, 2] {
            let item = menu.item(index).classify().unwrap();
            let selectable = item.as_selectable().expect("selectable");
            assert!(!selectable.is_selectable().unwrap());
            assert_eq!(selectable.button().unwrap(), Button::Plain);
        }
    }

    #[test]
    fn separator_with_nested_menu_fails_fast() {
        let api = MemoryMenus::new();
        let menu = api.create_menu().unwrap();
        let nested = api.create_popup_menu().unwrap();
        let odd = ItemInfo {
            mask: InfoMask::FTYPE | InfoMask::SUBMENU,
            kind: ItemType::SEPARATOR,
            sub_menu: Some(nested),
            ..ItemInfo::default()
        };
        api.insert_menu_item(menu, Locator::Position(0), &odd).unwrap();
        let pos = ItemPosition::by_index(api, menu, 0);
        match pos.accept(&mut KindOf) {
            Err(MenuError::UnclassifiableItem { has_sub_menu, .. }) => assert!(has_sub_menu),
            other => panic!("expected classification failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_item_fails_before_visiting() {
        let (_api, menu, _) = sample();
        assert!(menu.item(9).accept(&mut KindOf).is_err());
    }

    /// Counts entries of each shape; implemented directly, beside the
    /// selectable-style visitors above.
    #[derive(Default)]
    struct Tally {
        separators: usize,
        commands: usize,
        sub_menus: usize,
    }

    impl<A: MenuApi> MenuVisitor<A> for Tally {
        type Output = ();

        fn visit_separator(&mut self, _: &SeparatorItem<A>) {
            self.separators += 1;
        }

        fn visit_command(&mut self, _: &CommandItem<A>) {
            self.commands += 1;
        }

        fn visit_sub_menu(&mut self, _: &SubMenuItem<A>) {
            self.sub_menus += 1;
        }
    }

    /// Collects the IDs of selectable entries across a whole walk.
    #[derive(Default)]
    struct Ids(Vec<u32>);

    impl<A: MenuApi> SelectableVisitor<A> for Ids {
        type Output = ();

        fn on_separator(&mut self, _: &SeparatorItem<A>) {}

        fn on_selectable(&mut self, item: &dyn SelectableItem) {
            self.0.push(item.id().unwrap());
        }
    }

    #[test]
    fn both_visitor_styles_walk_the_same_menu() {
        let (_api, menu, _) = sample();
        let mut tally = Tally::default();
        let mut ids = Selectable(Ids::default());
        for pos in menu.iter().unwrap() {
            pos.accept(&mut tally).unwrap();
            pos.accept(&mut ids).unwrap();
        }
        assert_eq!((tally.separators, tally.commands, tally.sub_menus), (1, 1, 1));
        assert_eq!(ids.into_inner().0, [100, 200]);
    }
}
