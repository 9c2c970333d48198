// ── Menu templates ────────────────────────────────────────────────────────────
//
// A serializable description of a menu tree, in the spirit of a MENUEX
// resource.  `build` turns a template into live native menus; `capture` walks
// live menus with a visitor and writes the template back out.  JSON via
// serde_json.

use serde::{Deserialize, Serialize};

use super::{
    item::{Button, CheckMark, CommandItem, SelectableItem, SeparatorItem, SubMenuItem},
    visitor::MenuVisitor,
    ItemDescription, Menu,
};
use crate::{
    error::Result,
    platform::{MenuApi, Selectability},
};

/// Root of a menu template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTemplate {
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
}

/// One entry of a menu template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemTemplate {
    Command {
        text: String,
        id: u32,
        #[serde(default = "enabled")]
        enabled: bool,
        #[serde(default)]
        checked: bool,
        /// Draw the check as a radio bullet.
        #[serde(default)]
        radio: bool,
    },
    Separator,
    SubMenu {
        text: String,
        #[serde(default)]
        id: u32,
        #[serde(default = "enabled")]
        enabled: bool,
        #[serde(default)]
        items: Vec<ItemTemplate>,
    },
}

fn enabled() -> bool {
    true
}

fn selectability(enabled: bool) -> Selectability {
    if enabled {
        Selectability::Enabled
    } else {
        Selectability::Grayed
    }
}

impl MenuTemplate {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Create a new owning menu (a popup if `popup`, else a menu bar) holding
    /// these items.
    pub fn build<A: MenuApi>(&self, api: &A, popup: bool) -> Result<Menu<A>> {
        let menu = if popup {
            Menu::popup(api.clone())?
        } else {
            Menu::new(api.clone())?
        };
        populate(&menu, &self.items)?;
        Ok(menu)
    }

    /// Describe a live menu, recursing into its sub-menus.
    pub fn capture<A: MenuApi>(menu: &Menu<A>) -> Result<Self> {
        let items = menu
            .iter()?
            .map(|position| position.accept(&mut Capture).and_then(|item| item))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }
}

fn populate<A: MenuApi>(menu: &Menu<A>, items: &[ItemTemplate]) -> Result<()> {
    for item in items {
        match item {
            ItemTemplate::Command {
                text,
                id,
                enabled,
                checked,
                radio,
            } => {
                let position = menu.append(ItemDescription::command(text.as_str(), *id))?;
                let command = CommandItem::new(position);
                if *radio {
                    command.set_button(Button::Radio)?;
                }
                let check = if *checked {
                    CheckMark::Visible
                } else {
                    CheckMark::Hidden
                };
                command
                    .selectability(selectability(*enabled))?
                    .check_mark_visibility(check)?;
            }
            ItemTemplate::Separator => {
                menu.append(ItemDescription::separator())?;
            }
            ItemTemplate::SubMenu {
                text,
                id,
                enabled,
                items,
            } => {
                let child = Menu::popup(menu.api().clone())?;
                populate(&child, items)?;
                let position = menu.append(ItemDescription::sub_menu(text.as_str(), *id, child))?;
                SubMenuItem::new(position).set_selectability(selectability(*enabled))?;
            }
        }
    }
    Ok(())
}

/// Visitor that turns a live entry back into its template.
struct Capture;

impl<A: MenuApi> MenuVisitor<A> for Capture {
    type Output = Result<ItemTemplate>;

    fn visit_separator(&mut self, _: &SeparatorItem<A>) -> Self::Output {
        Ok(ItemTemplate::Separator)
    }

    fn visit_command(&mut self, item: &CommandItem<A>) -> Self::Output {
        let button = item.button()?;
        Ok(ItemTemplate::Command {
            text: item.text()?,
            id: item.id()?,
            enabled: item.is_selectable()?,
            checked: item.check_mark_is_visible()?,
            radio: button == Button::Radio,
        })
    }

    fn visit_sub_menu(&mut self, item: &SubMenuItem<A>) -> Self::Output {
        Ok(ItemTemplate::SubMenu {
            text: item.text()?,
            id: item.id()?,
            enabled: item.is_selectable()?,
            items: MenuTemplate::capture(&item.menu()?)?.items,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::MenuError,
        menu::visitor::Item,
        platform::memory::MemoryMenus,
    };

    const EDITOR_MENU: &str = r#"{
        "items": [
            { "kind": "sub_menu", "text": "&File", "items": [
                { "kind": "command", "text": "&Open…\tCtrl+O", "id": 1001 },
                { "kind": "separator" },
                { "kind": "command", "text": "E&xit", "id": 1099 }
            ]},
            { "kind": "sub_menu", "text": "&View", "items": [
                { "kind": "command", "text": "Word &Wrap", "id": 3001, "checked": true },
                { "kind": "command", "text": "Tabs on &Top", "id": 3010, "radio": true, "checked": true },
                { "kind": "command", "text": "Tabs on &Left", "id": 3011, "radio": true }
            ]},
            { "kind": "command", "text": "&Help", "id": 9001, "enabled": false }
        ]
    }"#;

    #[test]
    fn parses_with_defaults() {
        let template = MenuTemplate::from_json(EDITOR_MENU).expect("parse");
        assert_eq!(template.items.len(), 3);
        match &template.items[2] {
            ItemTemplate::Command {
                enabled, checked, radio, ..
            } => {
                assert!(!*enabled);
                assert!(!*checked);
                assert!(!*radio);
            }
            other => panic!("expected command, got {other:?}"),
        }
        match &template.items[0] {
            ItemTemplate::SubMenu { id, enabled, items, .. } => {
                assert_eq!(*id, 0);
                assert!(*enabled);
                assert_eq!(items.len(), 3);
            }
            other => panic!("expected sub-menu, got {other:?}"),
        }
    }

    #[test]
    fn build_then_capture_reproduces_the_template() {
        let api = MemoryMenus::new();
        let template = MenuTemplate::from_json(EDITOR_MENU).unwrap();
        let bar = template.build(&api, false).expect("build");
        assert_eq!(bar.size().unwrap(), 3);
        assert_eq!(MenuTemplate::capture(&bar).unwrap(), template);
    }

    #[test]
    fn built_items_carry_their_state() {
        let api = MemoryMenus::new();
        let bar = MenuTemplate::from_json(EDITOR_MENU)
            .unwrap()
            .build(&api, false)
            .unwrap();

        let wrap = CommandItem::new(bar.by_id(3001));
        assert!(wrap.check_mark_is_visible().unwrap());
        assert_eq!(wrap.button().unwrap(), Button::CheckBox);

        let left = CommandItem::new(bar.by_id(3011));
        assert_eq!(left.button().unwrap(), Button::Radio);
        assert!(!left.check_mark_is_visible().unwrap());

        let help = CommandItem::new(bar.by_id(9001));
        assert!(!help.is_selectable().unwrap());

        match bar.item(0).classify().unwrap() {
            Item::SubMenu(file) => assert_eq!(file.menu().unwrap().size().unwrap(), 3),
            other => panic!("expected sub-menu, got {other:?}"),
        }
    }

    #[test]
    fn built_menu_tree_is_destroyed_as_one() {
        let api = MemoryMenus::new();
        let bar = MenuTemplate::from_json(EDITOR_MENU)
            .unwrap()
            .build(&api, false)
            .unwrap();
        assert_eq!(api.live_menus(), 3);
        drop(bar);
        assert_eq!(api.live_menus(), 0);
    }

    #[test]
    fn json_round_trip_keeps_kind_tags() {
        let template = MenuTemplate {
            items: vec![ItemTemplate::Separator],
        };
        let json = template.to_json().unwrap();
        assert!(json.contains("\"kind\": \"separator\""));
        assert_eq!(MenuTemplate::from_json(&json).unwrap(), template);
    }

    #[test]
    fn malformed_json_is_a_template_error() {
        let err = MenuTemplate::from_json(r#"{ "items": [ { "kind": "widget" } ] }"#).unwrap_err();
        assert!(matches!(err, MenuError::Template(_)));
    }
}
