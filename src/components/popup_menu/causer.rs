use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::components::menu_item::MenuItem;

use super::menu::{MenuCore, PopupMenu};

/// Back-reference from a shown submenu to the menu and item that caused it
/// to appear.
///
/// Both references are weak: the relation is valid only while the submenu is
/// shown and never keeps the parent alive. It is always updated together
/// with the parent's `active_submenu` forward link, and both sides are empty
/// on the root and on any hidden menu.
#[derive(Default)]
pub(crate) struct CausedPopup {
    menu: Weak<RefCell<MenuCore>>,
    item: Weak<MenuItem>,
}

impl CausedPopup {
    /// Link to `menu` as the causer, with `item` as the triggering entry.
    pub(crate) fn link(menu: &PopupMenu, item: &Rc<MenuItem>) -> Self {
        Self {
            menu: menu.downgrade(),
            item: Rc::downgrade(item),
        }
    }

    /// The menu that caused this one to appear, if still linked.
    pub(crate) fn menu(&self) -> Option<PopupMenu> {
        self.menu.upgrade().map(PopupMenu::from_core)
    }

    /// The item in the causing menu that triggered this one.
    pub(crate) fn item(&self) -> Option<Rc<MenuItem>> {
        self.item.upgrade()
    }

    pub(crate) fn is_linked(&self) -> bool {
        self.menu.strong_count() > 0
    }
}
