use std::cell::Cell;
use std::fmt;

use crate::components::popup_menu::PopupMenu;

/// A single entry in a popup menu.
///
/// Pure state/data — no rendering, no surface logic. `activated` is the
/// hover/selection flag, mutually exclusive with the other items of the
/// owning menu; the owning menu requests a surface redraw whenever it flips
/// the flag. An item either is a selectable leaf or owns a nested menu,
/// fixed at construction.
pub struct MenuItem {
    label: String,
    activated: Cell<bool>,
    enabled: Cell<bool>,
    submenu: Option<PopupMenu>,
}

impl MenuItem {
    /// Create a selectable leaf entry.
    pub(crate) fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            activated: Cell::new(false),
            enabled: Cell::new(true),
            submenu: None,
        }
    }

    /// Create an entry owning `submenu`.
    pub(crate) fn with_submenu(label: impl Into<String>, submenu: PopupMenu) -> Self {
        Self {
            label: label.into(),
            activated: Cell::new(false),
            enabled: Cell::new(true),
            submenu: Some(submenu),
        }
    }

    // === Getters ===

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_activated(&self) -> bool {
        self.activated.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn has_submenu(&self) -> bool {
        self.submenu.is_some()
    }

    pub fn submenu(&self) -> Option<&PopupMenu> {
        self.submenu.as_ref()
    }

    // === State Mutations ===

    pub fn set_activated(&self, activated: bool) {
        self.activated.set(activated);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("activated", &self.activated.get())
            .field("enabled", &self.enabled.get())
            .field("has_submenu", &self.submenu.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::HeadlessSurfaces;

    #[test]
    fn test_leaf_item() {
        let item = MenuItem::leaf("Copy");

        assert_eq!(item.label(), "Copy");
        assert!(!item.has_submenu());
        assert!(item.is_enabled());
        assert!(!item.is_activated());
    }

    #[test]
    fn test_activation_flag() {
        let item = MenuItem::leaf("Paste");

        item.set_activated(true);
        assert!(item.is_activated());

        item.set_activated(false);
        assert!(!item.is_activated());
    }

    #[test]
    fn test_enabled_flag() {
        let item = MenuItem::leaf("Undo");
        item.set_enabled(false);
        assert!(!item.is_enabled());
    }

    #[test]
    fn test_submenu_item() {
        let child = PopupMenu::new(HeadlessSurfaces::new()).unwrap();
        let item = MenuItem::with_submenu("File", child.clone());

        assert!(item.has_submenu());
        assert!(item.submenu().unwrap().ptr_eq(&child));
    }
}
