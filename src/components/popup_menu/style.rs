use crate::config::{Config, MenuConfig};

/// Visual metrics for a popup menu.
///
/// Dimensions and spacing only — colors and painting belong to whatever
/// renders the surface. The defaults match [`MenuConfig`]; menus created
/// through [`super::PopupMenu::new`] pick up the loaded configuration via
/// [`MenuStyle::from_config`].
#[derive(Debug, Clone)]
pub struct MenuStyle {
    /// Minimum width of a single item.
    pub min_item_width: f32,

    /// Item height; the menu row is this plus vertical padding.
    pub item_height: f32,

    /// Inner horizontal padding of an item around its label.
    pub item_padding: f32,

    /// Gap between adjacent items.
    pub item_spacing: f32,

    /// Padding between the menu edge and the item row.
    pub horizontal_padding: f32,
    pub vertical_padding: f32,

    /// Approximate advance per label character, used for measuring.
    pub char_advance: f32,

    /// Offset of a submenu relative to the bottom-left corner of its
    /// triggering item.
    pub submenu_offset_x: f32,
    pub submenu_offset_y: f32,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self::from(&MenuConfig::default())
    }
}

impl From<&MenuConfig> for MenuStyle {
    fn from(config: &MenuConfig) -> Self {
        Self {
            min_item_width: config.min_item_width,
            item_height: config.item_height,
            item_padding: config.item_padding,
            item_spacing: config.item_spacing,
            horizontal_padding: config.horizontal_padding,
            vertical_padding: config.vertical_padding,
            char_advance: config.char_advance,
            submenu_offset_x: config.submenu_offset_x,
            submenu_offset_y: config.submenu_offset_y,
        }
    }
}

impl MenuStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style from the loaded crate configuration.
    pub fn from_config() -> Self {
        Config::with(|config| Self::from(&config.menu))
    }

    // === Builder API ===

    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    pub fn with_min_item_width(mut self, width: f32) -> Self {
        self.min_item_width = width;
        self
    }

    pub fn with_padding(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_padding = horizontal;
        self.vertical_padding = vertical;
        self
    }

    pub fn with_char_advance(mut self, advance: f32) -> Self {
        self.char_advance = advance;
        self
    }

    pub fn with_submenu_offset(mut self, dx: f32, dy: f32) -> Self {
        self.submenu_offset_x = dx;
        self.submenu_offset_y = dy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_config_default() {
        let style = MenuStyle::default();
        let config = MenuConfig::default();

        assert_eq!(style.item_height, config.item_height);
        assert_eq!(style.char_advance, config.char_advance);
        assert_eq!(style.submenu_offset_x, config.submenu_offset_x);
    }

    #[test]
    fn test_builder() {
        let style = MenuStyle::new()
            .with_item_height(30.0)
            .with_padding(8.0, 6.0)
            .with_submenu_offset(0.0, 0.0);

        assert_eq!(style.item_height, 30.0);
        assert_eq!(style.horizontal_padding, 8.0);
        assert_eq!(style.vertical_padding, 6.0);
        assert_eq!(style.submenu_offset_y, 0.0);
    }
}
