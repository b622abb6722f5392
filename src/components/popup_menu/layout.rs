//! Row layout for menu items.
//!
//! Items sit in a single horizontal row; insertion order is display order
//! and hit-testing runs left to right. All rectangles are local to the
//! menu's surface.

use std::rc::Rc;

use crate::components::menu_item::MenuItem;
use crate::geometry::{Point, Rect, Size};

use super::style::MenuStyle;

pub(crate) fn item_width(style: &MenuStyle, label: &str) -> f32 {
    let text = label.chars().count() as f32 * style.char_advance;
    (text + 2.0 * style.item_padding).max(style.min_item_width)
}

/// Content size of the whole item row.
pub(crate) fn measure(style: &MenuStyle, items: &[Rc<MenuItem>]) -> Size {
    let mut width = 2.0 * style.horizontal_padding;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            width += style.item_spacing;
        }
        width += item_width(style, item.label());
    }
    Size::new(width, style.item_height + 2.0 * style.vertical_padding)
}

/// Local bounds of `items[index]`.
pub(crate) fn item_rect(style: &MenuStyle, items: &[Rc<MenuItem>], index: usize) -> Rect {
    let mut x = style.horizontal_padding;
    for item in &items[..index] {
        x += item_width(style, item.label()) + style.item_spacing;
    }
    Rect::new(
        x,
        style.vertical_padding,
        item_width(style, items[index].label()),
        style.item_height,
    )
}

/// Index of the item under `local`, if any.
pub(crate) fn hit_test(style: &MenuStyle, items: &[Rc<MenuItem>], local: Point) -> Option<usize> {
    (0..items.len()).find(|&index| item_rect(style, items, index).contains(local))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(labels: &[&str]) -> Vec<Rc<MenuItem>> {
        labels
            .iter()
            .map(|label| Rc::new(MenuItem::leaf(*label)))
            .collect()
    }

    fn style() -> MenuStyle {
        MenuStyle::default()
    }

    #[test]
    fn test_item_width_respects_minimum() {
        let style = style();
        assert_eq!(item_width(&style, "a"), style.min_item_width);

        let wide = item_width(&style, "a rather long label");
        assert!(wide > style.min_item_width);
    }

    #[test]
    fn test_measure_row() {
        let style = style();
        let items = items(&["aa", "bb"]);

        let size = measure(&style, &items);
        let expected_width = 2.0 * style.horizontal_padding
            + 2.0 * style.min_item_width
            + style.item_spacing;
        assert_eq!(size.width, expected_width);
        assert_eq!(size.height, style.item_height + 2.0 * style.vertical_padding);
    }

    #[test]
    fn test_item_rects_do_not_overlap() {
        let style = style();
        let items = items(&["one", "two", "three"]);

        let first = item_rect(&style, &items, 0);
        let second = item_rect(&style, &items, 1);
        assert!(first.x + first.width <= second.x);
    }

    #[test]
    fn test_hit_test_in_order() {
        let style = style();
        let items = items(&["one", "two"]);

        let first = item_rect(&style, &items, 0);
        let second = item_rect(&style, &items, 1);

        assert_eq!(hit_test(&style, &items, first.center()), Some(0));
        assert_eq!(hit_test(&style, &items, second.center()), Some(1));
        // In the gap between items
        assert_eq!(
            hit_test(
                &style,
                &items,
                Point::new(first.x + first.width + style.item_spacing / 2.0, first.y)
            ),
            None
        );
        // Outside the row entirely
        assert_eq!(hit_test(&style, &items, Point::new(-1.0, -1.0)), None);
    }
}
