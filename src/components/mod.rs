pub mod menu_item;
pub mod popup_menu;
