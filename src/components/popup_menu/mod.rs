mod causer;
mod layout;
mod menu;
mod style;

pub use menu::{PopupMenu, PopupPolicy, Routed};
pub use style::MenuStyle;
