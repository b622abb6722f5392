pub mod components;
pub mod config;
pub mod geometry;
pub mod input;
pub mod session;
pub mod surfaces;

// Re-export commonly used items
pub use components::menu_item::MenuItem;
pub use components::popup_menu::{MenuStyle, PopupMenu, PopupPolicy, Routed};
pub use session::{EventPump, ModalSession, SessionError};
pub use surfaces::{HeadlessSurface, HeadlessSurfaces, MenuSurface, SurfaceError, SurfaceProvider};

/// Convenience prelude for building and running menu chains
pub mod prelude {
    pub use crate::components::menu_item::MenuItem;
    pub use crate::components::popup_menu::{MenuStyle, PopupMenu, PopupPolicy, Routed};
    pub use crate::config::Config;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::input::{buttons, PointerEvent, PointerEventKind};
    pub use crate::session::{CalloopPump, EventPump, ModalSession, QueuedPump, SessionError};
    pub use crate::surfaces::{
        HeadlessSurface, HeadlessSurfaces, MenuSurface, SurfaceError, SurfaceProvider,
    };
}
