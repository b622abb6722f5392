//! Display-surface abstraction consumed by the menu chain.
//!
//! Every menu level is materialized as an independent top-level popup
//! surface. The chain only needs a narrow contract from the display system:
//! map/unmap at a global position, bounds reporting, coordinate translation
//! and redraw requests. [`HeadlessSurface`] implements it without a display
//! server and backs the tests and the demo.

mod headless;

pub use headless::{HeadlessSurface, HeadlessSurfaces};

use thiserror::Error;

use crate::geometry::{Point, Rect, Size};

/// Error type for surface operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The display backend could not create the surface.
    #[error("failed to create surface")]
    CreationFailed,

    /// The display backend refused to map the surface.
    #[error("failed to show surface: {0}")]
    ShowFailed(String),
}

/// A top-level popup surface a single menu level draws into.
///
/// Positions passed in and bounds reported back are in global screen
/// coordinates; local coordinates are relative to the surface's top-left
/// corner.
pub trait MenuSurface {
    /// Map the surface at `origin`, sized to fit `size` content.
    fn show_at(&mut self, origin: Point, size: Size) -> Result<(), SurfaceError>;

    /// Unmap the surface. Hiding an already-hidden surface is a no-op.
    fn hide(&mut self);

    /// Whether the surface is currently mapped.
    fn is_visible(&self) -> bool;

    /// Current bounds in global coordinates. Meaningful only while mapped.
    fn bounds(&self) -> Rect;

    /// Translate a global point into this surface's local frame.
    fn map_global_to_local(&self, global: Point) -> Point {
        let bounds = self.bounds();
        Point::new(global.x - bounds.x, global.y - bounds.y)
    }

    /// Request a repaint after item state changed.
    fn request_redraw(&mut self);
}

/// Factory for menu surfaces.
///
/// Each submenu materializes its own surface at show time, so the whole
/// tree shares one provider.
pub trait SurfaceProvider {
    fn create_surface(&self) -> Result<Box<dyn MenuSurface>, SurfaceError>;
}
