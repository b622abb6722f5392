//! Surface implementation without a display server.

use std::cell::Cell;
use std::rc::Rc;

use super::{MenuSurface, SurfaceError, SurfaceProvider};
use crate::geometry::{Point, Rect, Size};

/// An in-memory popup surface.
///
/// Tracks position, size and visibility exactly like a real popup would,
/// which is enough for the routing state machine to run end to end.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    origin: Point,
    size: Size,
    visible: bool,
    redraws: u32,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of redraw requests received since creation.
    pub fn redraw_count(&self) -> u32 {
        self.redraws
    }
}

impl MenuSurface for HeadlessSurface {
    fn show_at(&mut self, origin: Point, size: Size) -> Result<(), SurfaceError> {
        self.origin = origin;
        self.size = size;
        self.visible = true;
        Ok(())
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

/// Provider handing out [`HeadlessSurface`]s.
#[derive(Debug, Default)]
pub struct HeadlessSurfaces {
    created: Cell<usize>,
}

impl HeadlessSurfaces {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Number of surfaces created so far.
    pub fn created(&self) -> usize {
        self.created.get()
    }
}

impl SurfaceProvider for HeadlessSurfaces {
    fn create_surface(&self) -> Result<Box<dyn MenuSurface>, SurfaceError> {
        self.created.set(self.created.get() + 1);
        Ok(Box::new(HeadlessSurface::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_hide() {
        let mut surface = HeadlessSurface::new();
        assert!(!surface.is_visible());

        surface
            .show_at(Point::new(10.0, 20.0), Size::new(100.0, 30.0))
            .unwrap();
        assert!(surface.is_visible());
        assert_eq!(surface.bounds(), Rect::new(10.0, 20.0, 100.0, 30.0));

        surface.hide();
        assert!(!surface.is_visible());
    }

    #[test]
    fn test_global_to_local() {
        let mut surface = HeadlessSurface::new();
        surface
            .show_at(Point::new(50.0, 60.0), Size::new(10.0, 10.0))
            .unwrap();

        let local = surface.map_global_to_local(Point::new(55.0, 63.0));
        assert_eq!(local, Point::new(5.0, 3.0));
    }

    #[test]
    fn test_provider_counts_surfaces() {
        let provider = HeadlessSurfaces::new();
        assert_eq!(provider.created(), 0);

        let _a = provider.create_surface().unwrap();
        let _b = provider.create_surface().unwrap();
        assert_eq!(provider.created(), 2);
    }
}
