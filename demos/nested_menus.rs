//! Builds a three-level nested menu and drives it with a scripted pointer
//! gesture: hover a root entry, descend two submenu levels, then click a
//! leaf. Run with `RUST_LOG=debug` to watch the routing decisions.

use cascade_kit::prelude::*;

/// A pump that decides the next pointer event from the current chain state,
/// like a user following the cascade with the mouse.
struct ScriptedGesture {
    step: usize,
}

impl ScriptedGesture {
    fn new() -> Self {
        Self { step: 0 }
    }

    fn deepest(root: &PopupMenu) -> PopupMenu {
        let mut current = root.clone();
        while let Some(submenu) = current.active_submenu() {
            current = submenu;
        }
        current
    }

    fn over(menu: &PopupMenu, index: usize, make: fn(f32, f32) -> PointerEvent) -> PointerEvent {
        let center = menu
            .item_bounds(index)
            .expect("item must be visible")
            .center();
        make(center.x, center.y)
    }
}

impl EventPump for ScriptedGesture {
    fn blocking_dispatch(&mut self, root: &PopupMenu) -> Result<(), SessionError> {
        let event = match self.step {
            // Hover the second root entry; its submenu pops up below it.
            0 => Self::over(root, 1, PointerEvent::motion),
            // Descend: hover an entry of the deepest open submenu.
            1 => Self::over(&Self::deepest(root), 2, PointerEvent::motion),
            // One level further down, onto a leaf.
            2 => Self::over(&Self::deepest(root), 3, PointerEvent::motion),
            // Click it.
            3 => Self::over(&Self::deepest(root), 3, PointerEvent::press),
            4 => Self::over(&Self::deepest(root), 3, PointerEvent::release),
            _ => return Err(SessionError::PumpExhausted),
        };
        self.step += 1;
        root.route_event(&event);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let menu = PopupMenu::new(HeadlessSurfaces::new())?;
    for i in 0..5 {
        let level1 = menu.add_submenu(format!("item {i}"))?;
        for k in 0..5 {
            let level2 = level1.add_submenu(format!("item {i}:{k}"))?;
            for j in 0..5 {
                level2.add_item(format!("item {i}:{k}:{j}"));
            }
        }
    }

    println!("Running the nested menu with a scripted gesture...");
    let mut gesture = ScriptedGesture::new();
    let selected = menu.exec_at(&mut gesture, Point::new(200.0, 200.0))?;

    match selected {
        Some(item) => println!("Selected: {}", item.label()),
        None => println!("Dismissed without a selection"),
    }
    Ok(())
}
