//! Event pump implementations.

use std::collections::VecDeque;
use std::time::Duration;

use crate::components::popup_menu::PopupMenu;
use crate::input::PointerEvent;

use super::{EventPump, SessionError};

/// A pump over a pre-recorded event queue.
///
/// Delivers one event per dispatch; an empty queue with the chain still
/// visible is an error rather than a hang. Useful for tests and scripted
/// demos.
#[derive(Debug, Default)]
pub struct QueuedPump {
    queue: VecDeque<PointerEvent>,
}

impl QueuedPump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = PointerEvent>) {
        self.queue.extend(events);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventPump for QueuedPump {
    fn blocking_dispatch(&mut self, root: &PopupMenu) -> Result<(), SessionError> {
        let Some(event) = self.queue.pop_front() else {
            return Err(SessionError::PumpExhausted);
        };
        root.route_event(&event);
        Ok(())
    }
}

/// State shared with the calloop sources for the duration of one dispatch.
#[derive(Default)]
struct DispatchState {
    root: Option<PopupMenu>,
}

/// A pump backed by a calloop event loop.
///
/// Pointer events are fed in through a channel ([`CalloopPump::sender`]);
/// each `blocking_dispatch` parks inside the event loop until at least one
/// arrives and routes it into the chain. The embedding's display backend
/// holds the sender and forwards its pointer stream.
pub struct CalloopPump {
    event_loop: calloop::EventLoop<'static, DispatchState>,
    sender: calloop::channel::Sender<PointerEvent>,
}

impl CalloopPump {
    pub fn new() -> Result<Self, SessionError> {
        let event_loop = calloop::EventLoop::try_new()
            .map_err(|err| SessionError::EventLoop(err.to_string()))?;

        let (sender, channel) = calloop::channel::channel();
        event_loop
            .handle()
            .insert_source(channel, |event, _, state: &mut DispatchState| {
                if let calloop::channel::Event::Msg(pointer_event) = event {
                    if let Some(root) = state.root.as_ref() {
                        root.route_event(&pointer_event);
                    }
                }
            })
            .map_err(|err| SessionError::EventLoop(err.to_string()))?;

        Ok(Self { event_loop, sender })
    }

    /// A handle for feeding pointer events into the pump.
    pub fn sender(&self) -> calloop::channel::Sender<PointerEvent> {
        self.sender.clone()
    }
}

impl EventPump for CalloopPump {
    fn blocking_dispatch(&mut self, root: &PopupMenu) -> Result<(), SessionError> {
        let mut state = DispatchState {
            root: Some(root.clone()),
        };
        self.event_loop
            .dispatch(None::<Duration>, &mut state)
            .map_err(|err| SessionError::EventLoop(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::popup_menu::{MenuStyle, PopupMenu};
    use crate::geometry::Point;
    use crate::surfaces::HeadlessSurfaces;

    fn leaf_menu() -> PopupMenu {
        let menu = PopupMenu::with_style(HeadlessSurfaces::new(), MenuStyle::default()).unwrap();
        menu.add_item("Quit");
        menu
    }

    #[test]
    fn test_queued_pump_runs_a_session() {
        let menu = leaf_menu();
        let at = Point::new(20.0, 20.0);

        // Show once to learn the geometry; exec_at at the same origin is a
        // no-op re-show.
        menu.show(at).unwrap();
        let center = menu.item_bounds(0).unwrap().center();

        let mut pump = QueuedPump::new();
        pump.extend([
            PointerEvent::motion(center.x, center.y),
            PointerEvent::press(center.x, center.y),
            PointerEvent::release(center.x, center.y),
        ]);

        let selected = menu.exec_at(&mut pump, at).unwrap();
        assert_eq!(selected.unwrap().label(), "Quit");
        assert_eq!(pump.remaining(), 0);
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_queued_pump_exhaustion_is_an_error() {
        let menu = leaf_menu();
        let mut pump = QueuedPump::new();

        let result = menu.exec_at(&mut pump, Point::new(0.0, 0.0));
        assert!(matches!(result, Err(SessionError::PumpExhausted)));
    }

    #[test]
    fn test_calloop_pump_runs_a_session() {
        let menu = leaf_menu();
        let at = Point::new(20.0, 20.0);

        menu.show(at).unwrap();
        let center = menu.item_bounds(0).unwrap().center();

        let mut pump = CalloopPump::new().unwrap();
        let sender = pump.sender();
        sender.send(PointerEvent::motion(center.x, center.y)).unwrap();
        sender.send(PointerEvent::press(center.x, center.y)).unwrap();
        sender
            .send(PointerEvent::release(center.x, center.y))
            .unwrap();

        let selected = menu.exec_at(&mut pump, at).unwrap();
        assert_eq!(selected.unwrap().label(), "Quit");
    }
}
