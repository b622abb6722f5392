//! Modal execution of a menu chain.
//!
//! The blocking wait belongs to the root menu only: it starts when the root
//! is shown and ends when the entire chain has been dismissed. The
//! suspension itself is cooperative — [`ModalSession::run`] repeatedly asks
//! an [`EventPump`] to block for and deliver the next batch of pointer
//! events, and resumes once the root reports hidden.

mod pumps;

pub use pumps::{CalloopPump, QueuedPump};

use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::components::menu_item::MenuItem;
use crate::components::popup_menu::PopupMenu;
use crate::geometry::Point;
use crate::surfaces::SurfaceError;

/// Error type for modal sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The pump ran out of events while the chain is still visible.
    #[error("event pump exhausted while the menu chain is still visible")]
    PumpExhausted,

    /// The underlying event loop failed.
    #[error("event loop error: {0}")]
    EventLoop(String),

    /// Showing the root menu failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Source of pointer events for a running session.
///
/// `blocking_dispatch` must block until at least one event has been
/// delivered into the chain (through [`PopupMenu::route_event`] on the root
/// or any other menu in the chain), then return. It is called again as long
/// as the root stays visible.
pub trait EventPump {
    fn blocking_dispatch(&mut self, root: &PopupMenu) -> Result<(), SessionError>;
}

/// The blocking wait wrapped around one execution of a menu chain.
///
/// A session is single-use: [`ModalSession::run`] consumes it, and a fresh
/// session is created per execution.
pub struct ModalSession {
    root: PopupMenu,
}

impl ModalSession {
    pub fn new(root: &PopupMenu) -> Self {
        Self { root: root.clone() }
    }

    /// Show the root at `at` and block until the whole chain is dismissed.
    ///
    /// By the cascade-hide contract the root only reports hidden after all
    /// of its descendants already are, so a hidden root means the session is
    /// over. Returns the committed item, or `None` when the chain was
    /// dismissed without a selection.
    pub fn run(
        self,
        pump: &mut dyn EventPump,
        at: Point,
    ) -> Result<Option<Rc<MenuItem>>, SessionError> {
        debug_assert!(
            self.root.causing_menu().is_none(),
            "modal sessions run on the root menu only"
        );

        self.root.reset_session_state();
        self.root.show(at)?;
        debug!("modal session started");

        while self.root.is_visible() {
            pump.blocking_dispatch(&self.root)?;
        }

        let committed = self.root.take_committed();
        debug!(
            committed = committed.as_deref().map(MenuItem::label),
            "modal session finished"
        );
        Ok(committed)
    }
}
