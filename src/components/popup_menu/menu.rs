use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::components::menu_item::MenuItem;
use crate::geometry::{Point, Rect};
use crate::input::{buttons, PointerEvent, PointerEventKind};
use crate::session::{EventPump, ModalSession, SessionError};
use crate::surfaces::{MenuSurface, SurfaceError, SurfaceProvider};

use super::causer::CausedPopup;
use super::layout;
use super::style::MenuStyle;

/// Whether activating an item should pop up its submenu.
///
/// These are the only two policies; there is no timed-delay expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPolicy {
    /// Open the activated item's submenu immediately.
    Immediate,
    /// Activate only; leave submenus as they are.
    NoPopup,
}

/// Where a routed pointer event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// Handled by the menu the event was delivered to.
    Local,
    /// Claimed by an open submenu `hops` links further down the chain.
    Forwarded { hops: usize },
    /// No surface in the chain contains the event position.
    Unclaimed,
}

pub(super) struct MenuCore {
    items: Vec<Rc<MenuItem>>,
    active_item: Option<usize>,
    active_submenu: Option<PopupMenu>,
    causer: CausedPopup,
    committed: Option<Rc<MenuItem>>,
    pending: Option<Rc<MenuItem>>,
    surface: Box<dyn MenuSurface>,
    provider: Rc<dyn SurfaceProvider>,
    style: MenuStyle,
    origin: Point,
    visible: bool,
}

/// One level of a cascading popup menu.
///
/// A menu owns an ordered row of items; an item may own a nested menu that
/// pops up when the item is activated. Each level lives on its own popup
/// surface, yet the whole chain behaves as a single widget: pointer events
/// offered to any level are routed to the level that owns them, hover moves
/// the activation and swaps submenus, and a release over a leaf commits the
/// selection and collapses the chain.
///
/// `PopupMenu` is a cheap-clone handle; clones refer to the same menu.
#[derive(Clone)]
pub struct PopupMenu {
    core: Rc<RefCell<MenuCore>>,
}

impl PopupMenu {
    // === Construction ===

    /// Create an empty root menu using the loaded configuration's style.
    pub fn new(provider: Rc<dyn SurfaceProvider>) -> Result<Self, SurfaceError> {
        Self::with_style(provider, MenuStyle::from_config())
    }

    /// Create an empty menu with an explicit style.
    pub fn with_style(
        provider: Rc<dyn SurfaceProvider>,
        style: MenuStyle,
    ) -> Result<Self, SurfaceError> {
        let surface = provider.create_surface()?;
        Ok(Self {
            core: Rc::new(RefCell::new(MenuCore {
                items: Vec::new(),
                active_item: None,
                active_submenu: None,
                causer: CausedPopup::default(),
                committed: None,
                pending: None,
                surface,
                provider,
                style,
                origin: Point::default(),
                visible: false,
            })),
        })
    }

    pub(super) fn from_core(core: Rc<RefCell<MenuCore>>) -> Self {
        Self { core }
    }

    pub(super) fn downgrade(&self) -> Weak<RefCell<MenuCore>> {
        Rc::downgrade(&self.core)
    }

    /// Identity comparison of menu handles.
    pub fn ptr_eq(&self, other: &PopupMenu) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    // === Tree Building ===

    /// Append a selectable leaf entry.
    pub fn add_item(&self, label: impl Into<String>) -> Rc<MenuItem> {
        let item = Rc::new(MenuItem::leaf(label));
        self.core.borrow_mut().items.push(item.clone());
        item
    }

    /// Append an entry owning a new nested menu.
    ///
    /// Returns the child menu, already linked to its item and ready to be
    /// populated. The child shares this menu's surface provider and style.
    pub fn add_submenu(&self, label: impl Into<String>) -> Result<PopupMenu, SurfaceError> {
        let (provider, style) = {
            let core = self.core.borrow();
            (core.provider.clone(), core.style.clone())
        };
        let child = PopupMenu::with_style(provider, style)?;
        let item = Rc::new(MenuItem::with_submenu(label, child.clone()));
        self.core.borrow_mut().items.push(item);
        Ok(child)
    }

    // === Getters ===

    pub fn len(&self) -> usize {
        self.core.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.borrow().items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<Rc<MenuItem>> {
        self.core.borrow().items.get(index).cloned()
    }

    pub fn items(&self) -> Vec<Rc<MenuItem>> {
        self.core.borrow().items.clone()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.core.borrow().active_item
    }

    pub fn active_item(&self) -> Option<Rc<MenuItem>> {
        let core = self.core.borrow();
        core.active_item.map(|index| core.items[index].clone())
    }

    /// The currently open submenu, if any.
    pub fn active_submenu(&self) -> Option<PopupMenu> {
        self.core.borrow().active_submenu.clone()
    }

    /// The menu that caused this one to appear, while shown as a submenu.
    pub fn causing_menu(&self) -> Option<PopupMenu> {
        self.core.borrow().causer.menu()
    }

    /// The item in the causing menu that triggered this submenu.
    pub fn causing_item(&self) -> Option<Rc<MenuItem>> {
        self.core.borrow().causer.item()
    }

    pub fn is_visible(&self) -> bool {
        self.core.borrow().visible
    }

    /// Surface bounds in global coordinates, while visible.
    pub fn bounds(&self) -> Option<Rect> {
        let core = self.core.borrow();
        core.visible.then(|| core.surface.bounds())
    }

    /// Global bounds of `items[index]`, while visible.
    pub fn item_bounds(&self, index: usize) -> Option<Rect> {
        let core = self.core.borrow();
        if !core.visible || index >= core.items.len() {
            return None;
        }
        let rect = layout::item_rect(&core.style, &core.items, index);
        Some(Rect::new(
            core.origin.x + rect.x,
            core.origin.y + rect.y,
            rect.width,
            rect.height,
        ))
    }

    // === Show / Hide ===

    /// Show this menu at `origin` (global coordinates).
    ///
    /// Showing an already-visible menu at the same origin is a no-op.
    pub fn show(&self, origin: Point) -> Result<(), SurfaceError> {
        let mut core = self.core.borrow_mut();
        if core.visible && core.origin == origin {
            return Ok(());
        }
        let size = layout::measure(&core.style, &core.items);
        core.surface.show_at(origin, size)?;
        core.origin = origin;
        core.visible = true;
        debug!(x = origin.x, y = origin.y, "menu shown");
        Ok(())
    }

    /// Hide this menu and everything below it.
    ///
    /// The open submenu (if any) is hidden first, the causer/active-submenu
    /// link pair is cleared on both ends, the active item is deactivated,
    /// then the surface is unmapped. A hidden menu is not part of any chain.
    pub fn hide(&self) {
        if !self.core.borrow().visible {
            return;
        }

        let submenu = self.core.borrow_mut().active_submenu.take();
        if let Some(submenu) = submenu {
            submenu.hide();
        }

        let causer = std::mem::take(&mut self.core.borrow_mut().causer);
        if let Some(parent) = causer.menu() {
            let mut parent_core = parent.core.borrow_mut();
            let still_linked = parent_core
                .active_submenu
                .as_ref()
                .map_or(false, |sub| Rc::ptr_eq(&sub.core, &self.core));
            if still_linked {
                parent_core.active_submenu = None;
            }
        }

        let mut core = self.core.borrow_mut();
        if let Some(index) = core.active_item.take() {
            core.items[index].set_activated(false);
        }
        core.surface.hide();
        core.visible = false;
        debug!("menu hidden");
    }

    // === Activation ===

    /// Change which item is highlighted.
    ///
    /// Switching away from an item closes its open submenu; re-activating
    /// the current item is a no-op. With [`PopupPolicy::Immediate`] the new
    /// item's submenu (if it has one and it is not already open) pops up
    /// below and right-offset from the item's bounds.
    pub fn set_active_item(&self, index: Option<usize>, policy: PopupPolicy) {
        debug_assert!(index.map_or(true, |i| i < self.core.borrow().items.len()));

        let previous = self.core.borrow().active_item;
        if previous != index {
            if let Some(prev) = previous {
                let item = self.core.borrow().items[prev].clone();
                item.set_activated(false);
                debug!(label = item.label(), "leave");
            }

            // The open submenu always belongs to the previously active item,
            // so a selection switch closes it.
            let submenu = self.core.borrow().active_submenu.clone();
            if let Some(submenu) = submenu {
                submenu.hide();
            }

            self.core.borrow_mut().active_item = index;
            if let Some(new) = index {
                let item = self.core.borrow().items[new].clone();
                item.set_activated(true);
                debug!(label = item.label(), "enter");
            }
            self.core.borrow_mut().surface.request_redraw();
        }

        if policy == PopupPolicy::Immediate {
            if let Some(new) = index {
                let wants_popup = {
                    let core = self.core.borrow();
                    core.items[new].has_submenu() && core.active_submenu.is_none()
                };
                if wants_popup {
                    self.open_submenu(new);
                }
            }
        }
    }

    /// Open the submenu owned by `items[index]`, linking both ends of the
    /// causer relation before the child is shown.
    fn open_submenu(&self, index: usize) {
        let (child, item, position) = {
            let core = self.core.borrow();
            let item = core.items[index].clone();
            let Some(child) = item.submenu().cloned() else {
                return;
            };
            let rect = layout::item_rect(&core.style, &core.items, index);
            let position = Point::new(
                core.origin.x + rect.x + core.style.submenu_offset_x,
                core.origin.y + rect.y + rect.height + core.style.submenu_offset_y,
            );
            (child, item, position)
        };

        debug_assert!(
            self.core.borrow().active_submenu.is_none(),
            "a submenu is already open"
        );
        debug_assert!(
            !child.core.borrow().causer.is_linked(),
            "submenu is already linked to a causer"
        );

        // Forward link and back link switch together.
        child.core.borrow_mut().causer = CausedPopup::link(self, &item);
        self.core.borrow_mut().active_submenu = Some(child.clone());

        if let Err(err) = child.show(position) {
            warn!(%err, "failed to show submenu");
            child.core.borrow_mut().causer = CausedPopup::default();
            self.core.borrow_mut().active_submenu = None;
            return;
        }
        debug!(label = item.label(), "submenu opened");
    }

    // === Event Routing ===

    /// Offer a pointer event to this menu.
    ///
    /// The event is handled locally when its global position falls inside
    /// this menu's bounds; otherwise it is forwarded hop by hop down the
    /// open-submenu chain. A press or release that no surface in the chain
    /// claims dismisses the whole chain.
    pub fn route_event(&self, event: &PointerEvent) -> Routed {
        if self.contains_global(event.global) {
            self.handle_local(event);
            return Routed::Local;
        }

        let submenu = self.core.borrow().active_submenu.clone();
        if let Some(submenu) = submenu {
            return match submenu.route_event(event) {
                Routed::Local => Routed::Forwarded { hops: 1 },
                Routed::Forwarded { hops } => Routed::Forwarded { hops: hops + 1 },
                Routed::Unclaimed => Routed::Unclaimed,
            };
        }

        // End of the chain: nothing claimed the event.
        match event.kind {
            PointerEventKind::Press { .. } | PointerEventKind::Release { .. } => {
                debug!("pointer button outside the chain, dismissing");
                self.dismiss_chain();
            }
            PointerEventKind::Motion => {}
        }
        Routed::Unclaimed
    }

    fn contains_global(&self, global: Point) -> bool {
        let core = self.core.borrow();
        core.visible && core.surface.bounds().contains(global)
    }

    fn handle_local(&self, event: &PointerEvent) {
        let local = self.core.borrow().surface.map_global_to_local(event.global);
        match event.kind {
            PointerEventKind::Motion => self.handle_motion(local),
            PointerEventKind::Press { button } if button == buttons::LEFT => {
                self.handle_press(local)
            }
            PointerEventKind::Release { button } if button == buttons::LEFT => {
                self.handle_release(local)
            }
            _ => {}
        }
    }

    fn handle_motion(&self, local: Point) {
        let hit = {
            let core = self.core.borrow();
            layout::hit_test(&core.style, &core.items, local)
        };
        match hit {
            Some(index) => {
                let (has_submenu, submenu_open) = {
                    let core = self.core.borrow();
                    let item = &core.items[index];
                    let open = item.submenu().map_or(false, |sub| {
                        core.active_submenu
                            .as_ref()
                            .map_or(false, |active| active.ptr_eq(sub))
                    });
                    (item.has_submenu(), open)
                };
                if has_submenu && submenu_open {
                    // Back over the causing item: pull focus out of the
                    // submenu but keep it open.
                    if let Some(submenu) = self.active_submenu() {
                        submenu.set_active_item(None, PopupPolicy::NoPopup);
                    }
                } else if has_submenu {
                    self.set_active_item(Some(index), PopupPolicy::Immediate);
                } else {
                    self.set_active_item(Some(index), PopupPolicy::NoPopup);
                }
            }
            None => {
                // Off the items: defocus an open submenu. It only closes on
                // dismissal or a sibling switch, never on move-out.
                if let Some(submenu) = self.active_submenu() {
                    submenu.set_active_item(None, PopupPolicy::NoPopup);
                }
            }
        }
    }

    fn handle_press(&self, local: Point) {
        let hit = {
            let core = self.core.borrow();
            layout::hit_test(&core.style, &core.items, local)
        };
        if hit.is_none() {
            debug!("press on empty menu area, dismissing chain");
            self.dismiss_chain();
            return;
        }

        // The sync target is the active item, provided it is an enabled leaf.
        let target = {
            let core = self.core.borrow();
            core.active_item.and_then(|index| {
                let item = &core.items[index];
                (item.is_enabled() && !item.has_submenu()).then(|| item.clone())
            })
        };
        let owner = self.session_owner();
        owner.core.borrow_mut().pending = target;
    }

    fn handle_release(&self, local: Point) {
        let hit = {
            let core = self.core.borrow();
            layout::hit_test(&core.style, &core.items, local)
        };
        let committed = {
            let core = self.core.borrow();
            match (hit, core.active_item) {
                (Some(hit), Some(active)) if hit == active => {
                    let item = &core.items[active];
                    (item.is_enabled() && !item.has_submenu()).then(|| item.clone())
                }
                _ => None,
            }
        };
        let Some(item) = committed else {
            return;
        };

        let owner = self.session_owner();
        {
            let mut owner_core = owner.core.borrow_mut();
            owner_core.pending = Some(item.clone());
            owner_core.committed = Some(item.clone());
        }
        debug!(label = item.label(), "item committed");
        self.dismiss_chain();
    }

    /// The menu owning the modal wait: the top of the causer chain.
    fn session_owner(&self) -> PopupMenu {
        let mut current = self.clone();
        loop {
            let parent = current.core.borrow().causer.menu();
            match parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Collapse the entire visible chain, from this menu up to and including
    /// the root. A single gesture takes down the whole cascade.
    pub fn dismiss_chain(&self) {
        let mut current = self.clone();
        loop {
            // Capture the causer before hide() detaches it.
            let parent = current.core.borrow().causer.menu();
            current.hide();
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }

    // === Modal Execution ===

    /// Run the menu modally at `at`, blocking on `pump` until the chain is
    /// dismissed. Returns the committed item, if any.
    pub fn exec_at(
        &self,
        pump: &mut dyn EventPump,
        at: Point,
    ) -> Result<Option<Rc<MenuItem>>, SessionError> {
        ModalSession::new(self).run(pump, at)
    }

    pub(crate) fn reset_session_state(&self) {
        let mut core = self.core.borrow_mut();
        core.pending = None;
        core.committed = None;
    }

    /// The committed selection, cleared on read. Set on the session owner
    /// when a release lands on the active leaf item.
    pub fn take_committed(&self) -> Option<Rc<MenuItem>> {
        self.core.borrow_mut().committed.take()
    }

    /// The press-recorded sync target, if the last press landed while an
    /// enabled leaf item was active.
    pub fn pending_target(&self) -> Option<Rc<MenuItem>> {
        self.core.borrow().pending.clone()
    }
}
