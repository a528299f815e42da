// Copyright 2026 the Lodestone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, Ref, RefCell};
use core::fmt;

use kurbo::Point;
use lodestone_hooks::{Hook, Hooks};
use lodestone_paint::PaintBackend;
use lodestone_pointer::{PointerEvents, PointerKind};

use crate::entity::{DragPoint, EntityFlags};

/// Transient exclusive-capture state binding one entity to ongoing pointer
/// movement.
///
/// A session exists only between a press that hit an entity and the next
/// release. While it exists, the controller's generic listeners are
/// suppressed, so no second drag can start and no other entity is
/// hit-tested.
pub struct DragSession {
    entity: usize,
    move_hook: Hook<Point>,
    up_hook: Hook<Point>,
}

impl DragSession {
    /// Index of the entity being dragged.
    #[must_use]
    pub fn entity(&self) -> usize {
        self.entity
    }

    fn end(self) {
        self.move_hook.remove();
        self.up_hook.remove();
    }
}

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("entity", &self.entity)
            .finish()
    }
}

struct ControllerState {
    entities: Vec<DragPoint>,
    hovered: Option<usize>,
    session: Option<DragSession>,
}

impl ControllerState {
    /// First entity hit at `at`, in priority (insertion) order.
    fn hit_index(&self, at: Point) -> Option<usize> {
        self.entities.iter().position(|e| e.hit_test(at))
    }
}

/// Maintains a set of draggable entities over a pointer stream.
///
/// Create the controller with its entities, then [`attach`] it to a
/// [`PointerEvents`] stream once. See the [crate docs](crate) for the full
/// interaction contract.
///
/// [`attach`]: DragController::attach
#[derive(Clone)]
pub struct DragController {
    state: Rc<RefCell<ControllerState>>,
    suppressed: Rc<Cell<bool>>,
    repaint: Hooks<()>,
    generic_hooks: Rc<RefCell<Vec<Hook<Point>>>>,
}

impl DragController {
    /// Creates a controller over `entities`, in hit-test priority order.
    #[must_use]
    pub fn new(entities: Vec<DragPoint>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ControllerState {
                entities,
                hovered: None,
                session: None,
            })),
            suppressed: Rc::new(Cell::new(false)),
            repaint: Hooks::new(),
            generic_hooks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Subscribes the controller's generic listeners to `pointer`.
    ///
    /// Call once per controller; attaching twice would double-process
    /// events.
    pub fn attach(&self, pointer: &PointerEvents) {
        let mut generic = self.generic_hooks.borrow_mut();
        generic.push(pointer.on(PointerKind::Move, self.hover_listener()));
        generic.push(pointer.on(PointerKind::Press, self.press_listener(pointer)));
    }

    /// The generic move listener: hover tracking while not suppressed.
    fn hover_listener(&self) -> impl FnMut(&Point) + 'static {
        let state = Rc::clone(&self.state);
        let suppressed = Rc::clone(&self.suppressed);
        let repaint = self.repaint.clone();
        move |&at| {
            if suppressed.get() {
                return;
            }
            {
                let mut state = state.borrow_mut();
                let hit = state.hit_index(at);
                if hit == state.hovered {
                    return;
                }
                if let Some(prev) = state.hovered {
                    state.entities[prev].flags.remove(EntityFlags::HOVERED);
                }
                if let Some(idx) = hit {
                    state.entities[idx].flags.insert(EntityFlags::HOVERED);
                }
                state.hovered = hit;
            }
            repaint.trigger(&());
        }
    }

    /// The generic press listener: opens a drag session on a hit.
    fn press_listener(&self, pointer: &PointerEvents) -> impl FnMut(&Point) + 'static {
        let state = Rc::clone(&self.state);
        let suppressed = Rc::clone(&self.suppressed);
        let repaint = self.repaint.clone();
        let pointer = pointer.clone();
        move |&at| {
            if suppressed.get() {
                return;
            }
            let hit = state.borrow().hit_index(at);
            let Some(idx) = hit else {
                return;
            };
            if !state.borrow().entities[idx]
                .flags
                .contains(EntityFlags::DRAGGABLE)
            {
                return;
            }

            // Capture: snap to the press position and suppress every other
            // listener until release.
            state.borrow_mut().entities[idx].position = at;
            suppressed.set(true);

            let move_state = Rc::clone(&state);
            let move_repaint = repaint.clone();
            let move_hook = pointer.on(PointerKind::Move, move |&at| {
                move_state.borrow_mut().entities[idx].position = at;
                move_repaint.trigger(&());
            });

            let up_state = Rc::clone(&state);
            let up_suppressed = Rc::clone(&suppressed);
            let up_repaint = repaint.clone();
            let up_hook = pointer.on(PointerKind::Release, move |_| {
                // Removing the scoped hooks includes the one currently
                // executing; the registry tolerates that.
                if let Some(session) = up_state.borrow_mut().session.take() {
                    session.end();
                }
                up_suppressed.set(false);
                up_repaint.trigger(&());
            });

            state.borrow_mut().session = Some(DragSession {
                entity: idx,
                move_hook,
                up_hook,
            });
            repaint.trigger(&());
        }
    }

    /// Subscribes to repaint requests.
    ///
    /// Fires after any state change that affects visual output: a hover
    /// transition, every drag move, and the end of a drag.
    pub fn on_repaint(&self, cb: impl FnMut(&()) + 'static) -> Hook<()> {
        self.repaint.add(cb)
    }

    /// The entities, in hit-test priority order.
    #[must_use]
    pub fn entities(&self) -> Ref<'_, [DragPoint]> {
        Ref::map(self.state.borrow(), |s| s.entities.as_slice())
    }

    /// Runs `f` with mutable access to the entities.
    pub fn with_entities_mut<R>(&self, f: impl FnOnce(&mut [DragPoint]) -> R) -> R {
        f(&mut self.state.borrow_mut().entities)
    }

    /// Index of the entity currently under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.state.borrow().hovered
    }

    /// Whether a drag session is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().session.is_some()
    }

    /// Index of the entity being dragged, if a session is in progress.
    #[must_use]
    pub fn dragged(&self) -> Option<usize> {
        self.state.borrow().session.as_ref().map(DragSession::entity)
    }

    /// Draws every entity.
    pub fn draw(&self, surface_height: f64, backend: &mut impl PaintBackend) {
        for entity in self.state.borrow().entities.iter() {
            entity.draw(surface_height, backend);
        }
    }
}

impl fmt::Debug for DragController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("DragController")
            .field("entities", &state.entities.len())
            .field("hovered", &state.hovered)
            .field("dragging", &state.session.is_some())
            .finish()
    }
}
