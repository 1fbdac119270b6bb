//! Sliding-conflict resolution between a scroll view and its ancestor
//!
//! A [`GestureArbiter`] sits between the platform's drag dispatch and two
//! scroll views: the *child* it is attached to and an injected *ancestor*
//! that scrolls along another axis. For each drag it measures the angle of
//! the motion from its start point, locks the gesture to one axis, and keeps
//! exactly one of the two views active until the drag ends:
//!
//! - If the child scrolls along the locked axis, the child stays active and
//!   the ancestor is disabled.
//! - Otherwise the child is disabled and the ancestor takes the gesture.
//!
//! Drag events are forwarded to the ancestor so its own drag bookkeeping
//! stays consistent even while it is disabled.
//!
//! Nothing here is an error: a missing ancestor or a disabled arbiter makes
//! every handler a no-op.

use scrollnest_core::{Point, StateTransitions, Vec2};
use scrollnest_platform::{DragEvent, DragHandler};

use crate::direction::{gesture_events, GestureDirection, ScrollAxis};
use crate::view::{set_active, AxisFlags, SharedScrollView};

/// Per-gesture handshake between a child scroll view and its ancestor
pub struct GestureArbiter {
    child: SharedScrollView,
    ancestor: Option<SharedScrollView>,
    enabled: bool,
    /// Child axis flags, captured when bound
    child_axes: AxisFlags,
    /// Pointer position at drag start, in the child's local viewport space
    start_cursor: Point,
    direction: GestureDirection,
}

impl std::fmt::Debug for GestureArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureArbiter")
            .field("has_ancestor", &self.ancestor.is_some())
            .field("enabled", &self.enabled)
            .field("child_axes", &self.child_axes)
            .field("start_cursor", &self.start_cursor)
            .field("direction", &self.direction)
            .finish()
    }
}

impl GestureArbiter {
    /// Create an arbiter for `child` with no ancestor bound
    pub fn new(child: SharedScrollView) -> Self {
        let child_axes = child
            .lock()
            .map(|view| AxisFlags::of(&*view))
            .unwrap_or_default();

        Self {
            child,
            ancestor: None,
            enabled: true,
            child_axes,
            start_cursor: Point::ZERO,
            direction: GestureDirection::Undecided,
        }
    }

    /// Bind the ancestor view that receives gestures the child declines
    pub fn with_ancestor(mut self, ancestor: SharedScrollView) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    /// Replace (or clear) the ancestor.
    ///
    /// A gesture in progress is released first so neither view is left
    /// disabled.
    pub fn set_ancestor(&mut self, ancestor: Option<SharedScrollView>) {
        self.release();
        self.ancestor = ancestor;
    }

    pub fn has_ancestor(&self) -> bool {
        self.ancestor.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn conflict resolution on or off.
    ///
    /// Turning it off mid-gesture restores both views to active.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.release();
        }
        self.enabled = enabled;
    }

    /// Re-read the child's axis flags after they changed on the view
    pub fn refresh_axes(&mut self) {
        if let Ok(view) = self.child.lock() {
            self.child_axes = AxisFlags::of(&*view);
        }
    }

    pub fn child_axes(&self) -> AxisFlags {
        self.child_axes
    }

    /// Direction resolved for the current gesture
    pub fn direction(&self) -> GestureDirection {
        self.direction
    }

    /// Start point of the current gesture in the child's local space
    pub fn start_cursor(&self) -> Point {
        self.start_cursor
    }

    /// Project an event position into the child's local viewport space
    fn project(&self, event: &DragEvent) -> Option<Point> {
        let viewport = self.child.lock().ok()?.viewport();
        viewport.screen_to_local(event.position, event.camera())
    }

    /// Hand the locked gesture to whichever view scrolls along `axis`
    fn assign(&self, ancestor: &SharedScrollView, axis: ScrollAxis) {
        let child_owns = self.child_axes.enables(axis);
        set_active(ancestor, !child_owns);
        set_active(&self.child, child_owns);
    }

    /// Undo a lock left over from an interrupted gesture
    fn release(&mut self) {
        if !self.direction.is_locked() {
            return;
        }

        if let Some(ancestor) = &self.ancestor {
            set_active(ancestor, true);
        }
        set_active(&self.child, true);
        self.direction.apply(gesture_events::END);
    }
}

impl DragHandler for GestureArbiter {
    fn on_begin_drag(&mut self, event: &DragEvent) {
        if !self.enabled {
            return;
        }
        let Some(ancestor) = self.ancestor.clone() else {
            return;
        };

        self.direction.apply(gesture_events::BEGIN);
        self.start_cursor = self.project(event).unwrap_or(Point::ZERO);
        tracing::trace!(start = ?self.start_cursor, "drag began");

        if let Ok(mut ancestor) = ancestor.lock() {
            ancestor.begin_drag(event);
        };
    }

    fn on_drag(&mut self, event: &DragEvent) {
        if !self.enabled {
            return;
        }
        let Some(ancestor) = self.ancestor.clone() else {
            return;
        };
        let Some(cursor) = self.project(event) else {
            tracing::trace!(position = ?event.position, "drag position not projectable");
            return;
        };

        let delta = cursor - self.start_cursor;
        let Some(axis) = ScrollAxis::from_delta(delta) else {
            // On a band boundary (or no motion yet); decide on a later event
            return;
        };
        let Some(direction) = self.direction.accept(axis) else {
            return;
        };

        if direction != self.direction {
            let angle = delta.angle_to(Vec2::UP);
            tracing::debug!(
                ?axis,
                ?angle,
                angle_band = ?angle.and_then(ScrollAxis::from_angle),
                child_owns = self.child_axes.enables(axis),
                "gesture direction locked"
            );
        }
        self.direction = direction;
        self.assign(&ancestor, axis);

        if let Ok(mut ancestor) = ancestor.lock() {
            ancestor.drag(event);
        };
    }

    fn on_end_drag(&mut self, event: &DragEvent) {
        if !self.enabled {
            return;
        }
        let Some(ancestor) = self.ancestor.clone() else {
            return;
        };

        if let Ok(mut ancestor) = ancestor.lock() {
            ancestor.end_drag(event);
            ancestor.set_active(true);
        }
        set_active(&self.child, true);

        tracing::trace!(direction = ?self.direction, "drag ended");
        self.direction.apply(gesture_events::END);
    }
}
