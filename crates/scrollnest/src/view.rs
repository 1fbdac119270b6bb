//! Capability interface for the scrollable views being arbitrated
//!
//! The arbiter and pagination trigger never own a widget. They hold a
//! [`SharedScrollView`] handle and talk to it only through [`ScrollView`]:
//! read axis flags, position and viewport, toggle the active flag, and
//! forward drag events.

use std::sync::{Arc, Mutex};

use scrollnest_core::{Rect, Vec2};
use scrollnest_platform::DragEvent;

use crate::direction::ScrollAxis;

/// A scrollable view as seen by scrollnest
pub trait ScrollView {
    /// Whether horizontal scrolling is enabled on this view
    fn horizontal(&self) -> bool;

    /// Whether vertical scrolling is enabled on this view
    fn vertical(&self) -> bool;

    /// Scroll offset as a fraction of the scrollable range per axis.
    ///
    /// Nominally in `[0, 1]`; elastic overscroll may push it outside.
    fn normalized_position(&self) -> Vec2;

    /// Viewport rectangle in window coordinates
    fn viewport(&self) -> Rect;

    /// Whether the view currently responds to drags
    fn is_active(&self) -> bool;

    /// Enable or disable drag handling on the view
    fn set_active(&mut self, active: bool);

    fn begin_drag(&mut self, event: &DragEvent);

    fn drag(&mut self, event: &DragEvent);

    fn end_drag(&mut self, event: &DragEvent);
}

/// Shared handle to an externally owned scroll view
pub type SharedScrollView = Arc<Mutex<dyn ScrollView + Send>>;

/// Wrap a view in a shareable handle.
///
/// The concrete handle coerces to [`SharedScrollView`] wherever one is
/// expected, so callers can keep a typed clone for themselves.
pub fn shared<V: ScrollView + Send + 'static>(view: V) -> Arc<Mutex<V>> {
    Arc::new(Mutex::new(view))
}

/// Axis-enablement flags of a view, captured at bind time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AxisFlags {
    pub horizontal: bool,
    pub vertical: bool,
}

impl AxisFlags {
    pub const fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Read the flags from a view
    pub fn of(view: &dyn ScrollView) -> Self {
        Self::new(view.horizontal(), view.vertical())
    }

    pub fn enables(&self, axis: ScrollAxis) -> bool {
        match axis {
            ScrollAxis::Horizontal => self.horizontal,
            ScrollAxis::Vertical => self.vertical,
        }
    }

    /// The axis pagination measures: horizontal wins when both are enabled
    pub fn primary(&self) -> Option<ScrollAxis> {
        if self.horizontal {
            Some(ScrollAxis::Horizontal)
        } else if self.vertical {
            Some(ScrollAxis::Vertical)
        } else {
            None
        }
    }
}

/// Set the active flag on a shared view, ignoring a poisoned lock
pub(crate) fn set_active(view: &SharedScrollView, active: bool) {
    if let Ok(mut view) = view.lock() {
        view.set_active(active);
    }
}
