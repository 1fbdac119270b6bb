//! scrollnest platform input
//!
//! Platform-facing types for drag gestures. A platform backend converts its
//! native pointer stream into [`DragEvent`]s and feeds them to a
//! [`DragHandler`].
//!
//! # Example
//!
//! ```ignore
//! use scrollnest_platform::*;
//!
//! fn forward(handler: &mut impl DragHandler, x: f32, y: f32, phase: DragPhase) {
//!     handler.dispatch_drag(&DragEvent::new(phase, x, y));
//! }
//! ```

mod input;

pub use input::{DragEvent, DragHandler, DragPhase};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::input::{DragEvent, DragHandler, DragPhase};
}
