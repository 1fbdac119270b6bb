//! scrollnest
//!
//! Two behaviours for scroll views nested inside other scroll views:
//!
//! - **Sliding-conflict resolution**: [`GestureArbiter`] decides per drag
//!   whether the inner view or its ancestor owns the gesture, based on the
//!   angle of the motion, and keeps exactly one of them active until the
//!   drag ends.
//! - **Load more**: [`LoadMoreTrigger`] polls the scroll position on the
//!   frame tick and calls an injected loader when the view nears its end,
//!   with at most one load in flight.
//!
//! [`ScrollEx`] bundles both for one view. Views are reached only through
//! the [`ScrollView`] capability trait; the ancestor is injected rather than
//! discovered.
//!
//! Nothing on the event or tick path returns an error. Missing
//! collaborators and disabled switches are ordinary no-ops, traced with
//! `tracing`. Only configuration loading is fallible ([`ConfigError`]).

pub mod arbiter;
pub mod config;
pub mod direction;
pub mod error;
pub mod pagination;
pub mod scroll_ex;
pub mod view;

#[cfg(test)]
mod testing;

pub use arbiter::GestureArbiter;
pub use config::{PaginationConfig, ScrollExConfig};
pub use direction::{GestureDirection, ScrollAxis};
pub use error::{ConfigError, Result};
pub use pagination::{HasMoreFn, LoadCompletion, LoadMoreFn, LoadMoreTrigger, LoadStatus};
pub use scroll_ex::ScrollEx;
pub use view::{shared, AxisFlags, ScrollView, SharedScrollView};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::arbiter::GestureArbiter;
    pub use crate::config::{PaginationConfig, ScrollExConfig};
    pub use crate::direction::{GestureDirection, ScrollAxis};
    pub use crate::pagination::{LoadCompletion, LoadMoreTrigger, LoadStatus};
    pub use crate::scroll_ex::ScrollEx;
    pub use crate::view::{ScrollView, SharedScrollView};
    pub use scrollnest_platform::{DragEvent, DragHandler, DragPhase};
}
