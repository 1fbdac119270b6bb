//! Scroll view extension combining conflict resolution and pagination
//!
//! [`ScrollEx`] is what a host attaches to one scroll view: it receives the
//! view's drag events and the frame tick, and owns one [`GestureArbiter`]
//! and one [`LoadMoreTrigger`] for that view.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use scrollnest::prelude::*;
//! use scrollnest_core::{Rect, Vec2};
//!
//! struct List {
//!     horizontal: bool,
//!     active: bool,
//! }
//!
//! impl ScrollView for List {
//!     fn horizontal(&self) -> bool { self.horizontal }
//!     fn vertical(&self) -> bool { !self.horizontal }
//!     fn normalized_position(&self) -> Vec2 { Vec2::new(0.95, 0.0) }
//!     fn viewport(&self) -> Rect { Rect::new(0.0, 0.0, 320.0, 120.0) }
//!     fn is_active(&self) -> bool { self.active }
//!     fn set_active(&mut self, active: bool) { self.active = active; }
//!     fn begin_drag(&mut self, _event: &DragEvent) {}
//!     fn drag(&mut self, _event: &DragEvent) {}
//!     fn end_drag(&mut self, _event: &DragEvent) {}
//! }
//!
//! let row = Arc::new(Mutex::new(List { horizontal: true, active: true }));
//! let page = Arc::new(Mutex::new(List { horizontal: false, active: true }));
//!
//! let mut config = ScrollExConfig::default();
//! config.enable_load_more = true;
//!
//! let mut row_ex = ScrollEx::with_config(row, config)
//!     .with_ancestor(page)
//!     .on_has_more(|| true)
//!     .on_load_more(|completion| {
//!         // fetch the next page, then:
//!         completion.finish();
//!     });
//!
//! row_ex.on_begin_drag(&DragEvent::began(100.0, 60.0));
//! row_ex.on_drag(&DragEvent::moved(100.0, 20.0));
//! assert_eq!(row_ex.direction(), GestureDirection::Vertical);
//! row_ex.on_end_drag(&DragEvent::ended(100.0, 20.0));
//!
//! row_ex.tick(0.25);
//! ```

use scrollnest_platform::{DragEvent, DragHandler};

use crate::arbiter::GestureArbiter;
use crate::config::ScrollExConfig;
use crate::direction::GestureDirection;
use crate::pagination::{LoadCompletion, LoadMoreTrigger, LoadStatus};
use crate::view::SharedScrollView;

/// Extension attached to a single scroll view
#[derive(Debug)]
pub struct ScrollEx {
    arbiter: GestureArbiter,
    trigger: LoadMoreTrigger,
}

impl ScrollEx {
    /// Attach to `view` with the default configuration
    pub fn new(view: SharedScrollView) -> Self {
        Self::with_config(view, ScrollExConfig::default())
    }

    /// Attach to `view` with a custom configuration
    pub fn with_config(view: SharedScrollView, config: ScrollExConfig) -> Self {
        let mut arbiter = GestureArbiter::new(view.clone());
        arbiter.set_enabled(config.enable_sliding_conflict);

        let mut trigger = LoadMoreTrigger::new(view, config.pagination);
        trigger.set_enabled(config.enable_load_more);

        Self { arbiter, trigger }
    }

    /// Bind the ancestor scroll view
    pub fn with_ancestor(mut self, ancestor: SharedScrollView) -> Self {
        self.arbiter.set_ancestor(Some(ancestor));
        self
    }

    /// Register the "more items available" predicate
    pub fn on_has_more<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.trigger.set_has_more(predicate);
        self
    }

    /// Register the loader
    pub fn on_load_more<F>(mut self, loader: F) -> Self
    where
        F: FnMut(LoadCompletion) + Send + 'static,
    {
        self.trigger.set_load_more(loader);
        self
    }

    pub fn set_ancestor(&mut self, ancestor: Option<SharedScrollView>) {
        self.arbiter.set_ancestor(ancestor);
    }

    pub fn set_sliding_conflict_enabled(&mut self, enabled: bool) {
        self.arbiter.set_enabled(enabled);
    }

    pub fn set_load_more_enabled(&mut self, enabled: bool) {
        self.trigger.set_enabled(enabled);
    }

    /// Per-frame update
    pub fn tick(&mut self, dt: f32) {
        self.trigger.tick(dt);
    }

    pub fn direction(&self) -> GestureDirection {
        self.arbiter.direction()
    }

    pub fn load_status(&self) -> LoadStatus {
        self.trigger.status()
    }

    /// Forward a loader status report
    pub fn on_load_status_changed(&self, status: LoadStatus) {
        self.trigger.on_load_status_changed(status);
    }

    /// Recover a stalled pagination cycle
    pub fn reset_load_cycle(&mut self) {
        self.trigger.reset();
    }

    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    pub fn arbiter_mut(&mut self) -> &mut GestureArbiter {
        &mut self.arbiter
    }

    pub fn trigger(&self) -> &LoadMoreTrigger {
        &self.trigger
    }

    pub fn trigger_mut(&mut self) -> &mut LoadMoreTrigger {
        &mut self.trigger
    }
}

impl DragHandler for ScrollEx {
    fn on_begin_drag(&mut self, event: &DragEvent) {
        self.arbiter.on_begin_drag(event);
    }

    fn on_drag(&mut self, event: &DragEvent) {
        self.arbiter.on_drag(event);
    }

    fn on_end_drag(&mut self, event: &DragEvent) {
        self.arbiter.on_end_drag(event);
    }
}
