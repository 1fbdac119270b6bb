//! Load-more pagination driven by the frame tick
//!
//! [`LoadMoreTrigger`] accumulates frame time and, once per debounce
//! interval, checks whether the view has scrolled past the load threshold.
//! When it has, and the application says more items exist, the injected
//! loader is called with a [`LoadCompletion`] handle. At most one load is in
//! flight at a time; the loader reports back through the handle when it is
//! done.
//!
//! # State Machine
//!
//! ```text
//!          dispatch
//!   Idle ────────────► Loading
//!    ▲                    │
//!    └────────────────────┘
//!     completion(Idle) / timeout / reset
//! ```
//!
//! Without a configured `load_timeout`, a loader that never reports back
//! leaves the trigger in `Loading` until [`LoadMoreTrigger::reset`].

use std::sync::{Arc, Mutex, Weak};

use scrollnest_core::StateTransitions;

use crate::config::PaginationConfig;
use crate::direction::ScrollAxis;
use crate::view::{AxisFlags, SharedScrollView};

/// Predicate answering "are more items available?"
pub type HasMoreFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// Loader invoked when more items should be fetched
pub type LoadMoreFn = Box<dyn FnMut(LoadCompletion) + Send>;

/// Status of the load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadStatus {
    /// No load in flight; the next evaluation may dispatch
    #[default]
    Idle,
    /// A load was dispatched and has not completed
    Loading,
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    fn report_event(self) -> u32 {
        match self {
            LoadStatus::Idle => load_events::REPORT_IDLE,
            LoadStatus::Loading => load_events::REPORT_LOADING,
        }
    }
}

/// Events driving [`LoadStatus`]
pub mod load_events {
    /// The trigger invoked the loader
    pub const DISPATCH: u32 = 200;
    /// The loader reported it is idle again
    pub const REPORT_IDLE: u32 = 201;
    /// The loader reported it is still loading
    pub const REPORT_LOADING: u32 = 202;
    /// The in-flight load exceeded its timeout
    pub const TIMEOUT: u32 = 203;
    /// The host reset the cycle
    pub const RESET: u32 = 204;
}

impl StateTransitions for LoadStatus {
    fn on_event(&self, event: u32) -> Option<Self> {
        use load_events::*;

        match (self, event) {
            (LoadStatus::Idle, DISPATCH) => Some(LoadStatus::Loading),

            (_, REPORT_IDLE) => Some(LoadStatus::Idle),
            (_, REPORT_LOADING) => Some(LoadStatus::Loading),

            (LoadStatus::Loading, TIMEOUT) => Some(LoadStatus::Idle),
            (_, RESET) => Some(LoadStatus::Idle),

            _ => None,
        }
    }
}

/// Shared request/response state for one trigger
#[derive(Debug, Default)]
struct LoadCycle {
    status: LoadStatus,
    /// Id of the current (or last) request; bumped on dispatch and abandon
    request: u64,
    /// Seconds spent in `Loading`
    in_flight: f32,
}

impl LoadCycle {
    /// Start a request, returning its id, unless one is already in flight
    fn dispatch(&mut self) -> Option<u64> {
        if !self.status.apply(load_events::DISPATCH) {
            return None;
        }
        self.request += 1;
        self.in_flight = 0.0;
        Some(self.request)
    }

    /// Apply a status report; returns whether the status changed
    fn report(&mut self, status: LoadStatus) -> bool {
        let changed = self.status.apply(status.report_event());
        if changed && status.is_loading() {
            self.in_flight = 0.0;
        }
        changed
    }

    /// Drop the in-flight request so its completion is ignored
    fn abandon(&mut self, event: u32) -> bool {
        let was_loading = self.status.is_loading();
        self.status.apply(event);
        if was_loading {
            self.request += 1;
        }
        self.in_flight = 0.0;
        was_loading
    }
}

/// Completion handle passed to the loader
///
/// Call [`report`](Self::report) (or [`finish`](Self::finish)) once the load
/// has finished. The handle is tied to the request that created it: reports
/// arriving after that request was abandoned, or after the trigger was
/// dropped, are ignored.
#[derive(Debug, Clone)]
pub struct LoadCompletion {
    cycle: Weak<Mutex<LoadCycle>>,
    request: u64,
}

impl LoadCompletion {
    /// Id of the request this handle completes
    pub fn request_id(&self) -> u64 {
        self.request
    }

    /// Report the loader's status
    pub fn report(&self, status: LoadStatus) {
        let Some(cycle) = self.cycle.upgrade() else {
            return;
        };
        let Ok(mut cycle) = cycle.lock() else {
            return;
        };

        if cycle.request != self.request {
            tracing::trace!(
                request = self.request,
                current = cycle.request,
                "ignoring stale load completion"
            );
            return;
        }

        if cycle.report(status) {
            tracing::debug!(request = self.request, ?status, "load status changed");
        }
    }

    /// Report that loading finished
    pub fn finish(&self) {
        self.report(LoadStatus::Idle);
    }
}

/// Polls a scroll view and requests more items near the end
pub struct LoadMoreTrigger {
    view: SharedScrollView,
    config: PaginationConfig,
    enabled: bool,
    /// Seconds since the last evaluation
    elapsed: f32,
    cycle: Arc<Mutex<LoadCycle>>,
    has_more: Option<HasMoreFn>,
    load_more: Option<LoadMoreFn>,
}

impl std::fmt::Debug for LoadMoreTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadMoreTrigger")
            .field("config", &self.config)
            .field("enabled", &self.enabled)
            .field("elapsed", &self.elapsed)
            .field("status", &self.status())
            .field("has_more", &self.has_more.is_some())
            .field("load_more", &self.load_more.is_some())
            .finish()
    }
}

impl LoadMoreTrigger {
    /// Create a disabled trigger for `view`
    pub fn new(view: SharedScrollView, config: PaginationConfig) -> Self {
        Self {
            view,
            config,
            enabled: false,
            elapsed: 0.0,
            cycle: Arc::new(Mutex::new(LoadCycle::default())),
            has_more: None,
            load_more: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PaginationConfig) {
        self.config = config;
    }

    pub fn set_has_more<F>(&mut self, predicate: F)
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.has_more = Some(Arc::new(predicate));
    }

    pub fn set_load_more<F>(&mut self, loader: F)
    where
        F: FnMut(LoadCompletion) + Send + 'static,
    {
        self.load_more = Some(Box::new(loader));
    }

    /// Unregister the predicate and the loader
    pub fn clear_callbacks(&mut self) {
        self.has_more = None;
        self.load_more = None;
    }

    pub fn status(&self) -> LoadStatus {
        self.cycle
            .lock()
            .map(|cycle| cycle.status)
            .unwrap_or_default()
    }

    /// Seconds accumulated toward the next evaluation
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the clock by `dt` seconds, evaluating once per interval
    pub fn tick(&mut self, dt: f32) {
        if !self.enabled || !dt.is_finite() || dt < 0.0 {
            return;
        }

        self.check_timeout(dt);

        self.elapsed += dt;
        if self.elapsed > self.config.debounce_interval {
            self.elapsed = 0.0;
            self.try_load_more();
        }
    }

    /// Evaluate the view now, dispatching a load if warranted.
    ///
    /// Returns whether the loader was invoked.
    pub fn try_load_more(&mut self) -> bool {
        let Some(has_more) = self.has_more.clone() else {
            return false;
        };
        if self.load_more.is_none() || !has_more() {
            return false;
        }
        if self.status() != LoadStatus::Idle {
            tracing::trace!("load already in flight");
            return false;
        }

        let Some(position) = self.scroll_position() else {
            tracing::trace!("no scroll axis enabled, skipping load check");
            return false;
        };
        if position <= self.config.threshold {
            return false;
        }

        let request = match self.cycle.lock() {
            Ok(mut cycle) => cycle.dispatch(),
            Err(_) => None,
        };
        let Some(request) = request else {
            return false;
        };

        tracing::debug!(request, position, "dispatching load more");

        let completion = LoadCompletion {
            cycle: Arc::downgrade(&self.cycle),
            request,
        };
        match self.load_more.as_mut() {
            Some(load_more) => {
                load_more(completion);
                true
            }
            None => false,
        }
    }

    /// Set the status as reported by the loader.
    ///
    /// Unlike [`LoadCompletion::report`] this is not tied to a request.
    pub fn on_load_status_changed(&self, status: LoadStatus) {
        if let Ok(mut cycle) = self.cycle.lock() {
            if cycle.report(status) {
                tracing::debug!(?status, "load status changed");
            }
        }
    }

    /// Return to `Idle`, clearing the clock and abandoning any in-flight load
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        if let Ok(mut cycle) = self.cycle.lock() {
            if cycle.abandon(load_events::RESET) {
                tracing::debug!(request = cycle.request, "abandoned in-flight load on reset");
            }
        }
    }

    /// Normalized position along the axis pagination measures
    fn scroll_position(&self) -> Option<f32> {
        let view = self.view.lock().ok()?;
        let position = view.normalized_position();

        match AxisFlags::of(&*view).primary()? {
            ScrollAxis::Horizontal => Some(position.x),
            ScrollAxis::Vertical => Some(position.y),
        }
    }

    fn check_timeout(&mut self, dt: f32) {
        let Some(timeout) = self.config.load_timeout else {
            return;
        };
        let Ok(mut cycle) = self.cycle.lock() else {
            return;
        };
        if !cycle.status.is_loading() {
            return;
        }

        cycle.in_flight += dt;
        if cycle.in_flight > timeout {
            let request = cycle.request;
            cycle.abandon(load_events::TIMEOUT);
            tracing::warn!(request, timeout, "load did not complete in time, abandoning");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::testing::{init_tracing, poison, MockScrollView};
    use crate::view::shared;

    struct Fixture {
        view: Arc<Mutex<MockScrollView>>,
        trigger: LoadMoreTrigger,
        calls: Arc<Mutex<Vec<LoadCompletion>>>,
        has_more: Arc<AtomicBool>,
    }

    fn fixture(view: MockScrollView) -> Fixture {
        fixture_with(view, PaginationConfig::default())
    }

    fn fixture_with(view: MockScrollView, config: PaginationConfig) -> Fixture {
        init_tracing();
        let view = shared(view);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let has_more = Arc::new(AtomicBool::new(true));

        let mut trigger = LoadMoreTrigger::new(view.clone(), config);
        trigger.set_enabled(true);
        trigger.set_has_more({
            let has_more = Arc::clone(&has_more);
            move || has_more.load(Ordering::SeqCst)
        });
        trigger.set_load_more({
            let calls = Arc::clone(&calls);
            move |completion| calls.lock().unwrap().push(completion)
        });

        Fixture {
            view,
            trigger,
            calls,
            has_more,
        }
    }

    impl Fixture {
        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_completion(&self) -> LoadCompletion {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[test]
    fn test_dispatches_once_past_threshold() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));

        f.trigger.tick(0.1);
        assert_eq!(f.call_count(), 0);

        f.trigger.tick(0.11);
        assert_eq!(f.call_count(), 1);
        assert_eq!(f.trigger.status(), LoadStatus::Loading);

        assert!(!f.trigger.try_load_more());
        assert_eq!(f.call_count(), 1);
    }

    #[test]
    fn test_no_second_dispatch_while_loading() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));

        for _ in 0..20 {
            f.trigger.tick(0.25);
        }

        assert_eq!(f.call_count(), 1);
        assert_eq!(f.trigger.status(), LoadStatus::Loading);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut f = fixture(MockScrollView::horizontal().at(0.9, 0.0));
        assert!(!f.trigger.try_load_more());

        f.view.lock().unwrap().position.x = 0.91;
        assert!(f.trigger.try_load_more());
        assert_eq!(f.call_count(), 1);
    }

    #[test]
    fn test_horizontal_axis_checked_first() {
        let mut f = fixture(MockScrollView::new(true, true).at(0.5, 0.95));
        assert!(!f.trigger.try_load_more());

        let mut f = fixture(MockScrollView::vertical().at(0.5, 0.95));
        assert!(f.trigger.try_load_more());
    }

    #[test]
    fn test_no_axis_enabled_aborts() {
        let mut f = fixture(MockScrollView::new(false, false).at(1.0, 1.0));
        assert!(!f.trigger.try_load_more());
        assert_eq!(f.trigger.status(), LoadStatus::Idle);
    }

    #[test]
    fn test_overscroll_counts_as_past_threshold() {
        let mut f = fixture(MockScrollView::vertical().at(0.0, 1.2));
        assert!(f.trigger.try_load_more());
    }

    #[test]
    fn test_has_more_false_suppresses() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        f.has_more.store(false, Ordering::SeqCst);

        assert!(!f.trigger.try_load_more());
        assert_eq!(f.call_count(), 0);
    }

    #[test]
    fn test_missing_callbacks_suppress() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        f.trigger.clear_callbacks();
        assert!(!f.trigger.try_load_more());

        f.trigger.set_has_more(|| true);
        assert!(!f.trigger.try_load_more());
        assert_eq!(f.trigger.status(), LoadStatus::Idle);
    }

    #[test]
    fn test_disabled_tick_does_nothing() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        f.trigger.set_enabled(false);

        f.trigger.tick(1.0);

        assert_eq!(f.call_count(), 0);
        assert_eq!(f.trigger.elapsed(), 0.0);
    }

    #[test]
    fn test_completion_allows_next_dispatch() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        f.trigger.tick(0.25);
        assert_eq!(f.call_count(), 1);

        f.last_completion().finish();
        assert_eq!(f.trigger.status(), LoadStatus::Idle);

        // Accumulator restarted at the last evaluation
        f.trigger.tick(0.1);
        assert_eq!(f.call_count(), 1);
        f.trigger.tick(0.15);
        assert_eq!(f.call_count(), 2);
    }

    #[test]
    fn test_loading_report_keeps_suppressing() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        f.trigger.tick(0.25);

        f.last_completion().report(LoadStatus::Loading);
        f.trigger.tick(0.25);

        assert_eq!(f.call_count(), 1);
        assert_eq!(f.trigger.status(), LoadStatus::Loading);
    }

    #[test]
    fn test_synchronous_completion() {
        init_tracing();
        let view = shared(MockScrollView::vertical().at(0.0, 0.99));
        let mut trigger = LoadMoreTrigger::new(view, PaginationConfig::default());
        trigger.set_enabled(true);
        trigger.set_has_more(|| true);
        trigger.set_load_more(|completion| completion.finish());

        assert!(trigger.try_load_more());
        assert_eq!(trigger.status(), LoadStatus::Idle);
        assert!(trigger.try_load_more());
    }

    #[test]
    fn test_idle_report_when_idle_is_noop() {
        let f = fixture(MockScrollView::horizontal().at(0.5, 0.0));

        f.trigger.on_load_status_changed(LoadStatus::Idle);
        f.trigger.on_load_status_changed(LoadStatus::Idle);

        assert_eq!(f.trigger.status(), LoadStatus::Idle);
        assert_eq!(f.call_count(), 0);
    }

    #[test]
    fn test_direct_status_report() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        f.trigger.on_load_status_changed(LoadStatus::Loading);
        assert!(!f.trigger.try_load_more());

        f.trigger.on_load_status_changed(LoadStatus::Idle);
        assert!(f.trigger.try_load_more());
    }

    #[test]
    fn test_stalled_load_without_timeout_stays_loading() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        for _ in 0..1000 {
            f.trigger.tick(0.25);
        }

        assert_eq!(f.call_count(), 1);
        assert_eq!(f.trigger.status(), LoadStatus::Loading);
    }

    #[test]
    fn test_timeout_abandons_stalled_load() {
        let config = PaginationConfig::default().with_load_timeout(1.0);
        let mut f = fixture_with(MockScrollView::horizontal().at(0.95, 0.0), config);

        f.trigger.tick(0.25);
        assert_eq!(f.call_count(), 1);
        let stale = f.last_completion();

        // Stop re-dispatching once the request is abandoned
        f.view.lock().unwrap().position.x = 0.5;

        for _ in 0..4 {
            f.trigger.tick(0.25);
        }
        assert_eq!(f.trigger.status(), LoadStatus::Loading);

        f.trigger.tick(0.25);
        assert_eq!(f.trigger.status(), LoadStatus::Idle);

        // The late loader must not revive the abandoned request
        stale.report(LoadStatus::Loading);
        assert_eq!(f.trigger.status(), LoadStatus::Idle);
    }

    #[test]
    fn test_reset_abandons_in_flight_load() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        f.trigger.tick(0.25);
        let stale = f.last_completion();

        f.trigger.reset();
        assert_eq!(f.trigger.status(), LoadStatus::Idle);
        assert_eq!(f.trigger.elapsed(), 0.0);

        assert!(f.trigger.try_load_more());
        let current = f.last_completion();
        assert_ne!(stale.request_id(), current.request_id());

        // Old handle cannot finish the new request
        stale.finish();
        assert_eq!(f.trigger.status(), LoadStatus::Loading);

        current.finish();
        assert_eq!(f.trigger.status(), LoadStatus::Idle);
    }

    #[test]
    fn test_completion_after_trigger_dropped() {
        let f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        let Fixture {
            mut trigger, calls, ..
        } = f;
        trigger.tick(0.25);
        drop(trigger);

        let completion = calls.lock().unwrap().pop().unwrap();
        completion.finish();
    }

    #[test]
    fn test_status_transitions() {
        let mut status = LoadStatus::Idle;
        assert!(status.apply(load_events::DISPATCH));
        assert!(!status.apply(load_events::DISPATCH));
        assert!(status.apply(load_events::TIMEOUT));
        assert!(!status.apply(load_events::TIMEOUT));
        assert_eq!(status, LoadStatus::Idle);
    }

    #[test]
    fn test_poisoned_view_never_dispatches() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));
        poison(&f.view);

        f.trigger.tick(0.5);
        assert!(!f.trigger.try_load_more());

        assert_eq!(f.call_count(), 0);
        assert_eq!(f.trigger.status(), LoadStatus::Idle);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut f = fixture(MockScrollView::horizontal().at(0.95, 0.0));

        f.trigger.tick(f32::NAN);
        f.trigger.tick(f32::INFINITY);
        f.trigger.tick(-1.0);
        assert_eq!(f.trigger.elapsed(), 0.0);
        assert_eq!(f.call_count(), 0);

        f.trigger.tick(0.25);
        assert_eq!(f.call_count(), 1);
    }
}
