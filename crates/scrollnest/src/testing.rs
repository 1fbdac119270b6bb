//! Test doubles shared by the unit tests

use std::sync::{Arc, Mutex};

use scrollnest_core::{Rect, Vec2};
use scrollnest_platform::{DragEvent, DragPhase};

use crate::view::ScrollView;

/// Install a fmt subscriber that writes through the test harness
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Poison `lock` by panicking on another thread while holding it
pub(crate) fn poison<T: Send + 'static>(lock: &Arc<Mutex<T>>) {
    let lock = Arc::clone(lock);
    let result = std::thread::spawn(move || {
        let _guard = lock.lock().unwrap();
        panic!("panicking while holding the lock");
    })
    .join();
    assert!(result.is_err());
}

/// In-memory scroll view that records what the arbiter does to it
#[derive(Debug, Clone)]
pub(crate) struct MockScrollView {
    pub horizontal: bool,
    pub vertical: bool,
    pub position: Vec2,
    pub viewport: Rect,
    pub active: bool,
    pub active_writes: Vec<bool>,
    pub forwarded: Vec<DragPhase>,
}

impl MockScrollView {
    pub fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
            position: Vec2::ZERO,
            viewport: Rect::new(0.0, 0.0, 100.0, 100.0),
            active: true,
            active_writes: Vec::new(),
            forwarded: Vec::new(),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(true, false)
    }

    pub fn vertical() -> Self {
        Self::new(false, true)
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }
}

impl ScrollView for MockScrollView {
    fn horizontal(&self) -> bool {
        self.horizontal
    }

    fn vertical(&self) -> bool {
        self.vertical
    }

    fn normalized_position(&self) -> Vec2 {
        self.position
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.active_writes.push(active);
    }

    fn begin_drag(&mut self, event: &DragEvent) {
        self.forwarded.push(event.phase);
    }

    fn drag(&mut self, event: &DragEvent) {
        self.forwarded.push(event.phase);
    }

    fn end_drag(&mut self, event: &DragEvent) {
        self.forwarded.push(event.phase);
    }
}
