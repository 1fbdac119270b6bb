//! Drag input events delivered by the platform's pointer dispatch

use scrollnest_core::{Camera, Point};

/// Phase of a drag gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// Pointer went down and crossed the drag threshold
    Began,
    /// Pointer moved while dragging
    #[default]
    Moved,
    /// Pointer was released or the drag was cancelled
    Ended,
}

/// A drag event
///
/// Positions are in window coordinates (origin top-left, y down). The
/// optional camera maps canvas coordinates to the screen; it is carried
/// along so receivers can project the position into their own space.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEvent {
    /// Pointer (mouse or touch) that produced this event
    pub pointer_id: u64,
    /// Screen-space position
    pub position: Point,
    /// Gesture phase
    pub phase: DragPhase,
    /// Projection reference used when the event was raised
    pub camera: Option<Camera>,
}

impl DragEvent {
    /// Create a drag event for the primary pointer with no camera
    pub fn new(phase: DragPhase, x: f32, y: f32) -> Self {
        Self {
            pointer_id: 0,
            position: Point::new(x, y),
            phase,
            camera: None,
        }
    }

    pub fn began(x: f32, y: f32) -> Self {
        Self::new(DragPhase::Began, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(DragPhase::Moved, x, y)
    }

    pub fn ended(x: f32, y: f32) -> Self {
        Self::new(DragPhase::Ended, x, y)
    }

    /// Attach a projection camera
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Set the pointer id
    pub fn with_pointer(mut self, pointer_id: u64) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }
}

/// Receiver of drag lifecycle events
///
/// The platform calls these synchronously from its pointer dispatch, in
/// `begin → drag* → end` order for a given gesture.
pub trait DragHandler {
    /// Called once when a drag starts
    fn on_begin_drag(&mut self, event: &DragEvent);

    /// Called for every pointer move while dragging
    fn on_drag(&mut self, event: &DragEvent);

    /// Called once when the drag ends
    fn on_end_drag(&mut self, event: &DragEvent);

    /// Route an event to the handler method matching its phase
    fn dispatch_drag(&mut self, event: &DragEvent) {
        match event.phase {
            DragPhase::Began => self.on_begin_drag(event),
            DragPhase::Moved => self.on_drag(event),
            DragPhase::Ended => self.on_end_drag(event),
        }
    }
}
