//! scrollnest core
//!
//! Foundational types shared by the scrollnest crates:
//!
//! - **Geometry**: points, vectors, rectangles and 2D affine transforms
//! - **Projection**: mapping screen positions into a viewport's local space
//!   through an optional [`Camera`]
//! - **State machines**: the [`StateTransitions`] trait used by gesture and
//!   load-cycle states
//!
//! # Example
//!
//! ```rust
//! use scrollnest_core::{Point, Rect, Vec2};
//!
//! let viewport = Rect::new(0.0, 0.0, 320.0, 480.0);
//! let start = viewport.screen_to_local(Point::new(100.0, 300.0), None).unwrap();
//! let now = viewport.screen_to_local(Point::new(100.0, 250.0), None).unwrap();
//!
//! // Dragging toward the top of the screen points "up" locally
//! let angle = (now - start).angle_to(Vec2::UP).unwrap();
//! assert!(angle < 1.0);
//! ```

pub mod fsm;
pub mod geometry;

pub use fsm::StateTransitions;
pub use geometry::{Affine2D, Camera, Point, Rect, Size, Vec2};
