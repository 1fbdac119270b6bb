//! Geometry primitives and viewport projection
//!
//! Screen positions arrive in window coordinates (origin top-left, y down),
//! the way platform pointer events report them. Gesture math runs in a
//! viewport's *local* space: origin at the viewport's bottom-left corner,
//! y pointing up, so "up" on screen is `+y` locally.

use std::ops::Sub;

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle in window coordinates (origin is the top-left corner)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Bottom edge in window coordinates
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Project a screen-space point into this rect's local space.
    ///
    /// The point is first mapped through the inverse of `camera` (when one is
    /// given) and then expressed relative to the bottom-left corner with y
    /// pointing up. Points outside the rect still project; the result is only
    /// `None` when the camera transform cannot be inverted.
    pub fn screen_to_local(&self, screen: Point, camera: Option<&Camera>) -> Option<Point> {
        let canvas = match camera {
            Some(camera) => camera.screen_to_canvas(screen)?,
            None => screen,
        };

        Some(Point::new(canvas.x - self.origin.x, self.bottom() - canvas.y))
    }
}

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    /// Unit vector pointing up in local (y-up) space
    pub const UP: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Unsigned angle to `other` in degrees, in `[0, 180]`.
    ///
    /// Returns `None` when either vector is (near) zero-length, since such a
    /// vector has no direction.
    pub fn angle_to(&self, other: Vec2) -> Option<f32> {
        const EPSILON_SQ: f32 = 1e-10;

        let len_sq = self.length_squared() * other.length_squared();
        if len_sq < EPSILON_SQ {
            return None;
        }

        let cos = (self.dot(other) / len_sq.sqrt()).clamp(-1.0, 1.0);
        Some(cos.acos().to_degrees())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// 2D affine transform
///
/// Column-major 2x3 matrix: `[a, b, c, d, tx, ty]`
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0   1 |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine2D {
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(
            a * point.x + c * point.y + tx,
            b * point.x + d * point.y + ty,
        )
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    /// Inverse transform, or `None` if the matrix is singular
    pub fn inverse(&self) -> Option<Affine2D> {
        let [a, b, c, d, tx, ty] = self.elements;
        let det = a * d - b * c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        Some(Affine2D {
            elements: [
                d / det,
                -b / det,
                -c / det,
                a / det,
                (c * ty - d * tx) / det,
                (b * tx - a * ty) / det,
            ],
        })
    }
}

/// Projection reference attached to a pointer event
///
/// `view` maps canvas coordinates to screen coordinates. A pointer event
/// without a camera is assumed to already be in canvas coordinates (an
/// overlay surface).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub view: Affine2D,
}

impl Camera {
    pub fn new(view: Affine2D) -> Self {
        Self { view }
    }

    /// Camera that zooms the canvas by `zoom` and then pans it by `offset`
    pub fn pan_zoom(offset: Vec2, zoom: f32) -> Self {
        Self {
            view: Affine2D::translation(offset.x, offset.y).then(&Affine2D::scale(zoom, zoom)),
        }
    }

    /// Map a screen point back into canvas coordinates
    pub fn screen_to_canvas(&self, screen: Point) -> Option<Point> {
        self.view
            .inverse()
            .map(|inverse| inverse.transform_point(screen))
    }
}
