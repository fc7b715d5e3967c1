//! Camera mapping screen space to world space, and the viewport it sees.

use crate::aabb::Aabb;
use crate::error::{SnapError, SnapResult};
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pan/zoom state of the view.
///
/// Screen coordinates are `world * zoom + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Screen-space translation.
    pub offset: Vec2,
    /// Scale factor (1.0 = one world unit per pixel).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// World-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.transform().inverse() * screen_point
    }

    /// World-space box visible on a screen of the given size.
    pub fn visible_aabb(&self, screen: Size) -> Aabb {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(screen.width, screen.height));
        Aabb::from_extents(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// Check that zoom is positive and the offset finite.
    pub fn validate(&self) -> SnapResult<()> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(SnapError::InvalidScene(format!(
                "camera zoom must be positive, got {}",
                self.zoom
            )));
        }
        if !(self.offset.x.is_finite() && self.offset.y.is_finite()) {
            return Err(SnapError::InvalidScene("camera offset must be finite".into()));
        }
        Ok(())
    }
}
