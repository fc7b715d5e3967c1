//! Shape definitions.
//!
//! Shapes are positioned by their top-left corner and sized by a width and
//! height. Bounding boxes are always derived from those two values.

mod ellipse;
mod rectangle;

pub use ellipse::Ellipse;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the top-left position in world coordinates.
    fn position(&self) -> Point;

    /// Move the shape so its top-left corner sits at `position`.
    fn set_position(&mut self, position: Point);

    /// Get the width and height.
    fn size(&self) -> Size;

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position(),
            Shape::Ellipse(s) => s.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Rectangle(s) => s.set_position(position),
            Shape::Ellipse(s) => s.set_position(position),
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Shape::Rectangle(s) => s.size(),
            Shape::Ellipse(s) => s.size(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
        }
    }

    /// Shift the shape by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        let position = self.position() + delta;
        self.set_position(position);
    }

    /// Regenerate the shape's ID with a new unique identifier.
    /// This is used when duplicating shapes so the copy has its own identity.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Ellipse(s) => s.id = new_id,
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(rect: Rectangle) -> Self {
        Shape::Rectangle(rect)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}
