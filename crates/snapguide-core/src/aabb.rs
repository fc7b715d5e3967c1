//! Axis-aligned bounding boxes with derived min/mid/max coordinates.

use crate::shapes::Shape;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Reference point on the X axis of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XAnchor {
    #[serde(rename = "midX")]
    Mid,
    #[serde(rename = "minX")]
    Min,
    #[serde(rename = "maxX")]
    Max,
}

impl XAnchor {
    /// All anchors in solver enumeration order.
    pub const ALL: [XAnchor; 3] = [XAnchor::Mid, XAnchor::Min, XAnchor::Max];
}

/// Reference point on the Y axis of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YAnchor {
    #[serde(rename = "midY")]
    Mid,
    #[serde(rename = "minY")]
    Min,
    #[serde(rename = "maxY")]
    Max,
}

impl YAnchor {
    /// All anchors in solver enumeration order.
    pub const ALL: [YAnchor; 3] = [YAnchor::Mid, YAnchor::Min, YAnchor::Max];
}

/// An axis-aligned bounding box.
///
/// Mid coordinates and extents are stored alongside the edges so the snap
/// solver can address any of them by anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aabb {
    pub min_x: f64,
    pub mid_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub mid_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    /// Build a box from a top-left point and a size.
    pub fn new(position: Point, size: Size) -> Self {
        let (x, y) = (position.x, position.y);
        let (w, h) = (size.width, size.height);
        Self {
            min_x: x,
            mid_x: x + w / 2.0,
            max_x: x + w,
            min_y: y,
            mid_y: y + h / 2.0,
            max_y: y + h,
            width: w,
            height: h,
        }
    }

    /// Build a box from its min and max extents.
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            mid_x: (min_x + max_x) / 2.0,
            max_x,
            min_y,
            mid_y: (min_y + max_y) / 2.0,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Bounding box of a shape's current position and size.
    pub fn from_shape(shape: &Shape) -> Self {
        Self::new(shape.position(), shape.size())
    }

    /// Convert a kurbo rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::from_extents(rect.x0, rect.y0, rect.x1, rect.y1)
    }

    /// Convert to a kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Coordinate of an X anchor.
    pub fn x(&self, anchor: XAnchor) -> f64 {
        match anchor {
            XAnchor::Mid => self.mid_x,
            XAnchor::Min => self.min_x,
            XAnchor::Max => self.max_x,
        }
    }

    /// Coordinate of a Y anchor.
    pub fn y(&self, anchor: YAnchor) -> f64 {
        match anchor {
            YAnchor::Mid => self.mid_y,
            YAnchor::Min => self.min_y,
            YAnchor::Max => self.max_y,
        }
    }

    /// True if `other` lies strictly inside this box on all four edges.
    /// Touching edges do not count.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min_x < other.min_x
            && self.min_y < other.min_y
            && self.max_y > other.max_y
            && self.max_x > other.max_x
    }

    /// True if the boxes overlap or touch on both axes.
    pub fn collides(&self, other: &Aabb) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    /// Smallest box covering both inputs.
    pub fn expand(&self, other: &Aabb) -> Aabb {
        Self::from_extents(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Fold `expand` over boxes, seeded by the first one.
    /// Returns `None` for an empty iterator.
    pub fn union_all<I>(boxes: I) -> Option<Aabb>
    where
        I: IntoIterator<Item = Aabb>,
    {
        let mut iter = boxes.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.expand(&b)))
    }
}
