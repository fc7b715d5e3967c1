//! Snapguide Core Library
//!
//! Bounding-box alignment for shape editors: candidate filtering, a
//! first-match snap solver, offset and guide-line derivation, and a drag
//! controller that moves shapes with the pointer.

pub mod aabb;
pub mod camera;
pub mod config;
pub mod drag;
pub mod error;
pub mod scene;
pub mod shapes;
pub mod snap;

pub use aabb::{Aabb, XAnchor, YAnchor};
pub use camera::Camera;
pub use config::{RestartPolicy, SnapConfig, YOffsetSource, DEFAULT_SNAP_THRESHOLD};
pub use drag::{DragController, DragFeedback, DragSession};
pub use error::{SnapError, SnapResult};
pub use scene::{Scene, SelectionSnap, View};
pub use shapes::{Ellipse, Rectangle, Shape, ShapeId, ShapeTrait};
pub use snap::{
    SnapLines, SnapX, SnapY, Snaps, get_snaps, offset_from_snaps, selection_aabb, snap_lines,
    snappable_aabbs,
};
