//! Drag sessions for moving a single shape with the pointer.

use crate::aabb::Aabb;
use crate::config::{RestartPolicy, SnapConfig};
use crate::error::{SnapError, SnapResult};
use crate::scene::Scene;
use crate::shapes::{Shape, ShapeId};
use crate::snap::{self, SnapLines, Snaps};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// State captured when a drag starts.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Shape as it was when the drag started.
    pub snapshot: Shape,
    /// Pointer position when the drag started.
    pub origin: Point,
}

impl DragSession {
    /// ID of the dragged shape.
    pub fn shape_id(&self) -> ShapeId {
        self.snapshot.id()
    }

    /// Pointer delta since the drag started.
    pub fn delta(&self, point: Point) -> Vec2 {
        point - self.origin
    }

    /// Position of the dragged shape for a given pointer position.
    pub fn position_at(&self, point: Point) -> Point {
        self.snapshot.position() + self.delta(point)
    }
}

/// What a drag move produced, for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragFeedback {
    /// Shape that moved.
    pub shape_id: ShapeId,
    /// Final position of the shape.
    pub position: Point,
    /// Snaps applied to reach `position` (empty without snapping).
    pub snaps: Snaps,
    /// Correction subtracted from the raw drag position.
    pub offset: Vec2,
    /// Guide lines drawn against the corrected box at `position`.
    /// Selection snaps draw against the uncorrected bounds instead.
    pub lines: SnapLines,
}

/// Tracks at most one live drag. Idle when no session exists.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    config: SnapConfig,
    session: Option<DragSession>,
}

impl DragController {
    /// Create an idle controller. Fails if the config does not validate.
    pub fn new(config: SnapConfig) -> SnapResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            session: None,
        })
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Check if a drag is live.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start dragging shape `id` from pointer position `point`.
    ///
    /// A live session is replaced or refused depending on the restart policy.
    pub fn on_drag_start(&mut self, scene: &Scene, id: ShapeId, point: Point) -> SnapResult<()> {
        let Some(shape) = scene.get_shape(id) else {
            log::warn!("Drag start on unknown shape {}", id);
            return Err(SnapError::UnknownShape(id));
        };

        if let Some(live) = &self.session {
            match self.config.restart_policy {
                RestartPolicy::Reject => {
                    log::debug!("Rejecting drag on {}: {} is still dragging", id, live.shape_id());
                    return Err(SnapError::DragAlreadyActive(live.shape_id()));
                }
                RestartPolicy::Replace => {
                    log::debug!("Replacing drag on {} with {}", live.shape_id(), id);
                }
            }
        }

        log::debug!("Drag start on {} at ({}, {})", id, point.x, point.y);
        self.session = Some(DragSession {
            snapshot: shape.clone(),
            origin: point,
        });
        Ok(())
    }

    /// Move the dragged shape to follow the pointer.
    ///
    /// Returns `None` and leaves the scene untouched when idle, or when the
    /// dragged shape has since been removed from the scene.
    pub fn on_drag_move(&mut self, scene: &mut Scene, point: Point) -> Option<DragFeedback> {
        let session = self.session.as_ref()?;
        let id = session.shape_id();
        let raw = session.position_at(point);

        let feedback = if self.config.snap_while_dragging {
            let moved = Aabb::new(raw, session.snapshot.size());
            let mut exclude = scene.selection.clone();
            exclude.push(id);
            let candidates =
                snap::snappable_aabbs(scene.shapes_ordered(), &exclude, &scene.viewport);
            let snaps = snap::get_snaps(&moved, &candidates, self.config.threshold);
            let offset = snap::offset_from_snaps(&moved, &snaps, self.config.y_offset_source);
            let position = raw - offset;
            let lines = snap::snap_lines(&Aabb::new(position, session.snapshot.size()), &snaps);
            DragFeedback {
                shape_id: id,
                position,
                snaps,
                offset,
                lines,
            }
        } else {
            DragFeedback {
                shape_id: id,
                position: raw,
                snaps: Snaps::default(),
                offset: Vec2::ZERO,
                lines: SnapLines::default(),
            }
        };

        let shape = scene.get_shape_mut(id)?;
        shape.set_position(feedback.position);
        Some(feedback)
    }

    /// End the drag. The final pointer position is not used.
    /// Returns the session that was live, if any.
    pub fn on_drag_end(&mut self, _point: Point) -> Option<DragSession> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            log::debug!("Drag end on {}", session.shape_id());
        }
        ended
    }
}
