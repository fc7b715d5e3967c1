//! Pointer scripts and their replay through a drag controller.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use snapguide_core::{
    DragController, DragFeedback, Scene, SelectionSnap, ShapeId, SnapConfig, SnapResult,
};

/// A recorded pointer event. Points are `[x, y]` in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Start { id: ShapeId, point: [f64; 2] },
    Move { point: [f64; 2] },
    End { point: [f64; 2] },
}

impl PointerEvent {
    fn point(&self) -> Point {
        let [x, y] = match self {
            PointerEvent::Start { point, .. }
            | PointerEvent::Move { point }
            | PointerEvent::End { point } => *point,
        };
        Point::new(x, y)
    }
}

/// Outcome of one replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub index: usize,
    pub event: PointerEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<DragFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything printed after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps: Vec<Step>,
    /// Snap state of the selection after the script, if anything is selected.
    pub selection_snap: Option<SelectionSnap>,
    pub scene: Scene,
}

/// Replays pointer events against a scene.
pub struct Replay {
    scene: Scene,
    config: SnapConfig,
    drag: DragController,
}

impl Replay {
    pub fn new(scene: Scene, config: SnapConfig) -> SnapResult<Self> {
        Ok(Self {
            scene,
            drag: DragController::new(config.clone())?,
            config,
        })
    }

    /// Run every event in order. Failed drag starts are recorded and skipped.
    pub fn run(mut self, events: &[PointerEvent]) -> Report {
        let mut steps = Vec::with_capacity(events.len());

        for (index, event) in events.iter().enumerate() {
            let point = event.point();
            let mut step = Step {
                index,
                event: event.clone(),
                feedback: None,
                error: None,
            };
            match event {
                PointerEvent::Start { id, .. } => {
                    if let Err(e) = self.drag.on_drag_start(&self.scene, *id, point) {
                        log::warn!("Event {}: {}", index, e);
                        step.error = Some(e.to_string());
                    }
                }
                PointerEvent::Move { .. } => {
                    step.feedback = self.drag.on_drag_move(&mut self.scene, point);
                }
                PointerEvent::End { .. } => {
                    self.drag.on_drag_end(point);
                }
            }
            steps.push(step);
        }

        let selection_snap = if self.scene.selection.is_empty() {
            None
        } else {
            self.scene.selection_snaps(&self.config).ok()
        };

        Report {
            steps,
            selection_snap,
            scene: self.scene,
        }
    }
}
