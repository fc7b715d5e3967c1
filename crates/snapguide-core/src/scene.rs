//! Scene document: shapes, selection and viewport.

use crate::aabb::Aabb;
use crate::camera::Camera;
use crate::config::SnapConfig;
use crate::error::{SnapError, SnapResult};
use crate::shapes::{Shape, ShapeId};
use crate::snap::{self, SnapLines, Snaps};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything needed to snap a selection against its scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnap {
    /// Union of the selected shapes' boxes before correction.
    pub bounds: Aabb,
    /// Snaps found for the selection.
    pub snaps: Snaps,
    /// Correction to subtract from the selection's position.
    pub offset: Vec2,
    /// Guide lines drawn against the uncorrected `bounds`.
    pub lines: SnapLines,
}

/// Camera and screen size the viewport is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub camera: Camera,
    pub screen: Size,
}

impl View {
    /// World-space box this view shows.
    pub fn visible_aabb(&self) -> Aabb {
        self.camera.visible_aabb(self.screen)
    }
}

/// A scene containing shapes, the current selection and the visible region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SceneFile")]
pub struct Scene {
    /// All shapes in the scene, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Insertion order of shapes.
    pub order: Vec<ShapeId>,
    /// Currently selected shape IDs (no duplicates).
    pub selection: Vec<ShapeId>,
    /// Visible region in world coordinates.
    pub viewport: Aabb,
    /// View the viewport was derived from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
}

/// Scene as stored on disk, before consistency checks.
#[derive(Deserialize)]
struct SceneFile {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    #[serde(default)]
    selection: Vec<ShapeId>,
    #[serde(default)]
    viewport: Option<Aabb>,
    #[serde(default)]
    view: Option<View>,
}

impl TryFrom<SceneFile> for Scene {
    type Error = SnapError;

    fn try_from(file: SceneFile) -> SnapResult<Self> {
        let SceneFile {
            mut shapes,
            order,
            selection,
            viewport,
            view,
        } = file;

        if let Some((key, shape)) = shapes.iter().find(|(key, shape)| **key != shape.id()) {
            return Err(SnapError::InvalidScene(format!(
                "shape {} is stored under key {}",
                shape.id(),
                key
            )));
        }

        let mut scene = match viewport {
            Some(viewport) => Scene::with_viewport(viewport),
            None => Scene::new(),
        };
        for id in order {
            let shape = shapes.remove(&id).ok_or_else(|| {
                SnapError::InvalidScene(format!("order lists unknown or repeated shape {}", id))
            })?;
            scene.add_shape(shape);
        }
        if let Some(id) = shapes.keys().next() {
            return Err(SnapError::InvalidScene(format!("shape {} is missing from order", id)));
        }

        for id in selection {
            if !scene.shapes.contains_key(&id) || scene.selection.contains(&id) {
                return Err(SnapError::InvalidScene(format!(
                    "selection lists unknown or repeated shape {}",
                    id
                )));
            }
            scene.selection.push(id);
        }

        if let Some(view) = view {
            scene.set_view(view)?;
        }
        Ok(scene)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default viewport.
    pub fn new() -> Self {
        Self::with_viewport(Aabb::new(Point::ZERO, Size::new(800.0, 600.0)))
    }

    /// Create an empty scene with a given viewport.
    pub fn with_viewport(viewport: Aabb) -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            selection: Vec::new(),
            viewport,
            view: None,
        }
    }

    /// Add a shape to the scene. Returns its ID.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Remove a shape from the scene (and from the selection).
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.order.retain(|&shape_id| shape_id != id);
        self.selection.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in insertion order.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Derive the viewport from a camera and screen size.
    pub fn set_view(&mut self, view: View) -> SnapResult<()> {
        view.camera.validate()?;
        self.viewport = view.visible_aabb();
        log::debug!(
            "Viewport from camera: ({}, {}) to ({}, {})",
            self.viewport.min_x,
            self.viewport.min_y,
            self.viewport.max_x,
            self.viewport.max_y
        );
        self.view = Some(view);
        Ok(())
    }

    /// Select a shape (clears previous selection).
    pub fn select(&mut self, id: ShapeId) {
        self.clear_selection();
        self.add_to_selection(id);
    }

    /// Add to selection. Unknown IDs are ignored.
    pub fn add_to_selection(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Selected shapes, in selection order.
    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.selection.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Boxes of visible, unselected shapes.
    pub fn snappable_aabbs(&self) -> Vec<Aabb> {
        snap::snappable_aabbs(self.shapes_ordered(), &self.selection, &self.viewport)
    }

    /// Union of the selected shapes' boxes.
    pub fn selection_aabb(&self) -> SnapResult<Aabb> {
        snap::selection_aabb(self.selected_shapes())
    }

    /// Solve snaps for the current selection.
    pub fn selection_snaps(&self, config: &SnapConfig) -> SnapResult<SelectionSnap> {
        let bounds = self.selection_aabb()?;
        let candidates = self.snappable_aabbs();
        let snaps = snap::get_snaps(&bounds, &candidates, config.threshold);
        let offset = snap::offset_from_snaps(&bounds, &snaps, config.y_offset_source);
        let lines = snap::snap_lines(&bounds, &snaps);
        Ok(SelectionSnap {
            bounds,
            snaps,
            offset,
            lines,
        })
    }

    /// Offset that would align the current selection with its snaps.
    pub fn selection_snap_offset(&self, config: &SnapConfig) -> SnapResult<Vec2> {
        self.selection_snaps(config).map(|result| result.offset)
    }

    /// Move every selected shape by the snap correction.
    pub fn apply_selection_snap(&mut self, config: &SnapConfig) -> SnapResult<SelectionSnap> {
        let result = self.selection_snaps(config)?;
        if result.snaps.is_snapped() {
            for id in self.selection.clone() {
                if let Some(shape) = self.shapes.get_mut(&id) {
                    shape.translate(-result.offset);
                }
            }
        }
        Ok(result)
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON. Inconsistent shape maps, order or
    /// selection lists are rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
