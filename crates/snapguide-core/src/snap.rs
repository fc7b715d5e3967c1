//! Snap solver for aligning a moving selection with nearby shapes.
//!
//! Solving happens in three steps: collect candidate boxes that are visible
//! and not selected, find at most one snap per axis, then derive the offset
//! that aligns the selection and the guide lines a renderer should draw.

use crate::aabb::{Aabb, XAnchor, YAnchor};
use crate::config::YOffsetSource;
use crate::error::{SnapError, SnapResult};
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// An alignment on the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapX {
    /// Box being snapped to.
    pub target: Aabb,
    /// Anchor on the moving box.
    pub from: XAnchor,
    /// Anchor on the target.
    pub to: XAnchor,
}

impl SnapX {
    /// Signed distance from the moving anchor to the target anchor.
    pub fn distance(&self, bounds: &Aabb) -> f64 {
        bounds.x(self.from) - self.target.x(self.to)
    }
}

/// An alignment on the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapY {
    /// Box being snapped to.
    pub target: Aabb,
    /// Anchor on the moving box.
    pub from: YAnchor,
    /// Anchor on the target.
    pub to: YAnchor,
}

impl SnapY {
    /// Signed distance from the moving anchor to the target anchor.
    pub fn distance(&self, bounds: &Aabb) -> f64 {
        bounds.y(self.from) - self.target.y(self.to)
    }
}

/// Result of a solve: at most one snap per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Snaps {
    pub x: Option<SnapX>,
    pub y: Option<SnapY>,
}

impl Snaps {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Guide line endpoints for a renderer.
///
/// `points_x` is the vertical guide of an X snap, sorted by Y.
/// `points_y` is the horizontal guide of a Y snap, sorted by X.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapLines {
    pub points_x: Vec<Point>,
    pub points_y: Vec<Point>,
}

impl SnapLines {
    pub fn is_empty(&self) -> bool {
        self.points_x.is_empty() && self.points_y.is_empty()
    }
}

fn is_close_enough(distance: f64, threshold: f64) -> bool {
    distance.abs() < threshold
}

/// Boxes of shapes that can be snapped to.
///
/// Shapes in `selection` are excluded by id, never by geometry. The rest are
/// kept if they are inside or touching the viewport. Input order is preserved.
pub fn snappable_aabbs<'a, I>(shapes: I, selection: &[ShapeId], viewport: &Aabb) -> Vec<Aabb>
where
    I: IntoIterator<Item = &'a Shape>,
{
    shapes
        .into_iter()
        .filter(|shape| !selection.contains(&shape.id()))
        .map(Aabb::from_shape)
        .filter(|bounds| viewport.contains(bounds) || viewport.collides(bounds))
        .collect()
}

/// Union of the boxes of all given shapes.
pub fn selection_aabb<'a, I>(selection: I) -> SnapResult<Aabb>
where
    I: IntoIterator<Item = &'a Shape>,
{
    Aabb::union_all(selection.into_iter().map(Aabb::from_shape)).ok_or_else(|| {
        log::debug!("Bounds requested for an empty selection");
        SnapError::EmptySelection
    })
}

/// Find the first snap on each axis.
///
/// Candidates are visited in order. For each candidate every (from, to)
/// anchor pair is tried in `ALL` order, from-major. The first pair whose
/// distance is strictly below `threshold` wins for its axis and later
/// candidates are not considered for it. A closer match found later never
/// replaces an earlier one.
pub fn get_snaps(bounds: &Aabb, candidates: &[Aabb], threshold: f64) -> Snaps {
    let mut snaps = Snaps::default();

    for target in candidates {
        if snaps.x.is_none() {
            snaps.x = find_x(bounds, target, threshold);
            if let Some(snap) = &snaps.x {
                log::trace!("Snap X {:?} -> {:?} at {}", snap.from, snap.to, target.x(snap.to));
            }
        }
        if snaps.y.is_none() {
            snaps.y = find_y(bounds, target, threshold);
            if let Some(snap) = &snaps.y {
                log::trace!("Snap Y {:?} -> {:?} at {}", snap.from, snap.to, target.y(snap.to));
            }
        }
        if snaps.x.is_some() && snaps.y.is_some() {
            break;
        }
    }

    snaps
}

fn find_x(bounds: &Aabb, target: &Aabb, threshold: f64) -> Option<SnapX> {
    XAnchor::ALL.iter().find_map(|&from| {
        XAnchor::ALL
            .iter()
            .find(|&&to| is_close_enough(bounds.x(from) - target.x(to), threshold))
            .map(|&to| SnapX { target: *target, from, to })
    })
}

fn find_y(bounds: &Aabb, target: &Aabb, threshold: f64) -> Option<SnapY> {
    YAnchor::ALL.iter().find_map(|&from| {
        YAnchor::ALL
            .iter()
            .find(|&&to| is_close_enough(bounds.y(from) - target.y(to), threshold))
            .map(|&to| SnapY { target: *target, from, to })
    })
}

/// Distance from `bounds` to each snapped anchor; zero on axes without a snap.
///
/// Subtracting the result from the selection's position aligns it exactly.
/// With `YOffsetSource::Legacy` the Y delta is measured against the X snap's
/// target, and is zero when there is no X snap.
pub fn offset_from_snaps(bounds: &Aabb, snaps: &Snaps, source: YOffsetSource) -> Vec2 {
    let dx = snaps.x.map_or(0.0, |snap| snap.distance(bounds));
    let dy = match (snaps.y, source) {
        (None, _) => 0.0,
        (Some(snap), YOffsetSource::Corrected) => snap.distance(bounds),
        (Some(snap), YOffsetSource::Legacy) => snaps
            .x
            .map_or(0.0, |snap_x| bounds.y(snap.from) - snap_x.target.y(snap.to)),
    };
    Vec2::new(dx, dy)
}

/// Guide line endpoints for the snaps found on `bounds`.
pub fn snap_lines(bounds: &Aabb, snaps: &Snaps) -> SnapLines {
    let mut lines = SnapLines::default();

    if let Some(snap) = &snaps.x {
        let x = bounds.x(snap.from);
        let points = &mut lines.points_x;
        points.push(Point::new(x, snap.target.min_y));
        points.push(Point::new(x, snap.target.max_y));
        if snap.from == XAnchor::Mid {
            points.push(Point::new(x, bounds.mid_y));
        } else {
            points.push(Point::new(x, bounds.min_y));
            points.push(Point::new(x, bounds.max_y));
        }
        points.sort_by(|a, b| a.y.total_cmp(&b.y));
    }

    if let Some(snap) = &snaps.y {
        let y = bounds.y(snap.from);
        let points = &mut lines.points_y;
        points.push(Point::new(snap.target.min_x, y));
        points.push(Point::new(snap.target.max_x, y));
        if snap.from == YAnchor::Mid {
            points.push(Point::new(bounds.mid_x, y));
        } else {
            points.push(Point::new(bounds.min_x, y));
            points.push(Point::new(bounds.max_x, y));
        }
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SNAP_THRESHOLD;
    use crate::shapes::Rectangle;
    use kurbo::Size;

    fn aabb(x: f64, y: f64, w: f64, h: f64) -> Aabb {
        Aabb::new(Point::new(x, y), Size::new(w, h))
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        Rectangle::new(Point::new(x, y), w, h).into()
    }

    #[test]
    fn test_mid_snap_within_threshold() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let other = aabb(4.0, 500.0, 100.0, 100.0);
        let snaps = get_snaps(&bounds, &[other], DEFAULT_SNAP_THRESHOLD);
        let snap = snaps.x.unwrap();
        assert_eq!(snap.from, XAnchor::Mid);
        assert_eq!(snap.to, XAnchor::Mid);
        assert_eq!(snap.target, other);
        assert!(snaps.y.is_none());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let other = aabb(5.0, 500.0, 100.0, 100.0);
        let snaps = get_snaps(&bounds, &[other], DEFAULT_SNAP_THRESHOLD);
        assert!(!snaps.is_snapped());
    }

    #[test]
    fn test_edge_to_edge_snap() {
        let a = aabb(0.0, 0.0, 100.0, 100.0);
        let b = aabb(103.0, 0.0, 100.0, 100.0);
        let snaps = get_snaps(&a, &[b], DEFAULT_SNAP_THRESHOLD);
        let snap_x = snaps.x.unwrap();
        assert_eq!(snap_x.from, XAnchor::Max);
        assert_eq!(snap_x.to, XAnchor::Min);
        assert_eq!(snap_x.target, b);

        let snap_y = snaps.y.unwrap();
        assert_eq!(snap_y.from, YAnchor::Mid);
        assert_eq!(snap_y.to, YAnchor::Mid);
    }

    #[test]
    fn test_first_candidate_wins_over_closer() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let far = aabb(4.0, 500.0, 100.0, 100.0);
        let exact = aabb(0.0, 800.0, 100.0, 100.0);
        let snaps = get_snaps(&bounds, &[far, exact], DEFAULT_SNAP_THRESHOLD);
        assert_eq!(snaps.x.unwrap().target, far);

        let snaps = get_snaps(&bounds, &[exact, far], DEFAULT_SNAP_THRESHOLD);
        assert_eq!(snaps.x.unwrap().target, exact);
    }

    #[test]
    fn test_pair_order_mid_first() {
        // (mid, mid) is 4.5 apart, (min, min) is exact; enumeration order decides.
        let bounds = aabb(0.0, 0.0, 10.0, 10.0);
        let target = aabb(0.0, 500.0, 1.0, 10.0);
        let snap = get_snaps(&bounds, &[target], DEFAULT_SNAP_THRESHOLD).x.unwrap();
        assert_eq!(snap.from, XAnchor::Mid);
        assert_eq!(snap.to, XAnchor::Mid);
    }

    #[test]
    fn test_pair_order_within_from() {
        // mid (50) is far from everything except target max (52); min (0) is
        // exact on target min but comes later.
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let target = aabb(0.0, 500.0, 52.0, 10.0);
        let snap = get_snaps(&bounds, &[target], DEFAULT_SNAP_THRESHOLD).x.unwrap();
        assert_eq!(snap.from, XAnchor::Mid);
        assert_eq!(snap.to, XAnchor::Max);
    }

    #[test]
    fn test_axes_solved_independently() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let only_x = aabb(103.0, 1000.0, 100.0, 100.0);
        let only_y = aabb(1000.0, 2.0, 100.0, 100.0);
        let snaps = get_snaps(&bounds, &[only_x, only_y], DEFAULT_SNAP_THRESHOLD);
        assert_eq!(snaps.x.unwrap().target, only_x);
        assert_eq!(snaps.y.unwrap().target, only_y);
    }

    #[test]
    fn test_custom_threshold() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let other = aabb(8.0, 500.0, 100.0, 100.0);
        assert!(get_snaps(&bounds, &[other], DEFAULT_SNAP_THRESHOLD).x.is_none());
        assert!(get_snaps(&bounds, &[other], 10.0).x.is_some());
    }

    #[test]
    fn test_no_candidates() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        assert_eq!(get_snaps(&bounds, &[], DEFAULT_SNAP_THRESHOLD), Snaps::default());
    }

    #[test]
    fn test_snappable_excludes_selection_by_id() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let mut twin = a.clone();
        twin.regenerate_id();
        let shapes = vec![a.clone(), twin.clone()];
        let viewport = aabb(-100.0, -100.0, 1000.0, 1000.0);

        let result = snappable_aabbs(&shapes, &[a.id()], &viewport);
        assert_eq!(result, vec![Aabb::from_shape(&twin)]);
    }

    #[test]
    fn test_snappable_filters_by_viewport() {
        let inside = rect(10.0, 10.0, 10.0, 10.0);
        let overlapping = rect(90.0, 90.0, 50.0, 50.0);
        let touching = rect(100.0, 0.0, 10.0, 10.0);
        let outside = rect(500.0, 500.0, 10.0, 10.0);
        let covering = rect(-10.0, -10.0, 200.0, 200.0);
        let shapes = vec![
            outside.clone(),
            covering.clone(),
            inside.clone(),
            touching.clone(),
            overlapping.clone(),
        ];
        let viewport = aabb(0.0, 0.0, 100.0, 100.0);

        let result = snappable_aabbs(&shapes, &[], &viewport);
        assert_eq!(
            result,
            vec![
                Aabb::from_shape(&covering),
                Aabb::from_shape(&inside),
                Aabb::from_shape(&touching),
                Aabb::from_shape(&overlapping),
            ]
        );
    }

    #[test]
    fn test_snappable_empty_inputs() {
        let viewport = aabb(0.0, 0.0, 100.0, 100.0);
        let shapes: Vec<Shape> = Vec::new();
        assert!(snappable_aabbs(&shapes, &[], &viewport).is_empty());
    }

    #[test]
    fn test_selection_aabb() {
        let shapes = [rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 30.0, 10.0, 10.0)];
        let bounds = selection_aabb(&shapes).unwrap();
        assert_eq!(bounds, Aabb::from_extents(0.0, 0.0, 30.0, 40.0));
    }

    #[test]
    fn test_selection_aabb_empty() {
        let shapes: [Shape; 0] = [];
        assert_eq!(selection_aabb(&shapes), Err(SnapError::EmptySelection));
    }

    #[test]
    fn test_offset_corrected() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let only_x = aabb(103.0, 1000.0, 100.0, 100.0);
        let only_y = aabb(1000.0, 2.0, 100.0, 100.0);
        let snaps = get_snaps(&bounds, &[only_x, only_y], DEFAULT_SNAP_THRESHOLD);
        let offset = offset_from_snaps(&bounds, &snaps, YOffsetSource::Corrected);
        assert!((offset.x - -3.0).abs() < f64::EPSILON);
        assert!((offset.y - -2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_offset_legacy_reads_x_target() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let only_x = aabb(103.0, 1000.0, 100.0, 100.0);
        let only_y = aabb(1000.0, 2.0, 100.0, 100.0);
        let snaps = get_snaps(&bounds, &[only_x, only_y], DEFAULT_SNAP_THRESHOLD);
        let offset = offset_from_snaps(&bounds, &snaps, YOffsetSource::Legacy);
        assert!((offset.x - -3.0).abs() < f64::EPSILON);
        // mid Y of the selection (50) against mid Y of the X target (1050)
        assert!((offset.y - -1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_offset_legacy_without_x_snap() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let only_y = aabb(1000.0, 2.0, 100.0, 100.0);
        let snaps = get_snaps(&bounds, &[only_y], DEFAULT_SNAP_THRESHOLD);
        assert!(snaps.x.is_none());
        let offset = offset_from_snaps(&bounds, &snaps, YOffsetSource::Legacy);
        assert_eq!(offset, Vec2::ZERO);
        let offset = offset_from_snaps(&bounds, &snaps, YOffsetSource::Corrected);
        assert!((offset.y - -2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_offset_without_snaps() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let offset = offset_from_snaps(&bounds, &Snaps::default(), YOffsetSource::Corrected);
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn test_snap_lines_edge_x() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let target = aabb(103.0, -50.0, 100.0, 300.0);
        let snaps = Snaps {
            x: Some(SnapX { target, from: XAnchor::Max, to: XAnchor::Min }),
            y: None,
        };
        let lines = snap_lines(&bounds, &snaps);
        assert_eq!(
            lines.points_x,
            vec![
                Point::new(100.0, -50.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(100.0, 250.0),
            ]
        );
        assert!(lines.points_y.is_empty());
    }

    #[test]
    fn test_snap_lines_mid_x() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let target = aabb(0.0, 200.0, 100.0, 100.0);
        let snaps = Snaps {
            x: Some(SnapX { target, from: XAnchor::Mid, to: XAnchor::Mid }),
            y: None,
        };
        let lines = snap_lines(&bounds, &snaps);
        assert_eq!(
            lines.points_x,
            vec![
                Point::new(50.0, 50.0),
                Point::new(50.0, 200.0),
                Point::new(50.0, 300.0),
            ]
        );
    }

    #[test]
    fn test_snap_lines_y_mirror() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        let target = aabb(300.0, 98.0, 50.0, 50.0);
        let snaps = Snaps {
            x: None,
            y: Some(SnapY { target, from: YAnchor::Max, to: YAnchor::Min }),
        };
        let lines = snap_lines(&bounds, &snaps);
        assert!(lines.points_x.is_empty());
        assert_eq!(
            lines.points_y,
            vec![
                Point::new(0.0, 100.0),
                Point::new(100.0, 100.0),
                Point::new(300.0, 100.0),
                Point::new(350.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_snap_lines_mid_y_uses_mid_x() {
        let bounds = aabb(0.0, 0.0, 100.0, 40.0);
        let target = aabb(-300.0, 0.0, 50.0, 40.0);
        let snaps = Snaps {
            x: None,
            y: Some(SnapY { target, from: YAnchor::Mid, to: YAnchor::Mid }),
        };
        let lines = snap_lines(&bounds, &snaps);
        assert_eq!(
            lines.points_y,
            vec![
                Point::new(-300.0, 20.0),
                Point::new(-250.0, 20.0),
                Point::new(50.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_snap_lines_empty() {
        let bounds = aabb(0.0, 0.0, 100.0, 100.0);
        assert!(snap_lines(&bounds, &Snaps::default()).is_empty());
    }
}
