use crate::geometry::{point_at, segment_from_points, LabeledPoint, Segment};

/// Derives the segment joining the points at `percent` along two parent segments
pub fn derive_spline(seg_a: &Segment, seg_b: &Segment, percent: f64) -> Segment {
    let p_a = point_at(seg_a, percent);
    let p_b = point_at(seg_b, percent);
    segment_from_points(p_a, p_b)
}

/// Fixed anchors and the two control segments built from them.
///
/// Laid out once from the viewport size and never moved afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Anchors A, B and C, in that order
    pub points: [LabeledPoint; 3],
    /// Control segment A → B
    pub ab: Segment,
    /// Control segment B → C
    pub bc: Segment,
}

impl Scene {
    /// Places A near the bottom left, B near the top left and C near the top right
    pub fn from_viewport(width: f64, height: f64) -> Self {
        let a = LabeledPoint::new(width / 4.0, height - height / 4.0, 'A');
        let b = LabeledPoint::new(width / 4.0, height / 4.0, 'B');
        let c = LabeledPoint::new(width - width / 4.0, height / 4.0, 'C');
        Scene::from_anchors(a, b, c)
    }

    pub fn from_anchors(a: LabeledPoint, b: LabeledPoint, c: LabeledPoint) -> Self {
        let ab = segment_from_points(a.point(), b.point());
        let bc = segment_from_points(b.point(), c.point());
        Scene {
            points: [a, b, c],
            ab,
            bc,
        }
    }

    /// The spline between AB and BC at `percent`
    pub fn spline_at(&self, percent: f64) -> Segment {
        derive_spline(&self.ab, &self.bc, percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use approx::assert_abs_diff_eq;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
    }

    #[test]
    fn test_scene_layout_from_viewport() {
        let scene = Scene::from_viewport(80.0, 40.0);
        let [a, b, c] = scene.points;
        assert_eq!((a.x, a.y, a.label), (20.0, 30.0, 'A'));
        assert_eq!((b.x, b.y, b.label), (20.0, 10.0, 'B'));
        assert_eq!((c.x, c.y, c.label), (60.0, 10.0, 'C'));
        assert_abs_diff_eq!(scene.ab.length, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(scene.bc.length, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spline_at_zero_runs_a_to_b() {
        let scene = Scene::from_viewport(80.0, 40.0);
        let spline = scene.spline_at(0.0);
        assert_point_eq(spline.origin(), scene.points[0].point());
        assert_point_eq(spline.endpoint(), scene.points[1].point());
    }

    #[test]
    fn test_spline_at_hundred_runs_b_to_c() {
        let scene = Scene::from_viewport(80.0, 40.0);
        let spline = scene.spline_at(100.0);
        assert_point_eq(spline.origin(), scene.points[1].point());
        assert_point_eq(spline.endpoint(), scene.points[2].point());
    }

    #[test]
    fn test_spline_midway_joins_midpoints() {
        let scene = Scene::from_viewport(80.0, 40.0);
        let spline = derive_spline(&scene.ab, &scene.bc, 50.0);
        assert_point_eq(spline.origin(), Point::new(20.0, 20.0));
        assert_point_eq(spline.endpoint(), Point::new(40.0, 10.0));
    }

    #[test]
    fn test_spline_over_coincident_anchors() {
        let p = LabeledPoint::new(5.0, 5.0, 'A');
        let scene = Scene::from_anchors(
            p,
            LabeledPoint { label: 'B', ..p },
            LabeledPoint { label: 'C', ..p },
        );
        let spline = scene.spline_at(42.0);
        assert_eq!(spline.length, 0.0);
        assert_eq!(spline.angle, 0.0);
        assert_point_eq(spline.origin(), Point::new(5.0, 5.0));
    }
}
