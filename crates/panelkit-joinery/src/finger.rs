//! Finger-joint edge generation.
//!
//! A finger edge is an axis-aligned comb: the walk alternates between a
//! finger (rise perpendicular to the edge by the joint depth, run one pitch,
//! retract) and a gap (run one pitch on the baseline). The finger count is
//! always forced odd so that two edges generated with the same nominal
//! length and finger width mate when one is generated male and the other
//! female: the female walk is the male walk with the phase inverted.

use panelkit_core::Point;

/// Points closer than this are merged when chaining edge segments.
const MERGE_TOLERANCE: f64 = 0.01;

/// Appends a point unless it coincides with the previous one.
pub(crate) fn push_unique_point(path: &mut Vec<Point>, point: Point) {
    if let Some(last) = path.last() {
        if (point.x - last.x).abs() < MERGE_TOLERANCE && (point.y - last.y).abs() < MERGE_TOLERANCE
        {
            return;
        }
    }
    path.push(point);
}

/// Number of fingers for an edge: `round(length / finger_width)`, forced odd
/// (incremented when even) and at least 1.
pub fn finger_count(length: f64, finger_width: f64) -> u32 {
    if length <= 0.0 || finger_width <= 0.0 {
        return 1;
    }
    let mut count = (length / finger_width).round() as u32;
    if count == 0 {
        count = 1;
    }
    if count % 2 == 0 {
        count += 1;
    }
    count
}

/// Generates one finger-joint edge in the local frame: the edge runs along
/// +x from (0, 0) to (length, 0), fingers protrude toward -y (outward).
///
/// `male` edges start with a finger; `female` edges start with a gap. Every
/// segment is axis-aligned.
pub fn finger_edge(length: f64, depth: f64, finger_width: f64, male: bool) -> Vec<Point> {
    let count = finger_count(length, finger_width);
    let pitch = length / count as f64;

    let mut path = Vec::new();
    push_unique_point(&mut path, Point::new(0.0, 0.0));

    let mut x = 0.0;
    for i in 0..count {
        let tab = (i % 2 == 0) == male;
        if tab {
            push_unique_point(&mut path, Point::new(x, 0.0));
            push_unique_point(&mut path, Point::new(x, -depth));
            push_unique_point(&mut path, Point::new(x + pitch, -depth));
            push_unique_point(&mut path, Point::new(x + pitch, 0.0));
        } else {
            push_unique_point(&mut path, Point::new(x + pitch, 0.0));
        }
        x += pitch;
    }
    push_unique_point(&mut path, Point::new(length, 0.0));
    path
}

/// The four sides of a rectangular panel, in outline order.
///
/// Edge generators emit points in a local frame (along +x, protrusions at
/// -y); each side maps that frame onto the panel so the protrusions always
/// face outward and the outline winds bottom, right, top, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    Bottom,
    Right,
    Top,
    Left,
}

impl EdgeSide {
    pub const ALL: [EdgeSide; 4] = [
        EdgeSide::Bottom,
        EdgeSide::Right,
        EdgeSide::Top,
        EdgeSide::Left,
    ];

    /// Nominal length of this side for a panel of the given size.
    pub fn length(&self, width: f64, height: f64) -> f64 {
        match self {
            EdgeSide::Bottom | EdgeSide::Top => width,
            EdgeSide::Right | EdgeSide::Left => height,
        }
    }

    /// Maps a local edge point onto the panel frame.
    pub fn to_panel(&self, p: Point, width: f64, height: f64) -> Point {
        match self {
            EdgeSide::Bottom => Point::new(p.x, p.y),
            EdgeSide::Right => Point::new(width - p.y, p.x),
            EdgeSide::Top => Point::new(width - p.x, height - p.y),
            EdgeSide::Left => Point::new(p.y, height - p.x),
        }
    }
}

/// Test helper: every consecutive point pair must differ in exactly one axis.
#[cfg(test)]
pub(crate) fn assert_orthogonal(path: &[Point]) {
    for pair in path.windows(2) {
        let dx = (pair[1].x - pair[0].x).abs();
        let dy = (pair[1].y - pair[0].y).abs();
        assert!(
            dx < 1e-9 || dy < 1e-9,
            "diagonal segment: ({}, {}) -> ({}, {})",
            pair[0].x,
            pair[0].y,
            pair[1].x,
            pair[1].y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_count_is_odd() {
        assert_eq!(finger_count(100.0, 10.0), 11);
        assert_eq!(finger_count(100.0, 11.0), 9);
        assert_eq!(finger_count(30.0, 10.0), 3);
        assert_eq!(finger_count(5.0, 10.0), 1);
    }

    #[test]
    fn test_edge_spans_full_length() {
        let path = finger_edge(100.0, 3.0, 10.0, true);
        assert_eq!(path.first().unwrap(), &Point::new(0.0, 0.0));
        assert_eq!(path.last().unwrap(), &Point::new(100.0, 0.0));
    }

    #[test]
    fn test_edge_is_orthogonal() {
        assert_orthogonal(&finger_edge(100.0, 3.0, 10.0, true));
        assert_orthogonal(&finger_edge(100.0, 3.0, 10.0, false));
    }

    #[test]
    fn test_male_starts_with_finger_female_with_gap() {
        let male = finger_edge(100.0, 3.0, 10.0, true);
        let female = finger_edge(100.0, 3.0, 10.0, false);
        // Male: second point drops to the finger tip at x = 0.
        assert_eq!(male[1], Point::new(0.0, -3.0));
        // Female: second point runs along the baseline.
        assert_eq!(female[1].y, 0.0);
        assert!(female[1].x > 0.0);
    }

    #[test]
    fn test_mating_edges_complement() {
        let length = 100.0;
        let fw = 10.0;
        let count = finger_count(length, fw);
        let pitch = length / count as f64;
        let male = finger_edge(length, 3.0, fw, true);
        let female = finger_edge(length, 3.0, fw, false);

        // Probe the middle of each pitch: exactly one of the two edges has
        // a protrusion there.
        for i in 0..count {
            let mid_x = (i as f64 + 0.5) * pitch;
            let male_tab = edge_depth_at(&male, mid_x) < 0.0;
            let female_tab = edge_depth_at(&female, mid_x) < 0.0;
            assert_ne!(male_tab, female_tab, "pitch {} not complementary", i);
        }
    }

    /// The y-level of the edge at a given x (walks the axis-aligned path).
    fn edge_depth_at(path: &[Point], x: f64) -> f64 {
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if (a.y - b.y).abs() < 1e-9 {
                let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
                if x >= lo && x <= hi {
                    return a.y;
                }
            }
        }
        0.0
    }

    #[test]
    fn test_side_transforms_keep_orthogonality() {
        let local = finger_edge(80.0, 3.0, 10.0, true);
        for side in EdgeSide::ALL {
            let mapped: Vec<Point> = local
                .iter()
                .map(|p| side.to_panel(*p, 80.0, 80.0))
                .collect();
            assert_orthogonal(&mapped);
        }
    }

    proptest! {
        #[test]
        fn prop_never_diagonal(
            length in 20.0f64..500.0,
            depth in 1.0f64..20.0,
            finger_width in 2.0f64..50.0,
            male in any::<bool>(),
        ) {
            let path = finger_edge(length, depth, finger_width, male);
            assert_orthogonal(&path);
        }

        #[test]
        fn prop_count_always_odd(
            length in 1.0f64..1000.0,
            finger_width in 0.5f64..100.0,
        ) {
            prop_assert_eq!(finger_count(length, finger_width) % 2, 1);
        }
    }
}
