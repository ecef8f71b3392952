//! Geometric primitives for panel and sheet layout.

use serde::{Deserialize, Serialize};

/// Tolerance used to break degenerate ties in containment and intersection
/// tests (exactly-horizontal ray through a vertex, exactly-parallel segments).
pub const EPSILON: f64 = 1e-9;

/// A 2D point in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Rotates a point around a center by the given angle in degrees.
pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    if angle_deg.abs() < 1e-6 {
        return p;
    }
    let angle_rad = angle_deg.to_radians();
    let cos_a = angle_rad.cos();
    let sin_a = angle_rad.sin();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * cos_a - dy * sin_a,
        y: center.y + dx * sin_a + dy * cos_a,
    }
}

/// A circle, used for hinge pin holes and finger-pull cutouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns a copy grown by `amount` on every side. Negative amounts
    /// shrink the box.
    pub fn padded(&self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains(&self, other: &BBox) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

/// An ordered sequence of points forming an implicitly closed outline.
///
/// The closing point is not stored; consumers close the loop. Fewer than
/// 3 points is degenerate and yields zero-area / empty results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Builds an axis-aligned rectangle outline.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(vec![
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ])
    }

    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Signed area via the shoelace formula. Positive for counter-clockwise
    /// winding; the sign is preserved so boolean operations can distinguish
    /// outer loops from holes. Degenerate polygons return 0.
    pub fn signed_area(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..self.points.len() {
            let p1 = self.points[i];
            let p2 = self.points[(i + 1) % self.points.len()];
            sum += p1.x * p2.y - p2.x * p1.y;
        }
        sum / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Axis-aligned bounding box. A degenerate polygon returns a zero-size
    /// box at the origin.
    pub fn bbox(&self) -> BBox {
        if self.points.is_empty() {
            return BBox::new(0.0, 0.0, 0.0, 0.0);
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        BBox::new(min_x, min_y, max_x, max_y)
    }

    /// Ray-casting containment test. The test ray is shifted by a fixed
    /// epsilon so a ray passing exactly through a vertex cannot double-count.
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let y = p.y + EPSILON;
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.points[i];
            let pj = self.points[j];
            if (pi.y > y) != (pj.y > y) {
                let x_cross = pj.x + (y - pj.y) / (pi.y - pj.y) * (pi.x - pj.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Returns a copy shifted by the given offsets.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
        )
    }

    /// Returns a copy rotated around a center by the given angle in degrees.
    pub fn rotated(&self, center: Point, angle_deg: f64) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| rotate_point(*p, center, angle_deg))
                .collect(),
        )
    }

    /// Douglas-Peucker simplification of the closed outline.
    ///
    /// The stored points are simplified as an open chain, so the first and
    /// last stored point always survive. A surviving tail that sits within
    /// the tolerance of the start is dropped afterwards: the implicit
    /// closure already supplies that segment, and keeping the point would
    /// leave a sliver edge shorter than the tolerance.
    pub fn simplified(&self, tolerance: f64) -> Self {
        if self.is_degenerate() {
            return self.clone();
        }
        let mut simplified = simplify_polyline(&self.points, tolerance);
        if simplified.len() > 1 {
            let first = simplified[0];
            if simplified
                .last()
                .map(|last| last.distance_to(&first) <= tolerance)
                .unwrap_or(false)
            {
                simplified.pop();
            }
        }
        Self::new(simplified)
    }

    /// Iterates the closed edge list, including the closing segment.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Perpendicular distance from a point to the line through `a` and `b`.
fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < EPSILON {
        return p.distance_to(a);
    }
    ((dy * p.x - dx * p.y + b.x * a.y - b.y * a.x) / len).abs()
}

/// Iterative Douglas-Peucker simplification of an open polyline.
///
/// Endpoints are always preserved. Uses an explicit work stack instead of
/// recursion so very dense inputs cannot overflow.
pub fn simplify_polyline(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0usize, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = perpendicular_distance(p, &points[start], &points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }

    points
        .iter()
        .zip(keep.iter())
        .filter_map(|(p, k)| if *k { Some(*p) } else { None })
        .collect()
}

/// Tests two segments for intersection using the parametric line-line
/// formula. Exactly-parallel segments are treated as non-intersecting.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1x = a2.x - a1.x;
    let d1y = a2.y - a1.y;
    let d2x = b2.x - b1.x;
    let d2y = b2.y - b1.y;

    let denom = d1x * d2y - d1y * d2x;
    if denom.abs() < EPSILON {
        return false;
    }

    let t = ((b1.x - a1.x) * d2y - (b1.y - a1.y) * d2x) / denom;
    let u = ((b1.x - a1.x) * d1y - (b1.y - a1.y) * d1x) / denom;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Exact polygon-polygon intersection: any crossing edge pair, or full
/// containment of one polygon in the other.
pub fn polygons_intersect(a: &Polygon, b: &Polygon) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    for (a1, a2) in a.edges() {
        for (b1, b2) in b.edges() {
            if segments_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    a.contains_point(&b.points[0]) || b.contains_point(&a.points[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Polygon {
        Polygon::rect(0.0, 0.0, size, size)
    }

    #[test]
    fn test_signed_area_winding() {
        let ccw = square(10.0);
        assert!((ccw.signed_area() - 100.0).abs() < 1e-9);

        let mut cw_points = ccw.points.clone();
        cw_points.reverse();
        let cw = Polygon::new(cw_points);
        assert!((cw.signed_area() + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_polygon_is_empty() {
        let degenerate = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert!(degenerate.is_degenerate());
        assert_eq!(degenerate.signed_area(), 0.0);
        assert!(!degenerate.contains_point(&Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_bbox() {
        let p = Polygon::new(vec![
            Point::new(-3.0, 2.0),
            Point::new(7.0, 2.0),
            Point::new(7.0, 9.0),
        ]);
        let bb = p.bbox();
        assert_eq!(bb.min_x, -3.0);
        assert_eq!(bb.max_x, 7.0);
        assert_eq!(bb.min_y, 2.0);
        assert_eq!(bb.max_y, 9.0);
        assert_eq!(bb.width(), 10.0);
    }

    #[test]
    fn test_contains_point() {
        let sq = square(10.0);
        assert!(sq.contains_point(&Point::new(5.0, 5.0)));
        assert!(!sq.contains_point(&Point::new(15.0, 5.0)));
        assert!(!sq.contains_point(&Point::new(-1.0, 5.0)));
    }

    #[test]
    fn test_segments_intersect_crossing() {
        assert!(segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_parallel_never_intersect() {
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
        ));
    }

    #[test]
    fn test_segments_disjoint() {
        assert!(!segments_intersect(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(6.0, 5.0),
        ));
    }

    #[test]
    fn test_polygons_intersect_containment() {
        let outer = square(20.0);
        let inner = Polygon::rect(5.0, 5.0, 2.0, 2.0);
        assert!(polygons_intersect(&outer, &inner));
    }

    #[test]
    fn test_polygons_disjoint() {
        let a = square(5.0);
        let b = Polygon::rect(50.0, 50.0, 5.0, 5.0);
        assert!(!polygons_intersect(&a, &b));
    }

    #[test]
    fn test_simplify_collinear_run() {
        let points: Vec<Point> = (0..=10).map(|i| Point::new(i as f64, 0.0)).collect();
        let simplified = simplify_polyline(&points, 0.1);
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified[0], points[0]);
        assert_eq!(simplified[1], points[10]);
    }

    #[test]
    fn test_simplify_keeps_corners() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.01),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let simplified = simplify_polyline(&points, 0.1);
        assert_eq!(simplified.len(), 3);
    }

    #[test]
    fn test_polygon_simplified_stays_closed() {
        let mut points = Vec::new();
        for i in 0..40 {
            let angle = (i as f64 / 40.0) * std::f64::consts::TAU;
            points.push(Point::new(10.0 * angle.cos(), 10.0 * angle.sin()));
        }
        let poly = Polygon::new(points);
        let simplified = poly.simplified(0.5);
        assert!(simplified.points.len() >= 3);
        assert!(simplified.points.len() < poly.points.len());
        // Implicit closure: first point not duplicated at the tail.
        let first = simplified.points[0];
        let last = *simplified.points.last().unwrap();
        assert!(last.distance_to(&first) > 0.5);
    }

    #[test]
    fn test_polygon_simplified_drops_tail_on_start() {
        // The stored tail sits within tolerance of the start; the implicit
        // closing segment makes it redundant.
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.05),
        ]);
        let simplified = poly.simplified(0.1);
        assert_eq!(simplified.points.len(), 4);
        let first = simplified.points[0];
        let last = *simplified.points.last().unwrap();
        assert!(last.distance_to(&first) > 0.1);
    }

    #[test]
    fn test_bbox_pad_and_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(11.0, 0.0, 20.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.padded(1.5).intersects(&b));
    }
}
