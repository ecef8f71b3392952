//! Template shape ingestion.
//!
//! Shape specs arrive from template catalogs or generated suggestions and
//! are not trusted: every numeric field is range-clamped on ingestion and
//! each correction is recorded as a note on the result. A malformed spec is
//! never a hard failure.

use std::f64::consts::PI;

use panelkit_core::{clamp_param, Circle, Point, Polygon};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::finger::push_unique_point;

/// Segments used per quarter-circle when flattening rounded corners.
const CORNER_STEPS: u32 = 6;
/// Segments used for a full circular outline.
const CIRCLE_STEPS: u32 = 48;
/// Minimum distance from a hanging-hole rim to the shape edge.
const HOLE_MARGIN_MM: f64 = 2.0;

/// The closed set of template shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Circle,
    /// Stadium-shaped hanging tag.
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// 0.0 = square corners, 1.0 = fully rounded. Only meaningful for
    /// rounded rectangles.
    pub roundness: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self { roundness: 0.5 }
    }
}

/// An untrusted shape request, as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Hanging-hole diameter, when the shape should have one.
    pub hole_diameter_mm: Option<f64>,
    pub style: ShapeStyle,
}

/// The realized shape plus every correction applied to the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeOutline {
    pub outline: Polygon,
    pub hole: Option<Circle>,
    pub notes: Vec<String>,
}

/// Clamps the spec into range and generates its outline and optional hole.
pub fn realize_shape(spec: &ShapeSpec) -> ShapeOutline {
    let mut notes = Vec::new();
    let width = clamp_param("width", spec.width_mm, 20.0, 200.0, &mut notes);
    let height = clamp_param("height", spec.height_mm, 20.0, 200.0, &mut notes);
    let roundness = clamp_param("roundness", spec.style.roundness, 0.0, 1.0, &mut notes);

    let outline = match spec.kind {
        ShapeKind::Rectangle => Polygon::rect(0.0, 0.0, width, height),
        ShapeKind::RoundedRectangle => {
            let radius = roundness * width.min(height) / 2.0;
            rounded_rect(width, height, radius)
        }
        ShapeKind::Circle => {
            let r = width.min(height) / 2.0;
            circle_outline(width / 2.0, height / 2.0, r)
        }
        ShapeKind::Tag => rounded_rect(width, height, height / 2.0),
    };

    let hole = spec.hole_diameter_mm.map(|diameter| {
        let diameter = clamp_param("hole diameter", diameter, 2.0, 12.0, &mut notes);
        let r = diameter / 2.0;
        // Hanging holes sit toward the left end, pulled in when the shape is
        // too small to hold them there.
        let cx = (width * 0.15).clamp(r + HOLE_MARGIN_MM, width - r - HOLE_MARGIN_MM);
        Circle::new(cx, height / 2.0, r)
    });

    debug!(kind = ?spec.kind, width, height, corrections = notes.len(), "realized shape");
    ShapeOutline {
        outline,
        hole,
        notes,
    }
}

fn rounded_rect(w: f64, h: f64, r: f64) -> Polygon {
    let r = r.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return Polygon::rect(0.0, 0.0, w, h);
    }
    let mut points = Vec::new();
    // The arc's first sample coincides with the straight-segment point
    // already pushed, so sampling starts one step in. A fully rounded side
    // (stadium tags) collapses its straight segment to a point, so every
    // vertex goes through the duplicate merge.
    let arc = |points: &mut Vec<Point>, cx: f64, cy: f64, start: f64| {
        for i in 1..=CORNER_STEPS {
            let angle = start + (i as f64 / CORNER_STEPS as f64) * PI / 2.0;
            push_unique_point(points, Point::new(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    };
    points.push(Point::new(r, 0.0));
    push_unique_point(&mut points, Point::new(w - r, 0.0));
    arc(&mut points, w - r, r, -PI / 2.0);
    push_unique_point(&mut points, Point::new(w, h - r));
    arc(&mut points, w - r, h - r, 0.0);
    push_unique_point(&mut points, Point::new(r, h));
    arc(&mut points, r, h - r, PI / 2.0);
    push_unique_point(&mut points, Point::new(0.0, r));
    arc(&mut points, r, r, PI);
    if let (Some(last), Some(first)) = (points.last().copied(), points.first().copied()) {
        if last.distance_to(&first) < 0.01 {
            points.pop();
        }
    }
    Polygon::new(points)
}

fn circle_outline(cx: f64, cy: f64, r: f64) -> Polygon {
    let points = (0..CIRCLE_STEPS)
        .map(|i| {
            let angle = (i as f64 / CIRCLE_STEPS as f64) * 2.0 * PI;
            Point::new(cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect();
    Polygon::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: ShapeKind) -> ShapeSpec {
        ShapeSpec {
            kind,
            width_mm: 80.0,
            height_mm: 40.0,
            hole_diameter_mm: None,
            style: ShapeStyle::default(),
        }
    }

    #[test]
    fn test_rectangle_exact_size() {
        let shape = realize_shape(&spec(ShapeKind::Rectangle));
        let bbox = shape.outline.bbox();
        assert!((bbox.width() - 80.0).abs() < 1e-9);
        assert!((bbox.height() - 40.0).abs() < 1e-9);
        assert!(shape.notes.is_empty());
    }

    #[test]
    fn test_oversized_spec_clamped_with_notes() {
        let mut s = spec(ShapeKind::Rectangle);
        s.width_mm = 500.0;
        s.height_mm = 5.0;
        let shape = realize_shape(&s);
        let bbox = shape.outline.bbox();
        assert!((bbox.width() - 200.0).abs() < 1e-9);
        assert!((bbox.height() - 20.0).abs() < 1e-9);
        assert_eq!(shape.notes.len(), 2);
        assert!(shape.notes[0].contains("width"));
    }

    #[test]
    fn test_circle_fits_smaller_dimension() {
        let shape = realize_shape(&spec(ShapeKind::Circle));
        let bbox = shape.outline.bbox();
        assert!((bbox.width() - 40.0).abs() < 0.2);
        assert!((bbox.height() - 40.0).abs() < 0.2);
    }

    #[test]
    fn test_tag_hole_clamped_and_noted() {
        let mut s = spec(ShapeKind::Tag);
        s.hole_diameter_mm = Some(25.0);
        let shape = realize_shape(&s);
        let hole = shape.hole.expect("hole requested");
        assert!((hole.r - 6.0).abs() < 1e-9);
        assert!(shape.notes.iter().any(|n| n.contains("hole diameter")));
        // Rim stays inside the outline with margin.
        assert!(hole.cx - hole.r >= HOLE_MARGIN_MM - 1e-9);
    }

    #[test]
    fn test_rounded_outlines_have_no_duplicate_vertices() {
        let mut rounded = spec(ShapeKind::RoundedRectangle);
        rounded.style.roundness = 1.0;
        // A tag's straight sides collapse entirely into the corner arcs.
        for shape in [realize_shape(&rounded), realize_shape(&spec(ShapeKind::Tag))] {
            let points = &shape.outline.points;
            for pair in points.windows(2) {
                assert!(pair[0].distance_to(&pair[1]) > 0.01);
            }
            let first = points[0];
            let last = *points.last().unwrap();
            assert!(last.distance_to(&first) > 0.01);
        }
    }

    #[test]
    fn test_full_roundness_stays_in_bounds() {
        let mut s = spec(ShapeKind::RoundedRectangle);
        s.style.roundness = 1.0;
        let shape = realize_shape(&s);
        let bbox = shape.outline.bbox();
        assert!(bbox.min_x >= -1e-9 && bbox.min_y >= -1e-9);
        assert!(bbox.max_x <= 80.0 + 1e-9 && bbox.max_y <= 40.0 + 1e-9);
    }
}
