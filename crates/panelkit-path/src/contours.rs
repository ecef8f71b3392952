//! Default boolean path engine built on `cavalier_contours`.
//!
//! This is the only module in the workspace that names cavalier_contours
//! types. Polygons are converted to closed polylines on the way in and
//! flattened back to pure line-segment outlines on the way out, so arc
//! segments introduced by offsetting never escape this boundary.

use cavalier_contours::polyline::{
    BooleanOp, PlineSource, PlineSourceMut, PlineVertex, Polyline,
};
use nalgebra::{Matrix3, Vector3};
use panelkit_core::{PathOpError, PathOpResult, Point, Polygon};
use tracing::debug;

use crate::engine::{PathBooleanEngine, StrokeCap, StrokeJoin};

/// Points closer than this are merged when building polylines.
const DUPLICATE_TOLERANCE: f64 = 0.01;

/// Maximum chord deviation when flattening offset arcs back to segments.
const ARC_FLATTEN_TOLERANCE: f64 = 0.01;

/// Boolean path engine backed by `cavalier_contours`.
///
/// Stateless; safe to share across threads. Joins produced by the backend
/// are circular arcs, flattened to segments on output; `StrokeJoin::Miter`
/// and `Bevel` are accepted for interface compatibility and render the same
/// rounded joins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContourEngine;

impl ContourEngine {
    pub fn new() -> Self {
        Self
    }
}

/// Prepares a polygon for the backend: removes near-duplicate points, drops
/// a redundant closing vertex, and enforces clockwise orientation so offset
/// signs are consistent (negative = inward).
fn to_polyline(polygon: &Polygon) -> Polyline {
    let mut clean: Vec<Point> = Vec::with_capacity(polygon.points.len());
    for p in &polygon.points {
        if let Some(last) = clean.last() {
            if last.distance_to(p) <= DUPLICATE_TOLERANCE {
                continue;
            }
        }
        clean.push(*p);
    }
    if clean.len() > 1 {
        let first = clean[0];
        if clean.last().map(|l| l.distance_to(&first)).unwrap_or(1.0) <= DUPLICATE_TOLERANCE {
            clean.pop();
        }
    }

    let mut signed_area = 0.0;
    for i in 0..clean.len() {
        let p1 = clean[i];
        let p2 = clean[(i + 1) % clean.len()];
        signed_area += p1.x * p2.y - p2.x * p1.y;
    }
    if signed_area > 0.0 {
        clean.reverse();
    }

    let mut polyline = Polyline::new();
    for p in clean {
        polyline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    polyline.set_is_closed(true);
    polyline
}

/// Flattens a closed polyline back into a pure line-segment polygon,
/// sampling bulge arcs so the chord deviation stays within tolerance.
fn flatten_polyline(polyline: &Polyline) -> Polygon {
    let verts = &polyline.vertex_data;
    let n = verts.len();
    let mut points: Vec<Point> = Vec::with_capacity(n);

    for i in 0..n {
        let v1 = verts[i];
        let v2 = verts[(i + 1) % n];
        let p1 = Point::new(v1.x, v1.y);
        let p2 = Point::new(v2.x, v2.y);
        points.push(p1);

        let b = v1.bulge;
        if b.abs() < 1e-12 {
            continue;
        }

        // Arc geometry from the bulge value: sweep = 4*atan(b) (CCW
        // positive), radius from the chord length and half-angle sine.
        let chord = p1.distance_to(&p2);
        if chord < 1e-12 {
            continue;
        }
        let sweep = 4.0 * b.atan();
        let sin_half = (2.0 * b / (1.0 + b * b)).abs();
        if sin_half < 1e-12 {
            continue;
        }
        let radius = chord / (2.0 * sin_half);
        let cos_half = (1.0 - b * b) / (1.0 + b * b);

        let mx = (p1.x + p2.x) / 2.0;
        let my = (p1.y + p2.y) / 2.0;
        let ux = (p2.x - p1.x) / chord;
        let uy = (p2.y - p1.y) / chord;
        // Left normal of the chord; the center sits on it at
        // radius*cos(half-sweep), mirrored for clockwise arcs.
        let side = if b >= 0.0 { 1.0 } else { -1.0 };
        let cx = mx + (-uy) * radius * cos_half * side;
        let cy = my + ux * radius * cos_half * side;

        let start_angle = (p1.y - cy).atan2(p1.x - cx);
        let max_step = 2.0 * (1.0 - ARC_FLATTEN_TOLERANCE / radius).clamp(-1.0, 1.0).acos();
        let segments = ((sweep.abs() / max_step.max(1e-3)).ceil() as usize).max(1);
        for s in 1..segments {
            let angle = start_angle + sweep * (s as f64 / segments as f64);
            points.push(Point::new(
                cx + radius * angle.cos(),
                cy + radius * angle.sin(),
            ));
        }
    }

    Polygon::new(points)
}

fn offset_plines(polyline: &Polyline, delta: f64) -> Vec<Polygon> {
    polyline
        .parallel_offset(delta)
        .iter()
        .map(flatten_polyline)
        .filter(|p| !p.is_degenerate())
        .collect()
}

fn input_summary(polygon: &Polygon) -> (usize, (f64, f64)) {
    let bb = polygon.bbox();
    (polygon.points.len(), (bb.width(), bb.height()))
}

impl PathBooleanEngine for ContourEngine {
    fn union(&self, a: &Polygon, b: &Polygon) -> PathOpResult<Vec<Polygon>> {
        // Degenerate operands contribute nothing to the union.
        match (a.is_degenerate(), b.is_degenerate()) {
            (true, true) => return Ok(Vec::new()),
            (true, false) => return Ok(vec![b.clone()]),
            (false, true) => return Ok(vec![a.clone()]),
            (false, false) => {}
        }

        // Disjoint outlines union to themselves; skip the backend call.
        if !a.bbox().padded(DUPLICATE_TOLERANCE).intersects(&b.bbox()) {
            return Ok(vec![a.clone(), b.clone()]);
        }

        let pa = to_polyline(a);
        let pb = to_polyline(b);
        let result = pa.boolean(&pb, BooleanOp::Or);

        let mut polygons: Vec<Polygon> = result
            .pos_plines
            .iter()
            .map(|wrapper| flatten_polyline(&wrapper.pline))
            .filter(|p| !p.is_degenerate())
            .collect();
        // Holes punched through the union (e.g. two C-shapes closing a ring).
        polygons.extend(
            result
                .neg_plines
                .iter()
                .map(|wrapper| flatten_polyline(&wrapper.pline))
                .filter(|p| !p.is_degenerate()),
        );

        if polygons.is_empty() {
            let (count, extent) = input_summary(a);
            return Err(PathOpError::empty("union", count, extent));
        }
        debug!(loops = polygons.len(), "union complete");
        Ok(polygons)
    }

    fn offset(&self, outline: &Polygon, delta: f64) -> PathOpResult<Vec<Polygon>> {
        if outline.is_degenerate() {
            return Ok(Vec::new());
        }
        if delta.abs() < 1e-12 {
            return Ok(vec![outline.clone()]);
        }
        let polyline = to_polyline(outline);
        let results = offset_plines(&polyline, delta);
        if results.is_empty() {
            if delta > 0.0 {
                // Outward offsets cannot collapse valid geometry.
                let (count, extent) = input_summary(outline);
                return Err(PathOpError::empty("offset", count, extent));
            }
            debug!(delta, "inward offset collapsed outline");
        }
        Ok(results)
    }

    fn stroke_to_outline(
        &self,
        outline: &Polygon,
        width: f64,
        _join: StrokeJoin,
        _cap: StrokeCap,
    ) -> PathOpResult<Vec<Polygon>> {
        if outline.is_degenerate() || width <= 0.0 {
            return Ok(Vec::new());
        }
        let polyline = to_polyline(outline);
        let half = width / 2.0;

        let outer = offset_plines(&polyline, half);
        if outer.is_empty() {
            let (count, extent) = input_summary(outline);
            return Err(PathOpError::empty("stroke_to_outline", count, extent));
        }
        // The inner side may collapse for strokes wider than the outline;
        // the band then degenerates to the filled outer loop.
        let inner = offset_plines(&polyline, -half);

        let mut loops = outer;
        loops.extend(inner);
        Ok(loops)
    }

    fn transform(&self, outline: &Polygon, matrix: &Matrix3<f64>) -> Polygon {
        Polygon::new(
            outline
                .points
                .iter()
                .map(|p| {
                    let v = matrix * Vector3::new(p.x, p.y, 1.0);
                    Point::new(v.x, v.y)
                })
                .collect(),
        )
    }
}
