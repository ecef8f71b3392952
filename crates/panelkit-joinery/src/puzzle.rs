//! Seeded jigsaw-style piece generation.
//!
//! Subdivides a rectangle into interlocking pieces: one closed border
//! outline plus a set of open cut lines, one per interior row and column
//! boundary. Every knob follows Draradech's ten-control-point Bézier
//! construction, with knob side and jitter drawn from an explicit [`SeedRng`]
//! so identical parameters and seed reproduce byte-identical geometry.

use std::f64::consts::PI;

use panelkit_core::{clamp_count, clamp_param, Point, Polygon};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::finger::push_unique_point;
use crate::rng::SeedRng;

/// Pieces smaller than this per axis are hard to cut and handle.
const MIN_PIECE_SIZE_MM: f64 = 15.0;

/// Segments per cubic Bézier when flattening knob curves.
const BEZIER_STEPS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceGridParams {
    pub width_mm: f64,
    pub height_mm: f64,
    pub rows: u32,
    pub columns: u32,
    /// Knob size as a percentage of the piece dimension.
    pub knob_size_pct: f64,
    /// Random displacement of cut lines and knob shapes, percent.
    pub jitter_pct: f64,
    pub corner_radius_mm: f64,
    pub seed: u64,
}

impl Default for PieceGridParams {
    fn default() -> Self {
        Self {
            width_mm: 200.0,
            height_mm: 150.0,
            rows: 4,
            columns: 5,
            knob_size_pct: 20.0,
            jitter_pct: 4.0,
            corner_radius_mm: 2.0,
            seed: 1,
        }
    }
}

impl PieceGridParams {
    fn sanitize(&mut self, notes: &mut Vec<String>) {
        self.width_mm = clamp_param("width", self.width_mm, 50.0, 2000.0, notes);
        self.height_mm = clamp_param("height", self.height_mm, 50.0, 2000.0, notes);
        self.rows = clamp_count("rows", self.rows, 2, 20, notes);
        self.columns = clamp_count("columns", self.columns, 2, 20, notes);
        self.knob_size_pct = clamp_param("knob size", self.knob_size_pct, 10.0, 30.0, notes);
        self.jitter_pct = clamp_param("jitter", self.jitter_pct, 0.0, 13.0, notes);
        self.corner_radius_mm =
            clamp_param("corner radius", self.corner_radius_mm, 0.0, 10.0, notes);
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceGrid {
    /// Closed outer border.
    pub border: Polygon,
    /// Open interior cut lines, one per row/column boundary.
    pub cuts: Vec<Vec<Point>>,
    pub warnings: Vec<String>,
}

/// Generates the border and interior cut lines for a piece grid.
pub fn generate_pieces(params: &PieceGridParams) -> PieceGrid {
    let mut warnings = Vec::new();
    let mut params = params.clone();
    params.sanitize(&mut warnings);

    let piece_w = params.width_mm / params.columns as f64;
    let piece_h = params.height_mm / params.rows as f64;
    if piece_w < MIN_PIECE_SIZE_MM || piece_h < MIN_PIECE_SIZE_MM {
        warn!(piece_w, piece_h, "pieces very small");
        warnings.push(format!(
            "Pieces very small ({:.1} x {:.1}mm); cutting and handling below {:.0}mm is unreliable",
            piece_w, piece_h, MIN_PIECE_SIZE_MM
        ));
    }

    let mut rng = SeedRng::new(params.seed);
    let t = params.knob_size_pct / 200.0;
    let j = params.jitter_pct / 100.0;

    let border = border_outline(params.width_mm, params.height_mm, params.corner_radius_mm);

    let mut cuts = Vec::new();
    for col in 1..params.columns {
        let jitter = piece_w * j;
        let x = col as f64 * piece_w + rng.uniform(-jitter, jitter);
        let mut path = vec![Point::new(x, 0.0)];
        for row in 0..params.rows {
            let y0 = row as f64 * piece_h;
            let flip = rng.chance();
            for (along, across) in knob_profile(&mut rng, t, j, flip) {
                path.push(Point::new(x + across * piece_w, y0 + along * piece_h));
            }
        }
        cuts.push(path);
    }
    for row in 1..params.rows {
        let jitter = piece_h * j;
        let y = row as f64 * piece_h + rng.uniform(-jitter, jitter);
        let mut path = vec![Point::new(0.0, y)];
        for col in 0..params.columns {
            let x0 = col as f64 * piece_w;
            let flip = rng.chance();
            for (along, across) in knob_profile(&mut rng, t, j, flip) {
                path.push(Point::new(x0 + along * piece_w, y + across * piece_h));
            }
        }
        cuts.push(path);
    }

    debug!(
        columns = params.columns,
        rows = params.rows,
        cuts = cuts.len(),
        seed = params.seed,
        "generated piece grid"
    );
    PieceGrid {
        border,
        cuts,
        warnings,
    }
}

/// One knob in normalized cut coordinates: `along` runs 0..1 across the
/// piece, `across` is the sideways excursion as a fraction of the
/// perpendicular piece dimension. Draradech's construction: ten control
/// points forming three cubic Béziers, five jitter draws per knob.
fn knob_profile(rng: &mut SeedRng, t: f64, j: f64, flip: bool) -> Vec<(f64, f64)> {
    let a = rng.uniform(-j, j);
    let b = rng.uniform(-j, j);
    let c = rng.uniform(-j, j);
    let d = rng.uniform(-j, j);
    let e = rng.uniform(-j, j);
    let sign = if flip { -1.0 } else { 1.0 };

    let p = |along: f64, across: f64| (along, across * sign);
    let p0 = p(0.0, 0.0);
    let p1 = p(0.2, a);
    let p2 = p(0.5 + b + d, -t + c);
    let p3 = p(0.5 - t + b, t + c);
    let p4 = p(0.5 - 2.0 * t + b - d, 3.0 * t + c);
    let p5 = p(0.5 + 2.0 * t + b - d, 3.0 * t + c);
    let p6 = p(0.5 + t + b, t + c);
    let p7 = p(0.5 + b + d, -t + c);
    let p8 = p(0.8, e);
    let p9 = p(1.0, 0.0);

    let mut out = Vec::with_capacity(3 * BEZIER_STEPS as usize);
    flatten_cubic(p0, p1, p2, p3, &mut out);
    flatten_cubic(p3, p4, p5, p6, &mut out);
    flatten_cubic(p6, p7, p8, p9, &mut out);
    out
}

fn flatten_cubic(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    out: &mut Vec<(f64, f64)>,
) {
    for i in 1..=BEZIER_STEPS {
        let t = i as f64 / BEZIER_STEPS as f64;
        let mt = 1.0 - t;
        let (t2, t3) = (t * t, t * t * t);
        let (mt2, mt3) = (mt * mt, mt * mt * mt);
        out.push((
            mt3 * p0.0 + 3.0 * mt2 * t * p1.0 + 3.0 * mt * t2 * p2.0 + t3 * p3.0,
            mt3 * p0.1 + 3.0 * mt2 * t * p1.1 + 3.0 * mt * t2 * p2.1 + t3 * p3.1,
        ));
    }
}

/// Rectangular border, optionally with quarter-circle corners approximated
/// by four segments each.
fn border_outline(w: f64, h: f64, r: f64) -> Polygon {
    if r <= 0.0 {
        return Polygon::rect(0.0, 0.0, w, h);
    }
    let steps = 4;
    // The arc's first sample coincides with the straight-segment point
    // already pushed, so sampling starts one step in; remaining
    // near-coincident vertices are merged on the way in.
    let arc = |points: &mut Vec<Point>, cx: f64, cy: f64, start: f64| {
        for i in 1..=steps {
            let angle = start + (i as f64 / steps as f64) * PI / 2.0;
            push_unique_point(points, Point::new(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    };

    let mut points = vec![Point::new(r, 0.0)];
    push_unique_point(&mut points, Point::new(w - r, 0.0));
    arc(&mut points, w - r, r, -PI / 2.0);
    push_unique_point(&mut points, Point::new(w, h - r));
    arc(&mut points, w - r, h - r, 0.0);
    push_unique_point(&mut points, Point::new(r, h));
    arc(&mut points, r, h - r, PI / 2.0);
    push_unique_point(&mut points, Point::new(0.0, r));
    arc(&mut points, r, r, PI);
    // The last arc lands back on the first point; the outline stays
    // implicitly closed.
    if let (Some(last), Some(first)) = (points.last().copied(), points.first().copied()) {
        if last.distance_to(&first) < 0.01 {
            points.pop();
        }
    }
    Polygon::new(points)
}
