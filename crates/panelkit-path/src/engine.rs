//! The boolean path engine abstraction.

use nalgebra::Matrix3;
use panelkit_core::{BBox, PathOpResult, Polygon};
use serde::{Deserialize, Serialize};

/// Line join style for stroke expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeJoin {
    Miter,
    Round,
    Bevel,
}

/// Line cap style for stroke expansion. Only relevant for open paths; closed
/// outlines have no caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeCap {
    Butt,
    Round,
    Square,
}

/// Pure boolean operations over immutable closed outlines.
///
/// All operations treat degenerate input (fewer than 3 points) as empty and
/// return `Ok` with an empty result, so callers can compose without
/// null-checking. A non-degenerate input that the backend reduces to nothing
/// is reported per operation:
///
/// - [`union`](Self::union) and [`stroke_to_outline`](Self::stroke_to_outline)
///   must produce geometry for valid input; an empty result is a hard
///   [`panelkit_core::PathOpError::EmptyResult`].
/// - [`offset`](Self::offset) with a negative delta may legitimately collapse
///   the outline entirely; that comes back as `Ok(empty)` and the caller
///   decides whether it warrants a warning.
///
/// Implementations hold no mutable cross-call state and must be `Send + Sync`
/// so generation requests can run on any thread.
pub trait PathBooleanEngine: Send + Sync {
    /// Unions two outlines into one or more result loops.
    fn union(&self, a: &Polygon, b: &Polygon) -> PathOpResult<Vec<Polygon>>;

    /// Offsets an outline by `delta` millimeters. Positive is outward,
    /// negative is inward. An inward offset that collapses the outline
    /// returns an empty vec.
    fn offset(&self, outline: &Polygon, delta: f64) -> PathOpResult<Vec<Polygon>>;

    /// Expands the outline's boundary into the closed region swept by a
    /// stroke of the given width, returning the outer and inner loops of
    /// that band.
    fn stroke_to_outline(
        &self,
        outline: &Polygon,
        width: f64,
        join: StrokeJoin,
        cap: StrokeCap,
    ) -> PathOpResult<Vec<Polygon>>;

    /// Axis-aligned bounds of the outline.
    fn bounds(&self, outline: &Polygon) -> BBox {
        outline.bbox()
    }

    /// Applies a row-major affine matrix to every vertex.
    fn transform(&self, outline: &Polygon, matrix: &Matrix3<f64>) -> Polygon;
}
