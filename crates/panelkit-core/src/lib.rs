//! # PanelKit Core
//!
//! Core geometry kernel and shared types for PanelKit.
//!
//! ## Components
//!
//! - **Geometry**: Points, polygons, bounding boxes, signed area, containment
//!   and intersection tests, Douglas-Peucker simplification
//! - **Errors**: Structured error types shared by all generator crates
//! - **Validation**: Clamp-and-note parameter ingestion
//!
//! All geometry values use millimeters and `f64` throughout. Every operation
//! is a pure function over immutable values; degenerate input (polygons with
//! fewer than 3 points) produces zero-area or empty results rather than
//! panicking.

pub mod error;
pub mod geometry;
pub mod validate;

pub use error::{EngineError, EngineResult, PathOpError, PathOpResult};
pub use geometry::{
    polygons_intersect, rotate_point, segments_intersect, simplify_polyline, BBox, Circle, Point,
    Polygon,
};
pub use validate::{clamp_count, clamp_param};
