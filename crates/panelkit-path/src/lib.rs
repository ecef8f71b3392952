//! # PanelKit Path
//!
//! The boolean path engine boundary for PanelKit.
//!
//! This crate is the single point where PanelKit depends on an external
//! computational-geometry library. Everything above it programs against the
//! [`PathBooleanEngine`] trait, so the underlying library can be swapped
//! without touching any generator.
//!
//! ## Components
//!
//! - **Engine trait**: union, offset, stroke-to-outline, bounds, affine
//!   transform over immutable [`panelkit_core::Polygon`] values
//! - **Contours backend**: the default engine built on `cavalier_contours`
//! - **Path data**: `M`/`L`/`Z` path-string interchange (no curve commands)
//! - **Export**: SVG layout serialization with cut and engrave layers

pub mod contours;
pub mod engine;
pub mod export;
pub mod pathdata;

pub use contours::ContourEngine;
pub use engine::{PathBooleanEngine, StrokeCap, StrokeJoin};
pub use export::{SvgExporter, SvgLabel, SvgLayer};
pub use pathdata::{from_path_string, to_path_string};
