//! # PanelKit Nest
//!
//! Places polygonal parts onto bounded rectangular sheets: greedy
//! largest-first placement over a fixed anchor grid, honoring minimum
//! inter-part spacing, sheet margins, keep-out rectangles, and per-part
//! rotation sets. Parts that cannot be placed come back as explicit
//! overflow entries with a reason, never as errors.
//!
//! Every run is deterministic: the same parts and sheet produce the same
//! placement, with ties broken by input order. Long runs can be cancelled
//! cooperatively between parts.

mod nester;
mod types;

pub use nester::{nest, nest_with_cancel};
pub use types::{NestResult, Part, PlacedPart, SheetSpec, Unplaced, UnplacedReason};
