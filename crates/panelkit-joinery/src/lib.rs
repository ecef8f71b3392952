//! # PanelKit Joinery
//!
//! Parametric joinery and piece generators for laser-cut panels.
//!
//! ## Generators
//!
//! - **Finger edges**: interlocking box-joint combs with forced-odd finger
//!   counts so mating edges always interlock
//! - **Hinge edges**: pin-hinge knuckle patterns with kerf and clearance
//!   compensation
//! - **Panel composer**: full box layouts (walls, bottom, hinged lid) with
//!   pin holes, finger-pull cutouts, and engrave labels
//! - **Kerf calculator**: paired inlay/pocket outlines for press-fit inlays
//! - **Seeded pieces**: deterministic jigsaw-style subdivision of a rectangle
//! - **Template shapes**: clamped ingestion of simple parametric outlines
//!
//! All generators are pure functions: the same parameters (and seed, where
//! applicable) always produce identical output. Out-of-range input is
//! clamped and reported as warnings on the result, never rejected.

pub mod finger;
pub mod hinge;
pub mod kerf;
pub mod panel;
pub mod puzzle;
pub mod rng;
pub mod shape_spec;

pub use finger::{finger_count, finger_edge, EdgeSide};
pub use hinge::{hinge_edge, CountMode, HingePattern, HingeRole, HingeSpec};
pub use kerf::{inlay_and_pocket, FitClass, InlayFit};
pub use panel::{
    compose_panel, generate_box, BoxLayout, BoxParams, EdgeSpec, JointParams, Panel, PanelLabel,
    PanelRole,
};
pub use puzzle::{generate_pieces, PieceGrid, PieceGridParams};
pub use rng::SeedRng;
pub use shape_spec::{realize_shape, ShapeKind, ShapeOutline, ShapeSpec, ShapeStyle};
