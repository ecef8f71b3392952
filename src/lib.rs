//! # PanelKit
//!
//! A parametric panel-joinery and 2D sheet-nesting engine for laser cutting:
//! finger-joint boxes with hinged lids, kerf-compensated inlay fits, seeded
//! jigsaw-style piece grids, greedy sheet nesting, and SVG layout export.
//!
//! ## Architecture
//!
//! PanelKit is organized as a workspace with multiple crates:
//!
//! 1. **panelkit-core** - geometry kernel, error taxonomy, parameter clamping
//! 2. **panelkit-path** - boolean path engine abstraction, path-string codec,
//!    SVG layout exporter
//! 3. **panelkit-joinery** - finger/hinge edge generators, panel composer,
//!    inlay/pocket kerf calculator, seeded piece grids, template shapes
//! 4. **panelkit-nest** - greedy sheet nesting with spacing and keep-outs
//! 5. **panelkit** - facade crate and demo binary
//!
//! All generators are deterministic pure functions. Out-of-range input is
//! clamped and reported as warnings on the result; hard errors are reserved
//! for boolean path engine failures.

pub use panelkit_core as core;
pub use panelkit_joinery as joinery;
pub use panelkit_nest as nest;
pub use panelkit_path as path;

pub use panelkit_core::{
    clamp_count, clamp_param, polygons_intersect, BBox, Circle, EngineError, EngineResult,
    PathOpError, PathOpResult, Point, Polygon,
};

pub use panelkit_path::{
    from_path_string, to_path_string, ContourEngine, PathBooleanEngine, StrokeCap, StrokeJoin,
    SvgExporter, SvgLabel, SvgLayer,
};

pub use panelkit_joinery::{
    compose_panel, finger_count, finger_edge, generate_box, generate_pieces, hinge_edge,
    inlay_and_pocket, realize_shape, BoxLayout, BoxParams, CountMode, EdgeSide, EdgeSpec,
    FitClass, HingePattern, HingeRole, HingeSpec, InlayFit, JointParams, Panel, PanelLabel,
    PanelRole, PieceGrid, PieceGridParams, SeedRng, ShapeKind, ShapeOutline, ShapeSpec,
    ShapeStyle,
};

pub use panelkit_nest::{
    nest_with_cancel, NestResult, Part, PlacedPart, SheetSpec, Unplaced, UnplacedReason,
};

/// Application version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date set by build.rs.
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize the tracing subscriber for logging.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
