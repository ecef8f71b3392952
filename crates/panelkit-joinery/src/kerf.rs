//! Inlay / pocket kerf compensation.
//!
//! The cutting beam removes half a kerf from each side of a cut line, so an
//! inlay piece and its pocket cut from the same outline would rattle by a
//! full kerf. The calculator derives a paired outset (inlay) and inset
//! (pocket) from one source outline, a measured kerf, and a requested fit
//! class.

use panelkit_core::{clamp_param, EngineResult, Polygon};
use panelkit_path::PathBooleanEngine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A pocket narrower than this is too fragile to hold an inlay.
const MIN_POCKET_WIDTH_MM: f64 = 1.0;

/// Requested fit between inlay and pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitClass {
    /// Press fit, no extra clearance.
    Tight,
    Standard,
    Loose,
}

impl FitClass {
    pub fn extra_clearance_mm(&self) -> f64 {
        match self {
            FitClass::Tight => 0.0,
            FitClass::Standard => 0.05,
            FitClass::Loose => 0.15,
        }
    }
}

/// Paired outlines for one inlay job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlayFit {
    /// Outset outlines to cut the inlay piece from.
    pub inlay: Vec<Polygon>,
    /// Inset outlines to cut the pocket with. Empty when the offset
    /// collapsed the source entirely.
    pub pocket: Vec<Polygon>,
    /// The applied offset: `kerf / 2 + extra clearance`.
    pub offset_mm: f64,
    pub warnings: Vec<String>,
}

/// Derives the inlay and pocket outlines for a source shape.
///
/// The inlay is outset by `kerf / 2 + extra` and unioned with the source so
/// a self-touching outline cannot open gaps; the pocket is inset by the same
/// amount. A pocket that collapses below the minimum viable width still
/// returns, flagged with a warning.
pub fn inlay_and_pocket(
    engine: &dyn PathBooleanEngine,
    source: &Polygon,
    kerf_mm: f64,
    fit: FitClass,
) -> EngineResult<InlayFit> {
    let mut warnings = Vec::new();
    let kerf_mm = clamp_param("kerf", kerf_mm, 0.0, 2.0, &mut warnings);
    let offset_mm = kerf_mm / 2.0 + fit.extra_clearance_mm();
    debug!(kerf_mm, ?fit, offset_mm, "computing inlay fit");

    let outset = engine.offset(source, offset_mm)?;
    let mut inlay = Vec::with_capacity(outset.len());
    for piece in &outset {
        inlay.extend(engine.union(piece, source)?);
    }
    if inlay.is_empty() {
        inlay.push(source.clone());
    }

    let pocket = engine.offset(source, -offset_mm)?;
    let viable = pocket.iter().any(|p| {
        let bbox = p.bbox();
        bbox.width() >= MIN_POCKET_WIDTH_MM && bbox.height() >= MIN_POCKET_WIDTH_MM
    });
    if !viable {
        warn!(offset_mm, "pocket collapsed below viable width");
        warnings.push(format!(
            "Pocket narrower than {:.1}mm after {:.2}mm inset; the inlay may not seat",
            MIN_POCKET_WIDTH_MM, offset_mm
        ));
    }

    Ok(InlayFit {
        inlay,
        pocket,
        offset_mm,
        warnings,
    })
}
