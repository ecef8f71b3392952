//! Nesting request and result types.

use panelkit_core::{BBox, Polygon};
use serde::{Deserialize, Serialize};

/// One sheet of material to place parts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub width_mm: f64,
    pub height_mm: f64,
    /// Border kept clear on all four sides.
    pub margin_mm: f64,
    /// Minimum gap between any two placed parts.
    pub spacing_mm: f64,
    /// Anchor grid resolution for the placement scan.
    pub grid_step_mm: f64,
    /// Regions excluded from placement (fixturing, damage).
    pub keep_outs: Vec<BBox>,
}

impl Default for SheetSpec {
    fn default() -> Self {
        Self {
            width_mm: 600.0,
            height_mm: 400.0,
            margin_mm: 5.0,
            spacing_mm: 2.0,
            grid_step_mm: 2.0,
            keep_outs: Vec::new(),
        }
    }
}

impl SheetSpec {
    /// The placeable region after the margin.
    pub fn usable(&self) -> BBox {
        BBox::new(
            self.margin_mm,
            self.margin_mm,
            self.width_mm - self.margin_mm,
            self.height_mm - self.margin_mm,
        )
    }
}

/// One part to nest. Rotations are tried in listed order; an empty set
/// means unrotated only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub outline: Polygon,
    pub rotations_deg: Vec<f64>,
}

impl Part {
    pub fn new(id: impl Into<String>, outline: Polygon) -> Self {
        Self {
            id: id.into(),
            outline,
            rotations_deg: vec![0.0],
        }
    }

    pub fn with_rotations(mut self, rotations_deg: Vec<f64>) -> Self {
        self.rotations_deg = rotations_deg;
        self
    }
}

/// A part successfully placed onto the sheet, in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPart {
    pub part_id: String,
    pub polygon_world: Polygon,
    /// Translation applied to the (rotated, origin-normalized) outline.
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

/// Why a part ended up in the overflow list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnplacedReason {
    /// The bounding box exceeds the usable sheet in every allowed rotation.
    TooLargeForSheet,
    /// No anchor on this sheet could accept the part.
    NoSpaceLeft,
    /// The run was cancelled before this part was attempted.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unplaced {
    pub part_id: String,
    pub reason: UnplacedReason,
}

/// Result of one nesting run over one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestResult {
    pub placed: Vec<PlacedPart>,
    /// Parts for the caller to carry to the next sheet.
    pub overflow: Vec<Unplaced>,
    /// `false` when the run was cancelled before finishing.
    pub complete: bool,
}

impl NestResult {
    /// Fraction of the sheet area covered by placed parts.
    pub fn utilization(&self, sheet: &SheetSpec) -> f64 {
        let sheet_area = sheet.width_mm * sheet.height_mm;
        if sheet_area <= 0.0 {
            return 0.0;
        }
        let used: f64 = self.placed.iter().map(|p| p.polygon_world.area()).sum();
        used / sheet_area
    }
}
