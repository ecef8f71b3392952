//! Greedy grid-scan placement.
//!
//! Parts are sorted by descending bounding-box area (stable, so ties keep
//! input order) and placed one at a time. For each part, every allowed
//! rotation is tried in listed order; for each rotation the anchor grid is
//! scanned row-major, y ascending then x ascending, and the first anchor
//! that passes all checks wins:
//!
//! 1. containment within the sheet's usable region,
//! 2. no spacing-padded bounding-box overlap with already-placed parts,
//! 3. no exact polygon intersection with already-placed parts,
//! 4. no overlap with a keep-out rectangle.
//!
//! The bounding-box prefilter makes the exact intersection test rare; the
//! scan order makes results deterministic.

use std::sync::atomic::{AtomicBool, Ordering};

use panelkit_core::{polygons_intersect, Point, Polygon};
use tracing::{debug, info};

use crate::types::{NestResult, Part, PlacedPart, SheetSpec, Unplaced, UnplacedReason};

const EPS: f64 = 1e-6;

/// Places `parts` onto one sheet. Pure per invocation.
pub fn nest(sheet: &SheetSpec, parts: &[Part]) -> NestResult {
    let cancel = AtomicBool::new(false);
    nest_with_cancel(sheet, parts, &cancel)
}

/// Like [`nest`], but checks `cancel` between parts (never mid-test). A
/// cancelled run returns the placements made so far with `complete: false`
/// and the unattempted parts in the overflow list.
pub fn nest_with_cancel(sheet: &SheetSpec, parts: &[Part], cancel: &AtomicBool) -> NestResult {
    let mut order: Vec<usize> = (0..parts.len()).collect();
    order.sort_by(|&a, &b| {
        let area_a = parts[a].outline.bbox().area();
        let area_b = parts[b].outline.bbox().area();
        area_b.partial_cmp(&area_a).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut placed: Vec<PlacedPart> = Vec::new();
    let mut overflow: Vec<Unplaced> = Vec::new();
    let mut complete = true;

    for (attempted, &idx) in order.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            complete = false;
            for &rest in &order[attempted..] {
                overflow.push(Unplaced {
                    part_id: parts[rest].id.clone(),
                    reason: UnplacedReason::Cancelled,
                });
            }
            break;
        }
        match place_part(sheet, &parts[idx], &placed) {
            Ok(placement) => placed.push(placement),
            Err(reason) => overflow.push(Unplaced {
                part_id: parts[idx].id.clone(),
                reason,
            }),
        }
    }

    info!(
        placed = placed.len(),
        overflow = overflow.len(),
        complete,
        "nesting run finished"
    );
    NestResult {
        placed,
        overflow,
        complete,
    }
}

fn place_part(
    sheet: &SheetSpec,
    part: &Part,
    placed: &[PlacedPart],
) -> Result<PlacedPart, UnplacedReason> {
    let usable = sheet.usable();
    let rotations: &[f64] = if part.rotations_deg.is_empty() {
        &[0.0]
    } else {
        &part.rotations_deg
    };

    let mut any_rotation_fits = false;
    for &rotation in rotations {
        let outline = normalized(&part.outline, rotation);
        let bbox = outline.bbox();
        if bbox.width() > usable.width() + EPS || bbox.height() > usable.height() + EPS {
            continue;
        }
        any_rotation_fits = true;

        let max_x = usable.max_x - bbox.width();
        let max_y = usable.max_y - bbox.height();
        let mut y = usable.min_y;
        while y <= max_y + EPS {
            let mut x = usable.min_x;
            while x <= max_x + EPS {
                if anchor_fits(sheet, &outline, x, y, placed) {
                    let world = outline.translated(x, y);
                    debug!(part = %part.id, x, y, rotation, "placed part");
                    return Ok(PlacedPart {
                        part_id: part.id.clone(),
                        polygon_world: world,
                        x,
                        y,
                        rotation_deg: rotation,
                    });
                }
                x += sheet.grid_step_mm;
            }
            y += sheet.grid_step_mm;
        }
    }

    Err(if any_rotation_fits {
        UnplacedReason::NoSpaceLeft
    } else {
        UnplacedReason::TooLargeForSheet
    })
}

/// Rotates the outline about its bbox center, then moves its bbox minimum
/// to the origin so anchors translate it directly.
fn normalized(outline: &Polygon, rotation_deg: f64) -> Polygon {
    let bbox = outline.bbox();
    let center = Point::new(
        (bbox.min_x + bbox.max_x) / 2.0,
        (bbox.min_y + bbox.max_y) / 2.0,
    );
    let rotated = if rotation_deg == 0.0 {
        outline.clone()
    } else {
        outline.rotated(center, rotation_deg)
    };
    let bbox = rotated.bbox();
    rotated.translated(-bbox.min_x, -bbox.min_y)
}

fn anchor_fits(
    sheet: &SheetSpec,
    outline: &Polygon,
    x: f64,
    y: f64,
    placed: &[PlacedPart],
) -> bool {
    let candidate_bbox = outline.bbox().translated(x, y);

    for keep_out in &sheet.keep_outs {
        if candidate_bbox.intersects(keep_out) {
            return false;
        }
    }

    // Spacing rule first: padded bounding boxes may not overlap. Most
    // anchors fail here without ever touching exact geometry.
    let padded = candidate_bbox.padded(sheet.spacing_mm);
    if placed
        .iter()
        .any(|other| padded.intersects(&other.polygon_world.bbox()))
    {
        return false;
    }

    // Exact outline test as the final word. With a zero spacing the padded
    // boxes may touch without overlapping, so the polygon check still has
    // to rule on contact.
    let candidate = outline.translated(x, y);
    !placed
        .iter()
        .any(|other| polygons_intersect(&candidate, &other.polygon_world))
}
