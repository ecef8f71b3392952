//! Pin-hinge knuckle edge generation.
//!
//! A hinge edge is the same alternating-pitch walk as a finger edge, but
//! each knuckle is centered within its pitch with a half-clearance plus
//! half-kerf margin on both sides. After the beam removes half a kerf from
//! each face, the physical gap between mating knuckles equals the requested
//! clearance plus the kerf.

use panelkit_core::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::finger::push_unique_point;

/// Which plate of the hinge an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HingeRole {
    Back,
    Lid,
}

/// Knuckle count selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountMode {
    /// Derive the count from the edge length and finger width.
    Auto,
    /// Requested count; forced odd and at least 3, with a note.
    Manual(u32),
}

/// Parameters shared by the two mating hinge edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HingeSpec {
    pub clearance_mm: f64,
    pub kerf_mm: f64,
    pub finger_width_mm: f64,
    pub count: CountMode,
}

impl Default for HingeSpec {
    fn default() -> Self {
        Self {
            clearance_mm: 0.2,
            kerf_mm: 0.15,
            finger_width_mm: 10.0,
            count: CountMode::Auto,
        }
    }
}

/// The knuckle pattern shared by both plates of a hinge. Derived on demand
/// from an edge length and spec, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingePattern {
    /// Always odd and at least 3, so the two plates get complementary
    /// (not equal) knuckle counts and the end knuckles mate.
    pub count: u32,
    pub pitch_mm: f64,
}

impl HingePattern {
    /// Derives the pattern, recording a note when a manual count had to be
    /// corrected.
    pub fn derive(length: f64, spec: &HingeSpec, notes: &mut Vec<String>) -> Self {
        let count = match spec.count {
            CountMode::Auto => {
                let auto = crate::finger::finger_count(length, spec.finger_width_mm);
                auto.max(3)
            }
            CountMode::Manual(requested) => {
                let mut count = requested.max(3);
                if count % 2 == 0 {
                    count += 1;
                }
                if count != requested {
                    notes.push(format!(
                        "Hinge knuckle count adjusted from {} to {} (must be odd, at least 3)",
                        requested, count
                    ));
                }
                count
            }
        };
        debug!(length, count, "derived hinge pattern");
        Self {
            count,
            pitch_mm: length / count as f64,
        }
    }

    /// Whether pitch `i` carries a knuckle on the back plate. The lid plate
    /// takes the complement.
    pub fn is_back_finger(&self, i: u32) -> bool {
        i % 2 == 0
    }
}

/// Generates one hinge edge in the local frame (along +x, knuckles toward
/// -y). `depth` is the knuckle protrusion, normally the material thickness.
///
/// Output is axis-aligned only; the centering margin keeps each knuckle
/// `(clearance + kerf) / 2` away from its pitch boundaries.
pub fn hinge_edge(
    length: f64,
    depth: f64,
    spec: &HingeSpec,
    role: HingeRole,
    notes: &mut Vec<String>,
) -> Vec<Point> {
    let pattern = HingePattern::derive(length, spec, notes);
    let pitch = pattern.pitch_mm;
    let margin = (spec.clearance_mm + spec.kerf_mm) / 2.0;

    // A margin that eats the whole pitch leaves no knuckle to cut.
    let margin = if margin * 2.0 >= pitch {
        notes.push(format!(
            "Hinge clearance+kerf margin {:.2}mm leaves no knuckle width at pitch {:.2}mm; margin reduced",
            margin, pitch
        ));
        pitch * 0.25
    } else {
        margin
    };

    let mut path = Vec::new();
    push_unique_point(&mut path, Point::new(0.0, 0.0));

    for i in 0..pattern.count {
        let x0 = i as f64 * pitch;
        let owns = match role {
            HingeRole::Back => pattern.is_back_finger(i),
            HingeRole::Lid => !pattern.is_back_finger(i),
        };
        if owns {
            push_unique_point(&mut path, Point::new(x0 + margin, 0.0));
            push_unique_point(&mut path, Point::new(x0 + margin, -depth));
            push_unique_point(&mut path, Point::new(x0 + pitch - margin, -depth));
            push_unique_point(&mut path, Point::new(x0 + pitch - margin, 0.0));
        }
        push_unique_point(&mut path, Point::new(x0 + pitch, 0.0));
    }
    push_unique_point(&mut path, Point::new(length, 0.0));
    path
}
