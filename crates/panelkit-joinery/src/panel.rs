//! Panel composition and full box layouts.
//!
//! A panel is a rectangular plate whose four edges are each generated by one
//! of the joinery edge walkers (plain, finger, hinge). The composer chains
//! the four local edge walks around the rectangle, merging near-coincident
//! corner points, then attaches secondary features: pin holes, finger-pull
//! cutouts, and engrave labels. Hole positions are clamped to stay inside
//! the panel with an edge clearance, recorded as warnings.

use panelkit_core::{clamp_param, Circle, Point, Polygon};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::finger::{finger_edge, push_unique_point, EdgeSide};
use crate::hinge::{hinge_edge, HingeRole, HingeSpec};

/// Minimum distance from a hole rim to any panel edge.
const EDGE_CLEARANCE_MM: f64 = 2.0;

/// How one edge of a panel is cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgeSpec {
    /// Straight edge, no joinery.
    Plain,
    /// Finger-joint comb; `male` edges start with a tab, female with a gap.
    Finger { male: bool },
    /// Pin-hinge knuckle edge.
    Hinge { role: HingeRole, spec: HingeSpec },
}

/// Joint dimensions shared by all edges of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointParams {
    /// Material thickness, which is also the finger/knuckle depth.
    pub thickness_mm: f64,
    pub finger_width_mm: f64,
}

/// Which plate of a box a panel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelRole {
    Bottom,
    Front,
    Back,
    Left,
    Right,
    Lid,
}

impl PanelRole {
    pub fn name(&self) -> &'static str {
        match self {
            PanelRole::Bottom => "bottom",
            PanelRole::Front => "front",
            PanelRole::Back => "back",
            PanelRole::Left => "left",
            PanelRole::Right => "right",
            PanelRole::Lid => "lid",
        }
    }
}

/// Engrave-layer text anchored inside a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size_mm: f64,
}

/// One finished plate: outline, cutout holes, optional engrave label, and
/// any corrections applied while composing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub role: PanelRole,
    pub width: f64,
    pub height: f64,
    pub outline: Polygon,
    pub holes: Vec<Circle>,
    pub label: Option<PanelLabel>,
    pub warnings: Vec<String>,
}

impl Panel {
    /// Adds a hole, clamping its center so the rim stays at least the edge
    /// clearance away from every side. A moved hole is recorded as a
    /// warning, never dropped.
    pub fn add_hole(&mut self, circle: Circle) {
        let min_x = circle.r + EDGE_CLEARANCE_MM;
        let max_x = self.width - circle.r - EDGE_CLEARANCE_MM;
        let min_y = circle.r + EDGE_CLEARANCE_MM;
        let max_y = self.height - circle.r - EDGE_CLEARANCE_MM;

        let cx = if max_x >= min_x {
            circle.cx.clamp(min_x, max_x)
        } else {
            self.width / 2.0
        };
        let cy = if max_y >= min_y {
            circle.cy.clamp(min_y, max_y)
        } else {
            self.height / 2.0
        };
        if (cx - circle.cx).abs() > 1e-9 || (cy - circle.cy).abs() > 1e-9 {
            self.warnings.push(format!(
                "Hole on {} panel moved from ({:.1}, {:.1}) to ({:.1}, {:.1}) to keep {:.1}mm edge clearance",
                self.role.name(),
                circle.cx,
                circle.cy,
                cx,
                cy,
                EDGE_CLEARANCE_MM
            ));
        }
        self.holes.push(Circle::new(cx, cy, circle.r));
    }
}

/// Composes a panel outline by walking the four edges in outline order
/// (bottom, right, top, left — matching [`EdgeSide::ALL`]).
pub fn compose_panel(
    role: PanelRole,
    width: f64,
    height: f64,
    edges: &[EdgeSpec; 4],
    joint: &JointParams,
) -> Panel {
    let mut warnings = Vec::new();
    let mut points: Vec<Point> = Vec::new();

    for (side, edge) in EdgeSide::ALL.iter().zip(edges.iter()) {
        let length = side.length(width, height);
        let local = match edge {
            EdgeSpec::Plain => vec![Point::new(0.0, 0.0), Point::new(length, 0.0)],
            EdgeSpec::Finger { male } => {
                finger_edge(length, joint.thickness_mm, joint.finger_width_mm, *male)
            }
            EdgeSpec::Hinge { role, spec } => {
                hinge_edge(length, joint.thickness_mm, spec, *role, &mut warnings)
            }
        };
        for p in local {
            push_unique_point(&mut points, side.to_panel(p, width, height));
        }
    }

    // The left edge ends back at the origin; drop the duplicate closing point.
    if points.len() > 1 {
        let first = points[0];
        if let Some(last) = points.last() {
            if (last.x - first.x).abs() < 0.01 && (last.y - first.y).abs() < 0.01 {
                points.pop();
            }
        }
    }

    debug!(
        role = role.name(),
        width,
        height,
        vertices = points.len(),
        "composed panel"
    );

    Panel {
        role,
        width,
        height,
        outline: Polygon::new(points),
        holes: Vec::new(),
        label: None,
        warnings,
    }
}

/// Parameters for a complete finger-jointed box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    pub inner_width_mm: f64,
    pub inner_depth_mm: f64,
    pub inner_height_mm: f64,
    pub thickness_mm: f64,
    pub kerf_mm: f64,
    pub finger_width_mm: f64,
    /// Hinged lid: the back wall and lid share a pin hinge, and the left and
    /// right walls each get one pin hole.
    pub hinged_lid: bool,
    pub pin_diameter_mm: f64,
    /// Round finger-pull cutout on the lid's front edge.
    pub finger_pull: bool,
    /// Engrave a role label on each panel.
    pub labels: bool,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            inner_width_mm: 100.0,
            inner_depth_mm: 80.0,
            inner_height_mm: 60.0,
            thickness_mm: 3.0,
            kerf_mm: 0.2,
            finger_width_mm: 10.0,
            hinged_lid: true,
            pin_diameter_mm: 3.0,
            finger_pull: true,
            labels: true,
        }
    }
}

impl BoxParams {
    /// Clamps all numeric fields to their valid ranges, recording every
    /// correction. Out-of-range input never fails a request.
    pub fn sanitize(&mut self, notes: &mut Vec<String>) {
        self.inner_width_mm = clamp_param("inner width", self.inner_width_mm, 20.0, 1000.0, notes);
        self.inner_depth_mm = clamp_param("inner depth", self.inner_depth_mm, 20.0, 1000.0, notes);
        self.inner_height_mm =
            clamp_param("inner height", self.inner_height_mm, 20.0, 1000.0, notes);
        self.thickness_mm = clamp_param("thickness", self.thickness_mm, 1.0, 25.0, notes);
        self.kerf_mm = clamp_param("kerf", self.kerf_mm, 0.0, 2.0, notes);
        self.finger_width_mm =
            clamp_param("finger width", self.finger_width_mm, 3.0, 50.0, notes);
        self.pin_diameter_mm =
            clamp_param("pin diameter", self.pin_diameter_mm, 1.0, 10.0, notes);
    }
}

/// All panels of one box, plus parameter corrections applied on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxLayout {
    pub panels: Vec<Panel>,
    pub warnings: Vec<String>,
}

/// Generates the full panel set for a finger-jointed box.
///
/// Edge assignment: the bottom plate is male on all four edges; the front
/// and back walls are female where they meet the bottom and the side walls;
/// the side walls are male toward the front/back walls and female toward the
/// bottom. With a hinged lid, the back wall's top edge and the lid's hinge
/// edge carry complementary knuckle patterns, and the left and right walls
/// each get exactly one pin hole.
pub fn generate_box(params: &BoxParams) -> BoxLayout {
    let mut warnings = Vec::new();
    let mut params = params.clone();
    params.sanitize(&mut warnings);

    let w = params.inner_width_mm;
    let d = params.inner_depth_mm;
    let h = params.inner_height_mm;
    let joint = JointParams {
        thickness_mm: params.thickness_mm,
        finger_width_mm: params.finger_width_mm,
    };
    let hinge_spec = HingeSpec {
        kerf_mm: params.kerf_mm,
        finger_width_mm: params.finger_width_mm,
        ..HingeSpec::default()
    };

    let male = EdgeSpec::Finger { male: true };
    let female = EdgeSpec::Finger { male: false };
    let plain = EdgeSpec::Plain;

    let mut panels = Vec::with_capacity(6);

    // Edges in [bottom, right, top, left] order.
    panels.push(compose_panel(
        PanelRole::Bottom,
        w,
        d,
        &[male, male, male, male],
        &joint,
    ));

    let back_top = if params.hinged_lid {
        EdgeSpec::Hinge {
            role: HingeRole::Back,
            spec: hinge_spec,
        }
    } else {
        plain
    };
    panels.push(compose_panel(
        PanelRole::Front,
        w,
        h,
        &[female, female, plain, female],
        &joint,
    ));
    panels.push(compose_panel(
        PanelRole::Back,
        w,
        h,
        &[female, female, back_top, female],
        &joint,
    ));

    for role in [PanelRole::Left, PanelRole::Right] {
        let mut side = compose_panel(role, d, h, &[female, male, plain, male], &joint);
        if params.hinged_lid {
            // Hinge pin seat at the top back corner.
            side.add_hole(Circle::new(
                d - 2.0 * params.thickness_mm,
                h - 2.0 * params.thickness_mm,
                params.pin_diameter_mm / 2.0,
            ));
        }
        panels.push(side);
    }

    if params.hinged_lid {
        let lid_hinge = EdgeSpec::Hinge {
            role: HingeRole::Lid,
            spec: hinge_spec,
        };
        let mut lid = compose_panel(PanelRole::Lid, w, d, &[plain, plain, lid_hinge, plain], &joint);
        if params.finger_pull {
            lid.add_hole(Circle::new(w / 2.0, 14.0, 10.0));
        }
        panels.push(lid);
    }

    if params.labels {
        for panel in &mut panels {
            panel.label = Some(PanelLabel {
                text: panel.role.name().to_string(),
                x: panel.width / 2.0,
                y: panel.height / 2.0,
                size_mm: 6.0,
            });
        }
    }

    info!(
        panels = panels.len(),
        hinged = params.hinged_lid,
        "generated box layout"
    );
    BoxLayout { panels, warnings }
}
