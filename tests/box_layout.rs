//! End-to-end layout scenario: a 100 x 80 x 60 mm hinged box with 3 mm
//! stock and 10 mm fingers, generated, nested, and exported.

use panelkit::{
    generate_box, nest_with_cancel, to_path_string, BoxParams, PanelRole, Part, SheetSpec,
    SvgExporter, SvgLayer,
};
use std::sync::atomic::AtomicBool;

fn scenario_params() -> BoxParams {
    BoxParams {
        inner_width_mm: 100.0,
        inner_depth_mm: 80.0,
        inner_height_mm: 60.0,
        thickness_mm: 3.0,
        kerf_mm: 0.2,
        finger_width_mm: 10.0,
        hinged_lid: true,
        pin_diameter_mm: 3.0,
        finger_pull: false,
        labels: true,
    }
}

#[test]
fn box_panels_are_orthogonal_with_odd_finger_counts() {
    let layout = generate_box(&scenario_params());
    assert_eq!(layout.panels.len(), 6);
    assert!(layout.warnings.is_empty());

    // 100 mm edge at 10 mm fingers rounds to 10, forced odd to 11.
    assert_eq!(panelkit::finger_count(100.0, 10.0), 11);

    for panel in &layout.panels {
        for pair in panel.outline.points.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dy = (pair[1].y - pair[0].y).abs();
            assert!(
                dx < 1e-9 || dy < 1e-9,
                "diagonal segment on {} panel",
                panel.role.name()
            );
        }
    }
}

#[test]
fn hinge_pins_only_on_side_panels() {
    let layout = generate_box(&scenario_params());
    for panel in &layout.panels {
        let expected = match panel.role {
            PanelRole::Left | PanelRole::Right => 1,
            _ => 0,
        };
        assert_eq!(panel.holes.len(), expected, "{} panel", panel.role.name());
        for hole in &panel.holes {
            assert!(hole.cx - hole.r > 0.0 && hole.cx + hole.r < panel.width);
            assert!(hole.cy - hole.r > 0.0 && hole.cy + hole.r < panel.height);
        }
    }
}

#[test]
fn panels_nest_onto_one_sheet_without_overlap() {
    let layout = generate_box(&scenario_params());
    let parts: Vec<Part> = layout
        .panels
        .iter()
        .map(|p| Part::new(p.role.name(), p.outline.clone()))
        .collect();
    let sheet = SheetSpec::default();
    let cancel = AtomicBool::new(false);
    let result = nest_with_cancel(&sheet, &parts, &cancel);

    assert!(result.complete);
    assert!(result.overflow.is_empty());
    assert_eq!(result.placed.len(), 6);
    for (i, a) in result.placed.iter().enumerate() {
        for b in &result.placed[i + 1..] {
            assert!(!panelkit::polygons_intersect(
                &a.polygon_world,
                &b.polygon_world
            ));
        }
    }
}

#[test]
fn exported_svg_uses_only_straight_path_commands() {
    let layout = generate_box(&scenario_params());
    for panel in &layout.panels {
        let d = to_path_string(&panel.outline);
        assert!(d.starts_with('M') && d.ends_with('Z'));
        assert!(d
            .chars()
            .all(|c| !c.is_ascii_alphabetic() || matches!(c, 'M' | 'L' | 'Z')));
    }
}

#[test]
fn svg_layout_written_to_disk() {
    let layout = generate_box(&scenario_params());
    let mut cut = SvgLayer::new("cut", "#000000");
    for panel in &layout.panels {
        cut.polygons.push(panel.outline.clone());
        cut.circles.extend(panel.holes.iter().copied());
    }
    let svg = SvgExporter::new().render(&[cut]).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("mm\""));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.svg");
    std::fs::write(&path, &svg).unwrap();
    let read_back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_back, svg);
}
