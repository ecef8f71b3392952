//! Demo binary: generate a hinged finger-joint box, nest its panels onto a
//! sheet, and write the layout as an SVG file.

use std::env;
use std::fs;

use anyhow::Context;
use panelkit::{
    generate_box, init_logging, BoxParams, Circle, Part, Polygon, SheetSpec, SvgExporter,
    SvgLabel, SvgLayer, BUILD_DATE, VERSION,
};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("panelkit {} (built {})", VERSION, BUILD_DATE);

    let output = env::args().nth(1).unwrap_or_else(|| "box-layout.svg".to_string());

    let params = BoxParams::default();
    let layout = generate_box(&params);
    for warning in &layout.warnings {
        warn!("{}", warning);
    }

    let sheet = SheetSpec::default();
    let parts: Vec<Part> = layout
        .panels
        .iter()
        .enumerate()
        .map(|(i, panel)| Part::new(format!("{}-{}", panel.role.name(), i), panel.outline.clone()))
        .collect();
    let result = panelkit::nest::nest(&sheet, &parts);
    if !result.overflow.is_empty() {
        warn!(
            overflow = result.overflow.len(),
            "some panels did not fit the sheet"
        );
    }
    info!(
        placed = result.placed.len(),
        utilization = format!("{:.1}%", result.utilization(&sheet) * 100.0),
        "nested panels"
    );

    // Carry holes and labels along with each placement.
    let mut cut = SvgLayer::new("cut", "#000000");
    let mut engrave = SvgLayer::new("engrave", "#cc0000");
    for placed in &result.placed {
        cut.polygons.push(placed.polygon_world.clone());

        let index: usize = placed
            .part_id
            .rsplit('-')
            .next()
            .and_then(|s| s.parse().ok())
            .context("panel part ids carry their index")?;
        let panel = &layout.panels[index];
        let bbox = panel.outline.bbox();
        let dx = placed.x - bbox.min_x;
        let dy = placed.y - bbox.min_y;
        for hole in &panel.holes {
            cut.circles
                .push(Circle::new(hole.cx + dx, hole.cy + dy, hole.r));
        }
        if let Some(label) = &panel.label {
            engrave.labels.push(SvgLabel {
                text: label.text.clone(),
                x: label.x + dx,
                y: label.y + dy,
                size_mm: label.size_mm,
            });
        }
    }
    // Sheet outline for reference.
    cut.polygons
        .push(Polygon::rect(0.0, 0.0, sheet.width_mm, sheet.height_mm));

    let svg = SvgExporter::new().render(&[cut, engrave])?;
    fs::write(&output, svg).with_context(|| format!("writing {}", output))?;
    info!(file = %output, "layout written");
    Ok(())
}
