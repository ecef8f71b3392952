//! SVG layout export.
//!
//! Serializes generated geometry into a single SVG document sized in
//! millimeters. Outline path data is restricted to move/line/close commands;
//! pin holes and cutouts are emitted as circle elements, labels as text on
//! the engrave layer.

use panelkit_core::{BBox, Circle, EngineError, EngineResult, Polygon};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::pathdata::to_path_string;

/// A text label placed on the engrave layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvgLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size_mm: f64,
}

/// One named export layer (typically `cut` or `engrave`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SvgLayer {
    pub name: String,
    pub stroke: String,
    pub polygons: Vec<Polygon>,
    pub circles: Vec<Circle>,
    pub labels: Vec<SvgLabel>,
}

impl SvgLayer {
    pub fn new(name: &str, stroke: &str) -> Self {
        Self {
            name: name.to_string(),
            stroke: stroke.to_string(),
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.circles.is_empty() && self.labels.is_empty()
    }
}

/// Serializes layers of polygons, circles, and labels into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    /// Stroke width for cut lines, in millimeters.
    pub stroke_width: f64,
    /// Whitespace margin added around the content bounds.
    pub margin: f64,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self {
            stroke_width: 0.1,
            margin: 5.0,
        }
    }
}

impl SvgExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the layers into one SVG document string. Fails if no layer
    /// contains any geometry at all.
    pub fn render(&self, layers: &[SvgLayer]) -> EngineResult<String> {
        let bounds = self
            .content_bounds(layers)
            .ok_or_else(|| EngineError::ExportFailed("no geometry in any layer".to_string()))?;
        let bounds = bounds.padded(self.margin);

        let width = bounds.width();
        let height = bounds.height();
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}mm\" height=\"{:.2}mm\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\">\n",
            width, height, bounds.min_x, bounds.min_y, width, height
        ));

        for layer in layers {
            if layer.is_empty() {
                continue;
            }
            svg.push_str(&format!(
                "  <g id=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\">\n",
                layer.name, layer.stroke, self.stroke_width
            ));
            for polygon in &layer.polygons {
                let d = to_path_string(polygon);
                if d.is_empty() {
                    continue;
                }
                svg.push_str(&format!("    <path d=\"{}\"/>\n", d));
            }
            for circle in &layer.circles {
                svg.push_str(&format!(
                    "    <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\"/>\n",
                    circle.cx, circle.cy, circle.r
                ));
            }
            for label in &layer.labels {
                svg.push_str(&format!(
                    "    <text x=\"{:.3}\" y=\"{:.3}\" font-size=\"{:.2}\" fill=\"{}\" stroke=\"none\">{}</text>\n",
                    label.x,
                    label.y,
                    label.size_mm,
                    layer.stroke,
                    escape_text(&label.text)
                ));
            }
            svg.push_str("  </g>\n");
        }

        svg.push_str("</svg>\n");
        info!(
            layers = layers.len(),
            width_mm = width,
            height_mm = height,
            "rendered SVG layout"
        );
        Ok(svg)
    }

    fn content_bounds(&self, layers: &[SvgLayer]) -> Option<BBox> {
        let mut bounds: Option<BBox> = None;
        let mut merge = |bb: BBox| {
            bounds = Some(match bounds {
                None => bb,
                Some(acc) => BBox::new(
                    acc.min_x.min(bb.min_x),
                    acc.min_y.min(bb.min_y),
                    acc.max_x.max(bb.max_x),
                    acc.max_y.max(bb.max_y),
                ),
            });
        };

        for layer in layers {
            for polygon in &layer.polygons {
                if !polygon.is_degenerate() {
                    merge(polygon.bbox());
                }
            }
            for c in &layer.circles {
                merge(BBox::new(c.cx - c.r, c.cy - c.r, c.cx + c.r, c.cy + c.r));
            }
            for label in &layer.labels {
                merge(BBox::new(label.x, label.y, label.x, label.y));
            }
        }
        bounds
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_core::Point;

    fn cut_layer() -> SvgLayer {
        let mut layer = SvgLayer::new("cut", "#000000");
        layer.polygons.push(Polygon::rect(0.0, 0.0, 100.0, 50.0));
        layer.circles.push(Circle::new(10.0, 10.0, 2.0));
        layer
    }

    #[test]
    fn test_render_document_shape() {
        let svg = SvgExporter::new().render(&[cut_layer()]).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("width=\"110.00mm\""));
        assert!(svg.contains("height=\"60.00mm\""));
        assert!(svg.contains("<g id=\"cut\""));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_render_has_no_curve_commands() {
        let svg = SvgExporter::new().render(&[cut_layer()]).unwrap();
        for d in svg.split("d=\"").skip(1) {
            let data = d.split('"').next().unwrap();
            assert!(data
                .chars()
                .all(|c| !c.is_ascii_alphabetic() || "MLZ".contains(c)));
        }
    }

    #[test]
    fn test_render_empty_fails() {
        let err = SvgExporter::new().render(&[]).unwrap_err();
        assert!(matches!(err, EngineError::ExportFailed(_)));
    }

    #[test]
    fn test_labels_on_engrave_layer() {
        let mut engrave = SvgLayer::new("engrave", "#0000ff");
        engrave.labels.push(SvgLabel {
            text: "front <1>".to_string(),
            x: 5.0,
            y: 5.0,
            size_mm: 4.0,
        });
        engrave
            .polygons
            .push(Polygon::new(vec![Point::new(0.0, 0.0); 3]));
        let svg = SvgExporter::new().render(&[engrave]).unwrap();
        assert!(svg.contains("front &lt;1&gt;"));
    }
}
