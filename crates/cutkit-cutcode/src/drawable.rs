//! Preview shapes for cut objects.

use std::fmt::Write;

use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};

/// How a cut object looks in a preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Drawable {
    /// Vector cut as SVG path data
    Path { d: String },
    /// Raster cut as the scene rectangle its image covers
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Drawable {
    pub fn path(path: &BezPath) -> Self {
        Self::Path { d: path.to_svg() }
    }

    pub fn image(bounds: Rect) -> Self {
        Self::Image {
            x: bounds.x0,
            y: bounds.y0,
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    /// One SVG element for this drawable.
    pub fn to_svg_element(&self) -> String {
        match self {
            Self::Path { d } => format!(r#"<path d="{d}" fill="none" stroke="black"/>"#),
            Self::Image {
                x,
                y,
                width,
                height,
            } => format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="gray"/>"#
            ),
        }
    }
}

/// Wrap drawables into a standalone SVG document.
pub fn svg_document<'a>(drawables: impl IntoIterator<Item = &'a Drawable>) -> String {
    let mut svg = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg">"#);
    svg.push('\n');
    for drawable in drawables {
        let _ = writeln!(svg, "  {}", drawable.to_svg_element());
    }
    svg.push_str("</svg>\n");
    svg
}
