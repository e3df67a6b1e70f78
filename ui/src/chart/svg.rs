//! SVG markup for a [`RadarDescription`].

use std::fmt::Write as _;

use super::radar::RadarDescription;
use super::RadarStyle;
use crate::core::format::{escape_xml, format_coord};
use crate::core::geometry::Point;

/// `points` attribute value: `"x1,y1 x2,y2 …"`.
pub fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", format_coord(p.x), format_coord(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Chart primitives as a `<g>` element placed at `(x, y)`.
///
/// Text uses `dy` rather than `dominant-baseline` so rasterizers without
/// baseline support still centre labels vertically.
pub fn radar_group(desc: &RadarDescription, x: f64, y: f64, font_family: &str) -> String {
    let font = escape_xml(font_family);
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<g class="radar" transform="translate({},{})">"#,
        format_coord(x),
        format_coord(y)
    );

    for ring in &desc.grid {
        let _ = writeln!(
            out,
            r#"<polygon points="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            points_attr(&ring.vertices),
            RadarStyle::GRID_STROKE
        );
    }

    for axis in &desc.axes {
        let _ = writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            format_coord(axis.from.x),
            format_coord(axis.from.y),
            format_coord(axis.to.x),
            format_coord(axis.to.y),
            RadarStyle::AXIS_STROKE
        );
    }

    for label in &desc.labels {
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" dy="0.35em" font-family="{font}" font-size="{}" fill="{}" text-anchor="{}">{}</text>"#,
            format_coord(label.position.x),
            format_coord(label.position.y),
            RadarStyle::LABEL_SIZE,
            RadarStyle::LABEL_FILL,
            label.anchor.as_str(),
            escape_xml(&label.text)
        );
    }

    let _ = writeln!(
        out,
        r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        points_attr(&desc.polygon),
        RadarStyle::POLYGON_FILL,
        RadarStyle::POLYGON_STROKE,
        RadarStyle::POLYGON_STROKE_WIDTH
    );

    for dot in &desc.dots {
        let _ = writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            format_coord(dot.center.x),
            format_coord(dot.center.y),
            format_coord(dot.radius),
            RadarStyle::DOT_FILL
        );
    }

    for value in &desc.value_labels {
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" dy="0.35em" font-family="{font}" font-size="{}" fill="{}" text-anchor="{}">{}</text>"#,
            format_coord(value.position.x),
            format_coord(value.position.y),
            RadarStyle::VALUE_SIZE,
            RadarStyle::LABEL_FILL,
            value.anchor.as_str(),
            escape_xml(&value.text)
        );
    }

    out.push_str("</g>\n");
    out
}
