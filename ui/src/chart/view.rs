use dioxus::prelude::*;

use super::radar::RadarDescription;
use super::svg::points_attr;
use super::RadarStyle;

#[component]
pub fn RadarChart(description: RadarDescription, font_family: String) -> Element {
    let width = description.width;
    let height = description.height;
    let view_box = format!("0 0 {width} {height}");
    let polygon = points_attr(&description.polygon);

    rsx! {
        svg {
            class: "radar-chart",
            xmlns: "http://www.w3.org/2000/svg",
            width: "{width}",
            height: "{height}",
            view_box: "{view_box}",
            style: "display:block",

            for ring in description.grid.iter() {
                polygon {
                    key: "grid-{ring.level}",
                    points: points_attr(&ring.vertices),
                    fill: "none",
                    stroke: RadarStyle::GRID_STROKE,
                    stroke_width: "1",
                }
            }

            for (i, axis) in description.axes.iter().enumerate() {
                line {
                    key: "axis-{i}",
                    x1: axis.from.x,
                    y1: axis.from.y,
                    x2: axis.to.x,
                    y2: axis.to.y,
                    stroke: RadarStyle::AXIS_STROKE,
                    stroke_width: "1",
                }
            }

            for (i, label) in description.labels.iter().enumerate() {
                text {
                    key: "label-{i}",
                    x: label.position.x,
                    y: label.position.y,
                    font_family: "{font_family}",
                    font_size: RadarStyle::LABEL_SIZE,
                    fill: RadarStyle::LABEL_FILL,
                    text_anchor: label.anchor.as_str(),
                    dominant_baseline: "middle",
                    "{label.text}"
                }
            }

            polygon {
                class: "radar-chart__values",
                points: "{polygon}",
                fill: RadarStyle::POLYGON_FILL,
                stroke: RadarStyle::POLYGON_STROKE,
                stroke_width: RadarStyle::POLYGON_STROKE_WIDTH,
            }

            for (i, dot) in description.dots.iter().enumerate() {
                circle {
                    key: "dot-{i}",
                    cx: dot.center.x,
                    cy: dot.center.y,
                    r: dot.radius,
                    fill: RadarStyle::DOT_FILL,
                }
            }

            for (i, value) in description.value_labels.iter().enumerate() {
                text {
                    key: "value-{i}",
                    x: value.position.x,
                    y: value.position.y,
                    font_family: "{font_family}",
                    font_size: RadarStyle::VALUE_SIZE,
                    fill: RadarStyle::LABEL_FILL,
                    text_anchor: value.anchor.as_str(),
                    dominant_baseline: "middle",
                    "{value.text}"
                }
            }
        }
    }
}
