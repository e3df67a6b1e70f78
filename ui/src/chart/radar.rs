//! Radar chart geometry.
//!
//! [`build_radar_chart`] turns a fixed number of values in `[0, 100]` into a
//! [`RadarDescription`]: every primitive the chart is drawn from, already
//! positioned. Nothing here knows about SVG or the DOM; see `chart::svg`
//! and `chart::view` for the two places a description gets materialised.
//!
//! Axis `i` of `N` sits at `-90° + i·360°/N`, so axis 0 always points up.
//! With `N = 6` that is the 60° hexagon the profile card uses.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::core::attributes::{Stats, STAT_COUNT, STAT_LABELS};
use crate::core::geometry::{polar_to_cartesian, Point};

/// Fixed geometry knobs. The defaults reproduce the profile card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarLayout {
    pub width: f64,
    pub height: f64,
    /// Gap between the outer ring and the shorter edge of the box.
    pub margin: f64,
    /// Number of concentric grid rings.
    pub levels: usize,
    /// Distance of axis labels beyond the outer ring.
    pub label_offset: f64,
    pub dot_radius: f64,
    /// Horizontal distance between a value dot and its numeric label.
    pub value_label_offset: f64,
}

impl RadarLayout {
    pub const PROFILE_WIDTH: f64 = 420.0;
    pub const PROFILE_HEIGHT: f64 = 320.0;

    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: 50.0,
            levels: 5,
            label_offset: 28.0,
            dot_radius: 5.0,
            value_label_offset: 14.0,
        }
    }

    /// The 420 × 320 chart embedded in the profile card.
    pub const fn profile() -> Self {
        Self::new(Self::PROFILE_WIDTH, Self::PROFILE_HEIGHT)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Outer ring radius; never negative.
    pub fn radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - self.margin).max(0.0)
    }
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self::profile()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRing {
    /// 1-based; `levels` is the outermost ring.
    pub level: usize,
    pub radius: f64,
    pub vertices: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub angle: f64,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartText {
    pub position: Point,
    pub text: String,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDot {
    pub center: Point,
    pub radius: f64,
}

/// Every primitive of one radar chart, in paint order:
/// grid, axes, axis labels, value polygon, dots, value labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarDescription {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    /// Outer ring first.
    pub grid: Vec<GridRing>,
    pub axes: Vec<AxisLine>,
    pub labels: Vec<ChartText>,
    /// Value points in axis order; the polygon closes from the last back to the first.
    pub polygon: Vec<Point>,
    pub dots: Vec<ValueDot>,
    pub value_labels: Vec<ChartText>,
}

/// Angle of axis `index` out of `count`, in radians.
pub fn axis_angle(index: usize, count: usize) -> f64 {
    TAU * index as f64 / count as f64 - FRAC_PI_2
}

pub fn build_radar_chart<const N: usize>(
    values: &[f64; N],
    labels: &[&str; N],
    layout: &RadarLayout,
) -> RadarDescription {
    let center = layout.center();
    let radius = layout.radius();
    let (cx, cy) = (center.x, center.y);

    let levels = layout.levels.max(1);
    let grid = (1..=levels)
        .rev()
        .map(|level| {
            let ring_radius = radius * level as f64 / levels as f64;
            GridRing {
                level,
                radius: ring_radius,
                vertices: (0..N)
                    .map(|i| polar_to_cartesian(cx, cy, ring_radius, axis_angle(i, N)))
                    .collect(),
            }
        })
        .collect();

    let mut axes = Vec::with_capacity(N);
    let mut axis_labels = Vec::with_capacity(N);
    let mut polygon = Vec::with_capacity(N);
    let mut dots = Vec::with_capacity(N);
    let mut value_labels = Vec::with_capacity(N);

    for (i, (&raw, &label)) in values.iter().zip(labels.iter()).enumerate() {
        let angle = axis_angle(i, N);
        let value = if raw.is_nan() { 0.0 } else { raw };

        axes.push(AxisLine {
            angle,
            from: center,
            to: polar_to_cartesian(cx, cy, radius, angle),
        });
        axis_labels.push(ChartText {
            position: polar_to_cartesian(cx, cy, radius + layout.label_offset, angle),
            text: label.to_string(),
            anchor: TextAnchor::Middle,
        });

        let point = polar_to_cartesian(cx, cy, radius * (value / 100.0), angle);
        polygon.push(point);
        dots.push(ValueDot {
            center: point,
            radius: layout.dot_radius,
        });

        // Right of (or on) the center line: label to the right, start-anchored.
        let (dx, anchor) = if point.x >= cx {
            (layout.value_label_offset, TextAnchor::Start)
        } else {
            (-layout.value_label_offset, TextAnchor::End)
        };
        value_labels.push(ChartText {
            position: Point::new(point.x + dx, point.y),
            text: format!("{}", value.round() as i64),
            anchor,
        });
    }

    RadarDescription {
        width: layout.width,
        height: layout.height,
        center,
        radius,
        grid,
        axes,
        labels: axis_labels,
        polygon,
        dots,
        value_labels,
    }
}

/// The profile card's chart for a stat block.
pub fn build_stats_chart(stats: &Stats, layout: &RadarLayout) -> RadarDescription {
    let values: [f64; STAT_COUNT] = stats.as_f64();
    build_radar_chart(&values, &STAT_LABELS, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::StatKind;

    const EPS: f64 = 1e-9;

    fn chart(values: [f64; 6]) -> RadarDescription {
        build_radar_chart(&values, &STAT_LABELS, &RadarLayout::profile())
    }

    #[test]
    fn profile_layout_constants() {
        let layout = RadarLayout::profile();
        assert_eq!(layout.center(), Point::new(210.0, 160.0));
        assert_eq!(layout.radius(), 110.0);
    }

    #[test]
    fn produces_six_of_everything() {
        let desc = chart([60.0; 6]);
        assert_eq!(desc.axes.len(), 6);
        assert_eq!(desc.labels.len(), 6);
        assert_eq!(desc.dots.len(), 6);
        assert_eq!(desc.polygon.len(), 6);
        assert_eq!(desc.value_labels.len(), 6);
        assert_eq!(desc.grid.len(), 5);
        assert!(desc.grid.iter().all(|ring| ring.vertices.len() == 6));
    }

    #[test]
    fn grid_is_drawn_outer_to_inner() {
        let desc = chart([60.0; 6]);
        let radii: Vec<f64> = desc.grid.iter().map(|ring| ring.radius).collect();
        assert_eq!(radii, vec![110.0, 88.0, 66.0, 44.0, 22.0]);
        assert_eq!(desc.grid[0].level, 5);
    }

    #[test]
    fn axes_are_sixty_degrees_apart_starting_up() {
        let desc = chart([60.0; 6]);
        for (i, axis) in desc.axes.iter().enumerate() {
            let expected = (-90.0 + 60.0 * i as f64).to_radians();
            assert!((axis.angle - expected).abs() < EPS, "axis {i}");
            assert_eq!(axis.from, desc.center);
            assert!((axis.to.distance_to(desc.center) - desc.radius).abs() < EPS);
        }
        let top = desc.axes[0].to;
        assert!((top.x - desc.center.x).abs() < EPS);
        assert!(top.y < desc.center.y);
    }

    #[test]
    fn labels_sit_beyond_the_outer_ring() {
        let desc = chart([60.0; 6]);
        for (label, name) in desc.labels.iter().zip(STAT_LABELS) {
            assert_eq!(label.text, name);
            assert_eq!(label.anchor, TextAnchor::Middle);
            let dist = label.position.distance_to(desc.center);
            assert!((dist - (desc.radius + 28.0)).abs() < EPS);
        }
    }

    #[test]
    fn value_points_scale_with_values() {
        let desc = chart([100.0, 0.0, 50.0, 75.0, 30.0, 60.0]);
        let dist: Vec<f64> = desc
            .polygon
            .iter()
            .map(|p| p.distance_to(desc.center))
            .collect();
        let expected = [110.0, 0.0, 55.0, 82.5, 33.0, 66.0];
        for (got, want) in dist.iter().zip(expected) {
            assert!((got - want).abs() < EPS);
        }
        assert!(desc.polygon[0].distance_to(desc.axes[0].to) < EPS);
        assert!(desc.polygon[1].distance_to(desc.center) < EPS);
    }

    #[test]
    fn raising_one_value_moves_only_that_point_outwards() {
        let base = [40.0, 40.0, 40.0, 40.0, 40.0, 40.0];
        for axis in 0..6 {
            let mut raised = base;
            raised[axis] = 41.0;
            let before = chart(base);
            let after = chart(raised);
            for i in 0..6 {
                let d0 = before.polygon[i].distance_to(before.center);
                let d1 = after.polygon[i].distance_to(after.center);
                if i == axis {
                    assert!(d1 > d0, "axis {axis} did not move out");
                } else {
                    assert_eq!(before.polygon[i], after.polygon[i]);
                }
            }
        }
    }

    #[test]
    fn value_labels_never_sit_on_the_dot() {
        let desc = chart([100.0, 80.0, 60.0, 40.0, 20.0, 10.0]);
        for ((label, dot), point) in desc
            .value_labels
            .iter()
            .zip(&desc.dots)
            .zip(&desc.polygon)
        {
            assert!((label.position.x - point.x).abs() > dot.radius);
            match label.anchor {
                TextAnchor::Start => {
                    assert!(point.x >= desc.center.x);
                    assert!(label.position.x > point.x);
                }
                TextAnchor::End => {
                    assert!(point.x < desc.center.x);
                    assert!(label.position.x < point.x);
                }
                TextAnchor::Middle => panic!("value labels are side-anchored"),
            }
        }
    }

    #[test]
    fn value_labels_are_rounded_integers() {
        let desc = chart([99.6, 0.0, 12.4, 50.5, 1.0, 100.0]);
        let texts: Vec<&str> = desc.value_labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["100", "0", "12", "51", "1", "100"]);
    }

    #[test]
    fn stats_chart_uses_fixed_labels() {
        let mut stats = Stats::default();
        stats.set(StatKind::Attack, 90.0);
        let desc = build_stats_chart(&stats, &RadarLayout::profile());
        assert_eq!(desc.labels[4].text, "Attack");
        assert_eq!(desc.value_labels[4].text, "90");
    }

    #[test]
    fn square_generalisation_keeps_axis_zero_vertical() {
        let desc = build_radar_chart(&[50.0; 4], &["a", "b", "c", "d"], &RadarLayout::new(200.0, 200.0));
        assert_eq!(desc.axes.len(), 4);
        assert!((desc.axes[1].angle - 0.0).abs() < EPS);
        assert!((desc.axes[0].to.x - 100.0).abs() < EPS);
    }
}
