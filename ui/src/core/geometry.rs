//! Geometry primitives: points, boxes and polar conversion.

/// A point in SVG user space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a rendered box, in layout units (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub width: f64,
    pub height: f64,
}

impl LayoutBox {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Pixel dimensions of this box rasterized at `scale`, rounded.
    pub fn scaled_pixels(&self, scale: f64) -> (u32, u32) {
        let px = |v: f64| (v * scale).round().max(1.0) as u32;
        (px(self.width), px(self.height))
    }
}

/// `x = cx + r·cos(θ)`, `y = cy + r·sin(θ)`; total over all real inputs.
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_rad: f64) -> Point {
    Point {
        x: cx + radius * angle_rad.cos(),
        y: cy + radius * angle_rad.sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_radius_is_center() {
        let p = polar_to_cartesian(10.0, 20.0, 0.0, 1.234);
        assert_eq!(p, Point::new(10.0, 20.0));
    }

    #[test]
    fn minus_half_pi_points_up() {
        let p = polar_to_cartesian(0.0, 0.0, 5.0, -FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y + 5.0).abs() < 1e-12);
    }

    #[test]
    fn layout_box_scales_and_rounds() {
        let frame = LayoutBox::new(940.0, 1012.5);
        assert_eq!(frame.scaled_pixels(2.0), (1880, 2025));
        assert_eq!(frame.scaled_pixels(1.0), (940, 1013));
        assert!(LayoutBox::new(0.0, 10.0).is_empty());
        assert!(LayoutBox::new(f64::NAN, 10.0).is_empty());
        assert!(!frame.is_empty());
    }

    #[test]
    fn pi_points_left() {
        let p = polar_to_cartesian(3.0, 3.0, 2.0, PI);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 3.0).abs() < 1e-12);
    }
}
