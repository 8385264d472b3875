//! Drawing primitives composited onto a [`PixelBuffer`] with the "over" operator
//!
//! Coverage is binary: a pixel at integer coordinates `(x, y)` is either inside a
//! shape or not. Every covered pixel goes through [`blend_over`], so the order in
//! which shapes are drawn decides what ends up on top.

use crate::pixel_buffer::{Color, PixelBuffer};
use image::Rgba;

#[inline]
fn div255(v: u32) -> u8 {
    ((v + 127) / 255) as u8
}

/// Blend `src` over `dst` in place.
///
/// Color channels: `src·sa/255 + dst·(255-sa)/255`.
/// Alpha: `sa + da·(255-sa)/255`.
#[inline]
pub fn blend_over(dst: &mut Rgba<u8>, src: Color) {
    let sa = src.a as u32;
    let inv = 255 - sa;
    let [dr, dg, db, da] = dst.0;
    dst.0 = [
        div255(src.r as u32 * sa + dr as u32 * inv),
        div255(src.g as u32 * sa + dg as u32 * inv),
        div255(src.b as u32 * sa + db as u32 * inv),
        (sa + div255(da as u32 * inv) as u32).min(255) as u8,
    ];
}

/// Transient shape descriptor. Rectangle and ellipse bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    RoundedRect {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        radius: f32,
    },
    Ellipse {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    },
    LineSegment {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
    },
}

impl Shape {
    pub fn rounded_rect(x0: f32, y0: f32, x1: f32, y1: f32, radius: f32) -> Self {
        Shape::RoundedRect {
            x0,
            y0,
            x1,
            y1,
            radius,
        }
    }

    pub fn ellipse(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Shape::Ellipse { x0, y0, x1, y1 }
    }

    pub fn line(from: (f32, f32), to: (f32, f32), width: f32) -> Self {
        Shape::LineSegment { from, to, width }
    }

    /// Whether the pixel at `(x, y)` is covered.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match *self {
            Shape::RoundedRect {
                x0,
                y0,
                x1,
                y1,
                radius,
            } => rounded_rect_contains(x0, y0, x1, y1, radius, x, y),
            Shape::Ellipse { x0, y0, x1, y1 } => {
                let rx = (x1 - x0) / 2.0;
                let ry = (y1 - y0) / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let nx = (x - (x0 + rx)) / rx;
                let ny = (y - (y0 + ry)) / ry;
                nx * nx + ny * ny <= 1.0
            }
            Shape::LineSegment { from, to, width } => {
                let (dx, dy) = (to.0 - from.0, to.1 - from.1);
                let len = (dx * dx + dy * dy).sqrt();
                // A zero-length segment still draws its square cap.
                let (ux, uy) = if len > 0.0 {
                    (dx / len, dy / len)
                } else {
                    (1.0, 0.0)
                };
                let (px, py) = (x - from.0, y - from.1);
                let along = px * ux + py * uy;
                let across = py * ux - px * uy;
                let half = width / 2.0;
                along >= -half && along <= len + half && across.abs() <= half
            }
        }
    }

    /// Inclusive pixel bounds `(min_x, min_y, max_x, max_y)` that may be covered.
    fn bounds(&self) -> (f32, f32, f32, f32) {
        match *self {
            Shape::RoundedRect { x0, y0, x1, y1, .. } | Shape::Ellipse { x0, y0, x1, y1 } => {
                (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
            }
            Shape::LineSegment { from, to, width } => {
                // Half the width covers both the perpendicular extent and the caps,
                // scaled by sqrt(2) for the cap corners.
                let pad = width * std::f32::consts::SQRT_2 / 2.0;
                (
                    from.0.min(to.0) - pad,
                    from.1.min(to.1) - pad,
                    from.0.max(to.0) + pad,
                    from.1.max(to.1) + pad,
                )
            }
        }
    }
}

fn rounded_rect_contains(
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    radius: f32,
    x: f32,
    y: f32,
) -> bool {
    if x < x0 || x > x1 || y < y0 || y > y1 {
        return false;
    }
    let r = radius.max(0.0).min((x1 - x0).min(y1 - y0) / 2.0);
    if r <= 0.0 {
        return true;
    }

    let cx = if x < x0 + r {
        x0 + r
    } else if x > x1 - r {
        x1 - r
    } else {
        return true;
    };
    let cy = if y < y0 + r {
        y0 + r
    } else if y > y1 - r {
        y1 - r
    } else {
        return true;
    };

    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

/// Composite `color` onto every pixel of `buf` covered by `shape`.
pub fn fill_shape(buf: &mut PixelBuffer, shape: &Shape, color: Color) {
    let size = buf.size();
    let (min_x, min_y, max_x, max_y) = shape.bounds();
    let Some((x_start, x_end)) = clamp_span(min_x, max_x, size) else {
        return;
    };
    let Some((y_start, y_end)) = clamp_span(min_y, max_y, size) else {
        return;
    };

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            if shape.contains(x as f32, y as f32) {
                blend_over(buf.pixel_mut(x, y), color);
            }
        }
    }
}

fn clamp_span(min: f32, max: f32, size: u32) -> Option<(u32, u32)> {
    let last = (size - 1) as f32;
    if max < 0.0 || min > last {
        return None;
    }
    Some((min.max(0.0).floor() as u32, max.min(last).ceil() as u32))
}

pub fn fill_rounded_rect(
    buf: &mut PixelBuffer,
    (x0, y0, x1, y1): (f32, f32, f32, f32),
    radius: f32,
    color: Color,
) {
    fill_shape(buf, &Shape::rounded_rect(x0, y0, x1, y1, radius), color);
}

pub fn fill_ellipse(buf: &mut PixelBuffer, (x0, y0, x1, y1): (f32, f32, f32, f32), color: Color) {
    fill_shape(buf, &Shape::ellipse(x0, y0, x1, y1), color);
}

pub fn stroke_line(
    buf: &mut PixelBuffer,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Color,
) {
    fill_shape(buf, &Shape::line(from, to, width), color);
}

/// Vertical linear gradient from `start` (row 0) to `end` (row S-1).
///
/// Each row is a single opaque color: `round(start·(1-t) + end·t)` with `t = y/(S-1)`.
pub fn fill_vertical_gradient(buf: &mut PixelBuffer, start: Color, end: Color) {
    let size = buf.size();
    let denom = size.saturating_sub(1).max(1) as f32;
    let lerp = |a: u8, b: u8, t: f32| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;

    for y in 0..size {
        let t = y as f32 / denom;
        let row = Color::rgb(
            lerp(start.r, end.r, t),
            lerp(start.g, end.g, t),
            lerp(start.b, end.b, t),
        );
        for x in 0..size {
            blend_over(buf.pixel_mut(x, y), row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_buffer::new_buffer;

    #[test]
    fn test_opaque_source_replaces_destination() {
        let mut px = Rgba([10, 20, 30, 40]);
        blend_over(&mut px, Color::rgba(200, 150, 100, 255));
        assert_eq!(px, Rgba([200, 150, 100, 255]));
    }

    #[test]
    fn test_transparent_source_is_noop() {
        for dst in [Rgba([10, 20, 30, 40]), Rgba([0, 0, 0, 0]), Rgba([255, 1, 128, 255])] {
            let mut px = dst;
            blend_over(&mut px, Color::rgba(200, 150, 100, 0));
            assert_eq!(px, dst);
        }
    }

    #[test]
    fn test_half_alpha_blend() {
        let mut px = Rgba([255, 255, 255, 255]);
        blend_over(&mut px, Color::rgba(0, 0, 0, 60));
        // 255·195/255 = 195
        assert_eq!(px, Rgba([195, 195, 195, 255]));

        let mut empty = Rgba([0, 0, 0, 0]);
        blend_over(&mut empty, Color::rgba(100, 100, 100, 180));
        assert_eq!(empty, Rgba([71, 71, 71, 180]));
    }

    #[test]
    fn test_gradient_endpoints() {
        let start = Color::rgb(52, 152, 219);
        let end = Color::rgb(0, 150, 136);
        for size in [2, 10, 1024] {
            let mut buf = new_buffer(size).unwrap();
            fill_vertical_gradient(&mut buf, start, end);
            for x in [0, size / 2, size - 1] {
                assert_eq!(buf.get(x, 0), start);
                assert_eq!(buf.get(x, size - 1), end);
            }
        }
    }

    #[test]
    fn test_gradient_rows_are_uniform_and_opaque() {
        let mut buf = new_buffer(16).unwrap();
        fill_vertical_gradient(&mut buf, Color::rgb(0, 0, 0), Color::rgb(255, 255, 255));
        for y in 0..16 {
            let first = buf.get(0, y);
            assert_eq!(first.a, 255);
            assert!((0..16).all(|x| buf.get(x, y) == first));
        }
        assert_eq!(buf.get(0, 5).r, 85);
    }

    #[test]
    fn test_single_pixel_gradient_uses_start() {
        let mut buf = new_buffer(1).unwrap();
        fill_vertical_gradient(&mut buf, Color::rgb(1, 2, 3), Color::rgb(4, 5, 6));
        assert_eq!(buf.get(0, 0), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_rounded_rect_corner_pixel() {
        let rounded = Shape::rounded_rect(10.0, 10.0, 50.0, 40.0, 8.0);
        assert!(!rounded.contains(10.0, 10.0));
        assert!(!rounded.contains(50.0, 40.0));
        assert!(rounded.contains(18.0, 10.0));
        assert!(rounded.contains(10.0, 18.0));
        assert!(rounded.contains(30.0, 25.0));

        let square = Shape::rounded_rect(10.0, 10.0, 50.0, 40.0, 0.0);
        assert!(square.contains(10.0, 10.0));
        assert!(square.contains(50.0, 40.0));
        assert!(!square.contains(9.0, 10.0));
        assert!(!square.contains(50.0, 41.0));
    }

    #[test]
    fn test_rounded_rect_radius_is_clamped() {
        // Radius clamps to half the shorter side (5), so this is a 10×10 disk-like rect.
        let shape = Shape::rounded_rect(0.0, 0.0, 10.0, 10.0, 100.0);
        assert!(shape.contains(5.0, 5.0));
        assert!(shape.contains(5.0, 0.0));
        assert!(!shape.contains(1.0, 1.0));
    }

    #[test]
    fn test_fill_rounded_rect_blends() {
        let mut buf = new_buffer(32).unwrap();
        fill_rounded_rect(&mut buf, (4.0, 4.0, 27.0, 27.0), 6.0, Color::WHITE);
        assert_eq!(buf.get(16, 16), Color::WHITE);
        assert_eq!(buf.get(4, 4), Color::TRANSPARENT);
        assert_eq!(buf.get(0, 0), Color::TRANSPARENT);

        fill_rounded_rect(&mut buf, (0.0, 0.0, 31.0, 31.0), 0.0, Color::rgba(0, 0, 0, 60));
        assert_eq!(buf.get(16, 16), Color::rgb(195, 195, 195));
        assert_eq!(buf.get(0, 0), Color::rgba(0, 0, 0, 60));
    }

    #[test]
    fn test_ellipse_fill() {
        let mut buf = new_buffer(64).unwrap();
        fill_ellipse(&mut buf, (10.0, 20.0, 50.0, 40.0), Color::rgb(32, 32, 32));
        assert_eq!(buf.get(30, 30), Color::rgb(32, 32, 32));
        assert_eq!(buf.get(10, 30), Color::rgb(32, 32, 32));
        assert_eq!(buf.get(30, 20), Color::rgb(32, 32, 32));
        assert_eq!(buf.get(10, 20), Color::TRANSPARENT);
        assert_eq!(buf.get(49, 39), Color::TRANSPARENT);
    }

    #[test]
    fn test_degenerate_ellipse_draws_nothing() {
        let mut buf = new_buffer(16).unwrap();
        fill_ellipse(&mut buf, (5.0, 5.0, 5.0, 12.0), Color::WHITE);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_horizontal_line_has_square_caps() {
        let mut buf = new_buffer(32).unwrap();
        stroke_line(&mut buf, (8.0, 16.0), (24.0, 16.0), 6.0, Color::WHITE);
        // Perpendicular extent is ±3.
        assert_eq!(buf.get(16, 13), Color::WHITE);
        assert_eq!(buf.get(16, 19), Color::WHITE);
        assert_eq!(buf.get(16, 12), Color::TRANSPARENT);
        // Square caps extend 3px past each end, corners included.
        assert_eq!(buf.get(5, 13), Color::WHITE);
        assert_eq!(buf.get(27, 19), Color::WHITE);
        assert_eq!(buf.get(4, 16), Color::TRANSPARENT);
        assert_eq!(buf.get(28, 16), Color::TRANSPARENT);
    }

    #[test]
    fn test_diagonal_line_coverage() {
        let mut buf = new_buffer(64).unwrap();
        stroke_line(&mut buf, (0.0, 0.0), (60.0, 60.0), 4.0, Color::WHITE);
        assert_eq!(buf.get(30, 30), Color::WHITE);
        assert_eq!(buf.get(31, 30), Color::WHITE);
        assert_eq!(buf.get(40, 30), Color::TRANSPARENT);
    }

    #[test]
    fn test_shapes_outside_buffer_are_clipped() {
        let mut buf = new_buffer(8).unwrap();
        fill_rounded_rect(&mut buf, (20.0, 20.0, 40.0, 40.0), 2.0, Color::WHITE);
        fill_rounded_rect(&mut buf, (-10.0, -10.0, -2.0, -2.0), 2.0, Color::WHITE);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));

        fill_rounded_rect(&mut buf, (-10.0, -10.0, 100.0, 100.0), 0.0, Color::WHITE);
        assert!(buf.as_bytes().iter().all(|&b| b == 255));
    }
}
