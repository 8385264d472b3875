//! Renders the receipt scanner icon by compositing layers in a fixed order

use crate::compositor::{fill_ellipse, fill_rounded_rect, fill_vertical_gradient, stroke_line};
use crate::error::Result;
use crate::mask::{apply_rounded_mask, RoundedMask};
use crate::pixel_buffer::{new_buffer, Color, PixelBuffer};
use tracing::debug;

/// Edge length of the canonical source icon
pub const CANONICAL_SIZE: u32 = 1024;

pub const GRADIENT_START: Color = Color::rgb(52, 152, 219);
pub const GRADIENT_END: Color = Color::rgb(0, 150, 136);
pub const SHADOW_COLOR: Color = Color::rgba(0, 0, 0, 60);
pub const LINE_COLOR: Color = Color::rgba(100, 100, 100, 180);
pub const ACCENT_COLOR: Color = Color::rgb(52, 152, 219);
pub const BEAM_COLOR: Color = Color::rgba(255, 215, 0, 120);
pub const CAMERA_COLOR: Color = Color::rgb(64, 64, 64);
pub const LENS_COLOR: Color = Color::rgb(32, 32, 32);
pub const REFLECTION_COLOR: Color = Color::rgba(255, 255, 255, 180);

const RECEIPT_WIDTH: f32 = 280.0;
const RECEIPT_HEIGHT: f32 = 400.0;
const RECEIPT_LIFT: f32 = 40.0;
const RECEIPT_RADIUS: f32 = 20.0;
const SHADOW_OFFSET: f32 = 8.0;
const TEXT_INSET: f32 = 30.0;
const TEXT_RADIUS: f32 = 2.0;
const BODY_LINES: usize = 6;
const BODY_LINE_SPACING: f32 = 35.0;
const BODY_LINE_STEP: f32 = 40.0;
const BEAMS: usize = 3;
const BEAM_WIDTH: f32 = 6.0;
const BEAM_OVERHANG: f32 = 20.0;
const BEAM_DROP: f32 = 40.0;
const BEAM_SPACING: f32 = 80.0;
const CAMERA_SIZE: f32 = 80.0;
const CAMERA_RADIUS: f32 = 15.0;
const LENS_SIZE: f32 = 40.0;
const REFLECTION_SIZE: f32 = 15.0;
const REFLECTION_OFFSET: f32 = 8.0;
const MASK_MARGIN: f32 = 80.0;
const MASK_RADIUS: f32 = 180.0;

/// Inclusive rectangle `(x0, y0, x1, y1)`
pub type Rect = (f32, f32, f32, f32);

/// Every rectangle the icon is built from, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLayout {
    pub size: u32,
    pub receipt: Rect,
    pub shadow: Rect,
    pub header: Rect,
    pub body_lines: Vec<Rect>,
    pub total: Rect,
    pub beams: Vec<((f32, f32), (f32, f32))>,
    pub camera: Rect,
    pub lens: Rect,
    pub reflection: Rect,
    pub mask: RoundedMask,
    /// Scaled corner radii and stroke width
    pub receipt_radius: f32,
    pub text_radius: f32,
    pub camera_radius: f32,
    pub beam_width: f32,
}

impl ReceiptLayout {
    /// Layout for a `size`×`size` canvas. At [`CANONICAL_SIZE`] every
    /// coordinate is an exact integer.
    pub fn for_canvas(size: u32) -> Self {
        let k = size as f32 / CANONICAL_SIZE as f32;
        let canvas = size as f32;
        let w = RECEIPT_WIDTH * k;
        let h = RECEIPT_HEIGHT * k;
        let rx = ((canvas - w) / 2.0).floor();
        let ry = ((canvas - h) / 2.0).floor() - RECEIPT_LIFT * k;

        let receipt = (rx, ry, rx + w, ry + h);
        let shadow = (
            rx + SHADOW_OFFSET * k,
            ry + SHADOW_OFFSET * k,
            rx + w + SHADOW_OFFSET * k,
            ry + h + SHADOW_OFFSET * k,
        );

        let inset = TEXT_INSET * k;
        let header = (rx + inset, ry + 40.0 * k, rx + w - inset, ry + 55.0 * k);

        let body_lines = (0..BODY_LINES)
            .map(|i| {
                let y = ry + 90.0 * k + i as f32 * BODY_LINE_SPACING * k;
                let len = w - 2.0 * inset - (i % 3) as f32 * BODY_LINE_STEP * k;
                (rx + inset, y, rx + inset + len, y + 8.0 * k)
            })
            .collect();

        let total = (rx + inset, ry + h - 80.0 * k, rx + w - inset, ry + h - 65.0 * k);

        let beams = (0..BEAMS)
            .map(|i| {
                let y = ry + 100.0 * k + i as f32 * BEAM_SPACING * k;
                (
                    (rx - BEAM_OVERHANG * k, y),
                    (rx + w + BEAM_OVERHANG * k, y + BEAM_DROP * k),
                )
            })
            .collect();

        let cam = CAMERA_SIZE * k;
        let cx = rx + w - cam - 20.0 * k;
        let cy = ry - 30.0 * k;
        let camera = (cx, cy, cx + cam, cy + cam);

        let lens_size = LENS_SIZE * k;
        let lx = cx + ((cam - lens_size) / 2.0).floor();
        let ly = cy + ((cam - lens_size) / 2.0).floor();
        let lens = (lx, ly, lx + lens_size, ly + lens_size);

        let off = REFLECTION_OFFSET * k;
        let refl = REFLECTION_SIZE * k;
        let reflection = (lx + off, ly + off, lx + off + refl, ly + off + refl);

        Self {
            size,
            receipt,
            shadow,
            header,
            body_lines,
            total,
            beams,
            camera,
            lens,
            reflection,
            mask: RoundedMask::new(
                (MASK_MARGIN * k).round() as u32,
                (MASK_RADIUS * k).round() as u32,
            ),
            receipt_radius: RECEIPT_RADIUS * k,
            text_radius: TEXT_RADIUS * k,
            camera_radius: CAMERA_RADIUS * k,
            beam_width: BEAM_WIDTH * k,
        }
    }
}

/// Renders the canonical 1024×1024 icon.
pub fn render_icon() -> Result<PixelBuffer> {
    render_icon_at(CANONICAL_SIZE)
}

/// Renders the icon directly at `size`. Layer order is fixed; the outer mask is last
/// so it also clips the gradient.
#[tracing::instrument]
pub fn render_icon_at(size: u32) -> Result<PixelBuffer> {
    let mut buf = new_buffer(size)?;
    let layout = ReceiptLayout::for_canvas(size);

    fill_vertical_gradient(&mut buf, GRADIENT_START, GRADIENT_END);
    debug!("gradient background");

    fill_rounded_rect(&mut buf, layout.shadow, layout.receipt_radius, SHADOW_COLOR);
    fill_rounded_rect(&mut buf, layout.receipt, layout.receipt_radius, Color::WHITE);
    debug!(receipt = ?layout.receipt, "receipt body");

    fill_rounded_rect(&mut buf, layout.header, layout.text_radius, LINE_COLOR);
    for line in &layout.body_lines {
        fill_rounded_rect(&mut buf, *line, layout.text_radius, LINE_COLOR);
    }
    fill_rounded_rect(&mut buf, layout.total, layout.text_radius, ACCENT_COLOR);
    debug!(lines = layout.body_lines.len(), "receipt text");

    for &(from, to) in &layout.beams {
        stroke_line(&mut buf, from, to, layout.beam_width, BEAM_COLOR);
    }
    debug!(beams = layout.beams.len(), "scanner beams");

    fill_rounded_rect(&mut buf, layout.camera, layout.camera_radius, CAMERA_COLOR);
    fill_ellipse(&mut buf, layout.lens, LENS_COLOR);
    fill_ellipse(&mut buf, layout.reflection, REFLECTION_COLOR);
    debug!(camera = ?layout.camera, "camera");

    apply_rounded_mask(&mut buf, layout.mask)?;
    debug!(mask = ?layout.mask, "outer mask");

    Ok(buf)
}
