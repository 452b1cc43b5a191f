use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

pub const CANVAS_WIDTH: u32 = 500;
pub const CANVAS_HEIGHT: u32 = 500;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
/// Dark gray so the bot is visible on black.
pub const SILHOUETTE: Rgb<u8> = Rgb([60, 60, 60]);

const JPEG_QUALITY: u8 = 85;

/// Draw the bot silhouette onto a black 500x500 canvas. Shapes are drawn
/// in a fixed order; later shapes occlude earlier ones where they overlap.
pub fn render_bot_silhouette() -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BLACK);
    let w = CANVAS_WIDTH as f32;
    let h = CANVAS_HEIGHT as f32;

    // Head
    fill_ellipse(&mut canvas, w * 0.25, h * 0.10, w * 0.75, h * 0.38, SILHOUETTE);

    // Body
    fill_rounded_rect(
        &mut canvas,
        w * 0.22,
        h * 0.40,
        w * 0.78,
        h * 0.78,
        30.0,
        SILHOUETTE,
    );

    // Eyes
    let eye_y = h * 0.22;
    fill_ellipse(
        &mut canvas,
        w * 0.35,
        eye_y - 15.0,
        w * 0.42,
        eye_y + 15.0,
        SILHOUETTE,
    );
    fill_ellipse(
        &mut canvas,
        w * 0.58,
        eye_y - 15.0,
        w * 0.65,
        eye_y + 15.0,
        SILHOUETTE,
    );

    // Antenna
    fill_vertical_stroke(&mut canvas, w * 0.50, h * 0.02, h * 0.10, 8.0, SILHOUETTE);
    fill_ellipse(&mut canvas, w * 0.46, 0.0, w * 0.54, h * 0.06, SILHOUETTE);

    canvas
}

/// Render the silhouette and write it as a JPEG (quality 85) to the given
/// path, creating missing parent directories first.
pub fn write_placeholder(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    let canvas = render_bot_silhouette();

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    encoder
        .encode_image(&canvas)
        .with_context(|| format!("Failed to encode JPEG to {}", output_path.display()))?;

    Ok(())
}

// Pixel centers sit at (+0.5, +0.5); a pixel is filled when its center
// falls inside the shape.

fn fill_ellipse(canvas: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
    let cx = (x0 + x1) / 2.0;
    let cy = (y0 + y1) / 2.0;
    let rx = (x1 - x0) / 2.0;
    let ry = (y1 - y0) / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    for y in clamp_span(y0, y1, canvas.height()) {
        for x in clamp_span(x0, x1, canvas.width()) {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn fill_rounded_rect(
    canvas: &mut RgbImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    radius: f32,
    color: Rgb<u8>,
) {
    // Corner radius cannot exceed half the shorter side
    let radius = radius.min((x1 - x0) / 2.0).min((y1 - y0) / 2.0).max(0.0);

    for y in clamp_span(y0, y1, canvas.height()) {
        for x in clamp_span(x0, x1, canvas.width()) {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            // Distance from the nearest corner-circle center; zero along
            // the straight edges
            let dx = (x0 + radius - px).max(px - (x1 - radius)).max(0.0);
            let dy = (y0 + radius - py).max(py - (y1 - radius)).max(0.0);
            if dx * dx + dy * dy <= radius * radius {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// Vertical stroke centered on column `x`, spanning `y_top..y_bottom`.
fn fill_vertical_stroke(
    canvas: &mut RgbImage,
    x: f32,
    y_top: f32,
    y_bottom: f32,
    width: f32,
    color: Rgb<u8>,
) {
    let half = width / 2.0;
    for y in clamp_span(y_top, y_bottom, canvas.height()) {
        for x in clamp_span(x - half, x + half, canvas.width()) {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Clamp a float span to valid pixel indices along one axis.
fn clamp_span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
    let lo = lo.floor().max(0.0) as u32;
    let hi = (hi.ceil().max(0.0) as u32).min(limit);
    lo.min(limit)..hi
}
