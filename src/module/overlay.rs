//! Overlay renderer.
//!
//! Composites the processed grid as coloured tiles over the optical frame,
//! plus a crosshair and a temperature label at the hotspot.

pub mod glyph;

use image::{imageops, imageops::FilterType, DynamicImage, Rgba, RgbaImage};

use crate::module::thermal::{colorize::colorize, ProcessedGrid};
use crate::module::util::conf::{Overlay, Theme};

/// Output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Rectangle an image occupies inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Largest rectangle with the aspect ratio of `src_w` x `src_h` that fits
/// the viewport, centred.
pub fn fit(src_w: f64, src_h: f64, viewport: Viewport) -> Placement {
    let (vw, vh) = (viewport.width as f64, viewport.height as f64);
    if !(src_w > 0.0 && src_h > 0.0) {
        return Placement {
            x: 0.0,
            y: 0.0,
            width: vw,
            height: vh,
        };
    }
    let scale = (vw / src_w).min(vh / src_h);
    let (width, height) = (src_w * scale, src_h * scale);
    Placement {
        x: (vw - width) / 2.0,
        y: (vh - height) / 2.0,
        width,
        height,
    }
}

/// Text shown next to the hotspot.
pub fn hotspot_label(value: f64) -> String {
    format!("{:.1}°C", value)
}

/// Render one composite.
///
/// The overlay is aligned to the background's placement, or fitted on its
/// own when there is no background. Without a usable grid only the
/// background is drawn.
pub fn compose(
    background: Option<&DynamicImage>,
    processed: Option<&ProcessedGrid>,
    overlay: &Overlay,
    theme: &Theme,
    viewport: Viewport,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        viewport.width,
        viewport.height,
        opaque(theme.backdrop),
    );
    let background_place = background.map(|bg| draw_background(&mut canvas, bg, viewport));

    let Some(grid) = processed.filter(|g| g.has_finite()) else {
        return canvas;
    };
    let place = background_place.unwrap_or_else(|| {
        fit(
            grid.display_width as f64,
            grid.display_height as f64,
            viewport,
        )
    });
    draw_tiles(&mut canvas, grid, place, overlay);

    if let (Some((hx, hy)), Some(value)) = (grid.hottest_xy(), grid.hottest_value()) {
        let cell_w = place.width / grid.display_width as f64;
        let cell_h = place.height / grid.display_height as f64;
        let cx = (place.x + (hx as f64 + 0.5) * cell_w).floor() as i64;
        let cy = (place.y + (hy as f64 + 0.5) * cell_h).floor() as i64;
        draw_crosshair(&mut canvas, cx, cy, theme);
        draw_label(&mut canvas, cx, cy, &hotspot_label(value), theme);
    }
    canvas
}

fn opaque(rgb: [u8; 3]) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

fn draw_background(canvas: &mut RgbaImage, bg: &DynamicImage, viewport: Viewport) -> Placement {
    let resized = bg
        .resize(viewport.width, viewport.height, FilterType::Triangle)
        .to_rgba8();
    let x = (viewport.width.saturating_sub(resized.width())) / 2;
    let y = (viewport.height.saturating_sub(resized.height())) / 2;
    imageops::overlay(canvas, &resized, x as i64, y as i64);
    Placement {
        x: x as f64,
        y: y as f64,
        width: resized.width() as f64,
        height: resized.height() as f64,
    }
}

fn mix(dst: u8, src: u8, alpha: f64) -> u8 {
    (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
}

fn draw_tiles(canvas: &mut RgbaImage, grid: &ProcessedGrid, place: Placement, overlay: &Overlay) {
    let alpha = overlay.overlay_opacity.clamp(0.0, 1.0);
    if alpha == 0.0 {
        return;
    }
    let skip = overlay.pixel_skip.max(1);
    let (dw, dh) = (grid.display_width, grid.display_height);
    let cell_w = place.width / dw as f64;
    let cell_h = place.height / dh as f64;
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);

    for gy in (0..dh).step_by(skip) {
        let y0 = (place.y + gy as f64 * cell_h).round() as i64;
        let y1 = (place.y + (gy + skip).min(dh) as f64 * cell_h).round() as i64;
        for gx in (0..dw).step_by(skip) {
            let Some(v) = grid.value(gx, gy).filter(|v| v.is_finite()) else {
                continue;
            };
            let colour = colorize(v, grid.observed_min, grid.observed_max);
            let x0 = (place.x + gx as f64 * cell_w).round() as i64;
            let x1 = (place.x + (gx + skip).min(dw) as f64 * cell_w).round() as i64;
            for py in y0.max(0)..y1.min(ch) {
                for px in x0.max(0)..x1.min(cw) {
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    for c in 0..3 {
                        pixel[c] = mix(pixel[c], colour[c], alpha);
                    }
                }
            }
        }
    }
}

fn plot(canvas: &mut RgbaImage, x: i64, y: i64, colour: Rgba<u8>) {
    if x >= 0 && y >= 0 && x < canvas.width() as i64 && y < canvas.height() as i64 {
        canvas.put_pixel(x as u32, y as u32, colour);
    }
}

fn draw_crosshair(canvas: &mut RgbaImage, cx: i64, cy: i64, theme: &Theme) {
    let arm = theme.crosshair_arm as i64;
    let colour = opaque(theme.crosshair);
    for d in -arm..=arm {
        plot(canvas, cx + d, cy, colour);
        plot(canvas, cx, cy + d, colour);
    }
}

fn draw_label(canvas: &mut RgbaImage, cx: i64, cy: i64, text: &str, theme: &Theme) {
    let scale = theme.label_scale.max(1);
    let arm = theme.crosshair_arm as i64;
    let width = glyph::text_width(text, scale) as i64;
    let height = (glyph::HEIGHT * scale) as i64;
    // Up and right of the marker, kept on the canvas.
    let x = (cx + arm + 2)
        .min(canvas.width() as i64 - width)
        .max(0);
    let y = (cy - arm - height).max(0);
    let colour = opaque(theme.label);

    for (i, c) in text.chars().enumerate() {
        let origin = x + (i as u32 * glyph::ADVANCE * scale) as i64;
        for gy in 0..glyph::HEIGHT {
            for gx in 0..glyph::WIDTH {
                if !glyph::is_set(c, gx, gy) {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        plot(
                            canvas,
                            origin + (gx * scale + sx) as i64,
                            y + (gy * scale + sy) as i64,
                            colour,
                        );
                    }
                }
            }
        }
    }
}
