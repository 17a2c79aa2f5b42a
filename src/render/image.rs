//! Image adapters — picture files to character grids.
//!
//! `image` renders a greyscale luminance ramp; `color-image` renders
//! upper-half-block characters so each terminal cell carries two pixel
//! rows (foreground = top pixel, background = bottom pixel), quantized to
//! the eight named colours.

use std::path::Path;

use image::imageops::FilterType;

use crate::errors::RenderError;
use crate::types::{Attr, CharStyle, NamedColour};

use super::Renderable;

/// Darkest to brightest.
const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as wide; sample accordingly.
fn load_scaled(
    path: &Path,
    max_w: usize,
    max_h_cells: usize,
    rows_per_cell: u32,
) -> Result<image::RgbImage, RenderError> {
    let img = image::open(path).map_err(|e| RenderError::Image {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let target_h = (max_h_cells as u32) * rows_per_cell;
    Ok(img
        .resize(max_w as u32, target_h.max(1), FilterType::Triangle)
        .to_rgb8())
}

fn luminance(px: &image::Rgb<u8>) -> f32 {
    let [r, g, b] = px.0;
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Nearest of the eight named colours, with bold marking the bright half
/// of the range.
fn quantize(px: &image::Rgb<u8>) -> (NamedColour, bool) {
    let [r, g, b] = px.0;
    let bright = r.max(g).max(b) > 170;
    let t = 100u8;
    let colour = match (r > t, g > t, b > t) {
        (false, false, false) => NamedColour::Black,
        (true, false, false) => NamedColour::Red,
        (false, true, false) => NamedColour::Green,
        (true, true, false) => NamedColour::Yellow,
        (false, false, true) => NamedColour::Blue,
        (true, false, true) => NamedColour::Magenta,
        (false, true, true) => NamedColour::Cyan,
        (true, true, true) => NamedColour::White,
    };
    (colour, bright)
}

/// Greyscale ASCII rendition scaled to fit `max_w` × `max_h` cells.
pub fn mono_image(path: &Path, max_w: usize, max_h: usize) -> Result<Renderable, RenderError> {
    let img = load_scaled(path, max_w, max_h, 2)?;
    let mut rows = Vec::new();
    let mut y = 0;
    while y < img.height() {
        let mut row = String::new();
        for x in 0..img.width() {
            let lum = luminance(img.get_pixel(x, y));
            let idx = (lum / 255.0 * (RAMP.len() - 1) as f32).round() as usize;
            row.push(RAMP[idx.min(RAMP.len() - 1)]);
        }
        rows.push(row);
        y += 2;
    }
    Ok(Renderable::from_lines(rows))
}

/// Coloured half-block rendition scaled to fit `max_w` × `max_h` cells.
pub fn colour_image(path: &Path, max_w: usize, max_h: usize) -> Result<Renderable, RenderError> {
    let img = load_scaled(path, max_w, max_h, 2)?;
    let cell_rows = img.height().div_ceil(2);
    let mut rend = Renderable::from_lines(vec![
        "▀".repeat(img.width() as usize);
        cell_rows as usize
    ]);
    for cy in 0..cell_rows {
        for x in 0..img.width() {
            let (top, top_bright) = quantize(img.get_pixel(x, cy * 2));
            let bottom = if cy * 2 + 1 < img.height() {
                quantize(img.get_pixel(x, cy * 2 + 1)).0
            } else {
                NamedColour::Black
            };
            rend.colours[cy as usize][x as usize] = Some(CharStyle {
                fg: top,
                attr: if top_bright { Attr::Bold } else { Attr::Normal },
                bg: bottom,
            });
        }
    }
    Ok(rend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_covers_full_luminance_range() {
        assert_eq!(RAMP[0], ' ');
        assert_eq!(*RAMP.last().unwrap(), '@');
    }

    #[test]
    fn quantize_maps_primaries() {
        assert_eq!(quantize(&image::Rgb([255, 0, 0])).0, NamedColour::Red);
        assert_eq!(quantize(&image::Rgb([0, 0, 0])).0, NamedColour::Black);
        assert_eq!(quantize(&image::Rgb([250, 250, 250])).0, NamedColour::White);
        assert!(quantize(&image::Rgb([250, 250, 250])).1);
    }

    #[test]
    fn missing_file_is_a_render_error() {
        let err = mono_image(Path::new("/nonexistent/x.png"), 80, 24).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/x.png"));
    }
}
