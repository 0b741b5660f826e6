//! Placeholder error image rendering.
//!
//! Graphic-producing call sites return these bytes when extraction fails,
//! so clients expecting an image payload still receive one. Rendering is
//! fully in-process: the external tools whose failure is being reported
//! cannot be part of this path, so text is rasterized from an embedded
//! 5x7 pixel font.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::request::RenderFormat;
use crate::{Error, Result};

/// Canvas size of every placeholder image.
const CANVAS: (u32, u32) = (640, 360);
const MARGIN: u32 = 24;
const HEADER_SCALE: u32 = 4;
const BODY_SCALE: u32 = 2;
const LINE_GAP: u32 = 6;

const BACKGROUND: Rgb<u8> = Rgb([24, 24, 28]);
const HEADER_COLOR: Rgb<u8> = Rgb([224, 80, 80]);
const BODY_COLOR: Rgb<u8> = Rgb([220, 220, 220]);

/// Render a placeholder image carrying `status` and `message` in the
/// requested format. Animated formats fall back to PNG, since the
/// placeholder is always a single still.
pub fn render_error_image(status: u16, message: &str, format: RenderFormat) -> Result<Vec<u8>> {
    let image_format = match format {
        RenderFormat::Jpeg => ImageFormat::Jpeg,
        RenderFormat::Gif => ImageFormat::Gif,
        RenderFormat::Png | RenderFormat::Mp4 => ImageFormat::Png,
    };

    let (width, height) = CANVAS;
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    let header = format!("ERROR {status}");
    draw_text(&mut canvas, &header, MARGIN, MARGIN, HEADER_SCALE, HEADER_COLOR);

    let columns = ((width - 2 * MARGIN) / advance(BODY_SCALE)) as usize;
    let mut y = MARGIN + glyph_height(HEADER_SCALE) + 4 * LINE_GAP;
    for line in wrap_words(message, columns) {
        if y + glyph_height(BODY_SCALE) > height - MARGIN {
            break;
        }
        draw_text(&mut canvas, &line, MARGIN, y, BODY_SCALE, BODY_COLOR);
        y += glyph_height(BODY_SCALE) + LINE_GAP;
    }

    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(canvas)
        .write_to(&mut buf, image_format)
        .map_err(|e| Error::resource(format!("failed to encode placeholder image: {e}")))?;
    Ok(buf.into_inner())
}

fn advance(scale: u32) -> u32 {
    6 * scale
}

fn glyph_height(scale: u32) -> u32 {
    7 * scale
}

/// Greedy word wrap into lines of at most `columns` characters; words longer
/// than a line are split hard.
fn wrap_words(message: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in message.split_whitespace() {
        let mut word = word;
        while word.len() > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let (head, tail) = word.split_at(columns);
            lines.push(head.to_string());
            word = tail;
        }
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_text(canvas: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let mut pen = x;
    for ch in text.chars() {
        if pen + 5 * scale >= canvas.width() {
            break;
        }
        let rows = glyph(ch.to_ascii_uppercase());
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5u32 {
                if bits & (0x10 >> col) != 0 {
                    fill_square(canvas, pen + col * scale, y + row as u32 * scale, scale, color);
                }
            }
        }
        pen += advance(scale);
    }
}

fn fill_square(canvas: &mut RgbImage, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    for dy in 0..scale {
        for dx in 0..scale {
            let (px, py) = (x + dx, y + dy);
            if px < canvas.width() && py < canvas.height() {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

/// 5x7 glyph rows, 5 bits per row, leftmost pixel in bit 4. Unknown
/// characters render blank.
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ';' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '"' => [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        _ => [0x00; 7],
    }
}
