//! Built-in 5x7 bitmap font
//!
//! Text rasterizes to an `Image` made of solid cells, so the quad renderer
//! needs no texture atlas. Fonts are plain values built once at startup and
//! passed to whoever draws text.

use glam::Vec2;

use crate::Color;
use crate::sim::Rect;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;

/// Rows top to bottom, bit 4 is the leftmost column
type Glyph = [u8; GLYPH_HEIGHT];

const BLANK: Glyph = [0; GLYPH_HEIGHT];
const UNKNOWN: Glyph = [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100];

fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        ' ' => BLANK,
        _ => UNKNOWN,
    }
}

/// Rasterized text: solid cells relative to the image's top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2,
    pub color: Color,
    pub cells: Vec<Rect>,
}

impl Image {
    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Top-left position that centers this image inside `rect`
    pub fn centered_in(&self, rect: &Rect) -> Vec2 {
        rect.center() - self.size * 0.5
    }

    /// Top-left position that centers this image horizontally at height `y`
    pub fn centered_x(&self, playfield_width: f32, y: f32) -> Vec2 {
        Vec2::new(playfield_width / 2.0 - self.size.x / 2.0, y)
    }
}

/// Fonts the scenes draw with, built once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fonts {
    /// FPS label and button captions
    pub small: Font,
    /// Menu headings
    pub large: Font,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            small: Font::small(),
            large: Font::large(),
        }
    }
}

/// A bitmap font at a fixed pixel scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Side length of one glyph cell in playfield pixels
    pub pixel: f32,
}

impl Font {
    pub const fn new(pixel: f32) -> Self {
        Self { pixel }
    }

    /// HUD labels and button captions
    pub const fn small() -> Self {
        Self::new(2.0)
    }

    /// Menu headings
    pub const fn large() -> Self {
        Self::new(14.0)
    }

    /// Horizontal distance between glyph origins (one blank column)
    pub fn advance(&self) -> f32 {
        (GLYPH_WIDTH + 1) as f32 * self.pixel
    }

    pub fn line_height(&self) -> f32 {
        GLYPH_HEIGHT as f32 * self.pixel
    }

    /// Size `text` would occupy
    pub fn measure(&self, text: &str) -> Vec2 {
        let count = text.chars().count();
        if count == 0 {
            return Vec2::ZERO;
        }
        // No trailing gap after the last glyph
        let width = count as f32 * self.advance() - self.pixel;
        Vec2::new(width, self.line_height())
    }

    /// Rasterize `text`; horizontal runs within a glyph row become one cell
    pub fn render(&self, text: &str, color: Color) -> Image {
        let mut cells = Vec::new();
        for (i, c) in text.chars().enumerate() {
            let origin_x = i as f32 * self.advance();
            for (row, bits) in glyph(c).iter().enumerate() {
                let y = row as f32 * self.pixel;
                let mut col = 0;
                while col < GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        col += 1;
                        continue;
                    }
                    let start = col;
                    while col < GLYPH_WIDTH && bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        col += 1;
                    }
                    cells.push(Rect::new(
                        origin_x + start as f32 * self.pixel,
                        y,
                        (col - start) as f32 * self.pixel,
                        self.pixel,
                    ));
                }
            }
        }

        Image {
            size: self.measure(text),
            color,
            cells,
        }
    }
}
