//! CPU-side frame recording
//!
//! `QuadBatch` is the `Surface` every scene draws on. It records solid quads
//! in playfield pixels; the GPU pipeline uploads them, and headless runs and
//! tests inspect them directly.

use glam::Vec2;

use super::font::Image;
use super::vertex::Vertex;
use crate::Color;
use crate::colors::BLACK;
use crate::platform::Surface;
use crate::sim::Rect;

/// A filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub color: Color,
}

/// One frame's worth of quads
#[derive(Debug, Clone)]
pub struct QuadBatch {
    clear_color: Color,
    quads: Vec<Quad>,
    frames_presented: u64,
}

impl Default for QuadBatch {
    fn default() -> Self {
        Self {
            clear_color: BLACK,
            quads: Vec::new(),
            frames_presented: 0,
        }
    }
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Whether a quad with exactly this rect and color was drawn
    pub fn contains(&self, rect: &Rect, color: Color) -> bool {
        self.quads.iter().any(|q| q.rect == *rect && q.color == color)
    }

    /// Two triangles per quad, positions still in playfield pixels
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(self.quads.len() * 6);
        for quad in &self.quads {
            let (x0, y0) = (quad.rect.x(), quad.rect.y());
            let (x1, y1) = (quad.rect.right(), quad.rect.bottom());
            let c = quad.color;

            vertices.push(Vertex::new(x0, y0, c));
            vertices.push(Vertex::new(x0, y1, c));
            vertices.push(Vertex::new(x1, y0, c));

            vertices.push(Vertex::new(x1, y0, c));
            vertices.push(Vertex::new(x0, y1, c));
            vertices.push(Vertex::new(x1, y1, c));
        }
        vertices
    }
}

impl Surface for QuadBatch {
    // Covers everything, so earlier quads are dropped
    fn fill(&mut self, color: Color) {
        self.clear_color = color;
        self.quads.clear();
    }

    fn draw_rect(&mut self, rect: &Rect, color: Color) {
        self.quads.push(Quad { rect: *rect, color });
    }

    fn blit(&mut self, image: &Image, pos: Vec2) {
        self.quads.extend(image.cells.iter().map(|cell| Quad {
            rect: Rect {
                pos: cell.pos + pos,
                size: cell.size,
            },
            color: image.color,
        }));
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{GREEN, WHITE};
    use crate::renderer::font::Font;

    #[test]
    fn test_fill_resets_frame() {
        let mut batch = QuadBatch::new();
        batch.draw_rect(&Rect::new(0.0, 0.0, 5.0, 5.0), WHITE);
        batch.fill(GREEN);
        assert!(batch.quads().is_empty());
        assert_eq!(batch.clear_color(), GREEN);
    }

    #[test]
    fn test_blit_offsets_cells() {
        let mut batch = QuadBatch::new();
        let image = batch.draw_text("-", &Font::new(1.0), WHITE);
        batch.blit(&image, Vec2::new(10.0, 20.0));
        assert!(batch.contains(&Rect::new(10.0, 23.0, 5.0, 1.0), WHITE));
    }

    #[test]
    fn test_vertices_two_triangles_per_quad() {
        let mut batch = QuadBatch::new();
        batch.draw_rect(&Rect::new(1.0, 2.0, 3.0, 4.0), WHITE);
        batch.draw_rect(&Rect::new(0.0, 0.0, 1.0, 1.0), GREEN);
        let vertices = batch.vertices();
        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].position, [1.0, 2.0]);
        assert_eq!(vertices[5].position, [4.0, 6.0]);
        assert_eq!(vertices[6].color, GREEN);
    }

    #[test]
    fn test_present_counts_frames() {
        let mut batch = QuadBatch::new();
        batch.present();
        batch.present();
        assert_eq!(batch.frames_presented(), 2);
    }
}
