//! src/geometry.rs
//! Shape construction and coordinate-space helpers.

use glam::Vec2;
use rand::Rng;

use crate::render::Rgba;

/// The six vertices (two triangles) of an axis-aligned rectangle spanning
/// (x1, y1)-(x2, y2), flattened to coordinate pairs.
pub fn rect_vertices(x1: f32, y1: f32, x2: f32, y2: f32) -> [f32; 12] {
    [
        x1, y1, //
        x1, y2, //
        x2, y1, //
        x2, y1, //
        x2, y2, //
        x1, y2, //
    ]
}

/// Pixel-space to clip-space, the same transform the pixel-space vertex
/// shader declares: `clip = (pixel / resolution) * 2 - 1`, with y flipped so
/// pixel y grows downwards.
pub fn clip_from_pixel(pixel: Vec2, resolution: Vec2) -> Vec2 {
    let clip = (pixel / resolution) * 2.0 - Vec2::ONE;
    Vec2::new(clip.x, -clip.y)
}

/// A random axis-aligned rectangle in surface-pixel coordinates. One corner
/// lands inside the surface; the opposite corner is offset by up to half the
/// surface extent in either direction, so rectangles may hang off the edges.
pub fn random_rect<R: Rng>(rng: &mut R, width: u32, height: u32) -> [f32; 12] {
    let w = width as i32;
    let h = height as i32;
    let x1 = rng.gen_range(0..w);
    let x2 = x1 + rng.gen_range(-w / 2..w / 2);
    let y1 = rng.gen_range(0..h);
    let y2 = y1 + rng.gen_range(-h / 2..h / 2);
    rect_vertices(x1 as f32, y1 as f32, x2 as f32, y2 as f32)
}

/// A random fully opaque color.
pub fn random_color<R: Rng>(rng: &mut R) -> Rgba {
    Rgba::opaque(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>())
}
