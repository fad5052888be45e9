//! Software RGBA surface
//!
//! Used by the headless runner and tests; a real host would implement
//! `DrawSurface` on top of its own canvas instead.

use super::surface::{Canvas, DrawSurface};
use crate::Rgba;

/// Row-major RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// True when every pixel is fully transparent
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|p| p.a == 0)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn blend_at(&mut self, x: u32, y: u32, src: Rgba) {
        let i = self.index(x, y);
        self.pixels[i] = blend_over(src, self.pixels[i]);
    }
}

/// Source-over alpha compositing
pub fn blend_over(src: Rgba, dst: Rgba) -> Rgba {
    if src.a == 255 {
        return src;
    }
    if src.a == 0 {
        return dst;
    }

    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgba::new(
        mix(src.r, dst.r),
        mix(src.g, dst.g),
        mix(src.b, dst.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

impl Canvas for PixelBuffer {
    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn draw_background(&mut self, color: Rgba) {
        if color.a == 255 {
            self.pixels.fill(color);
            return;
        }
        for p in self.pixels.iter_mut() {
            *p = blend_over(color, *p);
        }
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        if !(radius > 0.0) || !x.is_finite() || !y.is_finite() || self.pixels.is_empty() {
            return;
        }

        let r2 = radius * radius;
        let max_x = self.width as f32 - 1.0;
        let max_y = self.height as f32 - 1.0;
        let x0 = (x - radius).floor().clamp(0.0, max_x) as u32;
        let x1 = (x + radius).ceil().clamp(0.0, max_x) as u32;
        let y0 = (y - radius).floor().clamp(0.0, max_y) as u32;
        let y1 = (y + radius).ceil().clamp(0.0, max_y) as u32;

        for py in y0..=y1 {
            let dy = py as f32 + 0.5 - y;
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    self.blend_at(px, py, color);
                }
            }
        }
    }
}

impl DrawSurface for PixelBuffer {
    type Layer = PixelBuffer;

    fn create_layer(&mut self, width: u32, height: u32) -> Self::Layer {
        PixelBuffer::new(width, height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = PixelBuffer::new(width, height);
    }

    fn composite(&mut self, layer: &Self::Layer, x: i32, y: i32) {
        for ly in 0..layer.height {
            let ty = ly as i64 + y as i64;
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for lx in 0..layer.width {
                let tx = lx as i64 + x as i64;
                if tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                let src = layer.pixels[layer.index(lx, ly)];
                self.blend_at(tx as u32, ty as u32, src);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_covers_center_only() {
        let mut buf = PixelBuffer::new(20, 20);
        buf.draw_circle(10.0, 10.0, 3.0, Rgba::opaque(255, 0, 0));
        assert_eq!(buf.pixel(10, 10), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(buf.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.pixel(16, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_circle_clipped_at_edges() {
        let mut buf = PixelBuffer::new(10, 10);
        buf.draw_circle(-2.0, 5.0, 4.0, Rgba::opaque(0, 255, 0));
        assert_eq!(buf.pixel(0, 5), Some(Rgba::opaque(0, 255, 0)));
        buf.draw_circle(f32::NAN, 5.0, 4.0, Rgba::opaque(0, 0, 255));
    }

    #[test]
    fn test_blend_over() {
        let dst = Rgba::opaque(0, 0, 0);
        let out = blend_over(Rgba::new(255, 255, 255, 128), dst);
        assert_eq!(out.a, 255);
        assert!((out.r as i32 - 128).abs() <= 1);

        // Translucent over transparent keeps the source color
        let out = blend_over(Rgba::new(200, 10, 10, 60), Rgba::TRANSPARENT);
        assert_eq!(out, Rgba::new(200, 10, 10, 60));
    }

    #[test]
    fn test_composite_with_offset() {
        let mut screen = PixelBuffer::new(10, 10);
        let mut layer = screen.create_layer(4, 4);
        layer.draw_background(Rgba::opaque(9, 9, 9));
        screen.composite(&layer, 8, 8);
        assert_eq!(screen.pixel(9, 9), Some(Rgba::opaque(9, 9, 9)));
        assert_eq!(screen.pixel(7, 7), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_resize_discards_content() {
        let mut screen = PixelBuffer::new(4, 4);
        screen.draw_background(Rgba::opaque(1, 2, 3));
        screen.resize(6, 2);
        assert_eq!((screen.width(), screen.height()), (6, 2));
        assert!(screen.is_clear());
    }
}
