//! Software framebuffer implementing `Surface`.
//!
//! Draw calls arrive in canvas units and are scaled to pixels.  The terminal
//! presenter shows two vertically stacked pixels per character cell.

use crate::render::{Rect, Rgba, Sprite, Surface};

/// One character cell: the colours of its upper and lower half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub top: Rgba,
    pub bottom: Rgba,
}

#[derive(Clone, Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    /// Pixels per canvas unit.
    scale_x: f32,
    scale_y: f32,
    pixels: Vec<Rgba>,
}

impl Raster {
    /// A black `width`×`height` pixel buffer covering a canvas of
    /// `canvas_width`×`canvas_height` units.
    pub fn new(width: u32, height: u32, canvas_width: f32, canvas_height: f32) -> Self {
        let scale = |px: u32, units: f32| if units > 0.0 { px as f32 / units } else { 0.0 };
        Raster {
            width,
            height,
            scale_x: scale(width, canvas_width),
            scale_y: scale(height, canvas_height),
            pixels: vec![Rgba::rgb(0, 0, 0); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Pair up rows into character cells.  An odd last row is paired with
    /// black.
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..self.height.div_ceil(2))
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        let top = self.pixel(col, row * 2);
                        let bottom = if row * 2 + 1 < self.height {
                            self.pixel(col, row * 2 + 1)
                        } else {
                            Rgba::rgb(0, 0, 0)
                        };
                        Cell { top, bottom }
                    })
                    .collect()
            })
            .collect()
    }

    fn blend(&mut self, x: u32, y: u32, src: Rgba, alpha: f32) {
        let a = (src.a as f32 / 255.0) * alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[(y * self.width + x) as usize];
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        *dst = Rgba {
            r: mix(src.r, dst.r),
            g: mix(src.g, dst.g),
            b: mix(src.b, dst.b),
            a: 255,
        };
    }

    /// Canvas-unit span `[start, start + len)` to the clipped range of pixels
    /// it touches.
    fn span(start: f32, len: f32, scale: f32, limit: u32) -> (u32, u32) {
        if len <= 0.0 {
            return (0, 0);
        }
        let lo = (start * scale).floor().max(0.0);
        let hi = ((start + len) * scale).ceil().min(limit as f32);
        if hi <= lo {
            (0, 0)
        } else {
            (lo as u32, hi as u32)
        }
    }
}

impl Surface for Raster {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let (x0, x1) = Self::span(rect.x, rect.w, self.scale_x, self.width);
        let (y0, y1) = Self::span(rect.y, rect.h, self.scale_y, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn draw_sprite(
        &mut self,
        sprite: &Sprite,
        center: (f32, f32),
        size: (f32, f32),
        angle: f32,
        alpha: f32,
    ) {
        let (w, h) = size;
        if sprite.width == 0 || sprite.height == 0 || w <= 0.0 || h <= 0.0 {
            return;
        }

        // Bounding box of the rotated sprite, canvas units.
        let (sin, cos) = angle.sin_cos();
        let half_w = (w * cos.abs() + h * sin.abs()) / 2.0;
        let half_h = (w * sin.abs() + h * cos.abs()) / 2.0;
        let (x0, x1) = Self::span(center.0 - half_w, half_w * 2.0, self.scale_x, self.width);
        let (y0, y1) = Self::span(center.1 - half_h, half_h * 2.0, self.scale_y, self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                // Pixel centre back to canvas units, relative to the sprite.
                let cx = (px as f32 + 0.5) / self.scale_x - center.0;
                let cy = (py as f32 + 0.5) / self.scale_y - center.1;
                // Undo the rotation.
                let lx = cx * cos + cy * sin;
                let ly = -cx * sin + cy * cos;
                if lx < -w / 2.0 || lx >= w / 2.0 || ly < -h / 2.0 || ly >= h / 2.0 {
                    continue;
                }
                let u = (((lx + w / 2.0) / w) * sprite.width as f32) as u32;
                let v = (((ly + h / 2.0) / h) * sprite.height as f32) as u32;
                let texel = sprite.pixel(u.min(sprite.width - 1), v.min(sprite.height - 1));
                self.blend(px, py, texel, alpha);
            }
        }
    }
}
