use crate::templates::{Align, Rgb};
use image::{Rgba, RgbaImage};

/// Coverage mask of one glyph, positioned relative to the line's pen origin
/// on the baseline (y grows downward, so `top` is negative above it).
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub left: i32,
    pub top: i32,
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    fn ink_top(&self) -> Option<i32> {
        if self.width == 0 {
            return None;
        }
        self.coverage
            .chunks(self.width)
            .position(|row| row.iter().any(|c| *c > 0))
            .map(|row| self.top + row as i32)
    }
}

/// A line of text turned into glyph masks, ready to paint any number of times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedLine {
    pub glyphs: Vec<GlyphBitmap>,
    /// Total pen advance in pixels
    pub advance: f32,
    /// Distance from the ascender line down to the baseline
    pub ascent: f32,
}

impl ShapedLine {
    /// Offset of the highest inked row relative to the baseline.
    pub fn ink_top(&self) -> i32 {
        self.glyphs
            .iter()
            .filter_map(GlyphBitmap::ink_top)
            .min()
            .unwrap_or(-(self.ascent.round() as i32))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    /// The font's ascender line sits at the anchor
    Ascender,
    /// The top of the inked glyphs sits at the anchor
    InkTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub align: Align,
    pub vertical: VerticalAnchor,
}

impl Anchor {
    /// Used for each line of wrapped text.
    pub const MULTILINE: Anchor = Anchor {
        align: Align::Left,
        vertical: VerticalAnchor::Ascender,
    };

    pub fn single_line(align: Align) -> Self {
        Self {
            align,
            vertical: VerticalAnchor::InkTop,
        }
    }

    /// Pen origin `(x, baseline)` that places `line` at `at` under this anchor.
    pub fn origin(&self, line: &ShapedLine, at: (i32, i32)) -> (i32, i32) {
        let (x, y) = at;
        let dx = match self.align {
            Align::Left => 0.0,
            Align::Center => -line.advance / 2.0,
            Align::Right => -line.advance,
        };
        let baseline = match self.vertical {
            VerticalAnchor::Ascender => y + line.ascent.round() as i32,
            VerticalAnchor::InkTop => y - line.ink_top(),
        };
        (x + dx.round() as i32, baseline)
    }
}

/// Blend `line` onto the canvas in `color`, clipping at the canvas edges.
pub fn paint_line(canvas: &mut RgbaImage, line: &ShapedLine, origin: (i32, i32), color: Rgb) {
    let (ox, oy) = origin;
    for glyph in &line.glyphs {
        for gy in 0..glyph.height {
            let py = oy + glyph.top + gy as i32;
            if py < 0 {
                continue;
            }
            for gx in 0..glyph.width {
                let coverage = glyph.coverage[gy * glyph.width + gx];
                if coverage == 0 {
                    continue;
                }
                let px = ox + glyph.left + gx as i32;
                if px < 0 {
                    continue;
                }
                if let Some(pixel) = canvas.get_pixel_mut_checked(px as u32, py as u32) {
                    *pixel = blend_over(color.to_rgba(coverage), *pixel);
                }
            }
        }
    }
}

/// Source-over compositing of `top` onto `bottom`.
pub fn blend_over(top: Rgba<u8>, bottom: Rgba<u8>) -> Rgba<u8> {
    let ta = top[3] as f32 / 255.0;
    let ba = bottom[3] as f32 / 255.0;

    let out_a = ta + ba * (1.0 - ta);
    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let tc = top[i] as f32 / 255.0;
        let bc = bottom[i] as f32 / 255.0;
        let premult = tc * ta + bc * ba * (1.0 - ta);
        out[i] = ((premult / out_a).clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Outline a rectangle `width` pixels thick, growing inward from the given edges.
pub fn draw_rect_outline(
    canvas: &mut RgbaImage,
    (x0, y0): (u32, u32),
    (x1, y1): (u32, u32),
    width: u32,
    color: Rgb,
) {
    let fill = color.to_rgba(u8::MAX);
    for t in 0..width {
        let (left, top) = (x0 + t, y0 + t);
        let (Some(right), Some(bottom)) = (x1.checked_sub(t), y1.checked_sub(t)) else {
            return;
        };
        if left > right || top > bottom {
            return;
        }
        for x in left..=right {
            put_checked(canvas, x, top, fill);
            put_checked(canvas, x, bottom, fill);
        }
        for y in top..=bottom {
            put_checked(canvas, left, y, fill);
            put_checked(canvas, right, y, fill);
        }
    }
}

fn put_checked(canvas: &mut RgbaImage, x: u32, y: u32, pixel: Rgba<u8>) {
    if let Some(p) = canvas.get_pixel_mut_checked(x, y) {
        *p = pixel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(left: i32, top: i32, width: usize, height: usize) -> GlyphBitmap {
        GlyphBitmap {
            left,
            top,
            width,
            height,
            coverage: vec![255; width * height],
        }
    }

    fn line() -> ShapedLine {
        ShapedLine {
            glyphs: vec![block(0, -10, 4, 10), block(6, -6, 4, 6)],
            advance: 12.0,
            ascent: 14.0,
        }
    }

    #[test]
    fn ink_top_ignores_blank_rows() {
        let mut glyph = block(0, -10, 2, 3);
        glyph.coverage = vec![0, 0, 0, 255, 0, 0];
        let shaped = ShapedLine {
            glyphs: vec![glyph],
            advance: 2.0,
            ascent: 12.0,
        };
        assert_eq!(shaped.ink_top(), -9);
    }

    #[test]
    fn empty_line_ink_top_is_ascent() {
        let shaped = ShapedLine {
            glyphs: vec![],
            advance: 0.0,
            ascent: 12.0,
        };
        assert_eq!(shaped.ink_top(), -12);
    }

    #[test]
    fn horizontal_anchors() {
        let shaped = line();
        assert_eq!(
            Anchor::single_line(Align::Left).origin(&shaped, (100, 50)),
            (100, 60)
        );
        assert_eq!(
            Anchor::single_line(Align::Center).origin(&shaped, (100, 50)),
            (94, 60)
        );
        assert_eq!(
            Anchor::single_line(Align::Right).origin(&shaped, (100, 50)),
            (88, 60)
        );
    }

    #[test]
    fn multiline_anchor_uses_ascender() {
        assert_eq!(Anchor::MULTILINE.origin(&line(), (100, 50)), (100, 64));
    }

    #[test]
    fn paints_glyph_pixels_and_clips() {
        let mut canvas = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let shaped = ShapedLine {
            glyphs: vec![block(0, -2, 2, 2)],
            advance: 2.0,
            ascent: 2.0,
        };
        paint_line(&mut canvas, &shaped, (3, 5), Rgb([10, 20, 30]));
        assert_eq!(canvas.get_pixel(3, 3).0, [10, 20, 30, 255]);
        assert_eq!(canvas.get_pixel(4, 4).0, [10, 20, 30, 255]);
        assert_eq!(canvas.get_pixel(5, 4).0, [0, 0, 0, 255]);

        // Partly off every edge.
        paint_line(&mut canvas, &shaped, (-1, 1), Rgb::WHITE);
        paint_line(&mut canvas, &shaped, (7, 9), Rgb::WHITE);
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(7, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn partial_coverage_blends() {
        let out = blend_over(Rgba([255, 255, 255, 128]), Rgba([0, 0, 0, 255]));
        assert_eq!(out.0, [128, 128, 128, 255]);
        assert_eq!(
            blend_over(Rgba([1, 2, 3, 0]), Rgba([9, 9, 9, 255])).0,
            [9, 9, 9, 255]
        );
        assert_eq!(
            blend_over(Rgba([255, 215, 0, 255]), Rgba([9, 9, 9, 255])).0,
            [255, 215, 0, 255]
        );
    }

    #[test]
    fn rect_outline_grows_inward() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        draw_rect_outline(&mut canvas, (2, 2), (17, 17), 2, Rgb::WHITE);
        assert_eq!(canvas.get_pixel(2, 10).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(3, 10).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(4, 10).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(1, 10).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(17, 17).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(10, 10).0, [0, 0, 0, 255]);
    }
}
