//! Stand-in canvas for templates whose image is missing.

use super::draw::{Anchor, VerticalAnchor, draw_rect_outline, paint_line};
use super::font::FontHandle;
use crate::templates::{Align, CanvasSize, Rgb, TemplateDescriptor};
use image::RgbaImage;

pub const BACKGROUND: Rgb = Rgb([200, 200, 200]);
pub const BORDER: Rgb = Rgb([100, 100, 100]);
pub const BORDER_INSET: u32 = 10;
pub const BORDER_WIDTH: u32 = 3;
pub const LABEL_FONT_SIZE: u32 = 20;
const LABEL_COLOR: Rgb = Rgb::BLACK;

/// Template name and the asset path it expects.
pub fn label_lines(template: &TemplateDescriptor) -> [String; 2] {
    [
        format!("Meme Template: {}", template.name),
        format!("(Add image: {})", template.image_path),
    ]
}

/// Flat gray canvas with an inset border and `label` centered as a block.
pub fn synthesize(size: CanvasSize, label: &[String], font: &FontHandle) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size.width, size.height, BACKGROUND.to_rgba(u8::MAX));

    if let (Some(right), Some(bottom)) = (
        size.width.checked_sub(BORDER_INSET + 1),
        size.height.checked_sub(BORDER_INSET + 1),
    ) {
        draw_rect_outline(
            &mut canvas,
            (BORDER_INSET, BORDER_INSET),
            (right, bottom),
            BORDER_WIDTH,
            BORDER,
        );
    }

    let shaped: Vec<_> = label.iter().map(|line| font.shape(line)).collect();
    let Some(first) = shaped.first() else {
        return canvas;
    };

    let ascent = first.ascent.round() as i32;
    let pitch = (first.ascent * 1.5).round() as i32;
    let block_height = pitch * (shaped.len() as i32 - 1) + ascent;
    let top = (size.height as i32 - block_height) / 2;
    let center_x = size.width as i32 / 2;

    let anchor = Anchor {
        align: Align::Center,
        vertical: VerticalAnchor::Ascender,
    };
    for (i, line) in shaped.iter().enumerate() {
        let origin = anchor.origin(line, (center_x, top + i as i32 * pitch));
        paint_line(&mut canvas, line, origin, LABEL_COLOR);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::font::FontResolver;
    use crate::templates::CATALOG;

    fn label_font() -> FontHandle {
        FontResolver::builtin().resolve(LABEL_FONT_SIZE)
    }

    #[test]
    fn label_names_template_and_asset() {
        let [name, path] = label_lines(&CATALOG[3]);
        assert_eq!(name, "Meme Template: Doge");
        assert_eq!(path, "(Add image: templates/doge.jpg)");
    }

    #[test]
    fn background_border_and_text() {
        let size = CanvasSize::new(600, 500);
        let canvas = synthesize(size, &label_lines(&CATALOG[0]), &label_font());
        assert_eq!(canvas.dimensions(), (600, 500));

        let gray = [200, 200, 200, 255];
        let border = [100, 100, 100, 255];
        assert_eq!(canvas.get_pixel(5, 5).0, gray);
        assert_eq!(canvas.get_pixel(10, 10).0, border);
        assert_eq!(canvas.get_pixel(12, 250).0, border);
        assert_eq!(canvas.get_pixel(589, 489).0, border);
        // Same 10 px margin on every side
        assert_eq!(canvas.get_pixel(590, 490).0, gray);
        assert_eq!(canvas.get_pixel(9, 9).0, gray);
        assert_eq!(canvas.get_pixel(13, 13).0, gray);
        assert_eq!(canvas.get_pixel(595, 495).0, gray);

        // Label ink stays in a band around the vertical center.
        let black = [0, 0, 0, 255];
        let inked_rows: Vec<u32> = (0..500)
            .filter(|y| (0..600).any(|x| canvas.get_pixel(x, *y).0 == black))
            .collect();
        assert!(!inked_rows.is_empty());
        assert!(inked_rows.iter().all(|y| (200..300).contains(y)));
    }

    #[test]
    fn tiny_canvas_survives() {
        let canvas = synthesize(
            CanvasSize::new(8, 8),
            &label_lines(&CATALOG[0]),
            &label_font(),
        );
        assert_eq!(canvas.dimensions(), (8, 8));
    }

    #[test]
    fn empty_label_is_just_the_frame() {
        let canvas = synthesize(CanvasSize::new(40, 40), &[], &label_font());
        assert_eq!(canvas.get_pixel(20, 20).0, [200, 200, 200, 255]);
        assert_eq!(canvas.get_pixel(11, 20).0, [100, 100, 100, 255]);
    }
}
