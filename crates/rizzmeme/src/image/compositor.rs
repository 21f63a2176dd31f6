use super::draw::{Anchor, ShapedLine, paint_line};
use super::font::FontResolver;
use super::layout::{format_score, layout_lines, line_top};
use super::placeholder;
use crate::error::{RenderError, RenderResult};
use crate::templates::{AssetLocator, TemplateDescriptor, TextOverlaySpec};
use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Burns a template's overlays into its base image.
///
/// Holds no canvas between calls; every render starts from a fresh buffer.
#[derive(Debug, Clone)]
pub struct Compositor {
    locator: AssetLocator,
    fonts: FontResolver,
}

impl Compositor {
    pub fn new(locator: AssetLocator, fonts: FontResolver) -> Self {
        Self { locator, fonts }
    }

    /// Encoded PNG of `template` with `score` substituted into its overlays.
    pub fn render(&self, score: i32, template: &TemplateDescriptor) -> RenderResult<Vec<u8>> {
        encode_png(&self.compose(score, template)?)
    }

    pub fn compose(&self, score: i32, template: &TemplateDescriptor) -> RenderResult<RgbaImage> {
        let mut canvas = self.base_canvas(template)?;
        for overlay in template.overlays {
            self.paint_overlay(&mut canvas, template, overlay, score)?;
        }
        Ok(canvas)
    }

    fn base_canvas(&self, template: &TemplateDescriptor) -> RenderResult<RgbaImage> {
        let size = template.canvas_size;

        let Some(path) = self.locator.locate(template.image_path) else {
            log::warn!(
                "Template image {} not found, rendering placeholder for '{}'",
                template.image_path,
                template.id
            );
            let font = self.fonts.resolve(placeholder::LABEL_FONT_SIZE);
            return Ok(placeholder::synthesize(
                size,
                &placeholder::label_lines(template),
                &font,
            ));
        };

        let image = load_rgba(&path).map_err(|source| RenderError::Decode {
            path: path.clone(),
            source,
        })?;

        if image.dimensions() == (size.width, size.height) {
            return Ok(image);
        }
        log::debug!(
            "Resizing {} from {}x{} to {}x{}",
            path.display(),
            image.width(),
            image.height(),
            size.width,
            size.height
        );
        Ok(imageops::resize(
            &image,
            size.width,
            size.height,
            FilterType::Lanczos3,
        ))
    }

    fn paint_overlay(
        &self,
        canvas: &mut RgbaImage,
        template: &TemplateDescriptor,
        overlay: &TextOverlaySpec,
        score: i32,
    ) -> RenderResult<()> {
        let text =
            format_score(overlay.text_template, score).map_err(|source| RenderError::Template {
                template_id: template.id.to_string(),
                text: overlay.text_template.to_string(),
                source,
            })?;

        let lines = layout_lines(&text, overlay.font_size, overlay.wrap);
        let font = self.fonts.resolve(overlay.font_size);
        // Wrapped text ignores `align` and starts every line at position.x.
        let anchor = if lines.len() > 1 {
            Anchor::MULTILINE
        } else {
            Anchor::single_line(overlay.align)
        };

        let placed: Vec<(ShapedLine, (i32, i32))> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                let shaped = font.shape(line);
                let top = line_top(overlay.position.y, i, lines.len(), overlay.font_size);
                let origin = anchor.origin(&shaped, (overlay.position.x, top));
                (shaped, origin)
            })
            .collect();

        let offsets = overlay.stroke.offsets();
        for (shaped, (x, y)) in &placed {
            for (dx, dy) in &offsets {
                paint_line(canvas, shaped, (x + dx, y + dy), overlay.stroke_color);
            }
        }
        for (shaped, origin) in &placed {
            paint_line(canvas, shaped, *origin, overlay.color);
        }

        Ok(())
    }
}

fn load_rgba(path: &Path) -> image::ImageResult<RgbaImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image.into_rgba8())
}

pub fn encode_png(canvas: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(RenderError::Encode)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateFormatError;
    use crate::templates::{
        Align, CATALOG, CanvasSize, Point, Rgb, StrokeMode, TextOverlaySpec, WrapMode,
    };
    use assert_fs::prelude::*;
    use image::Rgba;

    const GREEN: [u8; 4] = [0, 128, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn compositor(dir: &assert_fs::TempDir) -> Compositor {
        Compositor::new(AssetLocator::new(dir.path()), FontResolver::builtin())
    }

    fn write_base(dir: &assert_fs::TempDir, path: &str, width: u32, height: u32) {
        let file = dir.child(path);
        std::fs::create_dir_all(file.path().parent().unwrap()).unwrap();
        // PNG bytes whatever the extension; the loader sniffs the format.
        RgbaImage::from_pixel(width, height, Rgba(GREEN))
            .save_with_format(file.path(), ImageFormat::Png)
            .unwrap();
    }

    const fn text(
        x: i32,
        y: i32,
        text_template: &'static str,
        color: Rgb,
        stroke: u32,
    ) -> TextOverlaySpec {
        TextOverlaySpec {
            position: Point::new(x, y),
            text_template,
            font_size: 10,
            color,
            stroke_color: Rgb::BLACK,
            stroke: if stroke == 0 {
                StrokeMode::NoStroke
            } else {
                StrokeMode::Stroke(stroke)
            },
            wrap: WrapMode::NoWrap,
            align: Align::Left,
        }
    }

    fn custom(overlays: &'static [TextOverlaySpec]) -> TemplateDescriptor {
        TemplateDescriptor {
            id: "custom",
            name: "Custom",
            image_path: "templates/custom.png",
            canvas_size: CanvasSize::new(100, 80),
            overlays,
        }
    }

    #[test]
    fn every_template_renders_at_canvas_size() {
        let dir = assert_fs::TempDir::new().unwrap();
        let compositor = compositor(&dir);
        for template in CATALOG {
            for score in [0, 50, 100] {
                let bytes = compositor.render(score, template).unwrap();
                assert!(!bytes.is_empty());
                let decoded = image::load_from_memory(&bytes).unwrap();
                assert_eq!(
                    (decoded.width(), decoded.height()),
                    (template.canvas_size.width, template.canvas_size.height),
                    "{} at {score}",
                    template.id
                );
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let dir = assert_fs::TempDir::new().unwrap();
        write_base(&dir, "templates/success_kid.jpg", 600, 500);
        let compositor = compositor(&dir);
        let template = &CATALOG[2];
        assert_eq!(
            compositor.render(73, template).unwrap(),
            compositor.render(73, template).unwrap()
        );
    }

    #[test]
    fn missing_asset_uses_placeholder() {
        let dir = assert_fs::TempDir::new().unwrap();
        let canvas = compositor(&dir).compose(42, &CATALOG[0]).unwrap();
        assert_eq!(canvas.get_pixel(5, 5).0, [200, 200, 200, 255]);
        assert_eq!(canvas.get_pixel(10, 10).0, [100, 100, 100, 255]);
    }

    #[test]
    fn zero_overlays_leave_base_untouched() {
        let dir = assert_fs::TempDir::new().unwrap();
        let template = custom(&[]);
        let canvas = compositor(&dir).compose(1, &template).unwrap();

        let font = FontResolver::builtin().resolve(placeholder::LABEL_FONT_SIZE);
        let expected = placeholder::synthesize(
            template.canvas_size,
            &placeholder::label_lines(&template),
            &font,
        );
        assert_eq!(canvas, expected);

        write_base(&dir, "templates/custom.png", 100, 80);
        let canvas = compositor(&dir).compose(1, &template).unwrap();
        assert!(canvas.pixels().all(|p| p.0 == GREEN));
    }

    #[test]
    fn base_image_is_resized() {
        let dir = assert_fs::TempDir::new().unwrap();
        write_base(&dir, "templates/doge.jpg", 300, 250);
        let canvas = compositor(&dir).compose(10, &CATALOG[3]).unwrap();
        assert_eq!(canvas.dimensions(), (600, 500));
        let corner = canvas.get_pixel(590, 10).0;
        for (got, want) in corner.iter().zip(GREEN) {
            assert!(got.abs_diff(want) <= 1, "{corner:?}");
        }
    }

    #[test]
    fn corrupt_asset_is_fatal() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("templates/doge.jpg")
            .write_binary(b"not an image")
            .unwrap();
        let err = compositor(&dir).render(10, &CATALOG[3]).unwrap_err();
        match err {
            RenderError::Decode { path, .. } => assert!(path.ends_with("templates/doge.jpg")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn malformed_text_template_is_fatal() {
        static OVERLAYS: &[TextOverlaySpec] = &[text(0, 0, "{rizz}", Rgb::WHITE, 0)];
        let dir = assert_fs::TempDir::new().unwrap();
        let err = compositor(&dir).render(10, &custom(OVERLAYS)).unwrap_err();
        match err {
            RenderError::Template {
                template_id,
                source,
                ..
            } => {
                assert_eq!(template_id, "custom");
                assert_eq!(source, TemplateFormatError::UnknownField("rizz".into()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn later_overlay_paints_on_top() {
        static OVERLAYS: &[TextOverlaySpec] = &[
            text(50, 50, "#", Rgb([255, 0, 0]), 0),
            text(50, 50, "#", Rgb([0, 0, 255]), 0),
        ];
        let dir = assert_fs::TempDir::new().unwrap();
        write_base(&dir, "templates/custom.png", 100, 80);
        let canvas = compositor(&dir).compose(0, &custom(OVERLAYS)).unwrap();
        // First row of '#' is inked at cell column 1.
        assert_eq!(canvas.get_pixel(51, 50).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(50, 50).0, GREEN);
    }

    #[test]
    fn stroke_surrounds_fill() {
        let dir = assert_fs::TempDir::new().unwrap();
        write_base(&dir, "templates/custom.png", 100, 80);
        static OVERLAYS: &[TextOverlaySpec] = &[text(20, 20, "|", Rgb::WHITE, 1)];
        let canvas = compositor(&dir).compose(0, &custom(OVERLAYS)).unwrap();

        // '|' fills cell column 2 over rows 20..27.
        assert_eq!(canvas.get_pixel(22, 23).0, WHITE);
        assert_eq!(canvas.get_pixel(21, 23).0, BLACK);
        assert_eq!(canvas.get_pixel(23, 23).0, BLACK);
        assert_eq!(canvas.get_pixel(22, 19).0, BLACK);
        assert_eq!(canvas.get_pixel(22, 27).0, BLACK);
        assert_eq!(canvas.get_pixel(24, 23).0, GREEN);
        assert_eq!(canvas.get_pixel(22, 28).0, GREEN);
    }

    #[test]
    fn wrapped_lines_step_down_and_skip_alignment() {
        static OVERLAYS: &[TextOverlaySpec] = &[TextOverlaySpec {
            position: Point::new(10, 10),
            text_template: "| |",
            font_size: 10,
            color: Rgb::WHITE,
            stroke_color: Rgb::BLACK,
            stroke: StrokeMode::NoStroke,
            wrap: WrapMode::WrapAt(6),
            align: Align::Right,
        }];
        let dir = assert_fs::TempDir::new().unwrap();
        write_base(&dir, "templates/custom.png", 100, 80);
        let canvas = compositor(&dir).compose(0, &custom(OVERLAYS)).unwrap();

        // Two lines, both left-anchored at x=10, 20 px apart.
        assert_eq!(canvas.get_pixel(12, 10).0, WHITE);
        assert_eq!(canvas.get_pixel(12, 30).0, WHITE);
        assert_eq!(canvas.get_pixel(12, 36).0, WHITE);
        assert_eq!(canvas.get_pixel(12, 37).0, GREEN);
    }

    #[test]
    fn doge_layers_overlays() {
        let dir = assert_fs::TempDir::new().unwrap();
        let canvas = compositor(&dir).compose(42, &CATALOG[3]).unwrap();
        let gold = [255, 215, 0, 255];

        // "wow." ink starts at (50, 30), outlined in black.
        assert_eq!(canvas.get_pixel(51, 31).0, WHITE);
        assert_eq!(canvas.get_pixel(48, 31).0, BLACK);
        // "42/100." is right-aligned against x=450.
        assert_eq!(canvas.get_pixel(295, 201).0, gold);
        // "Amaze." is the last overlay.
        assert_eq!(canvas.get_pixel(346, 400).0, WHITE);
    }
}
