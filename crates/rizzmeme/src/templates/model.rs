use serde::Serialize;

/// Pixel offset from the top-left corner of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const GOLD: Rgb = Rgb([255, 215, 0]);

    pub fn to_rgba(self, alpha: u8) -> image::Rgba<u8> {
        let [r, g, b] = self.0;
        image::Rgba([r, g, b, alpha])
    }
}

/// Horizontal placement of single-line text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "width")]
pub enum WrapMode {
    /// Paint as a single line regardless of length
    NoWrap,
    /// Word-wrap at the given pixel width
    WrapAt(u32),
}

/// Widest outline [`StrokeMode::offsets`] will produce.
pub const MAX_STROKE_WIDTH: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "width")]
pub enum StrokeMode {
    NoStroke,
    /// Outline of the given radius in pixels
    Stroke(u32),
}

impl StrokeMode {
    /// Every displacement painted in the stroke color, in paint order.
    /// The square `[-w, w]²` minus the origin, with `w` capped at [`MAX_STROKE_WIDTH`].
    pub fn offsets(self) -> Vec<(i32, i32)> {
        let StrokeMode::Stroke(width) = self else {
            return Vec::new();
        };
        let w = width.min(MAX_STROKE_WIDTH) as i32;
        let side = (2 * w + 1) as usize;
        let mut offsets = Vec::with_capacity(side * side - 1);
        for dx in -w..=w {
            for dy in -w..=w {
                if dx != 0 || dy != 0 {
                    offsets.push((dx, dy));
                }
            }
        }
        offsets
    }
}

/// One piece of text painted onto a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOverlaySpec {
    pub position: Point,
    /// Brace-format string; `{score}` is replaced with the score
    pub text_template: &'static str,
    pub font_size: u32,
    pub color: Rgb,
    pub stroke_color: Rgb,
    pub stroke: StrokeMode,
    pub wrap: WrapMode,
    pub align: Align,
}

/// A catalog entry: base image plus the overlays painted on it, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub image_path: &'static str,
    pub canvas_size: CanvasSize,
    pub overlays: &'static [TextOverlaySpec],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_stroke_has_no_offsets() {
        assert!(StrokeMode::NoStroke.offsets().is_empty());
        assert!(StrokeMode::Stroke(0).offsets().is_empty());
    }

    #[test]
    fn stroke_offsets_cover_square_without_origin() {
        let offsets = StrokeMode::Stroke(2).offsets();
        assert_eq!(offsets.len(), 24);
        assert!(!offsets.contains(&(0, 0)));
        assert!(offsets.contains(&(-2, -2)));
        assert!(offsets.contains(&(2, 2)));
        assert!(offsets.contains(&(0, 1)));
    }

    #[test]
    fn huge_stroke_width_is_capped() {
        let offsets = StrokeMode::Stroke(u32::MAX).offsets();
        let side = 2 * MAX_STROKE_WIDTH as usize + 1;
        assert_eq!(offsets.len(), side * side - 1);
        assert!(offsets.contains(&(64, -64)));
        assert!(!offsets.contains(&(65, 0)));
    }

    #[test]
    fn wrap_and_stroke_serialize_tagged() {
        assert_eq!(
            serde_json::to_string(&WrapMode::WrapAt(150)).unwrap(),
            r#"{"mode":"wrap_at","width":150}"#
        );
        assert_eq!(
            serde_json::to_string(&StrokeMode::NoStroke).unwrap(),
            r#"{"mode":"no_stroke"}"#
        );
        assert_eq!(
            serde_json::to_string(&Align::Center).unwrap(),
            r#""center""#
        );
    }
}
