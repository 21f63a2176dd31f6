//! Font discovery using fontdue (pure Rust)

use super::builtin_font;
use super::draw::{GlyphBitmap, ShapedLine};
use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Looked up in the usual font directories when no bold display font exists.
const GENERIC_FONT_FILES: &[&str] = &["arial.ttf", "Arial.ttf"];

#[derive(Clone)]
enum Face {
    TrueType { font: Arc<Font>, path: PathBuf },
    Builtin,
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::TrueType { path, .. } => f.debug_tuple("TrueType").field(path).finish(),
            Face::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Picks the font every overlay is painted with.
///
/// Discovery happens once; [`FontResolver::resolve`] then only pairs the
/// chosen face with a size and never fails.
#[derive(Debug, Clone)]
pub struct FontResolver {
    face: Face,
}

impl FontResolver {
    /// Try `extra` paths, then the platform's bold display fonts, then a
    /// generic named font, and finally settle for the builtin bitmap font.
    pub fn discover(extra: &[PathBuf]) -> Self {
        let candidates = extra
            .iter()
            .cloned()
            .chain(platform_candidates())
            .chain(generic_candidates());
        Self::from_candidates(candidates)
    }

    pub fn from_candidates(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        for path in candidates {
            if !path.is_file() {
                log::trace!("Font candidate {} does not exist", path.display());
                continue;
            }
            match load_font(&path) {
                Ok(font) => {
                    log::info!("Using font {}", path.display());
                    return Self {
                        face: Face::TrueType {
                            font: Arc::new(font),
                            path,
                        },
                    };
                }
                Err(e) => log::warn!("Could not load custom font: {e:#}"),
            }
        }

        log::warn!("No usable font file found, falling back to the builtin bitmap font");
        Self::builtin()
    }

    pub fn builtin() -> Self {
        Self {
            face: Face::Builtin,
        }
    }

    /// Font file in use, `None` for the builtin font.
    pub fn source(&self) -> Option<&Path> {
        match &self.face {
            Face::TrueType { path, .. } => Some(path),
            Face::Builtin => None,
        }
    }

    pub fn resolve(&self, size: u32) -> FontHandle {
        FontHandle {
            face: self.face.clone(),
            size,
        }
    }
}

/// A face at a requested size.
///
/// The builtin font only approximates `size` with an integer scale.
#[derive(Debug, Clone)]
pub struct FontHandle {
    face: Face,
    size: u32,
}

impl FontHandle {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    pub fn shape(&self, text: &str) -> ShapedLine {
        match &self.face {
            Face::TrueType { font, .. } => shape_truetype(font, self.size as f32, text),
            Face::Builtin => shape_builtin(builtin_font::scale_for(self.size), text),
        }
    }
}

fn shape_truetype(font: &Font, px: f32, text: &str) -> ShapedLine {
    let ascent = font
        .horizontal_line_metrics(px)
        .map(|m| m.ascent)
        .unwrap_or(px);

    let mut pen = 0.0f32;
    let mut glyphs = Vec::new();
    for ch in text.chars() {
        let (metrics, coverage) = font.rasterize(ch, px);
        if metrics.width > 0 && metrics.height > 0 {
            glyphs.push(GlyphBitmap {
                left: pen.round() as i32 + metrics.xmin,
                top: -(metrics.ymin + metrics.height as i32),
                width: metrics.width,
                height: metrics.height,
                coverage,
            });
        }
        pen += metrics.advance_width;
    }

    ShapedLine {
        glyphs,
        advance: pen,
        ascent,
    }
}

fn shape_builtin(scale: u32, text: &str) -> ShapedLine {
    let step = builtin_font::advance(scale);
    let mut pen = 0.0f32;
    let mut glyphs = Vec::new();
    for ch in text.chars() {
        let mut glyph = builtin_font::rasterize(ch, scale);
        glyph.left += pen as i32;
        glyphs.push(glyph);
        pen += step;
    }

    ShapedLine {
        glyphs,
        advance: pen,
        ascent: builtin_font::ascent(scale),
    }
}

fn load_font(path: &Path) -> Result<Font> {
    let data = fs_err::read(path)?;
    Font::from_bytes(data, FontSettings::default())
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("Failed to parse font {}", path.display()))
}

/// Bold display fonts conventionally installed on this platform.
pub fn platform_candidates() -> Vec<PathBuf> {
    let paths: &[&str] = if cfg!(windows) {
        &["C:/Windows/Fonts/impact.ttf"]
    } else if cfg!(unix) {
        &[
            "/System/Library/Fonts/Supplemental/Impact.ttf",
            "/Library/Fonts/Impact.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        ]
    } else {
        &[]
    };
    paths.iter().map(PathBuf::from).collect()
}

fn font_dirs() -> Vec<PathBuf> {
    let dirs: &[&str] = if cfg!(windows) {
        &["C:/Windows/Fonts"]
    } else if cfg!(target_os = "macos") {
        &["/Library/Fonts", "/System/Library/Fonts/Supplemental"]
    } else {
        &[
            "/usr/share/fonts/truetype/msttcorefonts",
            "/usr/share/fonts/TTF",
            "/usr/local/share/fonts",
        ]
    };
    dirs.iter().map(PathBuf::from).collect()
}

/// The generic font by bare name (working directory first), then in the font directories.
pub fn generic_candidates() -> Vec<PathBuf> {
    let bare = GENERIC_FONT_FILES.iter().map(PathBuf::from);
    let in_dirs = font_dirs()
        .into_iter()
        .flat_map(|dir| GENERIC_FONT_FILES.iter().map(move |name| dir.join(name)));
    bare.chain(in_dirs).collect()
}
