use std::path::PathBuf;

pub type RenderResult<T> = Result<T, RenderError>;

/// Failures that abort a render. A missing template asset is not one of
/// them; it is rendered as a placeholder instead.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The template image exists but could not be read or decoded.
    #[error("failed to load template image {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An overlay's text template is malformed.
    #[error("invalid text template {text:?} in template '{template_id}'")]
    Template {
        template_id: String,
        text: String,
        #[source]
        source: TemplateFormatError,
    },

    #[error("failed to encode PNG")]
    Encode(#[source] image::ImageError),
}

/// Errors from substituting the score into an overlay's text template.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateFormatError {
    #[error("unknown field {{{0}}}, only {{score}} is supported")]
    UnknownField(String),

    #[error("unmatched '{{' at byte {0}")]
    UnmatchedOpen(usize),

    #[error("single '}}' at byte {0}")]
    UnmatchedClose(usize),
}
