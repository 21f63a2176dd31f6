//! Meme compositing for Rizz Score results.
//!
//! A [`templates::TemplateRegistry`] picks a template, an
//! [`image::Compositor`] burns the score into it, and
//! [`meme::MemeGenerator`] ties the two together.

pub mod error;
pub mod image;
pub mod meme;
pub mod templates;

pub use error::{RenderError, RenderResult};
pub use meme::{MemeGenerator, RenderRequest, RenderedImage};
