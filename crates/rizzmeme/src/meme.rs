//! Score in, finished meme out.

use crate::error::RenderResult;
use crate::image::{Compositor, FontResolver};
use crate::templates::{TemplateDescriptor, TemplateRegistry};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Rendered as a plain integer, never clamped
    pub score: i32,
    pub template_id: Option<String>,
}

impl RenderRequest {
    pub fn new(score: i32, template_id: Option<String>) -> Self {
        Self { score, template_id }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// Template actually rendered, which may differ from the requested one
    pub template_id: String,
    /// PNG bytes
    pub bytes: Vec<u8>,
}

/// Template selection plus compositing.
#[derive(Debug, Clone)]
pub struct MemeGenerator<'a> {
    registry: TemplateRegistry<'a>,
    compositor: Compositor,
}

impl<'a> MemeGenerator<'a> {
    pub fn new(registry: TemplateRegistry<'a>, fonts: FontResolver) -> Self {
        let compositor = Compositor::new(registry.locator().clone(), fonts);
        Self {
            registry,
            compositor,
        }
    }

    /// Explicit id via [`TemplateRegistry::get_by_id`], otherwise
    /// [`TemplateRegistry::get_random`].
    pub fn generate(&self, request: &RenderRequest) -> RenderResult<RenderedImage> {
        let selected = match request.template_id.as_deref() {
            Some(id) => self.registry.get_by_id(id),
            None => self.registry.get_random(),
        };
        self.render_selected(request.score, selected)
    }

    /// Same as [`Self::generate`] with random selection driven by `rng`.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        request: &RenderRequest,
        rng: &mut R,
    ) -> RenderResult<RenderedImage> {
        let selected = self.registry.select(request.template_id.as_deref(), rng);
        self.render_selected(request.score, selected)
    }

    fn render_selected(
        &self,
        score: i32,
        selected: &'a TemplateDescriptor,
    ) -> RenderResult<RenderedImage> {
        let template = self.substitute_missing(selected);

        log::info!("Rendering '{}' with score {score}", template.id);
        let bytes = self.compositor.render(score, template)?;

        Ok(RenderedImage {
            template_id: template.id.to_string(),
            bytes,
        })
    }

    /// Swap a template without an image for the first one that has an image.
    /// Keeps `selected` when nothing is available; it then renders as a placeholder.
    fn substitute_missing(&self, selected: &'a TemplateDescriptor) -> &'a TemplateDescriptor {
        if self.registry.locator().is_available(selected.image_path) {
            return selected;
        }
        match self.registry.first_available() {
            Some(alternative) => {
                log::warn!(
                    "Template image for '{}' not found, using '{}' instead",
                    selected.id,
                    alternative.id
                );
                alternative
            }
            None => selected,
        }
    }
}
