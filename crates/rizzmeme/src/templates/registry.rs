use super::catalog::{CATALOG, FALLBACK_TEMPLATE_ID, fallback_template};
use super::locator::AssetLocator;
use super::model::TemplateDescriptor;
use rand::Rng;
use rand::seq::SliceRandom;

/// Template selection over a read-only catalog.
///
/// Every lookup returns some descriptor: unknown ids degrade to random
/// selection, and random selection degrades to the fallback template.
#[derive(Debug, Clone)]
pub struct TemplateRegistry<'a> {
    catalog: &'a [TemplateDescriptor],
    locator: AssetLocator,
}

impl TemplateRegistry<'static> {
    pub fn builtin(locator: AssetLocator) -> Self {
        Self::with_catalog(CATALOG, locator)
    }
}

impl<'a> TemplateRegistry<'a> {
    pub fn with_catalog(catalog: &'a [TemplateDescriptor], locator: AssetLocator) -> Self {
        Self { catalog, locator }
    }

    pub fn catalog(&self) -> &'a [TemplateDescriptor] {
        self.catalog
    }

    pub fn locator(&self) -> &AssetLocator {
        &self.locator
    }

    pub fn find(&self, id: &str) -> Option<&'a TemplateDescriptor> {
        self.catalog.iter().find(|t| t.id == id)
    }

    /// Exact lookup, falling back to [`Self::get_random`] for unknown ids.
    pub fn get_by_id(&self, id: &str) -> &'a TemplateDescriptor {
        self.select(Some(id), &mut rand::thread_rng())
    }

    pub fn get_random(&self) -> &'a TemplateDescriptor {
        self.get_random_with(&mut rand::thread_rng())
    }

    /// Uniform choice among templates whose asset is currently on disk.
    pub fn get_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a TemplateDescriptor {
        let available: Vec<&'a TemplateDescriptor> = self.available().collect();
        match available.choose(rng).copied() {
            Some(template) => template,
            None => {
                log::warn!("No template images found, using {FALLBACK_TEMPLATE_ID} as fallback");
                self.fallback()
            }
        }
    }

    /// Explicit id when given, random otherwise.
    pub fn select<R: Rng + ?Sized>(
        &self,
        template_id: Option<&str>,
        rng: &mut R,
    ) -> &'a TemplateDescriptor {
        match template_id {
            Some(id) => match self.find(id) {
                Some(template) => template,
                None => {
                    log::warn!("Unknown template '{id}', picking a random one");
                    self.get_random_with(rng)
                }
            },
            None => self.get_random_with(rng),
        }
    }

    pub fn available(&self) -> impl Iterator<Item = &'a TemplateDescriptor> + '_ {
        self.catalog
            .iter()
            .filter(|t| self.locator.is_available(t.image_path))
    }

    /// First template in catalog order whose asset exists.
    pub fn first_available(&self) -> Option<&'a TemplateDescriptor> {
        self.available().next()
    }

    fn fallback(&self) -> &'a TemplateDescriptor {
        match self.find(FALLBACK_TEMPLATE_ID) {
            Some(template) => template,
            None => fallback_template(),
        }
    }
}
