pub mod catalog;
pub mod locator;
pub mod model;
pub mod registry;

pub use catalog::{CATALOG, FALLBACK_TEMPLATE_ID};
pub use locator::AssetLocator;
pub use model::{
    Align, CanvasSize, Point, Rgb, StrokeMode, TemplateDescriptor, TextOverlaySpec, WrapMode,
};
pub use registry::TemplateRegistry;
