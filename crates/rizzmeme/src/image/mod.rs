pub mod builtin_font;
pub mod compositor;
pub mod draw;
pub mod font;
pub mod layout;
pub mod placeholder;

pub use compositor::{Compositor, encode_png};
pub use font::{FontHandle, FontResolver};
