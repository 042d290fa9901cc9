pub mod media;
pub mod text;

pub use media::{Filename, MediaValidationError, local_preview_url};
pub use text::RichText;
