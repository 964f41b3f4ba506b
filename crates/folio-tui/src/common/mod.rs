//! Shared rendering helpers.

pub mod palette;
pub mod text;

pub use palette::Palette;
pub use text::{meter, truncate_with_ellipsis};
