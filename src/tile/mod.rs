//! The tile model and its lazy pixel-loading boundary.

/// Tile value type.
pub mod model;
/// Pixel scalar trait.
pub mod pixel;
/// Pixel source trait and the built-in in-memory source.
pub mod source;
