//! Shared primitives: mosaic-space coordinates, tile extents, and the error taxonomy.

/// Mosaic-space coordinates and tile extents.
pub mod core;
/// Crate-wide error taxonomy.
pub mod error;
