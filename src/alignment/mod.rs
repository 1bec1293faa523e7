//! Strategies resolving tile positions into one consistent mosaic frame.

/// Strategy enum and alignment entry points.
pub mod strategy;
