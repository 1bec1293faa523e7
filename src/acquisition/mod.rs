//! Acquisition boundary implemented by vendor-specific collaborators.

/// Plate and well traits plus channel metadata.
pub mod plate;
