/// Convenience result type used across wellstitch.
pub type StitchResult<T> = Result<T, StitchError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StitchError {
    /// Invalid caller-provided tile sets, shapes, or options.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Shapes that do not satisfy an operation's contract.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Alignment strategy identifier not known to this crate.
    #[error("unknown alignment option: {0}")]
    UnknownAlignment(String),

    /// A tile's pixel data could not be loaded from its source.
    #[error("failed to load tile {path}: {reason}")]
    TileLoad {
        /// Source reference of the tile that failed to load.
        path: String,
        /// Failure description reported by the loading collaborator.
        reason: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StitchError {
    /// Build a [`StitchError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`StitchError::ShapeMismatch`] value.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Build a [`StitchError::UnknownAlignment`] value.
    pub fn unknown_alignment(name: impl Into<String>) -> Self {
        Self::UnknownAlignment(name.into())
    }

    /// Build a [`StitchError::TileLoad`] value.
    pub fn tile_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TileLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
