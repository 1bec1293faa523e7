use ndarray::Array2;

use crate::foundation::error::StitchResult;
use crate::tile::pixel::PixelValue;

/// Lazy pixel-loading boundary implemented by storage collaborators.
///
/// Sources are shared immutably across chunk computations and called once per
/// chunk that needs the tile; calls may block on IO. Failures must be reported,
/// not masked, so the enclosing stitch can abort.
pub trait TileSource<T: PixelValue>: Send + Sync {
    /// Load the tile's full pixel array.
    fn load(&self) -> StitchResult<Array2<T>>;
}

/// In-memory source for synthetic data and tests.
#[derive(Clone, Debug)]
pub struct ArrayTileSource<T: PixelValue> {
    data: Array2<T>,
}

impl<T: PixelValue> ArrayTileSource<T> {
    /// Wrap an owned pixel array.
    pub fn new(data: Array2<T>) -> Self {
        Self { data }
    }
}

impl<T: PixelValue> TileSource<T> for ArrayTileSource<T> {
    fn load(&self) -> StitchResult<Array2<T>> {
        Ok(self.data.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/source.rs"]
mod tests;
