use std::sync::Arc;

use ndarray::Array2;

use crate::foundation::core::{TilePosition, TileShape};
use crate::foundation::error::{StitchError, StitchResult};
use crate::tile::pixel::PixelValue;
use crate::tile::source::TileSource;

/// One captured image field: a pixel-data reference plus its placement in
/// mosaic space.
///
/// Tiles are values; alignment produces new tiles with adjusted positions
/// around the same source handle. Pixel data is loaded lazily through
/// [`TileSource`], never at construction.
#[derive(Clone)]
pub struct Tile<T: PixelValue> {
    /// Opaque reference to the pixel data, owned by the storage collaborator.
    pub path: String,
    /// Declared pixel extent; loaded data must match.
    pub shape: TileShape,
    /// Placement in `(time, channel, z, y, x)` mosaic space.
    pub position: TilePosition,
    /// Optional reference to a background correction matrix, passed through
    /// to the loading collaborator and never interpreted here.
    pub background_correction: Option<String>,
    /// Optional reference to an illumination correction matrix.
    pub illumination_correction: Option<String>,
    source: Arc<dyn TileSource<T>>,
}

impl<T: PixelValue> Tile<T> {
    /// Create a tile over `source`, placed at `position`.
    pub fn new(
        path: impl Into<String>,
        shape: TileShape,
        position: TilePosition,
        source: Arc<dyn TileSource<T>>,
    ) -> Self {
        Self {
            path: path.into(),
            shape,
            position,
            background_correction: None,
            illumination_correction: None,
            source,
        }
    }

    /// Attach correction-matrix references.
    pub fn with_corrections(
        mut self,
        background: Option<String>,
        illumination: Option<String>,
    ) -> Self {
        self.background_correction = background;
        self.illumination_correction = illumination;
        self
    }

    /// The same tile placed at `position`.
    pub fn at_position(&self, position: TilePosition) -> Self {
        let mut tile = self.clone();
        tile.position = position;
        tile
    }

    /// Load the tile's pixel data through its source.
    ///
    /// Source failures come back as [`StitchError::TileLoad`] carrying this
    /// tile's path. Loaded data whose dimensions disagree with the declared
    /// [`TileShape`] fails with [`StitchError::ShapeMismatch`].
    pub fn load_data(&self) -> StitchResult<Array2<T>> {
        let data = self.source.load().map_err(|e| match e {
            StitchError::TileLoad { .. } => e,
            other => StitchError::tile_load(&self.path, other.to_string()),
        })?;
        let (h, w) = data.dim();
        if h != self.shape.height || w != self.shape.width {
            return Err(StitchError::shape_mismatch(format!(
                "tile {} loaded as {}x{} but is declared {}x{}",
                self.path, h, w, self.shape.height, self.shape.width
            )));
        }
        Ok(data)
    }

    /// Half-open pixel interval covered along y, `[y, y + height)`.
    pub fn y_interval(&self) -> (i64, i64) {
        (self.position.y, self.position.y + self.shape.height as i64)
    }

    /// Half-open pixel interval covered along x, `[x, x + width)`.
    pub fn x_interval(&self) -> (i64, i64) {
        (self.position.x, self.position.x + self.shape.width as i64)
    }

    /// Upper corner of the tile's 5D extent, `position + (1, 1, 1, height, width)`.
    pub fn extent_max(&self) -> [i64; 5] {
        let p = self.position;
        [
            p.time + 1,
            p.channel + 1,
            p.z + 1,
            p.y + self.shape.height as i64,
            p.x + self.shape.width as i64,
        ]
    }
}

impl<T: PixelValue> std::fmt::Debug for Tile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tile")
            .field("path", &self.path)
            .field("shape", &self.shape)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<T: PixelValue> std::fmt::Display for Tile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/model.rs"]
mod tests;
