use crate::foundation::error::{StitchError, StitchResult};
use crate::tile::model::Tile;
use crate::tile::pixel::PixelValue;

/// Location and extent of one output chunk in the 5D mosaic.
///
/// Constructed by [`ChunkGrid`]; chunk computations depend on nothing but this
/// value, the tile index, and the fusion policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkContext {
    /// Discrete address in the chunk grid, `(t, c, z, y, x)`.
    pub address: [usize; 5],
    /// First pixel of the chunk in output coordinates.
    pub origin: [usize; 5],
    /// Chunk extent, truncated at the far edges of the mosaic.
    pub shape: [usize; 5],
}

/// Regular chunking of a 5D output shape.
///
/// Chunks along time/channel/z always have extent 1, so every chunk spans
/// exactly one `(t, c, z)` plane. The last chunk along y and x is truncated to
/// the mosaic edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkGrid {
    output_shape: [usize; 5],
    chunk_shape: [usize; 5],
    chunk_counts: [usize; 5],
}

impl ChunkGrid {
    /// Create a grid over `output_shape`.
    ///
    /// `chunk_shape` supplies the spatial chunk extent; its time/channel/z
    /// entries are replaced by 1.
    pub fn new(output_shape: [usize; 5], chunk_shape: [usize; 5]) -> StitchResult<Self> {
        if output_shape.iter().any(|&d| d == 0) {
            return Err(StitchError::invalid_input(
                "output shape must be non-zero on every axis",
            ));
        }
        if chunk_shape[3] == 0 || chunk_shape[4] == 0 {
            return Err(StitchError::invalid_input(
                "chunk shape must be non-zero along y and x",
            ));
        }
        let chunk_shape = [1, 1, 1, chunk_shape[3], chunk_shape[4]];
        let chunk_counts = std::array::from_fn(|axis| output_shape[axis].div_ceil(chunk_shape[axis]));
        Ok(Self {
            output_shape,
            chunk_shape,
            chunk_counts,
        })
    }

    /// Full output extent.
    pub fn output_shape(&self) -> [usize; 5] {
        self.output_shape
    }

    /// Normalized chunk extent, always 1 along time/channel/z.
    pub fn chunk_shape(&self) -> [usize; 5] {
        self.chunk_shape
    }

    /// Chunk count along each axis.
    pub fn chunk_counts(&self) -> [usize; 5] {
        self.chunk_counts
    }

    /// Total number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunk_counts.iter().product()
    }

    /// Context for the chunk at `address`.
    ///
    /// Fails when `address` lies outside the grid.
    pub fn context(&self, address: [usize; 5]) -> StitchResult<ChunkContext> {
        for axis in 0..5 {
            if address[axis] >= self.chunk_counts[axis] {
                return Err(StitchError::invalid_input(format!(
                    "chunk address {address:?} outside grid of {:?} chunks",
                    self.chunk_counts
                )));
            }
        }
        Ok(self.context_unchecked(address))
    }

    /// All chunk contexts, in row-major `(t, c, z, y, x)` address order.
    pub fn contexts(&self) -> Vec<ChunkContext> {
        let [nt, nc, nz, ny, nx] = self.chunk_counts;
        let mut out = Vec::with_capacity(self.chunk_count());
        for t in 0..nt {
            for c in 0..nc {
                for z in 0..nz {
                    for y in 0..ny {
                        for x in 0..nx {
                            out.push(self.context_unchecked([t, c, z, y, x]));
                        }
                    }
                }
            }
        }
        out
    }

    fn context_unchecked(&self, address: [usize; 5]) -> ChunkContext {
        let origin = std::array::from_fn(|axis| address[axis] * self.chunk_shape[axis]);
        let shape = std::array::from_fn(|axis| {
            self.chunk_shape[axis].min(self.output_shape[axis] - origin[axis])
        });
        ChunkContext {
            address,
            origin,
            shape,
        }
    }
}

/// Output shape needed to hold every tile: the component-wise maximum of
/// `position + (1, 1, 1, height, width)` over the set.
///
/// This is an upper bound sized from the aligned tiles, not a reconstruction
/// of plate geometry; chunks near the far edges may stay partially empty.
/// Positions must already be origin-normalized.
pub fn well_shape<T: PixelValue>(tiles: &[Tile<T>]) -> StitchResult<[usize; 5]> {
    if tiles.is_empty() {
        return Err(StitchError::invalid_input("no tiles to measure"));
    }
    let mut shape = [0i64; 5];
    for tile in tiles {
        if tile.position.to_array().iter().any(|&p| p < 0) {
            return Err(StitchError::invalid_input(format!(
                "tile {} has a negative position component; align tiles first",
                tile.path
            )));
        }
        let corner = tile.extent_max();
        for axis in 0..5 {
            shape[axis] = shape[axis].max(corner[axis]);
        }
    }
    Ok(shape.map(|d| d as usize))
}

#[cfg(test)]
#[path = "../../tests/unit/stitching/chunk.rs"]
mod tests;
