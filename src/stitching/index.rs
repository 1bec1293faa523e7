use std::collections::HashMap;

use crate::foundation::error::{StitchError, StitchResult};
use crate::stitching::chunk::ChunkGrid;
use crate::tile::model::Tile;
use crate::tile::pixel::PixelValue;

/// Precomputed map from chunk address to the tiles that intersect it.
///
/// Built once per stitch and shared read-only across chunk computations.
/// Spatial intersection is half-open interval overlap along y and x;
/// time/channel/z must match the chunk's plane exactly. Each chunk's tiles
/// keep the input order, which fixes the fusion stacking order.
#[derive(Debug)]
pub struct ChunkIndex<T: PixelValue> {
    grid: ChunkGrid,
    tiles: Vec<Tile<T>>,
    by_chunk: HashMap<[usize; 5], Vec<usize>>,
}

impl<T: PixelValue> ChunkIndex<T> {
    #[tracing::instrument(skip(tiles), fields(tiles = tiles.len()))]
    /// Index `tiles` against the chunking of `output_shape`.
    ///
    /// Tiles, or tile parts, lying outside `output_shape` contribute to no
    /// chunk; that is not an error. Tile positions must be origin-normalized.
    pub fn build(
        tiles: Vec<Tile<T>>,
        output_shape: [usize; 5],
        chunk_shape: [usize; 5],
    ) -> StitchResult<Self> {
        let grid = ChunkGrid::new(output_shape, chunk_shape)?;
        let counts = grid.chunk_counts();
        let [_, _, _, chunk_h, chunk_w] = grid.chunk_shape();

        let mut by_chunk: HashMap<[usize; 5], Vec<usize>> = HashMap::new();
        for (tile_idx, tile) in tiles.iter().enumerate() {
            let p = tile.position;
            if p.to_array().iter().any(|&v| v < 0) {
                return Err(StitchError::invalid_input(format!(
                    "tile {} has a negative position component; align tiles first",
                    tile.path
                )));
            }

            // Chunks have extent 1 along t/c/z, so the plane indices are chunk
            // addresses directly; a plane outside the output drops the tile.
            let (t, c, z) = (p.time as usize, p.channel as usize, p.z as usize);
            if t >= counts[0] || c >= counts[1] || z >= counts[2] {
                continue;
            }

            let first_cy = p.y as usize / chunk_h;
            let first_cx = p.x as usize / chunk_w;
            if first_cy >= counts[3] || first_cx >= counts[4] {
                continue;
            }
            let last_cy = ((p.y as usize + tile.shape.height - 1) / chunk_h).min(counts[3] - 1);
            let last_cx = ((p.x as usize + tile.shape.width - 1) / chunk_w).min(counts[4] - 1);

            for cy in first_cy..=last_cy {
                for cx in first_cx..=last_cx {
                    by_chunk.entry([t, c, z, cy, cx]).or_default().push(tile_idx);
                }
            }
        }

        Ok(Self {
            grid,
            tiles,
            by_chunk,
        })
    }

    /// The chunk grid this index was built for.
    pub fn grid(&self) -> &ChunkGrid {
        &self.grid
    }

    /// All indexed tiles, in input order.
    pub fn tiles(&self) -> &[Tile<T>] {
        &self.tiles
    }

    /// Tiles intersecting the chunk at `address`, in input order.
    pub fn tiles_for_chunk(&self, address: [usize; 5]) -> impl Iterator<Item = &Tile<T>> {
        self.by_chunk
            .get(&address)
            .into_iter()
            .flatten()
            .map(|&i| &self.tiles[i])
    }

    /// Number of tiles intersecting the chunk at `address`.
    pub fn tile_count_for_chunk(&self, address: [usize; 5]) -> usize {
        self.by_chunk.get(&address).map_or(0, Vec::len)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stitching/index.rs"]
mod tests;
