use std::collections::BTreeMap;

use crate::foundation::core::TilePosition;
use crate::foundation::error::{StitchError, StitchResult};
use crate::tile::model::Tile;
use crate::tile::pixel::PixelValue;

/// Strategies for resolving tile positions into one consistent mosaic frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AlignmentStrategy {
    /// Keep origin-shifted stage coordinates exactly as measured.
    Stage,
    /// Snap tiles onto the regular lattice implied by a uniform tile shape.
    Grid,
}

impl AlignmentStrategy {
    /// Resolve a strategy from its identifier.
    ///
    /// Accepts the short names `"stage"` / `"grid"` and the long spellings
    /// `"StageAlignment"` / `"GridAlignment"` carried by acquisition metadata.
    pub fn from_name(name: &str) -> StitchResult<Self> {
        match name {
            "stage" | "StageAlignment" => Ok(Self::Stage),
            "grid" | "GridAlignment" => Ok(Self::Grid),
            other => Err(StitchError::unknown_alignment(other)),
        }
    }
}

/// Shift a tile set so its per-axis minimum position becomes the origin.
///
/// Returns new tiles in input order; the result's component-wise minimum over
/// all positions is exactly zero. Fails on an empty tile set.
pub fn shift_to_origin<T: PixelValue>(tiles: &[Tile<T>]) -> StitchResult<Vec<Tile<T>>> {
    let origin = min_position(tiles)?;
    Ok(tiles
        .iter()
        .map(|t| t.at_position(t.position - origin))
        .collect())
}

fn min_position<T: PixelValue>(tiles: &[Tile<T>]) -> StitchResult<TilePosition> {
    let mut it = tiles.iter();
    let first = it
        .next()
        .ok_or_else(|| StitchError::invalid_input("no tiles to align"))?;
    Ok(it.fold(first.position, |acc, t| acc.min(t.position)))
}

#[tracing::instrument(skip(tiles), fields(tiles = tiles.len()))]
/// Align tiles with the requested strategy.
///
/// Positions are origin-shifted first; the strategy then decides whether the
/// measured offsets are kept ([`AlignmentStrategy::Stage`]) or quantized onto
/// the tile lattice ([`AlignmentStrategy::Grid`]). Grid alignment requires all
/// tiles to share one shape and emits tiles in row-major order over the
/// occupied grid cells.
pub fn align<T: PixelValue>(
    tiles: &[Tile<T>],
    strategy: AlignmentStrategy,
) -> StitchResult<Vec<Tile<T>>> {
    let shifted = shift_to_origin(tiles)?;
    match strategy {
        AlignmentStrategy::Stage => Ok(shifted),
        AlignmentStrategy::Grid => align_grid(shifted),
    }
}

fn align_grid<T: PixelValue>(tiles: Vec<Tile<T>>) -> StitchResult<Vec<Tile<T>>> {
    let Some(shape) = tiles.first().map(|t| t.shape) else {
        return Ok(tiles);
    };
    if tiles.iter().any(|t| t.shape != shape) {
        return Err(StitchError::shape_mismatch(
            "grid alignment requires all tiles to share one shape",
        ));
    }

    let height = shape.height as i64;
    let width = shape.width as i64;

    // BTreeMap iteration is sorted by (row, col), which fixes the row-major
    // output order regardless of input order. A cell may hold several tiles
    // (same field imaged at different time/channel/z); those keep input order.
    let mut cells: BTreeMap<(i64, i64), Vec<Tile<T>>> = BTreeMap::new();
    for tile in tiles {
        let row = tile.position.y.div_euclid(height);
        let col = tile.position.x.div_euclid(width);
        cells.entry((row, col)).or_default().push(tile);
    }

    let mut aligned = Vec::new();
    for ((row, col), cell) in cells {
        for mut tile in cell {
            tile.position.y = row * height;
            tile.position.x = col * width;
            aligned.push(tile);
        }
    }
    Ok(aligned)
}

#[cfg(test)]
#[path = "../../tests/unit/alignment/strategy.rs"]
mod tests;
