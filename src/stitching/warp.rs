use ndarray::{Array2, Array3, ArrayViewMut2, s};

use crate::foundation::error::StitchResult;
use crate::stitching::chunk::ChunkContext;
use crate::tile::model::Tile;
use crate::tile::pixel::PixelValue;

/// Translate each tile's pixels into the chunk's local frame, with a coverage
/// mask per tile.
///
/// Returns `(tiles, masks)` stacks shaped `[tile_count, chunk_h, chunk_w]`.
/// Aligned positions are integers, so the translation-only warp is a clipped
/// rectangle copy: pixels a tile does not cover stay at the scalar zero and
/// are masked out. Boundary pixels are exactly foreground or exactly
/// background at the mask level; blending overlap is the fusion step's job.
pub fn translate_tiles<T: PixelValue>(
    tiles: &[&Tile<T>],
    ctx: &ChunkContext,
) -> StitchResult<(Array3<T>, Array3<bool>)> {
    let chunk_h = ctx.shape[3];
    let chunk_w = ctx.shape[4];
    let mut warped = Array3::from_elem((tiles.len(), chunk_h, chunk_w), T::ZERO);
    let mut masks = Array3::from_elem((tiles.len(), chunk_h, chunk_w), false);

    for (slot, tile) in tiles.iter().enumerate() {
        let data = tile.load_data()?;
        copy_into_chunk(
            &data,
            tile,
            ctx,
            warped.slice_mut(s![slot, .., ..]),
            masks.slice_mut(s![slot, .., ..]),
        );
    }
    Ok((warped, masks))
}

fn copy_into_chunk<T: PixelValue>(
    data: &Array2<T>,
    tile: &Tile<T>,
    ctx: &ChunkContext,
    mut warped: ArrayViewMut2<'_, T>,
    mut mask: ArrayViewMut2<'_, bool>,
) {
    let oy = ctx.origin[3] as i64;
    let ox = ctx.origin[4] as i64;
    let (ty0, ty1) = tile.y_interval();
    let (tx0, tx1) = tile.x_interval();

    let y0 = oy.max(ty0);
    let y1 = (oy + ctx.shape[3] as i64).min(ty1);
    let x0 = ox.max(tx0);
    let x1 = (ox + ctx.shape[4] as i64).min(tx1);
    if y1 <= y0 || x1 <= x0 {
        return;
    }

    let src = data.slice(s![
        (y0 - ty0) as usize..(y1 - ty0) as usize,
        (x0 - tx0) as usize..(x1 - tx0) as usize
    ]);
    warped
        .slice_mut(s![
            (y0 - oy) as usize..(y1 - oy) as usize,
            (x0 - ox) as usize..(x1 - ox) as usize
        ])
        .assign(&src);
    mask.slice_mut(s![
        (y0 - oy) as usize..(y1 - oy) as usize,
        (x0 - ox) as usize..(x1 - ox) as usize
    ])
    .fill(true);
}

#[cfg(test)]
#[path = "../../tests/unit/stitching/warp.rs"]
mod tests;
