use super::*;

use std::sync::Arc;

use ndarray::Array2;

use crate::foundation::core::{TilePosition, TileShape};
use crate::stitching::chunk::ChunkContext;
use crate::tile::source::ArrayTileSource;

fn tile(pos: [i64; 5], h: usize, w: usize) -> Tile<u16> {
    Tile::new(
        format!("tile_{pos:?}"),
        TileShape::new(h, w).unwrap(),
        TilePosition::new(pos[0], pos[1], pos[2], pos[3], pos[4]),
        Arc::new(ArrayTileSource::new(Array2::<u16>::zeros((h, w)))),
    )
}

/// Half-open interval overlap along y/x, exact equality along t/c/z.
fn intersects(tile: &Tile<u16>, ctx: &ChunkContext) -> bool {
    let p = tile.position;
    if p.time != ctx.origin[0] as i64
        || p.channel != ctx.origin[1] as i64
        || p.z != ctx.origin[2] as i64
    {
        return false;
    }
    let (ty0, ty1) = tile.y_interval();
    let (tx0, tx1) = tile.x_interval();
    let cy0 = ctx.origin[3] as i64;
    let cy1 = cy0 + ctx.shape[3] as i64;
    let cx0 = ctx.origin[4] as i64;
    let cx1 = cx0 + ctx.shape[4] as i64;
    ty0 < cy1 && cy0 < ty1 && tx0 < cx1 && cx0 < tx1
}

#[test]
fn index_matches_brute_force_intersection() {
    // Overlapping stage-aligned tiles across two channels and a z-stack,
    // deliberately not on any lattice.
    let tiles = vec![
        tile([0, 0, 0, 0, 0], 12, 17),
        tile([0, 0, 0, 7, 13], 12, 17),
        tile([0, 0, 0, 20, 3], 12, 17),
        tile([0, 1, 0, 0, 0], 12, 17),
        tile([0, 1, 0, 7, 13], 12, 17),
        tile([0, 0, 1, 3, 8], 12, 17),
        tile([0, 0, 0, 28, 28], 12, 17),
    ];
    let output_shape = [1, 2, 2, 40, 40];
    let index = ChunkIndex::build(tiles.clone(), output_shape, [1, 1, 1, 10, 15]).unwrap();

    for ctx in index.grid().contexts() {
        let expected: Vec<String> = tiles
            .iter()
            .filter(|t| intersects(t, &ctx))
            .map(|t| t.path.clone())
            .collect();
        let got: Vec<String> = index
            .tiles_for_chunk(ctx.address)
            .map(|t| t.path.clone())
            .collect();
        assert_eq!(got, expected, "chunk {:?}", ctx.address);
        assert_eq!(index.tile_count_for_chunk(ctx.address), expected.len());
    }
}

#[test]
fn tiles_outside_the_output_contribute_nowhere() {
    let tiles = vec![
        tile([0, 0, 0, 0, 0], 10, 10),
        // Beyond the spatial extent.
        tile([0, 0, 0, 50, 0], 10, 10),
        // Channel plane the output does not have.
        tile([0, 3, 0, 0, 0], 10, 10),
    ];
    let index = ChunkIndex::build(tiles, [1, 1, 1, 20, 20], [1, 1, 1, 10, 10]).unwrap();
    let total: usize = index
        .grid()
        .contexts()
        .iter()
        .map(|ctx| index.tile_count_for_chunk(ctx.address))
        .sum();
    assert_eq!(total, 1);
}

#[test]
fn tile_spanning_many_chunks_appears_in_each() {
    let tiles = vec![tile([0, 0, 0, 5, 5], 20, 20)];
    let index = ChunkIndex::build(tiles, [1, 1, 1, 30, 30], [1, 1, 1, 10, 10]).unwrap();
    let touched: Vec<[usize; 5]> = index
        .grid()
        .contexts()
        .iter()
        .filter(|ctx| index.tile_count_for_chunk(ctx.address) > 0)
        .map(|ctx| ctx.address)
        .collect();
    assert_eq!(touched.len(), 9);
    assert!(touched.contains(&[0, 0, 0, 0, 0]));
    assert!(touched.contains(&[0, 0, 0, 2, 2]));
}

#[test]
fn per_chunk_tiles_keep_input_order() {
    let tiles = vec![
        tile([0, 0, 0, 0, 4], 8, 8),
        tile([0, 0, 0, 2, 0], 8, 8),
        tile([0, 0, 0, 4, 2], 8, 8),
    ];
    let index = ChunkIndex::build(tiles.clone(), [1, 1, 1, 16, 16], [1, 1, 1, 16, 16]).unwrap();
    let got: Vec<String> = index
        .tiles_for_chunk([0, 0, 0, 0, 0])
        .map(|t| t.path.clone())
        .collect();
    let expected: Vec<String> = tiles.iter().map(|t| t.path.clone()).collect();
    assert_eq!(got, expected);
}

#[test]
fn build_rejects_unaligned_tiles() {
    let tiles = vec![tile([0, 0, 0, 0, -3], 8, 8)];
    let err = ChunkIndex::build(tiles, [1, 1, 1, 16, 16], [1, 1, 1, 8, 8]).unwrap_err();
    assert!(matches!(err, StitchError::InvalidInput(_)));
}
