use super::*;

use std::sync::Arc;

use ndarray::Array2;

use crate::foundation::core::{TilePosition, TileShape};
use crate::tile::source::ArrayTileSource;

fn tile(pos: [i64; 5], h: usize, w: usize) -> Tile<u16> {
    Tile::new(
        format!("tile_{pos:?}"),
        TileShape::new(h, w).unwrap(),
        TilePosition::new(pos[0], pos[1], pos[2], pos[3], pos[4]),
        Arc::new(ArrayTileSource::new(Array2::<u16>::zeros((h, w)))),
    )
}

#[test]
fn grid_rejects_zero_extents() {
    assert!(ChunkGrid::new([1, 1, 1, 0, 10], [1, 1, 1, 5, 5]).is_err());
    assert!(ChunkGrid::new([1, 1, 1, 10, 10], [1, 1, 1, 0, 5]).is_err());
    assert!(ChunkGrid::new([1, 1, 1, 10, 10], [1, 1, 1, 5, 0]).is_err());
}

#[test]
fn grid_forces_unit_chunks_on_leading_axes() {
    let grid = ChunkGrid::new([2, 3, 4, 10, 10], [2, 3, 4, 5, 5]).unwrap();
    assert_eq!(grid.chunk_shape(), [1, 1, 1, 5, 5]);
    assert_eq!(grid.chunk_counts(), [2, 3, 4, 2, 2]);
    assert_eq!(grid.chunk_count(), 2 * 3 * 4 * 2 * 2);
}

#[test]
fn context_truncates_at_the_far_edges() {
    let grid = ChunkGrid::new([1, 1, 1, 25, 30], [1, 1, 1, 10, 16]).unwrap();
    assert_eq!(grid.chunk_counts(), [1, 1, 1, 3, 2]);

    let interior = grid.context([0, 0, 0, 1, 0]).unwrap();
    assert_eq!(interior.origin, [0, 0, 0, 10, 0]);
    assert_eq!(interior.shape, [1, 1, 1, 10, 16]);

    let edge = grid.context([0, 0, 0, 2, 1]).unwrap();
    assert_eq!(edge.origin, [0, 0, 0, 20, 16]);
    assert_eq!(edge.shape, [1, 1, 1, 5, 14]);
}

#[test]
fn context_rejects_addresses_outside_the_grid() {
    let grid = ChunkGrid::new([1, 1, 1, 10, 10], [1, 1, 1, 5, 5]).unwrap();
    let err = grid.context([0, 0, 0, 2, 0]).unwrap_err();
    assert!(matches!(err, StitchError::InvalidInput(_)));
}

#[test]
fn contexts_cover_every_address_in_row_major_order() {
    let grid = ChunkGrid::new([1, 2, 1, 10, 10], [1, 1, 1, 5, 10]).unwrap();
    let contexts = grid.contexts();
    assert_eq!(contexts.len(), grid.chunk_count());
    let addresses: Vec<_> = contexts.iter().map(|c| c.address).collect();
    assert_eq!(
        addresses,
        vec![
            [0, 0, 0, 0, 0],
            [0, 0, 0, 1, 0],
            [0, 1, 0, 0, 0],
            [0, 1, 0, 1, 0],
        ]
    );
}

#[test]
fn well_shape_is_the_component_wise_extent_max() {
    let tiles = vec![
        tile([0, 0, 0, 0, 0], 10, 10),
        tile([0, 2, 0, 0, 10], 10, 10),
        tile([1, 0, 3, 15, 5], 10, 10),
    ];
    assert_eq!(well_shape(&tiles).unwrap(), [2, 3, 4, 25, 20]);
}

#[test]
fn well_shape_rejects_empty_and_unaligned_input() {
    assert!(matches!(
        well_shape::<u16>(&[]).unwrap_err(),
        StitchError::InvalidInput(_)
    ));
    let unaligned = vec![tile([0, 0, 0, -5, 0], 10, 10)];
    assert!(matches!(
        well_shape(&unaligned).unwrap_err(),
        StitchError::InvalidInput(_)
    ));
}
