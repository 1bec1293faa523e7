//! Chunked mosaic assembly: chunk geometry, tile index, warp, fusion, driver,
//! and sinks.

/// Chunk grid geometry and well extents.
pub mod chunk;
/// Fusion policies combining overlapping tiles.
pub mod fuse;
/// Chunk-to-tile index.
pub mod index;
/// Chunk assembly and the stitch driver.
pub mod pipeline;
/// Chunk sinks consuming finished chunks.
pub mod sink;
/// Translation warps and coverage masks.
pub mod warp;
