//! wellstitch turns per-well microscope tile collections into stitched
//! mosaics.
//!
//! The crate is the alignment and chunked-stitching core of a
//! high-content-screening pipeline: vendor collaborators discover tiles and
//! parse stage metadata, this crate reconciles tile positions and assembles
//! the output mosaic in independent chunks, and a storage collaborator
//! persists the finished chunks.
//!
//! # Pipeline overview
//!
//! 1. **Align**: [`align`] normalizes tile positions to the origin and
//!    optionally snaps them onto the tile lattice.
//! 2. **Size**: [`well_shape`] computes the output extent the aligned tiles
//!    need.
//! 3. **Index**: [`ChunkIndex::build`] maps every output chunk to the tiles
//!    that touch it.
//! 4. **Stitch**: [`Stitcher::run`] warps and fuses each chunk's tiles and
//!    hands the finished chunk to a [`ChunkSink`].
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: alignment and chunk assembly are pure and
//!   stable for a given input; parallel and sequential runs produce identical
//!   mosaics.
//! - **Chunks are independent**: no chunk computation observes another's
//!   output, so mosaics far larger than memory stream through one chunk at a
//!   time per worker.
//! - **No IO in the core**: pixel data enters through the [`TileSource`]
//!   boundary and leaves through the [`ChunkSink`] boundary; file formats are
//!   the collaborators' business.
#![deny(unsafe_code)]
#![deny(missing_docs)]

mod acquisition;
mod alignment;
mod foundation;
mod stitching;
mod tile;

pub use acquisition::plate::{ChannelMetadata, PlateAcquisition, WellAcquisition};
pub use alignment::strategy::{AlignmentStrategy, align, shift_to_origin};
pub use foundation::core::{TilePosition, TileShape};
pub use foundation::error::{StitchError, StitchResult};
pub use stitching::chunk::{ChunkContext, ChunkGrid, well_shape};
pub use stitching::fuse::FusionPolicy;
pub use stitching::index::ChunkIndex;
pub use stitching::pipeline::{
    StitchOptions, StitchStats, Stitcher, stitch_chunk, stitch_to_array,
};
pub use stitching::sink::{ChunkSink, InMemorySink};
pub use stitching::warp::translate_tiles;
pub use tile::model::Tile;
pub use tile::pixel::PixelValue;
pub use tile::source::{ArrayTileSource, TileSource};
