use ndarray::Array5;
use rayon::prelude::*;

use crate::foundation::error::{StitchError, StitchResult};
use crate::stitching::chunk::ChunkContext;
use crate::stitching::fuse::FusionPolicy;
use crate::stitching::index::ChunkIndex;
use crate::stitching::sink::{ChunkSink, InMemorySink};
use crate::stitching::warp::translate_tiles;
use crate::tile::model::Tile;
use crate::tile::pixel::PixelValue;

/// Compute one output chunk: look up, load, warp and fuse the tiles that
/// touch it.
///
/// Deterministic given its inputs, and the unit of work for any execution
/// layer. Chunks no tile touches come back zero-filled without loading
/// anything. The result carries the chunk's full 5D shape, with singleton
/// time/channel/z axes.
pub fn stitch_chunk<T: PixelValue>(
    ctx: &ChunkContext,
    index: &ChunkIndex<T>,
    fusion: FusionPolicy,
) -> StitchResult<Array5<T>> {
    let [s0, s1, s2, s3, s4] = ctx.shape;
    if s0 != 1 || s1 != 1 || s2 != 1 {
        return Err(StitchError::invalid_input(
            "chunk must span exactly one time/channel/z plane",
        ));
    }

    let tiles: Vec<&Tile<T>> = index.tiles_for_chunk(ctx.address).collect();
    if tiles.is_empty() {
        return Ok(Array5::from_elem(ctx.shape, T::ZERO));
    }

    let (warped, masks) = translate_tiles(&tiles, ctx)?;
    let fused = fusion.fuse(&warped, &masks)?;
    fused
        .into_shape_with_order([1, 1, 1, s3, s4])
        .map_err(|e| StitchError::invalid_input(format!("chunk reshape failed: {e}")))
}

/// Execution options for [`Stitcher::run`].
#[derive(Clone, Debug, Default)]
pub struct StitchOptions {
    /// Compute chunks on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Worker thread count; `None` uses rayon's default. Must be >= 1 when set.
    pub threads: Option<usize>,
}

/// Counters reported by [`Stitcher::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StitchStats {
    /// Chunks visited.
    pub chunks_total: u64,
    /// Chunks with at least one contributing tile.
    pub chunks_fused: u64,
    /// Chunks zero-filled because no tile touches them.
    pub chunks_empty: u64,
}

/// Chunk-parallel stitching driver: walks the chunk grid and feeds a sink.
pub struct Stitcher<T: PixelValue> {
    index: ChunkIndex<T>,
    fusion: FusionPolicy,
}

impl<T: PixelValue> Stitcher<T> {
    /// Create a driver over a prebuilt index.
    pub fn new(index: ChunkIndex<T>, fusion: FusionPolicy) -> Self {
        Self { index, fusion }
    }

    /// The index this driver stitches from.
    pub fn index(&self) -> &ChunkIndex<T> {
        &self.index
    }

    #[tracing::instrument(skip(self, sink), fields(chunks = self.index.grid().chunk_count()))]
    /// Stitch every chunk and deliver each to `sink`.
    ///
    /// Fail-fast: the first chunk error aborts the run, and chunks already
    /// delivered must be discarded by the caller. With `options.parallel`,
    /// chunks are computed on a dedicated rayon pool in no particular order;
    /// sequential and parallel runs produce identical mosaics.
    pub fn run(&self, sink: &dyn ChunkSink<T>, options: &StitchOptions) -> StitchResult<StitchStats> {
        let contexts = self.index.grid().contexts();
        let total = contexts.len() as u64;

        if !options.parallel {
            let mut fused = 0u64;
            for ctx in &contexts {
                fused += u64::from(self.stitch_one(ctx, sink)?);
            }
            return Ok(stats_from(total, fused));
        }

        let pool = build_thread_pool(options.threads)?;
        let fused = pool.install(|| {
            contexts
                .par_iter()
                .map(|ctx| self.stitch_one(ctx, sink).map(u64::from))
                .try_reduce(|| 0, |a, b| Ok(a + b))
        })?;
        Ok(stats_from(total, fused))
    }

    fn stitch_one(&self, ctx: &ChunkContext, sink: &dyn ChunkSink<T>) -> StitchResult<bool> {
        let chunk = stitch_chunk(ctx, &self.index, self.fusion)?;
        sink.write_chunk(ctx, chunk)?;
        Ok(self.index.tile_count_for_chunk(ctx.address) > 0)
    }
}

/// Stitch every chunk into one in-memory mosaic.
///
/// Convenience wrapper over [`Stitcher::run`] with an [`InMemorySink`], for
/// tests and wells that fit in memory.
pub fn stitch_to_array<T: PixelValue>(
    index: ChunkIndex<T>,
    fusion: FusionPolicy,
    options: &StitchOptions,
) -> StitchResult<(Array5<T>, StitchStats)> {
    let sink = InMemorySink::new(index.grid().output_shape());
    let stitcher = Stitcher::new(index, fusion);
    let stats = stitcher.run(&sink, options)?;
    Ok((sink.into_mosaic(), stats))
}

fn stats_from(total: u64, fused: u64) -> StitchStats {
    StitchStats {
        chunks_total: total,
        chunks_fused: fused,
        chunks_empty: total.saturating_sub(fused),
    }
}

fn build_thread_pool(threads: Option<usize>) -> StitchResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StitchError::invalid_input(
            "stitch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StitchError::invalid_input(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/stitching/pipeline.rs"]
mod tests;
