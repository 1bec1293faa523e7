use std::sync::Mutex;

use ndarray::{Array5, s};

use crate::foundation::error::{StitchError, StitchResult};
use crate::stitching::chunk::ChunkContext;
use crate::tile::pixel::PixelValue;

/// Write-once consumer of finished chunks.
///
/// `write_chunk` may be called from worker threads in any order, so
/// implementations must tolerate concurrent calls; the driver guarantees the
/// chunk regions are disjoint and each address is delivered at most once per
/// stitch. Keeping writes to disjoint regions conflict-free is the
/// implementor's contract.
pub trait ChunkSink<T: PixelValue>: Send + Sync {
    /// Deliver one finished chunk.
    fn write_chunk(&self, ctx: &ChunkContext, chunk: Array5<T>) -> StitchResult<()>;
}

/// Sink that assembles chunks into one in-memory mosaic, for tests and wells
/// that fit in memory.
pub struct InMemorySink<T: PixelValue> {
    mosaic: Mutex<Array5<T>>,
}

impl<T: PixelValue> InMemorySink<T> {
    /// Allocate a zeroed mosaic of `output_shape`.
    pub fn new(output_shape: [usize; 5]) -> Self {
        Self {
            mosaic: Mutex::new(Array5::from_elem(output_shape, T::ZERO)),
        }
    }

    /// Take the assembled mosaic out of the sink.
    pub fn into_mosaic(self) -> Array5<T> {
        self.mosaic
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: PixelValue> ChunkSink<T> for InMemorySink<T> {
    fn write_chunk(&self, ctx: &ChunkContext, chunk: Array5<T>) -> StitchResult<()> {
        if chunk.shape() != ctx.shape.as_slice() {
            return Err(StitchError::shape_mismatch(format!(
                "chunk data {:?} does not match its context shape {:?}",
                chunk.shape(),
                ctx.shape
            )));
        }
        let mut mosaic = self
            .mosaic
            .lock()
            .map_err(|_| StitchError::invalid_input("in-memory sink mutex poisoned"))?;
        let [o0, o1, o2, o3, o4] = ctx.origin;
        let [s0, s1, s2, s3, s4] = ctx.shape;
        if mosaic.shape()[0] < o0 + s0
            || mosaic.shape()[1] < o1 + s1
            || mosaic.shape()[2] < o2 + s2
            || mosaic.shape()[3] < o3 + s3
            || mosaic.shape()[4] < o4 + s4
        {
            return Err(StitchError::shape_mismatch(format!(
                "chunk at {:?} with shape {:?} does not fit mosaic {:?}",
                ctx.origin,
                ctx.shape,
                mosaic.shape()
            )));
        }
        mosaic
            .slice_mut(s![
                o0..o0 + s0,
                o1..o1 + s1,
                o2..o2 + s2,
                o3..o3 + s3,
                o4..o4 + s4
            ])
            .assign(&chunk);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stitching/sink.rs"]
mod tests;
