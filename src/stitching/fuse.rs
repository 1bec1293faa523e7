use ndarray::{Array2, Array3, Axis, Zip};

use crate::foundation::error::{StitchError, StitchResult};
use crate::tile::pixel::PixelValue;

/// Rules for combining overlapping tile pixels within one chunk.
///
/// Both kernels accumulate in `f64` and cast back to the pixel type at the
/// end; for integer pixel types the cast saturates, so summed overlap clamps
/// at the type's maximum instead of wrapping. The two policies treat masks
/// differently on purpose: mean averages only real coverage, sum accumulates
/// everything (photon-count convention).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FusionPolicy {
    /// Average the tiles covering each pixel; uncovered pixels stay zero.
    Mean,
    /// Sum every tile's contribution, masks ignored.
    Sum,
}

impl FusionPolicy {
    /// Resolve a policy from its identifier, `"mean"` or `"sum"`.
    pub fn from_name(name: &str) -> StitchResult<Self> {
        match name {
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            other => Err(StitchError::invalid_input(format!(
                "unknown fusion policy: {other}"
            ))),
        }
    }

    /// Fuse a warped tile stack into one chunk plane.
    ///
    /// `tiles` and `masks` must share the `[tile_count, chunk_h, chunk_w]`
    /// geometry produced by [`translate_tiles`](crate::translate_tiles).
    pub fn fuse<T: PixelValue>(
        self,
        tiles: &Array3<T>,
        masks: &Array3<bool>,
    ) -> StitchResult<Array2<T>> {
        if masks.dim() != tiles.dim() {
            return Err(StitchError::shape_mismatch(format!(
                "mask stack {:?} does not match tile stack {:?}",
                masks.dim(),
                tiles.dim()
            )));
        }
        match self {
            FusionPolicy::Mean => Ok(fuse_mean(tiles, masks)),
            FusionPolicy::Sum => Ok(fuse_sum(tiles)),
        }
    }
}

fn fuse_mean<T: PixelValue>(tiles: &Array3<T>, masks: &Array3<bool>) -> Array2<T> {
    let (n, h, w) = tiles.dim();
    let mut acc = Array2::<f64>::zeros((h, w));
    let mut cover = Array2::<f64>::zeros((h, w));
    for slot in 0..n {
        let plane = tiles.index_axis(Axis(0), slot);
        let mask = masks.index_axis(Axis(0), slot);
        Zip::from(&mut acc)
            .and(&mut cover)
            .and(&plane)
            .and(&mask)
            .for_each(|a, c, &v, &m| {
                if m {
                    *a += v.to_f64();
                    *c += 1.0;
                }
            });
    }
    Zip::from(&acc)
        .and(&cover)
        .map_collect(|&a, &c| if c > 0.0 { T::from_f64(a / c) } else { T::ZERO })
}

fn fuse_sum<T: PixelValue>(tiles: &Array3<T>) -> Array2<T> {
    let (n, h, w) = tiles.dim();
    let mut acc = Array2::<f64>::zeros((h, w));
    for slot in 0..n {
        let plane = tiles.index_axis(Axis(0), slot);
        Zip::from(&mut acc).and(&plane).for_each(|a, &v| *a += v.to_f64());
    }
    acc.map(|&a| T::from_f64(a))
}

#[cfg(test)]
#[path = "../../tests/unit/stitching/fuse.rs"]
mod tests;
