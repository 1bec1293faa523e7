/// Scalar pixel types the stitcher can fuse.
///
/// Fusion accumulates in `f64` regardless of the stored type and casts back
/// afterwards. The cast back follows Rust `as` semantics: integer targets
/// saturate at the type's bounds and map NaN to zero. Summed overlap on
/// integer pixels therefore clamps at the maximum instead of wrapping.
pub trait PixelValue:
    Copy + Default + PartialOrd + Send + Sync + std::fmt::Debug + 'static
{
    /// Additive identity, used for background fill.
    const ZERO: Self;

    /// Widen to `f64` for accumulation.
    fn to_f64(self) -> f64;

    /// Narrow from `f64` after accumulation.
    fn from_f64(v: f64) -> Self;
}

impl PixelValue for u8 {
    const ZERO: Self = 0;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(v: f64) -> Self {
        v as u8
    }
}

impl PixelValue for u16 {
    const ZERO: Self = 0;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(v: f64) -> Self {
        v as u16
    }
}

impl PixelValue for u32 {
    const ZERO: Self = 0;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(v: f64) -> Self {
        v as u32
    }
}

impl PixelValue for f32 {
    const ZERO: Self = 0.0;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl PixelValue for f64 {
    const ZERO: Self = 0.0;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(v: f64) -> Self {
        v
    }
}
