use crate::foundation::error::{StitchError, StitchResult};

/// Placement of a tile in 5D mosaic space, `(time, channel, z, y, x)`.
///
/// `time`, `channel` and `z` are indices; `y` and `x` are pixel offsets. Raw
/// stage coordinates may be negative; [`shift_to_origin`](crate::shift_to_origin)
/// normalizes a tile set so every component is `>= 0`. The derived ordering is
/// lexicographic in `(time, channel, z, y, x)`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TilePosition {
    /// Time-point index.
    pub time: i64,
    /// Channel index.
    pub channel: i64,
    /// Z-plane index.
    pub z: i64,
    /// Vertical pixel offset.
    pub y: i64,
    /// Horizontal pixel offset.
    pub x: i64,
}

impl TilePosition {
    /// Create a position from `(time, channel, z, y, x)`.
    pub fn new(time: i64, channel: i64, z: i64, y: i64, x: i64) -> Self {
        Self {
            time,
            channel,
            z,
            y,
            x,
        }
    }

    /// Components as `[time, channel, z, y, x]`.
    pub fn to_array(self) -> [i64; 5] {
        [self.time, self.channel, self.z, self.y, self.x]
    }

    /// Component-wise minimum of two positions.
    pub fn min(self, other: Self) -> Self {
        Self {
            time: self.time.min(other.time),
            channel: self.channel.min(other.channel),
            z: self.z.min(other.z),
            y: self.y.min(other.y),
            x: self.x.min(other.x),
        }
    }

    /// Component-wise maximum of two positions.
    pub fn max(self, other: Self) -> Self {
        Self {
            time: self.time.max(other.time),
            channel: self.channel.max(other.channel),
            z: self.z.max(other.z),
            y: self.y.max(other.y),
            x: self.x.max(other.x),
        }
    }
}

impl std::ops::Sub for TilePosition {
    type Output = TilePosition;

    fn sub(self, rhs: TilePosition) -> TilePosition {
        Self {
            time: self.time - rhs.time,
            channel: self.channel - rhs.channel,
            z: self.z - rhs.z,
            y: self.y - rhs.y,
            x: self.x - rhs.x,
        }
    }
}

/// Pixel extent of a tile, `(height, width)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TileShape {
    /// Rows of pixels.
    pub height: usize,
    /// Columns of pixels.
    pub width: usize,
}

impl TileShape {
    /// Create a validated shape, non-zero on both axes.
    pub fn new(height: usize, width: usize) -> StitchResult<Self> {
        if height == 0 || width == 0 {
            return Err(StitchError::invalid_input(
                "tile shape must be non-zero on both axes",
            ));
        }
        Ok(Self { height, width })
    }

    /// The 5D extent one tile of this shape occupies, `[1, 1, 1, height, width]`.
    pub fn extent(self) -> [i64; 5] {
        [1, 1, 1, self.height as i64, self.width as i64]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
