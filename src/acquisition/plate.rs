use std::collections::BTreeMap;

use crate::foundation::error::{StitchError, StitchResult};
use crate::stitching::chunk::well_shape;
use crate::tile::model::Tile;
use crate::tile::pixel::PixelValue;

/// Rendering and calibration metadata for one acquisition channel.
///
/// Produced by vendor metadata parsers and passed through to the mosaic
/// writer; the stitching core never interprets these fields.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChannelMetadata {
    /// Zero-based channel index.
    pub channel_index: usize,
    /// Human-readable channel name.
    pub channel_name: String,
    /// Display color as an RGB hex string.
    pub display_color: String,
    /// Pixel spacing along x, in `spatial_calibration_units`.
    pub spatial_calibration_x: f64,
    /// Pixel spacing along y, in `spatial_calibration_units`.
    pub spatial_calibration_y: f64,
    /// Unit of the spatial calibration values.
    pub spatial_calibration_units: String,
    /// Spacing between z-planes, when the channel was acquired as a stack.
    #[serde(default)]
    pub z_spacing: Option<f64>,
    /// Emission wavelength in nanometers, when known.
    #[serde(default)]
    pub wavelength: Option<u32>,
    /// Exposure time in `exposure_time_unit`.
    #[serde(default)]
    pub exposure_time: Option<f64>,
    /// Unit of `exposure_time`.
    #[serde(default)]
    pub exposure_time_unit: Option<String>,
    /// Objective description.
    #[serde(default)]
    pub objective: Option<String>,
}

/// One imaging well's tiles plus its spacing metadata.
///
/// Vendor collaborators implement the required accessors; the shape helpers
/// are provided. `tiles` must return aligned, origin-normalized tiles.
pub trait WellAcquisition<T: PixelValue> {
    /// Well name, e.g. `"E07"`.
    fn name(&self) -> &str;

    /// Aligned tiles making up this well.
    fn tiles(&self) -> &[Tile<T>];

    /// Pixel spacing `(y, x)` in physical units.
    fn yx_spacing(&self) -> (f64, f64);

    /// Spacing between z-planes, when the well is a stack.
    fn z_spacing(&self) -> Option<f64>;

    /// Axis names of the mosaic produced for this well.
    fn axes(&self) -> Vec<String> {
        ["t", "c", "z", "y", "x"].map(str::to_string).to_vec()
    }

    /// Mosaic shape needed to hold every tile of this well.
    fn shape(&self) -> StitchResult<[usize; 5]> {
        well_shape(self.tiles())
    }

    /// Well name split into row letters and column digits, e.g. `("E", "07")`.
    fn row_col(&self) -> (String, String) {
        let name = self.name();
        let split = name
            .find(|ch: char| ch.is_ascii_digit())
            .unwrap_or(name.len());
        (name[..split].to_string(), name[split..].to_string())
    }
}

/// A plate of wells produced by one acquisition run.
pub trait PlateAcquisition<T: PixelValue> {
    /// Every well in the acquisition, in acquisition order.
    fn wells(&self) -> Vec<&dyn WellAcquisition<T>>;

    /// Channel metadata keyed by channel index; indices may have gaps.
    fn channel_metadata(&self) -> BTreeMap<usize, ChannelMetadata>;

    /// Names of every well, in acquisition order.
    fn well_names(&self) -> Vec<String> {
        self.wells().iter().map(|w| w.name().to_string()).collect()
    }

    /// Smallest shape every well's mosaic fits into, the component-wise
    /// maximum over per-well shapes.
    fn common_well_shape(&self) -> StitchResult<[usize; 5]> {
        let wells = self.wells();
        if wells.is_empty() {
            return Err(StitchError::invalid_input("plate has no wells to measure"));
        }
        let mut common = [0usize; 5];
        for well in wells {
            let shape = well.shape()?;
            for axis in 0..5 {
                common[axis] = common[axis].max(shape[axis]);
            }
        }
        Ok(common)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/acquisition/plate.rs"]
mod tests;
