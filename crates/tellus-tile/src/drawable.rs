use glam::Mat4;
use tellus_math::DAabb;

/// An elevation height grid handle.
///
/// The tile core never samples the grid; it only forwards the handle to
/// the drawable, which uses it for height-displaced rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationRaster {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl ElevationRaster {
    /// Create a raster from row-major height samples.
    pub fn new(width: u32, height: u32, samples: Vec<f32>) -> Self {
        debug_assert_eq!(
            samples.len(),
            (width * height) as usize,
            "sample count must match {width}x{height}"
        );
        Self {
            width,
            height,
            samples,
        }
    }

    /// Grid width in samples.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in samples.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major height samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

/// The drawable collaborator that owns a tile's renderable geometry.
///
/// The tile core forwards elevation data through this seam and reads the
/// local-space bounding box back. Implementations must reflect a raster
/// passed to [`set_elevation_raster`] in the next [`bounding_box`] call,
/// synchronously, with no caching lag.
///
/// [`set_elevation_raster`]: TileDrawable::set_elevation_raster
/// [`bounding_box`]: TileDrawable::bounding_box
pub trait TileDrawable {
    /// Receive a new elevation raster and the scale/bias matrix that maps
    /// this tile's texture coordinates into the raster.
    fn set_elevation_raster(&mut self, raster: ElevationRaster, scale_bias: Mat4);

    /// The raster most recently set, if any.
    fn elevation_raster(&self) -> Option<&ElevationRaster>;

    /// The scale/bias matrix accompanying the current raster.
    fn elevation_matrix(&self) -> Mat4;

    /// The drawable's local-space bounding box, reflecting any elevation
    /// raster previously set.
    fn bounding_box(&self) -> DAabb;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_accessors() {
        let raster = ElevationRaster::new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.samples().len(), 6);
    }

    #[test]
    #[should_panic(expected = "sample count")]
    #[cfg(debug_assertions)]
    fn test_mismatched_sample_count_panics() {
        ElevationRaster::new(4, 4, vec![0.0; 3]);
    }
}
