//! Pixel-to-data mapping composed from the X and Y axis calibrations.

use super::axis::AxisCalibration;
use super::coord::{AxisKind, XYPoint};
use super::error::Result;

/// Maps original-image pixel positions to chart data coordinates.
///
/// The two axes are never coupled: X values depend only on the pixel column
/// and Y values only on the pixel row.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    x: AxisCalibration,
    y: AxisCalibration,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateMapper {
    pub const fn new() -> Self {
        Self {
            x: AxisCalibration::new(AxisKind::X),
            y: AxisCalibration::new(AxisKind::Y),
        }
    }

    pub const fn axis(&self, kind: AxisKind) -> &AxisCalibration {
        match kind {
            AxisKind::X => &self.x,
            AxisKind::Y => &self.y,
        }
    }

    pub const fn axis_mut(&mut self, kind: AxisKind) -> &mut AxisCalibration {
        match kind {
            AxisKind::X => &mut self.x,
            AxisKind::Y => &mut self.y,
        }
    }

    /// True once all four endpoints of both axes are set.
    pub const fn is_ready(&self) -> bool {
        self.x.is_complete() && self.y.is_complete()
    }

    /// True when ready and both calibrations can actually produce values.
    pub fn is_usable(&self) -> bool {
        self.is_ready() && self.x.validate().is_ok() && self.y.validate().is_ok()
    }

    pub fn pixel_to_data(&self, pixel: XYPoint) -> Result<XYPoint> {
        Ok(XYPoint {
            x: self.x.to_data(pixel.x)?,
            y: self.y.to_data(pixel.y)?,
        })
    }

    /// Inverse mapping, used to place overlay elements at chart values.
    pub fn data_to_pixel(&self, data: XYPoint) -> Option<XYPoint> {
        Some(XYPoint {
            x: self.x.to_pixel(data.x)?,
            y: self.y.to_pixel(data.y)?,
        })
    }

    pub const fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}
