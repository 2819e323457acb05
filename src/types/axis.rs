//! Two-point calibration of a single chart axis.

use super::coord::{AxisKind, ScaleKind};
use super::error::{DegenerateReason, MappingError, Result};

/// One calibration reference: an original-image pixel coordinate and the chart value it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    pub pixel: f64,
    pub value: f64,
}

/// Calibration of one axis from a min and a max reference point.
///
/// Endpoints are plain setters: nothing is validated when they are stored.
/// Validation happens in [`AxisCalibration::validate`] and on every mapping call,
/// so a zero-span or non-positive log calibration never yields NaN or infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisCalibration {
    axis: AxisKind,
    min: Option<Endpoint>,
    max: Option<Endpoint>,
    scale: ScaleKind,
}

impl AxisCalibration {
    pub const fn new(axis: AxisKind) -> Self {
        Self {
            axis,
            min: None,
            max: None,
            scale: ScaleKind::Linear,
        }
    }

    pub const fn axis(&self) -> AxisKind {
        self.axis
    }

    pub const fn min(&self) -> Option<Endpoint> {
        self.min
    }

    pub const fn max(&self) -> Option<Endpoint> {
        self.max
    }

    pub const fn scale(&self) -> ScaleKind {
        self.scale
    }

    pub const fn is_logarithmic(&self) -> bool {
        self.scale.is_logarithmic()
    }

    pub const fn set_scale(&mut self, scale: ScaleKind) {
        self.scale = scale;
    }

    pub const fn set_logarithmic(&mut self, logarithmic: bool) {
        self.scale = ScaleKind::from_logarithmic(logarithmic);
    }

    pub const fn set_min(&mut self, pixel: f64, value: f64) {
        self.min = Some(Endpoint { pixel, value });
    }

    pub const fn set_max(&mut self, pixel: f64, value: f64) {
        self.max = Some(Endpoint { pixel, value });
    }

    /// Forget both endpoints. The scale kind is a view setting and is kept.
    pub const fn reset(&mut self) {
        self.min = None;
        self.max = None;
    }

    pub const fn is_complete(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Check whatever endpoints are present for a calibration that can never map.
    ///
    /// An incomplete calibration passes as long as the fields already set are usable.
    pub fn validate(&self) -> Result<()> {
        let present = [self.min, self.max];
        let numbers = present.iter().flatten().flat_map(|e| [e.pixel, e.value]);
        for n in numbers {
            if !n.is_finite() {
                return Err(self.degenerate(DegenerateReason::NonFinite));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min.pixel == max.pixel
        {
            return Err(self.degenerate(DegenerateReason::ZeroPixelSpan));
        }
        if self.is_logarithmic() && present.iter().flatten().any(|e| e.value <= 0.0) {
            return Err(self.degenerate(DegenerateReason::NonPositiveLogValue));
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min.value == max.value
        {
            return Err(self.degenerate(DegenerateReason::ZeroValueSpan));
        }
        Ok(())
    }

    /// Map an original-image pixel coordinate along this axis to a chart value.
    ///
    /// A log axis can overflow far outside its calibrated span; that pixel is
    /// reported as [`MappingError::ValueOutOfRange`] instead of an infinite value.
    pub fn to_data(&self, pixel: f64) -> Result<f64> {
        let params = self.params()?;
        let graph = pixel / params.ratio - params.offset;
        let value = if self.is_logarithmic() {
            10f64.powf(graph)
        } else {
            graph
        };
        if !value.is_finite() {
            return Err(MappingError::ValueOutOfRange {
                axis: self.axis,
                pixel,
            });
        }
        Ok(value)
    }

    /// Inverse of [`Self::to_data`]; `None` when the calibration cannot map or
    /// the value is outside the log domain.
    pub fn to_pixel(&self, value: f64) -> Option<f64> {
        let params = self.params().ok()?;
        if self.is_logarithmic() && value <= 0.0 {
            return None;
        }
        let graph = self.eval(value);
        Some((graph + params.offset) * params.ratio)
    }

    fn params(&self) -> Result<LinearParams> {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return Err(MappingError::CalibrationIncomplete { axis: self.axis });
        };
        self.validate()?;
        // Pixels per graph unit, where graph units are log10 decades on a log axis.
        let span = max.pixel - min.pixel;
        let graph_span = self.eval(max.value) - self.eval(min.value);
        let ratio = span / graph_span;
        let offset = min.pixel / ratio - self.eval(min.value);
        Ok(LinearParams { ratio, offset })
    }

    fn eval(&self, value: f64) -> f64 {
        if self.is_logarithmic() {
            value.log10()
        } else {
            value
        }
    }

    const fn degenerate(&self, reason: DegenerateReason) -> MappingError {
        MappingError::DegenerateCalibration {
            axis: self.axis,
            reason,
        }
    }
}

struct LinearParams {
    ratio: f64,
    offset: f64,
}
