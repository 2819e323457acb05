use thiserror::Error;

use super::coord::AxisKind;

/// Why an axis calibration cannot produce a finite mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// Both calibration points sit on the same pixel.
    ZeroPixelSpan,
    /// Both calibration values are equal.
    ZeroValueSpan,
    /// Log10 scale with a value that is zero or negative.
    NonPositiveLogValue,
    /// A pixel or value is NaN or infinite.
    NonFinite,
}

impl DegenerateReason {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::ZeroPixelSpan => "min and max share the same pixel position",
            Self::ZeroValueSpan => "min and max values are equal",
            Self::NonPositiveLogValue => "log scale needs strictly positive values",
            Self::NonFinite => "calibration contains a non-finite number",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("{axis} axis calibration is degenerate: {}", reason.describe())]
    DegenerateCalibration {
        axis: AxisKind,
        reason: DegenerateReason,
    },

    #[error("{axis} axis calibration is incomplete")]
    CalibrationIncomplete { axis: AxisKind },

    #[error("{axis} value at pixel {pixel} is outside the representable range")]
    ValueOutOfRange { axis: AxisKind, pixel: f64 },

    #[error("need at least {needed} points, got {actual}")]
    InsufficientPoints { needed: usize, actual: usize },

    #[error("zoom factor must be finite and positive, got {0}")]
    InvalidZoomFactor(f64),
}

pub type Result<T> = std::result::Result<T, MappingError>;
