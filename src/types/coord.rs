use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale type for an axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    /// Linear interpolation in value space.
    #[default]
    Linear,
    /// Log10 interpolation (values must be strictly positive).
    Log10,
}

impl ScaleKind {
    pub const fn from_logarithmic(logarithmic: bool) -> Self {
        if logarithmic { Self::Log10 } else { Self::Linear }
    }

    pub const fn is_logarithmic(self) -> bool {
        matches!(self, Self::Log10)
    }
}

/// Which of the two chart axes an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Y,
}

impl AxisKind {
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
        }
    }

    /// Component of a point that lies along this axis.
    pub const fn component(self, p: XYPoint) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Endpoint of an axis calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisEnd {
    Min,
    Max,
}

impl AxisEnd {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Min => "Min",
            Self::Max => "Max",
        }
    }
}

/// A 2D point in pixel or data space, kept in `f64` so calibration math stays exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct XYPoint {
    pub x: f64,
    pub y: f64,
}

impl XYPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for XYPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<egui::Pos2> for XYPoint {
    fn from(p: egui::Pos2) -> Self {
        Self {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }
    }
}
