mod axis;
mod coord;
mod error;
mod mapping;

pub use axis::{AxisCalibration, Endpoint};
pub use coord::{AxisEnd, AxisKind, ScaleKind, XYPoint};
pub use error::{DegenerateReason, MappingError, Result};
pub use mapping::CoordinateMapper;
