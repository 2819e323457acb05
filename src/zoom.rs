//! Display zoom, kept separate from calibration so mapping never depends on it.

use crate::types::{MappingError, Result, XYPoint};

/// Default step used by zoom-in/zoom-out actions.
pub const DEFAULT_ZOOM_STEP: f64 = 0.8;

/// Linear scale between original-image pixels and display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    scale: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl ZoomState {
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Multiply the current scale; the factor must be finite and positive.
    pub fn scale_by(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MappingError::InvalidZoomFactor(factor));
        }
        let next = self.scale * factor;
        // Repeated zoom-out can underflow; keep the invariant that scale stays positive.
        if !next.is_normal() {
            return Err(MappingError::InvalidZoomFactor(factor));
        }
        self.scale = next;
        Ok(())
    }

    pub fn zoom_in(&mut self, step: f64) -> Result<()> {
        self.scale_by(1.0 / step)
    }

    pub fn zoom_out(&mut self, step: f64) -> Result<()> {
        self.scale_by(step)
    }

    pub const fn reset(&mut self) {
        self.scale = 1.0;
    }

    pub fn to_original(&self, display: XYPoint) -> XYPoint {
        XYPoint {
            x: display.x / self.scale,
            y: display.y / self.scale,
        }
    }

    pub fn to_display(&self, original: XYPoint) -> XYPoint {
        XYPoint {
            x: original.x * self.scale,
            y: original.y * self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_scale_is_identity() {
        let zoom = ZoomState::default();
        let p = XYPoint::new(12.5, 40.0);
        assert_eq!(zoom.to_original(p), p);
        assert_eq!(zoom.to_display(p), p);
    }

    #[test]
    fn display_round_trip_is_identity() {
        let mut zoom = ZoomState::default();
        let points = [
            XYPoint::new(0.0, 0.0),
            XYPoint::new(13.0, 977.25),
            XYPoint::new(-4.5, 3.0e4),
        ];
        for _ in 0..7 {
            zoom.zoom_in(DEFAULT_ZOOM_STEP).unwrap();
            for p in points {
                let back = zoom.to_display(zoom.to_original(p));
                assert_relative_eq!(back.x, p.x, max_relative = 1e-12);
                assert_relative_eq!(back.y, p.y, max_relative = 1e-12);
            }
        }
        zoom.scale_by(0.013).unwrap();
        for p in points {
            let back = zoom.to_display(zoom.to_original(p));
            assert_relative_eq!(back.x, p.x, max_relative = 1e-12);
            assert_relative_eq!(back.y, p.y, max_relative = 1e-12);
        }
    }

    #[test]
    fn zoom_steps_are_symmetric() {
        let mut zoom = ZoomState::default();
        zoom.zoom_in(DEFAULT_ZOOM_STEP).unwrap();
        assert_relative_eq!(zoom.scale(), 1.25);
        zoom.zoom_out(DEFAULT_ZOOM_STEP).unwrap();
        assert_relative_eq!(zoom.scale(), 1.0);
        zoom.scale_by(3.0).unwrap();
        zoom.reset();
        assert_eq!(zoom.scale(), 1.0);
    }

    #[test]
    fn rejects_non_positive_factors() {
        let mut zoom = ZoomState::default();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(zoom.scale_by(bad).is_err());
        }
        assert_eq!(zoom.scale(), 1.0);
    }
}
