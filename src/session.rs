//! Host-agnostic digitizing session.
//!
//! The UI shell translates raw input events into these calls and keeps no
//! calibration or sample state of its own. Every position handed in here is in
//! display space; it is unscaled through [`ZoomState`] before it touches the
//! calibration or the sample store.

use crate::export::{self, TableFormat};
use crate::geometry;
use crate::samples::SampleStore;
use crate::types::{AxisEnd, AxisKind, CoordinateMapper, MappingError, Result, XYPoint};
use crate::zoom::{DEFAULT_ZOOM_STEP, ZoomState};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Digitizer {
    mapper: CoordinateMapper,
    zoom: ZoomState,
    samples: SampleStore,
    zoom_step: f64,
}

impl Default for Digitizer {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_STEP)
    }
}

impl Digitizer {
    pub fn new(zoom_step: f64) -> Self {
        let zoom_step = if zoom_step.is_finite() && zoom_step > 0.0 && zoom_step != 1.0 {
            zoom_step
        } else {
            tracing::warn!(zoom_step, "invalid zoom step, using default");
            DEFAULT_ZOOM_STEP
        };
        Self {
            mapper: CoordinateMapper::new(),
            zoom: ZoomState::default(),
            samples: SampleStore::new(),
            zoom_step,
        }
    }

    pub const fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub const fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub const fn samples(&self) -> &SampleStore {
        &self.samples
    }

    /// Start over for a freshly loaded image: calibration endpoints, samples and zoom.
    pub fn reset(&mut self) {
        self.mapper.reset();
        self.samples.clear();
        self.zoom.reset();
        tracing::debug!("session reset");
    }

    pub const fn is_ready(&self) -> bool {
        self.mapper.is_ready()
    }

    /// Clearing only needs samples; it works before calibration too.
    pub fn can_clear_samples(&self) -> bool {
        !self.samples.is_empty()
    }

    /// Whether sample-dependent actions (export, copy, metrics) make sense.
    pub fn can_use_samples(&self) -> bool {
        !self.samples.is_empty() && self.mapper.is_usable()
    }

    pub fn to_original(&self, display: XYPoint) -> XYPoint {
        self.zoom.to_original(display)
    }

    pub fn to_display(&self, original: XYPoint) -> XYPoint {
        self.zoom.to_display(original)
    }

    /// Record a click. Returns the data coordinates when the calibration can map them.
    pub fn on_click(&mut self, display: XYPoint) -> Option<XYPoint> {
        let pixel = self.zoom.to_original(display);
        self.samples.add(pixel);
        let mapped = self.mapper.pixel_to_data(pixel).ok();
        tracing::debug!(
            pixel_x = pixel.x,
            pixel_y = pixel.y,
            mapped = mapped.is_some(),
            count = self.samples.len(),
            "sample added"
        );
        mapped
    }

    /// Live data coordinates under the pointer, without recording anything.
    pub fn hover(&self, display: XYPoint) -> Option<XYPoint> {
        self.mapper
            .pixel_to_data(self.zoom.to_original(display))
            .ok()
    }

    pub fn set_axis_min(&mut self, axis: AxisKind, display: XYPoint, value: f64) -> Result<()> {
        self.set_axis_endpoint(axis, AxisEnd::Min, display, value)
    }

    pub fn set_axis_max(&mut self, axis: AxisKind, display: XYPoint, value: f64) -> Result<()> {
        self.set_axis_endpoint(axis, AxisEnd::Max, display, value)
    }

    /// Set one calibration endpoint from a display position, unscaled with the current zoom.
    pub fn set_axis_endpoint(
        &mut self,
        axis: AxisKind,
        end: AxisEnd,
        display: XYPoint,
        value: f64,
    ) -> Result<()> {
        let original = self.zoom.to_original(display);
        self.set_axis_endpoint_at_pixel(axis, end, original, value)
    }

    /// Set one calibration endpoint from an original-image pixel position.
    ///
    /// The shell captures the pixel when the context menu opens, so a zoom
    /// change while the value prompt is up does not move the reference.
    /// The change is rolled back when it leaves the axis in a state that can
    /// never map (same pixel for min and max, equal values, bad log values).
    pub fn set_axis_endpoint_at_pixel(
        &mut self,
        axis: AxisKind,
        end: AxisEnd,
        original: XYPoint,
        value: f64,
    ) -> Result<()> {
        let pixel = axis.component(original);
        let mut candidate = self.mapper.axis(axis).clone();
        match end {
            AxisEnd::Min => candidate.set_min(pixel, value),
            AxisEnd::Max => candidate.set_max(pixel, value),
        }
        if let Err(err) = candidate.validate() {
            tracing::warn!(%axis, end = end.label(), pixel, value, %err, "calibration rejected");
            return Err(err);
        }
        *self.mapper.axis_mut(axis) = candidate;
        tracing::info!(%axis, end = end.label(), pixel, value, "calibration point set");
        Ok(())
    }

    /// Toggle log10 scaling for an axis, with the same rollback rule as endpoints.
    pub fn set_logarithmic(&mut self, axis: AxisKind, logarithmic: bool) -> Result<()> {
        let mut candidate = self.mapper.axis(axis).clone();
        candidate.set_logarithmic(logarithmic);
        if let Err(err) = candidate.validate() {
            tracing::warn!(%axis, logarithmic, %err, "scale change rejected");
            return Err(err);
        }
        *self.mapper.axis_mut(axis) = candidate;
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<()> {
        self.zoom.zoom_in(self.zoom_step)
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        self.zoom.zoom_out(self.zoom_step)
    }

    pub fn scale_by(&mut self, factor: f64) -> Result<()> {
        self.zoom.scale_by(factor)
    }

    pub const fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    pub fn clear_samples(&mut self) {
        self.samples.clear();
    }

    /// All samples in data space, in click order.
    pub fn mapped_samples(&self) -> Result<Vec<XYPoint>> {
        self.require_ready()?;
        self.samples.collect_mapped(&self.mapper)
    }

    pub fn path_length(&self) -> Result<f64> {
        geometry::path_length(&self.mapped_samples()?)
    }

    pub fn polygon_area(&self) -> Result<f64> {
        geometry::polygon_area(&self.mapped_samples()?)
    }

    pub fn samples_as_table(&self, format: TableFormat) -> anyhow::Result<String> {
        let points = self.mapped_samples()?;
        export::table_to_string(&points, format)
    }

    pub fn samples_as_csv(&self) -> anyhow::Result<String> {
        self.samples_as_table(TableFormat::Csv)
    }

    /// Tab-separated table for the clipboard.
    pub fn samples_as_tsv(&self) -> anyhow::Result<String> {
        self.samples_as_table(TableFormat::Tsv)
    }

    pub fn export_csv(&self, path: &Path) -> anyhow::Result<()> {
        let points = self.mapped_samples()?;
        export::export_to_csv(path, &points)
    }

    fn require_ready(&self) -> Result<()> {
        for axis in AxisKind::ALL {
            let cal = self.mapper.axis(axis);
            if !cal.is_complete() {
                return Err(MappingError::CalibrationIncomplete { axis });
            }
            cal.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DegenerateReason;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> XYPoint {
        XYPoint::new(x, y)
    }

    /// X: pixel 0 → 0, pixel 100 → 50. Y: pixel 200 → 0, pixel 0 → 10.
    fn calibrated() -> Digitizer {
        let mut d = Digitizer::default();
        d.set_axis_min(AxisKind::X, p(0.0, 200.0), 0.0).unwrap();
        d.set_axis_max(AxisKind::X, p(100.0, 200.0), 50.0).unwrap();
        d.set_axis_min(AxisKind::Y, p(0.0, 200.0), 0.0).unwrap();
        d.set_axis_max(AxisKind::Y, p(0.0, 0.0), 10.0).unwrap();
        d
    }

    #[test]
    fn click_maps_through_zoom() {
        let mut d = calibrated();
        d.scale_by(2.0).unwrap();
        // Display (100, 200) is original (50, 100).
        let mapped = d.on_click(p(100.0, 200.0)).unwrap();
        assert_relative_eq!(mapped.x, 25.0);
        assert_relative_eq!(mapped.y, 5.0);
        assert_eq!(d.samples().raw(), &[p(50.0, 100.0)]);
    }

    #[test]
    fn calibration_uses_original_pixels_when_zoomed() {
        let mut d = Digitizer::default();
        d.zoom_in().unwrap();
        d.zoom_in().unwrap();
        let scale = d.zoom().scale();
        d.set_axis_min(AxisKind::X, p(10.0 * scale, 0.0), 1.0).unwrap();
        d.set_axis_max(AxisKind::X, p(110.0 * scale, 0.0), 2.0).unwrap();
        let min = d.mapper().axis(AxisKind::X).min().unwrap();
        let max = d.mapper().axis(AxisKind::X).max().unwrap();
        assert_relative_eq!(min.pixel, 10.0, max_relative = 1e-12);
        assert_relative_eq!(max.pixel, 110.0, max_relative = 1e-12);
    }

    #[test]
    fn pixel_captured_before_zoom_change_is_kept() {
        let mut d = Digitizer::default();
        let anchor = d.to_original(p(100.0, 0.0));
        d.zoom_in().unwrap();
        d.set_axis_endpoint_at_pixel(AxisKind::X, AxisEnd::Min, anchor, 5.0)
            .unwrap();
        let min = d.mapper().axis(AxisKind::X).min().unwrap();
        assert_relative_eq!(min.pixel, 100.0);
        assert_relative_eq!(min.value, 5.0);

        // The display-space setter unscales with the zoom in effect now.
        d.set_axis_max(AxisKind::X, p(100.0, 0.0), 6.0).unwrap();
        let max = d.mapper().axis(AxisKind::X).max().unwrap();
        assert_relative_eq!(max.pixel, 100.0 / d.zoom().scale());
    }

    #[test]
    fn stray_clicks_can_be_cleared_before_calibration() {
        let mut d = Digitizer::default();
        assert!(!d.can_clear_samples());
        d.on_click(p(3.0, 4.0));
        assert!(d.can_clear_samples());
        assert!(!d.can_use_samples());
        d.clear_samples();
        assert!(!d.can_clear_samples());
    }

    #[test]
    fn clicks_before_calibration_are_kept() {
        let mut d = Digitizer::default();
        assert_eq!(d.on_click(p(10.0, 190.0)), None);
        assert!(!d.can_use_samples());
        assert_eq!(
            d.mapped_samples(),
            Err(MappingError::CalibrationIncomplete { axis: AxisKind::X })
        );
        d.set_axis_min(AxisKind::X, p(0.0, 200.0), 0.0).unwrap();
        d.set_axis_max(AxisKind::X, p(100.0, 200.0), 50.0).unwrap();
        d.set_axis_min(AxisKind::Y, p(0.0, 200.0), 0.0).unwrap();
        d.set_axis_max(AxisKind::Y, p(0.0, 0.0), 10.0).unwrap();
        assert!(d.can_use_samples());
        let mapped = d.mapped_samples().unwrap();
        assert_relative_eq!(mapped[0].x, 5.0);
        assert_relative_eq!(mapped[0].y, 0.5);
    }

    #[test]
    fn degenerate_endpoint_is_rejected_and_rolled_back() {
        let mut d = calibrated();
        let before = d.mapper().clone();
        let err = d
            .set_axis_max(AxisKind::X, p(0.0, 50.0), 99.0)
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::DegenerateCalibration {
                axis: AxisKind::X,
                reason: DegenerateReason::ZeroPixelSpan,
            }
        );
        assert_eq!(d.mapper(), &before);
        assert!(d.is_ready());
    }

    #[test]
    fn log_toggle_rejected_for_non_positive_values() {
        let mut d = calibrated();
        assert!(d.set_logarithmic(AxisKind::X, true).is_err());
        assert!(!d.mapper().axis(AxisKind::X).is_logarithmic());

        let mut d = Digitizer::default();
        d.set_logarithmic(AxisKind::Y, true).unwrap();
        assert!(d.set_axis_min(AxisKind::Y, p(0.0, 300.0), 0.0).is_err());
        d.set_axis_min(AxisKind::Y, p(0.0, 300.0), 1.0).unwrap();
        d.set_axis_max(AxisKind::Y, p(0.0, 0.0), 1000.0).unwrap();
        d.set_axis_min(AxisKind::X, p(0.0, 0.0), 0.0).unwrap();
        d.set_axis_max(AxisKind::X, p(10.0, 0.0), 1.0).unwrap();
        let mapped = d.hover(p(5.0, 150.0)).unwrap();
        assert_relative_eq!(mapped.x, 0.5);
        assert_relative_eq!(mapped.y, 1000f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn reset_clears_everything_but_scale_kind() {
        let mut d = calibrated();
        d.set_axis_min(AxisKind::Y, p(0.0, 200.0), 1.0).unwrap();
        d.set_logarithmic(AxisKind::Y, true).unwrap();
        d.on_click(p(1.0, 1.0));
        d.zoom_in().unwrap();
        d.reset();
        assert!(d.mapper().axis(AxisKind::Y).is_logarithmic());
        assert!(!d.is_ready());
        assert!(d.samples().is_empty());
        assert_eq!(d.zoom().scale(), 1.0);
    }

    #[test]
    fn metrics_and_tables_follow_click_order() {
        let mut d = calibrated();
        // Unit square in data space: pixels (0,200) (0,180) (2,180) (2,200).
        for (x, y) in [(0.0, 200.0), (0.0, 180.0), (2.0, 180.0), (2.0, 200.0)] {
            d.on_click(p(x, y));
        }
        assert_relative_eq!(d.path_length().unwrap(), 3.0);
        assert_relative_eq!(d.polygon_area().unwrap().abs(), 1.0);
        assert!(d.samples_as_csv().unwrap().starts_with("x,y\n0.000000,0.000000\n"));
        let tsv = d.samples_as_tsv().unwrap();
        assert_eq!(
            tsv,
            "x\ty\n0.000000\t0.000000\n0.000000\t1.000000\n1.000000\t1.000000\n1.000000\t0.000000"
        );
    }

    #[test]
    fn metrics_need_ready_calibration_and_points() {
        let mut d = Digitizer::default();
        d.on_click(p(1.0, 1.0));
        d.on_click(p(2.0, 2.0));
        assert!(matches!(
            d.path_length(),
            Err(MappingError::CalibrationIncomplete { .. })
        ));
        let mut d = calibrated();
        d.on_click(p(1.0, 1.0));
        assert_eq!(
            d.polygon_area(),
            Err(MappingError::InsufficientPoints {
                needed: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn invalid_zoom_step_falls_back_to_default() {
        let mut d = Digitizer::new(-2.0);
        d.zoom_out().unwrap();
        assert_relative_eq!(d.zoom().scale(), DEFAULT_ZOOM_STEP);
    }
}
