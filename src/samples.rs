//! Recorded samples in original-image pixel space.

use crate::types::{CoordinateMapper, Result, XYPoint};
use std::iter::FusedIterator;
use std::slice;

/// Ordered list of clicked samples. Order is click order and defines
/// path/polygon vertex order as well as export row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    samples: Vec<XYPoint>,
}

impl SampleStore {
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Append a sample. Allowed before calibration; values become meaningful once
    /// the mapper is ready.
    pub fn add(&mut self, pixel: XYPoint) {
        self.samples.push(pixel);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn raw(&self) -> &[XYPoint] {
        &self.samples
    }

    /// Lazily project every sample through `mapper`, in insertion order.
    ///
    /// The iterator borrows the store, so it can be recreated at will and always
    /// yields exactly `len()` items.
    pub fn mapped_samples<'a>(&'a self, mapper: &'a CoordinateMapper) -> MappedSamples<'a> {
        MappedSamples {
            inner: self.samples.iter(),
            mapper,
        }
    }

    /// Collect all mapped samples, failing on the first one that cannot be mapped.
    pub fn collect_mapped(&self, mapper: &CoordinateMapper) -> Result<Vec<XYPoint>> {
        self.mapped_samples(mapper).collect()
    }
}

/// Iterator returned by [`SampleStore::mapped_samples`].
#[derive(Debug, Clone)]
pub struct MappedSamples<'a> {
    inner: slice::Iter<'a, XYPoint>,
    mapper: &'a CoordinateMapper,
}

impl Iterator for MappedSamples<'_> {
    type Item = Result<XYPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|p| self.mapper.pixel_to_data(*p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for MappedSamples<'_> {}

impl FusedIterator for MappedSamples<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AxisKind, MappingError};

    fn ready_mapper() -> CoordinateMapper {
        let mut mapper = CoordinateMapper::new();
        mapper.axis_mut(AxisKind::X).set_min(0.0, 0.0);
        mapper.axis_mut(AxisKind::X).set_max(10.0, 100.0);
        mapper.axis_mut(AxisKind::Y).set_min(10.0, 0.0);
        mapper.axis_mut(AxisKind::Y).set_max(0.0, 1.0);
        mapper
    }

    #[test]
    fn clear_leaves_no_mapped_samples() {
        let mapper = ready_mapper();
        let mut store = SampleStore::new();
        store.add(XYPoint::new(1.0, 2.0));
        store.add(XYPoint::new(3.0, 4.0));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.mapped_samples(&mapper).count(), 0);
    }

    #[test]
    fn mapped_samples_keep_length_and_order() {
        let mapper = ready_mapper();
        let mut store = SampleStore::new();
        for i in 0..5 {
            store.add(XYPoint::new(f64::from(i), 10.0 - f64::from(i)));
        }
        let mapped = store.collect_mapped(&mapper).unwrap();
        assert_eq!(mapped.len(), store.len());
        let xs: Vec<f64> = mapped.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0]);

        // Restartable: a second pass yields the same values.
        let again = store.collect_mapped(&mapper).unwrap();
        assert_eq!(mapped, again);
        assert_eq!(store.mapped_samples(&mapper).len(), 5);
    }

    #[test]
    fn samples_can_be_recorded_before_calibration() {
        let mut store = SampleStore::new();
        store.add(XYPoint::new(5.0, 5.0));
        let unready = CoordinateMapper::new();
        let results: Vec<_> = store.mapped_samples(&unready).collect();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0],
            Err(MappingError::CalibrationIncomplete { axis: AxisKind::X })
        );
        assert_eq!(
            store.collect_mapped(&ready_mapper()).unwrap(),
            vec![XYPoint::new(50.0, 0.5)]
        );
    }
}
