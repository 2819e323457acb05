//! Path length and polygon area over data-space points.

use crate::types::{MappingError, Result, XYPoint};

const MIN_VERTICES: usize = 2;

/// Signed polygon area by the shoelace formula, closing the ring back to the first vertex.
///
/// The sign follows the vertex winding; callers that want a magnitude take `abs()`.
/// Two vertices close into a degenerate ring and give `0.0`.
pub fn polygon_area(vertices: &[XYPoint]) -> Result<f64> {
    ensure_enough(vertices)?;
    let closing = vertices.first().zip(vertices.last()).map(|(a, b)| (*b, *a));
    let area: f64 = vertices
        .windows(2)
        .map(|w| (w[0], w[1]))
        .chain(closing)
        .map(|(a, b)| (b.x - a.x) * (a.y + b.y) / 2.0)
        .sum();
    Ok(area)
}

/// Sum of Euclidean distances between consecutive vertices (open path).
pub fn path_length(vertices: &[XYPoint]) -> Result<f64> {
    ensure_enough(vertices)?;
    Ok(vertices.windows(2).map(|w| w[0].distance(w[1])).sum())
}

const fn ensure_enough(vertices: &[XYPoint]) -> Result<()> {
    if vertices.len() < MIN_VERTICES {
        return Err(MappingError::InsufficientPoints {
            needed: MIN_VERTICES,
            actual: vertices.len(),
        });
    }
    Ok(())
}
