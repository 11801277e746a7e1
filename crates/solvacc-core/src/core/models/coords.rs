use crate::engine::error::SasaError;
use nalgebra::Point3;
use std::ops::Index;

/// An ordered, immutable set of atomic coordinates.
///
/// Index `i` of a `Coordinates` refers to the same atom as index `i` of the radius array and
/// of the per-atom SASA values computed from it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coordinates {
    points: Vec<Point3<f64>>,
}

impl Coordinates {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Builds a coordinate set from a flat `[x0, y0, z0, x1, y1, z1, ...]` slice.
    ///
    /// # Errors
    ///
    /// Returns [`SasaError::InvalidInput`] if the slice length is not a multiple of three or
    /// any component is not finite.
    pub fn from_xyz(xyz: &[f64]) -> Result<Self, SasaError> {
        if xyz.len() % 3 != 0 {
            return Err(SasaError::InvalidInput(format!(
                "flat coordinate array has length {}, which is not a multiple of 3",
                xyz.len()
            )));
        }
        if let Some(position) = xyz.iter().position(|v| !v.is_finite()) {
            return Err(SasaError::InvalidInput(format!(
                "coordinate component of atom {} is not finite",
                position / 3
            )));
        }
        Ok(Self {
            points: xyz
                .chunks_exact(3)
                .map(|c| Point3::new(c[0], c[1], c[2]))
                .collect(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Point3<f64>> {
        self.points.get(index)
    }

    pub fn as_slice(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.points.iter()
    }
}

impl Index<usize> for Coordinates {
    type Output = Point3<f64>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl From<Vec<Point3<f64>>> for Coordinates {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

impl From<&[[f64; 3]]> for Coordinates {
    fn from(points: &[[f64; 3]]) -> Self {
        Self::new(points.iter().map(|p| Point3::from(*p)).collect())
    }
}

impl FromIterator<Point3<f64>> for Coordinates {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
