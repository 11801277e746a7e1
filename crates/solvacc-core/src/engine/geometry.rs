use super::error::SasaError;
use super::scratch;
use crate::core::models::coords::Coordinates;
use nalgebra::Point3;
use std::collections::HashSet;

/// Validated input spheres with the probe radius added.
///
/// An atom is *active* when its van der Waals radius is positive and no earlier atom occupies
/// the same sphere (identical center and radius). Inactive atoms have zero SASA and never bury
/// another atom, which makes a stack of coincident copies expose exactly one sphere.
#[derive(Debug)]
pub(crate) struct SphereSet<'a> {
    centers: &'a [Point3<f64>],
    radii: Vec<f64>,
    active: Vec<bool>,
    n_active: usize,
}

impl<'a> SphereSet<'a> {
    pub fn new(
        coords: &'a Coordinates,
        radii: &[f64],
        probe_radius: f64,
    ) -> Result<Self, SasaError> {
        let n = coords.len();
        if radii.len() != n {
            return Err(SasaError::LengthMismatch {
                what: "radii",
                expected: n,
                found: radii.len(),
            });
        }
        if let Some((i, r)) = radii
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < 0.0)
        {
            return Err(SasaError::InvalidInput(format!(
                "radius {r} of atom {i} is negative or not finite"
            )));
        }
        if let Some(i) = coords
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(SasaError::InvalidInput(format!(
                "coordinates of atom {i} are not finite"
            )));
        }

        let mut inflated = scratch::with_capacity(n, "sphere radii")?;
        inflated.extend(radii.iter().map(|r| r + probe_radius));

        let mut active = scratch::filled(n, false, "sphere activity")?;
        let mut occupied: HashSet<[u64; 4]> = HashSet::new();
        occupied
            .try_reserve(n)
            .map_err(|source| SasaError::Allocation {
                operation: "duplicate sphere detection",
                source,
            })?;
        let mut n_active = 0;
        for (i, center) in coords.iter().enumerate() {
            if radii[i] <= 0.0 {
                continue;
            }
            // +0.0 folds negative zero onto positive zero.
            let key = [
                (center.x + 0.0).to_bits(),
                (center.y + 0.0).to_bits(),
                (center.z + 0.0).to_bits(),
                inflated[i].to_bits(),
            ];
            if occupied.insert(key) {
                active[i] = true;
                n_active += 1;
            }
        }

        Ok(Self {
            centers: coords.as_slice(),
            radii: inflated,
            active,
            n_active,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    #[inline]
    pub fn n_active(&self) -> usize {
        self.n_active
    }

    #[inline]
    pub fn is_active(&self, i: usize) -> bool {
        self.active[i]
    }

    #[inline]
    pub fn center(&self, i: usize) -> &Point3<f64> {
        &self.centers[i]
    }

    /// Inflated radius of atom `i`.
    #[inline]
    pub fn radius(&self, i: usize) -> f64 {
        self.radii[i]
    }

    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| self.active[i])
    }

    pub fn max_radius(&self) -> f64 {
        self.active_indices()
            .map(|i| self.radii[i])
            .fold(0.0, f64::max)
    }
}
