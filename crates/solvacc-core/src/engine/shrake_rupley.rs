//! Shrake-Rupley numerical SASA.
//!
//! Every atom's inflated sphere is sampled with a fixed set of test points; the atom's area is
//! the fraction of points not buried inside a neighboring inflated sphere, times the area of
//! the whole sphere. The test points come from [`golden_spiral`], so results are reproducible
//! and depend only on the inputs and `shrake_rupley_n_points`.
//!
//! Work is split into contiguous atom ranges, one per worker. Each atom's value depends only
//! on read-only shared state, so the output is bit-for-bit identical for any thread count.

use super::config::Parameters;
use super::diagnostics::{Outcome, report};
use super::error::SasaError;
use super::geometry::SphereSet;
use super::neighbors::NeighborList;
use super::result::SasaResult;
use super::scratch;
use super::workers::Workers;
use crate::core::models::coords::Coordinates;
use nalgebra::Vector3;
use std::f64::consts::PI;
use tracing::{info, instrument};

/// `n_points` unit vectors spread evenly over the sphere along a golden-section spiral.
///
/// Point `k` sits at height `z = 1 - (2k + 1) / n` and longitude `k * π(3 - √5)`.
pub fn golden_spiral(n_points: usize) -> impl ExactSizeIterator<Item = Vector3<f64>> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let dz = 2.0 / n_points as f64;
    (0..n_points).map(move |k| {
        let z = 1.0 - dz * (k as f64 + 0.5);
        let r = (1.0 - z * z).max(0.0).sqrt();
        let longitude = golden_angle * k as f64;
        Vector3::new(longitude.cos() * r, longitude.sin() * r, z)
    })
}

/// Computes per-atom SASA into a new [`SasaResult`].
///
/// `params` defaults to [`Parameters::default`]. See [`compute_into`] for errors and warnings.
#[instrument(skip_all, name = "shrake_rupley")]
pub fn compute(
    coords: &Coordinates,
    radii: &[f64],
    params: Option<&Parameters>,
) -> Result<Outcome<SasaResult>, SasaError> {
    let params = params.copied().unwrap_or_default();
    let computed = scratch::filled(coords.len(), 0.0, "atom areas").and_then(|mut atom_sasa| {
        let outcome = run(&mut atom_sasa, coords, radii, &params)?;
        Ok(outcome.map(|_| SasaResult::new(atom_sasa, params)))
    });
    computed.map_err(|e| report("shrake_rupley", e))
}

/// Computes per-atom SASA into `out` and returns the total.
///
/// # Errors
///
/// - [`SasaError::Configuration`] if the parameters are invalid (e.g. zero test points)
/// - [`SasaError::LengthMismatch`] if `out` or `radii` differ in length from `coords`
/// - [`SasaError::InvalidInput`] for negative or non-finite radii or coordinates
/// - [`SasaError::Allocation`] if a scratch buffer cannot be reserved
///
/// Every error is also logged as an error diagnostic. A thread pool that cannot be started is
/// not an error: the computation runs on the calling thread and the outcome carries a warning.
#[instrument(skip_all, name = "shrake_rupley")]
pub fn compute_into(
    out: &mut [f64],
    coords: &Coordinates,
    radii: &[f64],
    params: Option<&Parameters>,
) -> Result<Outcome<f64>, SasaError> {
    let params = params.copied().unwrap_or_default();
    run(out, coords, radii, &params).map_err(|e| report("shrake_rupley", e))
}

fn run(
    out: &mut [f64],
    coords: &Coordinates,
    radii: &[f64],
    params: &Parameters,
) -> Result<Outcome<f64>, SasaError> {
    params.validate()?;
    if out.len() != coords.len() {
        return Err(SasaError::LengthMismatch {
            what: "output buffer",
            expected: coords.len(),
            found: out.len(),
        });
    }
    let spheres = SphereSet::new(coords, radii, params.probe_radius)?;

    let n_points = params.shrake_rupley_n_points;
    info!(
        atoms = spheres.len(),
        points = n_points,
        probe = params.probe_radius,
        threads = params.effective_threads(),
        "Computing SASA with Shrake-Rupley."
    );

    let mut points = scratch::with_capacity(n_points, "test points")?;
    points.extend(golden_spiral(n_points));
    let neighbors = NeighborList::build(&spheres)?;

    let (workers, warning) = Workers::new(params.effective_threads(), "shrake_rupley");
    workers.for_each_chunk_mut(out, |start, chunk| {
        for (k, slot) in chunk.iter_mut().enumerate() {
            *slot = atom_area(&spheres, &neighbors, &points, start + k);
        }
        Ok(())
    })?;

    let total: f64 = out.iter().sum();
    info!(total, "Shrake-Rupley finished.");
    Ok(Outcome::with_warnings(total, warning.into_iter().collect()))
}

fn atom_area(
    spheres: &SphereSet<'_>,
    neighbors: &NeighborList,
    points: &[Vector3<f64>],
    i: usize,
) -> f64 {
    if !spheres.is_active(i) {
        return 0.0;
    }
    let ri = spheres.radius(i);
    let ci = spheres.center(i);
    let near = neighbors.of(i);
    let exposed = points
        .iter()
        .filter(|&&u| {
            let p = ci + u * ri;
            !near.iter().any(|&j| {
                let rj = spheres.radius(j);
                (p - spheres.center(j)).norm_squared() < rj * rj
            })
        })
        .count();
    4.0 * PI * ri * ri * exposed as f64 / points.len() as f64
}
