//! Lee-Richards SASA by slicing.
//!
//! Every inflated sphere is cut into `lee_richards_n_slices` slabs of equal thickness along z,
//! so the slab thickness of an atom is its own diameter divided by the slice count. Within a
//! slab the sphere is represented by its cross-section at the middle of the slab; the arcs of
//! that circle covered by the cross-sections of neighboring spheres are merged, and the exposed
//! angle times the sphere radius times the slab thickness is the slab's contribution. For a
//! sphere, `R * thickness` per radian is exactly the area of the band between two parallel
//! planes, so an isolated atom sums to `4πR²` regardless of resolution.
//!
//! The cost of an atom depends only on the slice count and on its neighbors, never on the
//! radii of unrelated atoms. Work is split into contiguous atom ranges, one per worker, and
//! each atom's value depends only on read-only shared state, so the output is bit-for-bit
//! identical for any thread count.

use super::config::Parameters;
use super::diagnostics::{Outcome, report};
use super::error::SasaError;
use super::geometry::SphereSet;
use super::neighbors::NeighborList;
use super::result::SasaResult;
use super::scratch;
use super::workers::Workers;
use crate::core::models::coords::Coordinates;
use std::f64::consts::TAU;
use tracing::{info, instrument};

/// Heights of the mid-planes of the `n_slices` slabs that cut a sphere of radius `r` centered
/// at height `z`, from the bottom up.
fn slice_planes(z: f64, r: f64, n_slices: usize) -> impl ExactSizeIterator<Item = f64> {
    let thickness = 2.0 * r / n_slices as f64;
    (0..n_slices).map(move |k| z - r + thickness * (k as f64 + 0.5))
}

/// Computes per-atom SASA into a new [`SasaResult`].
///
/// `params` defaults to [`Parameters::default`]. See [`compute_into`] for errors and warnings.
#[instrument(skip_all, name = "lee_richards")]
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
    computed.map_err(|e| report("lee_richards", e))
}

/// Computes per-atom SASA into `out` and returns the total.
///
/// # Errors
///
/// - [`SasaError::Configuration`] if the parameters are invalid (e.g. zero slices)
/// - [`SasaError::LengthMismatch`] if `out` or `radii` differ in length from `coords`
/// - [`SasaError::InvalidInput`] for negative or non-finite radii or coordinates
/// - [`SasaError::Allocation`] if a scratch buffer cannot be reserved by any worker
///
/// Every error is also logged as an error diagnostic. A thread pool that cannot be started is
/// not an error: the computation runs on the calling thread and the outcome carries a warning.
#[instrument(skip_all, name = "lee_richards")]
pub fn compute_into(
    out: &mut [f64],
    coords: &Coordinates,
    radii: &[f64],
    params: Option<&Parameters>,
) -> Result<Outcome<f64>, SasaError> {
    let params = params.copied().unwrap_or_default();
    run(out, coords, radii, &params).map_err(|e| report("lee_richards", e))
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

    let n_slices = params.lee_richards_n_slices;
    info!(
        atoms = spheres.len(),
        slices = n_slices,
        probe = params.probe_radius,
        threads = params.effective_threads(),
        "Computing SASA with Lee-Richards."
    );

    let neighbors = NeighborList::build(&spheres)?;

    let (workers, warning) = Workers::new(params.effective_threads(), "lee_richards");
    workers.for_each_chunk_mut(out, |start, chunk| {
        let mut arcs = Vec::new();
        for (k, slot) in chunk.iter_mut().enumerate() {
            *slot = atom_area(&spheres, &neighbors, n_slices, start + k, &mut arcs)?;
        }
        Ok(())
    })?;

    let total: f64 = out.iter().sum();
    info!(total, "Lee-Richards finished.");
    Ok(Outcome::with_warnings(total, warning.into_iter().collect()))
}

fn atom_area(
    spheres: &SphereSet<'_>,
    neighbors: &NeighborList,
    n_slices: usize,
    i: usize,
    arcs: &mut Vec<(f64, f64)>,
) -> Result<f64, SasaError> {
    if !spheres.is_active(i) {
        return Ok(0.0);
    }
    let z = spheres.center(i).z;
    let r = spheres.radius(i);
    let thickness = 2.0 * r / n_slices as f64;
    let mut exposed = 0.0;
    for plane in slice_planes(z, r, n_slices) {
        exposed += exposed_angle_at(spheres, neighbors, i, plane, arcs)?;
    }
    Ok(exposed * r * thickness)
}

/// Exposed angle of the cross-section of atom `i` by the plane at height `plane`.
fn exposed_angle_at(
    spheres: &SphereSet<'_>,
    neighbors: &NeighborList,
    i: usize,
    plane: f64,
    arcs: &mut Vec<(f64, f64)>,
) -> Result<f64, SasaError> {
    let ci = spheres.center(i);
    let Some(ri) = cross_section(spheres.radius(i), plane - ci.z) else {
        return Ok(0.0);
    };

    let near = neighbors.of(i);
    arcs.clear();
    scratch::reserve(arcs, 2 * near.len(), "arc buffer")?;
    for &j in near {
        let cj = spheres.center(j);
        let Some(rj) = cross_section(spheres.radius(j), plane - cj.z) else {
            continue;
        };
        let dx = cj.x - ci.x;
        let dy = cj.y - ci.y;
        let d = dx.hypot(dy);
        if d >= ri + rj || d + rj <= ri {
            continue;
        }
        if d + ri <= rj {
            return Ok(0.0);
        }
        let cos_alpha = ((ri * ri + d * d - rj * rj) / (2.0 * ri * d)).clamp(-1.0, 1.0);
        let alpha = cos_alpha.acos();
        push_arc(arcs, dy.atan2(dx) - alpha, 2.0 * alpha);
    }
    Ok(exposed_angle(arcs))
}

/// Radius of the circle cut from a sphere of radius `r` by a plane at distance `dz` from its
/// center, or `None` if the plane misses the sphere.
#[inline]
fn cross_section(r: f64, dz: f64) -> Option<f64> {
    let r2 = r * r - dz * dz;
    (r2 > 0.0).then(|| r2.sqrt())
}

/// Adds the arc starting at angle `start` and spanning `length` radians, normalized into
/// `[0, 2π)` and split in two if it wraps past `2π`.
fn push_arc(arcs: &mut Vec<(f64, f64)>, start: f64, length: f64) {
    if length >= TAU {
        arcs.push((0.0, TAU));
        return;
    }
    let start = start.rem_euclid(TAU);
    let end = start + length;
    if end > TAU {
        arcs.push((start, TAU));
        arcs.push((0.0, end - TAU));
    } else {
        arcs.push((start, end));
    }
}

/// Angle of the full circle not covered by the union of `arcs`.
fn exposed_angle(arcs: &mut [(f64, f64)]) -> f64 {
    if arcs.is_empty() {
        return TAU;
    }
    arcs.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
    let mut covered = 0.0;
    let (mut start, mut end) = arcs[0];
    for &(s, e) in &arcs[1..] {
        if s > end {
            covered += end - start;
            start = s;
            end = e;
        } else {
            end = end.max(e);
        }
    }
    covered += end - start;
    (TAU - covered).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(feature = "parallel"))]
    use crate::engine::diagnostics::Status;
    use crate::engine::shrake_rupley;
    use crate::fixtures::{self, relative_error};
    use std::f64::consts::PI;

    fn params(n_slices: usize, n_threads: usize) -> Parameters {
        Parameters::builder()
            .lee_richards_n_slices(n_slices)
            .n_threads(n_threads)
            .build()
            .unwrap()
    }

    #[test]
    fn exposed_angle_merges_overlapping_and_wrapped_arcs() {
        assert_eq!(exposed_angle(&mut []), TAU);

        let mut arcs = Vec::new();
        push_arc(&mut arcs, 0.5, 1.0);
        push_arc(&mut arcs, 1.0, 1.0);
        assert!((exposed_angle(&mut arcs) - (TAU - 1.5)).abs() < 1e-12);

        let mut wrapped = Vec::new();
        push_arc(&mut wrapped, -0.5, 1.0);
        assert_eq!(wrapped.len(), 2);
        push_arc(&mut wrapped, 3.0, 0.25);
        assert!((exposed_angle(&mut wrapped) - (TAU - 1.25)).abs() < 1e-12);

        let mut full = Vec::new();
        push_arc(&mut full, 1.0, TAU);
        assert_eq!(exposed_angle(&mut full), 0.0);
    }

    #[test]
    fn slice_planes_split_the_diameter_evenly() {
        let planes: Vec<f64> = slice_planes(1.0, 2.0, 4).collect();
        assert_eq!(planes.len(), 4);
        for (plane, expected) in planes.iter().zip([-0.5, 0.5, 1.5, 2.5]) {
            assert!((plane - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn tiny_atom_does_not_refine_slicing_of_others() {
        let zero_probe = |n_slices: usize| Parameters {
            probe_radius: 0.0,
            lee_richards_n_slices: n_slices,
            ..Parameters::default()
        };
        let coords = Coordinates::from(&[[0.0, 0.0, 0.0], [20.0, 0.0, 5.0]][..]);
        let alone = Coordinates::from(&[[0.0, 0.0, 0.0]][..]);
        let reference = compute(&alone, &[1.6], Some(&zero_probe(20))).unwrap().value;

        for tiny in [1.6, 1e-3, 1e-6, 1e-9] {
            let result = compute(&coords, &[1.6, tiny], Some(&zero_probe(20)))
                .unwrap()
                .value;
            assert_eq!(result.atom_sasa[0], reference.atom_sasa[0], "tiny radius {tiny}");
            assert!(relative_error(result.atom_sasa[1], 4.0 * PI * tiny * tiny) < 1e-9);
        }
        // Each atom is cut into exactly the requested number of slabs, whatever its size.
        assert_eq!(slice_planes(0.0, 1.6, 20).len(), 20);
        assert_eq!(slice_planes(5.0, 1e-9, 20).len(), 20);
    }

    #[test]
    fn isolated_atom_has_full_sphere_area_at_any_resolution() {
        let coords = Coordinates::from(&[[0.3, 0.1, -7.0]][..]);
        let expected = 4.0 * PI * 3.0 * 3.0;
        for n_slices in [1, 3, 20, 157] {
            let result = compute(&coords, &[1.6], Some(&params(n_slices, 1)))
                .unwrap()
                .value;
            assert!(
                relative_error(result.total, expected) < 1e-9,
                "{n_slices} slices gave {}",
                result.total
            );
        }
    }

    #[test]
    fn two_overlapping_spheres_match_analytic_area() {
        let (coords, radii) = fixtures::two_spheres();
        let result = compute(&coords, &radii, Some(&params(200, 1))).unwrap().value;
        let exact = fixtures::two_spheres_exact_area(1.4);
        assert!(relative_error(result.total, exact) < 1e-3);
    }

    #[test]
    fn output_is_identical_for_any_thread_count() {
        let (coords, radii) = fixtures::random_cloud(23, 200);
        let reference = compute(&coords, &radii, Some(&params(20, 1))).unwrap().value;
        for threads in [2, 3, 8] {
            let result = compute(&coords, &radii, Some(&params(20, threads)))
                .unwrap()
                .value;
            assert_eq!(result.atom_sasa, reference.atom_sasa, "{threads} threads");
            assert_eq!(result.total, reference.total);
        }
    }

    #[test]
    fn converges_toward_high_resolution_shrake_rupley() {
        let (coords, radii) = fixtures::six_atom_cluster();
        let sr_params = Parameters::builder()
            .shrake_rupley_n_points(20_000)
            .build()
            .unwrap();
        let reference = shrake_rupley::compute(&coords, &radii, Some(&sr_params))
            .unwrap()
            .value
            .total;
        let error = |n_slices: usize| {
            let total = compute(&coords, &radii, Some(&params(n_slices, 1)))
                .unwrap()
                .value
                .total;
            (total - reference).abs()
        };
        let (coarse, medium, fine) = (error(2), error(5), error(20));
        assert!(coarse > medium, "{coarse} <= {medium}");
        assert!(medium > fine, "{medium} <= {fine}");
        assert!(error(100) < 0.5);
        assert!(error(400) < 0.5);
    }

    #[test]
    fn coincident_spheres_collapse_to_one() {
        let coords = Coordinates::from(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]][..]);
        let result = compute(&coords, &[1.6, 1.6], None).unwrap().value;
        assert!(relative_error(result.total, 4.0 * PI * 9.0) < 1e-9);
        assert_eq!(result.atom_sasa[1], 0.0);
    }

    #[test]
    fn buried_and_zero_radius_atoms_have_zero_area() {
        let coords = Coordinates::from(&[[0.0, 0.0, 0.0], [0.2, 0.0, 0.0], [9.0, 0.0, 0.0]][..]);
        let result = compute(&coords, &[3.0, 0.5, 0.0], None).unwrap().value;
        assert_eq!(result.atom_sasa[1], 0.0);
        assert_eq!(result.atom_sasa[2], 0.0);
        assert!(relative_error(result.atom_sasa[0], 4.0 * PI * 4.4 * 4.4) < 1e-9);
    }

    #[test]
    fn zero_slices_is_a_configuration_error() {
        let coords = Coordinates::from(&[[0.0, 0.0, 0.0]][..]);
        let bad = Parameters {
            lee_richards_n_slices: 0,
            ..Parameters::default()
        };
        assert!(matches!(
            compute(&coords, &[1.6], Some(&bad)),
            Err(SasaError::Configuration(_))
        ));
    }

    #[test]
    fn compute_into_checks_lengths_and_overwrites_buffer() {
        let (coords, radii) = fixtures::two_spheres();
        let mut short = vec![0.0; 1];
        assert!(matches!(
            compute_into(&mut short, &coords, &radii, None),
            Err(SasaError::LengthMismatch { what: "output buffer", .. })
        ));

        let owned = compute(&coords, &radii, None).unwrap().value;
        let mut out = vec![123.0; coords.len()];
        let total = compute_into(&mut out, &coords, &radii, None).unwrap().value;
        assert_eq!(out, owned.atom_sasa);
        assert_eq!(total, owned.total);
    }

    #[test]
    fn all_zero_radii_give_zero_area() {
        let coords = Coordinates::from(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]][..]);
        let zero_probe = Parameters {
            probe_radius: 0.0,
            ..Parameters::default()
        };
        let result = compute(&coords, &[0.0, 0.0], Some(&zero_probe)).unwrap();
        assert!(result.is_success());
        assert_eq!(result.value.atom_sasa, vec![0.0, 0.0]);
    }

    #[test]
    fn empty_input_gives_empty_result() {
        let result = compute(&Coordinates::default(), &[], None).unwrap().value;
        assert!(result.is_empty());
        assert_eq!(result.total, 0.0);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn threads_without_thread_support_warn_and_match_sequential() {
        let (coords, radii) = fixtures::random_cloud(5, 40);
        let sequential = compute(&coords, &radii, Some(&params(20, 1))).unwrap();
        let requested = compute(&coords, &radii, Some(&params(20, 4))).unwrap();
        assert_eq!(sequential.status(), Status::Success);
        assert_eq!(requested.status(), Status::Warning);
        assert_eq!(requested.warnings[0].operation, "lee_richards");
        assert_eq!(requested.value.atom_sasa, sequential.value.atom_sasa);
    }
}
