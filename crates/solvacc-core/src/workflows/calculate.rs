use crate::core::models::coords::Coordinates;
use crate::core::models::structure::Structure;
use crate::engine::config::{Algorithm, Parameters};
use crate::engine::diagnostics::Outcome;
use crate::engine::error::SasaError;
use crate::engine::lee_richards;
use crate::engine::result::SasaResult;
use crate::engine::shrake_rupley;
use tracing::{info, instrument};

/// Computes per-atom SASA with the algorithm named in `params`.
///
/// `None` selects [`Parameters::default`], i.e. Lee-Richards with a 1.4 Å probe.
#[instrument(skip_all, name = "calculate_workflow")]
pub fn calculate(
    coords: &Coordinates,
    radii: &[f64],
    params: Option<&Parameters>,
) -> Result<Outcome<SasaResult>, SasaError> {
    let params = params.copied().unwrap_or_default();
    info!(algorithm = %params.algorithm, atoms = coords.len(), "Starting SASA calculation.");
    match params.algorithm {
        Algorithm::LeeRichards => lee_richards::compute(coords, radii, Some(&params)),
        Algorithm::ShrakeRupley => shrake_rupley::compute(coords, radii, Some(&params)),
    }
}

/// Computes per-atom SASA of `structure` using its own radii.
pub fn calculate_structure(
    structure: &Structure,
    params: Option<&Parameters>,
) -> Result<Outcome<SasaResult>, SasaError> {
    calculate(structure.coordinates(), structure.radii(), params)
}
