use super::aggregate::residue_subarea;
use crate::core::classifier::{Classifier, MaxArea};
use crate::core::models::structure::Structure;
use crate::core::models::subarea::Subarea;
use crate::engine::diagnostics::{Diagnostic, Outcome};
use crate::engine::error::SasaError;
use crate::engine::result::SasaResult;
use tracing::instrument;

/// Absolute and relative accessibility of one residue.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueRsa {
    pub residue_index: usize,
    /// Fixed-layout residue label, e.g. `"A    1 ALA"`.
    pub descriptor: String,
    pub absolute: Subarea,
    pub relative: Subarea,
}

/// Divides `absolute` field by field by the reference maxima of the residue type named by
/// `absolute.name`.
///
/// - A classifier without any reference areas yields an all-zero, unnamed subarea. This is not
///   a problem, so no warning is raised.
/// - A classifier that has reference areas, but none for this residue type, yields the same
///   all-zero subarea together with a warning.
/// - A zero reference field yields `0.0` for that field.
pub fn relative_subarea(
    absolute: &Subarea,
    classifier: &(impl Classifier + ?Sized),
) -> Outcome<Subarea> {
    let residue_name = absolute.name.as_deref().unwrap_or_default();
    match classifier.max_area(residue_name) {
        MaxArea::Unsupported => Outcome::success(Subarea::null()),
        MaxArea::Missing => {
            let message = match &absolute.name {
                Some(name) => format!(
                    "no reference areas for residue type '{}'{}",
                    name,
                    classifier
                        .name()
                        .map(|c| format!(" in classifier '{c}'"))
                        .unwrap_or_default()
                ),
                None => "subarea has no residue name to look up reference areas".to_string(),
            };
            Outcome::warning(
                Subarea::null(),
                Diagnostic::warning("relative_subarea", message).emit(),
            )
        }
        MaxArea::Found(reference) => Outcome::success(absolute.relative_to(reference)),
    }
}

/// Absolute and relative subareas of residue `index`.
pub fn residue_rsa(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
    index: usize,
) -> Result<Outcome<ResidueRsa>, SasaError> {
    let absolute = residue_subarea(structure, result, classifier, index)?;
    let descriptor = structure.residue_descriptor(index)?;
    let relative = relative_subarea(&absolute, classifier);
    Ok(relative.map(|relative| ResidueRsa {
        residue_index: index,
        descriptor,
        absolute,
        relative,
    }))
}

/// [`residue_rsa`] for every residue in structure order, with one warning per residue whose
/// type lacks reference areas.
#[instrument(skip_all, name = "rsa_workflow")]
pub fn structure_rsa(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
) -> Result<Outcome<Vec<ResidueRsa>>, SasaError> {
    let mut rows = Vec::with_capacity(structure.n_residues());
    let mut warnings = Vec::new();
    for index in 0..structure.n_residues() {
        let (row, row_warnings) = residue_rsa(structure, result, classifier, index)?.into_parts();
        rows.push(row);
        warnings.extend(row_warnings);
    }
    Ok(Outcome::with_warnings(rows, warnings))
}
