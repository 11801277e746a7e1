use crate::core::classifier::{AtomClass, Classifier};
use crate::core::models::structure::Structure;
use crate::core::models::subarea::Subarea;
use crate::engine::error::SasaError;
use crate::engine::result::SasaResult;
use std::ops::Range;

fn check_lengths(structure: &Structure, result: &SasaResult) -> Result<(), SasaError> {
    if result.len() != structure.n_atoms() {
        return Err(SasaError::LengthMismatch {
            what: "SASA result",
            expected: structure.n_atoms(),
            found: result.len(),
        });
    }
    Ok(())
}

fn classified(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
    index: usize,
) -> Subarea {
    let atom = &structure.atoms[index];
    let residue_name = &structure.residues[atom.residue].name;
    let area = result.atom_sasa[index];

    let mut subarea = Subarea::named(atom.name.trim());
    subarea.total = area;
    match classifier.classify(residue_name, &atom.name) {
        AtomClass::Polar => subarea.polar = area,
        AtomClass::Apolar => subarea.apolar = area,
        AtomClass::Unknown => {}
    }
    if classifier.is_backbone(&atom.name) {
        subarea.main_chain = area;
    } else {
        subarea.side_chain = area;
    }
    subarea
}

fn fold_atoms(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
    atoms: Range<usize>,
    start: Subarea,
) -> Subarea {
    atoms.fold(start, |mut acc, index| {
        acc += classified(structure, result, classifier, index);
        acc
    })
}

/// The area of atom `index`, split by the class and backbone membership `classifier` assigns.
///
/// The subarea is named after the atom. Unknown atoms contribute to `total` only.
pub fn atom_subarea(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
    index: usize,
) -> Result<Subarea, SasaError> {
    check_lengths(structure, result)?;
    structure.atom(index)?;
    Ok(classified(structure, result, classifier, index))
}

/// Sum of the atom subareas of residue `index`, named after the residue type.
pub fn residue_subarea(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
    index: usize,
) -> Result<Subarea, SasaError> {
    check_lengths(structure, result)?;
    let residue = structure.residue(index)?;
    Ok(fold_atoms(
        structure,
        result,
        classifier,
        residue.atoms(),
        Subarea::named(residue.name.trim()),
    ))
}

/// Sum of the atom subareas of chain `index`, named after the chain label.
pub fn chain_subarea(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
    index: usize,
) -> Result<Subarea, SasaError> {
    check_lengths(structure, result)?;
    let chain = structure.chain(index)?;
    Ok(fold_atoms(
        structure,
        result,
        classifier,
        chain.atoms(),
        Subarea::named(chain.label.to_string()),
    ))
}

/// Sum of all atom subareas, unnamed.
pub fn structure_subarea(
    structure: &Structure,
    result: &SasaResult,
    classifier: &(impl Classifier + ?Sized),
) -> Result<Subarea, SasaError> {
    check_lengths(structure, result)?;
    Ok(fold_atoms(
        structure,
        result,
        classifier,
        0..structure.n_atoms(),
        Subarea::null(),
    ))
}

/// Total SASA of residue `index`, without classification.
pub fn single_residue_sasa(
    result: &SasaResult,
    structure: &Structure,
    index: usize,
) -> Result<f64, SasaError> {
    check_lengths(structure, result)?;
    result.sum_over(structure.residue_atoms(index)?)
}
