use super::coords::Coordinates;
use crate::core::classifier::Classifier;
use crate::core::classifier::element::ElementClassifier;
use crate::engine::diagnostics::{Diagnostic, Outcome};
use crate::engine::error::SasaError;
use nalgebra::Point3;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub name: String,
    /// Index of the residue this atom belongs to.
    pub residue: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub name: String,
    /// Residue number as written in the source, insertion code included (e.g. `"12A"`).
    pub number: String,
    /// Index of the chain this residue belongs to.
    pub chain: usize,
    pub(crate) atoms: Range<usize>,
}

impl Residue {
    pub fn atoms(&self) -> Range<usize> {
        self.atoms.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub label: char,
    pub(crate) residues: Range<usize>,
    pub(crate) atoms: Range<usize>,
}

impl Chain {
    pub fn residues(&self) -> Range<usize> {
        self.residues.clone()
    }

    pub fn atoms(&self) -> Range<usize> {
        self.atoms.clone()
    }
}

/// A molecule as a flat list of atoms grouped into contiguous residues and chains.
///
/// Atom `i` has position `coordinates()[i]` and radius `radii()[i]`. Residues occupy
/// consecutive atom ranges and chains occupy consecutive residue ranges, so every atom belongs
/// to exactly one residue and one chain. Use
/// [`StructureBuilder`](super::builder::StructureBuilder) to construct one.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub(crate) atoms: Vec<Atom>,
    pub(crate) residues: Vec<Residue>,
    pub(crate) chains: Vec<Chain>,
    pub(crate) coordinates: Coordinates,
    pub(crate) radii: Vec<f64>,
}

impl Structure {
    #[inline]
    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn n_residues(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn n_chains(&self) -> usize {
        self.chains.len()
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn atom(&self, index: usize) -> Result<&Atom, SasaError> {
        self.atoms
            .get(index)
            .ok_or_else(|| SasaError::index("atom", index, self.atoms.len()))
    }

    pub fn residue(&self, index: usize) -> Result<&Residue, SasaError> {
        self.residues
            .get(index)
            .ok_or_else(|| SasaError::index("residue", index, self.residues.len()))
    }

    pub fn chain(&self, index: usize) -> Result<&Chain, SasaError> {
        self.chains
            .get(index)
            .ok_or_else(|| SasaError::index("chain", index, self.chains.len()))
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    pub fn residues(&self) -> impl Iterator<Item = &Residue> {
        self.residues.iter()
    }

    pub fn chains(&self) -> impl Iterator<Item = &Chain> {
        self.chains.iter()
    }

    /// The residue containing atom `index`.
    pub fn residue_of(&self, index: usize) -> Result<&Residue, SasaError> {
        let atom = self.atom(index)?;
        Ok(&self.residues[atom.residue])
    }

    pub fn position(&self, index: usize) -> Result<&Point3<f64>, SasaError> {
        self.coordinates
            .get(index)
            .ok_or_else(|| SasaError::index("atom", index, self.atoms.len()))
    }

    pub fn residue_atoms(&self, index: usize) -> Result<Range<usize>, SasaError> {
        Ok(self.residue(index)?.atoms())
    }

    pub fn chain_atoms(&self, index: usize) -> Result<Range<usize>, SasaError> {
        Ok(self.chain(index)?.atoms())
    }

    pub fn chain_residues(&self, index: usize) -> Result<Range<usize>, SasaError> {
        Ok(self.chain(index)?.residues())
    }

    /// Index of the chain labelled `label`.
    pub fn chain_index(&self, label: char) -> Result<usize, SasaError> {
        self.chains
            .iter()
            .position(|chain| chain.label == label)
            .ok_or(SasaError::ChainNotFound(label))
    }

    /// The chain labels in structure order.
    pub fn chain_labels(&self) -> String {
        self.chains.iter().map(|chain| chain.label).collect()
    }

    /// A fixed-layout label for atom `index`, e.g. `"A    1 ALA CA  "`.
    pub fn atom_descriptor(&self, index: usize) -> Result<String, SasaError> {
        let atom = self.atom(index)?;
        let residue = &self.residues[atom.residue];
        Ok(format!(
            "{} {:>4} {:<3} {:<4}",
            self.chains[residue.chain].label,
            residue.number.trim(),
            residue.name.trim(),
            atom.name.trim()
        ))
    }

    /// A fixed-layout label for residue `index`, e.g. `"A    1 ALA"`.
    pub fn residue_descriptor(&self, index: usize) -> Result<String, SasaError> {
        let residue = self.residue(index)?;
        Ok(format!(
            "{} {:>4} {:<3}",
            self.chains[residue.chain].label,
            residue.number.trim(),
            residue.name.trim()
        ))
    }

    /// Replaces every atom radius with the one `classifier` assigns.
    ///
    /// Atoms the classifier does not cover fall back to an element-based guess; atoms whose
    /// element cannot be recognized either keep their current radius. Each fallback is
    /// reported as a warning.
    pub fn with_radii_from<C: Classifier + ?Sized>(mut self, classifier: &C) -> Outcome<Self> {
        let fallback = ElementClassifier::new();
        let mut warnings = Vec::new();
        for (index, atom) in self.atoms.iter().enumerate() {
            let residue_name = &self.residues[atom.residue].name;
            if let Some(radius) = classifier.radius(residue_name, &atom.name) {
                self.radii[index] = radius;
                continue;
            }
            let label = format!("{} {}", residue_name.trim(), atom.name.trim());
            match fallback.radius(residue_name, &atom.name) {
                Some(radius) => {
                    self.radii[index] = radius;
                    warnings.push(
                        Diagnostic::warning(
                            "with_radii_from",
                            format!(
                                "atom {label} not covered by classifier, using element radius {radius:.2}"
                            ),
                        )
                        .emit(),
                    );
                }
                None => warnings.push(
                    Diagnostic::warning(
                        "with_radii_from",
                        format!(
                            "atom {label} not covered by classifier and element unknown, keeping radius {:.2}",
                            self.radii[index]
                        ),
                    )
                    .emit(),
                ),
            }
        }
        Outcome::with_warnings(self, warnings)
    }
}
