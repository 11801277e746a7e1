use super::coords::Coordinates;
use super::structure::{Atom, Chain, Residue, Structure};
use crate::engine::error::SasaError;
use nalgebra::Point3;
use std::collections::HashSet;

/// Incremental construction of a [`Structure`] from atom records in file order.
///
/// A new residue starts whenever the residue number changes, and a new chain whenever the
/// chain label changes. Groups must be contiguous: returning to a chain or a residue after
/// another one was started is rejected.
#[derive(Debug, Default)]
pub struct StructureBuilder {
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
    chains: Vec<Chain>,
    positions: Vec<Point3<f64>>,
    radii: Vec<f64>,

    // --- Contiguity bookkeeping ---
    seen_chains: HashSet<char>,
    seen_residues: HashSet<String>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one atom.
    ///
    /// # Errors
    ///
    /// Returns [`SasaError::InvalidInput`] for a non-finite position or a negative or
    /// non-finite radius, and [`SasaError::InvalidStructure`] if the record breaks chain or
    /// residue contiguity, or reuses a residue number with a different residue name.
    pub fn add_atom(
        &mut self,
        chain: char,
        residue_number: &str,
        residue_name: &str,
        atom_name: &str,
        position: Point3<f64>,
        radius: f64,
    ) -> Result<&mut Self, SasaError> {
        let index = self.atoms.len();
        if !position.coords.iter().all(|c| c.is_finite()) {
            return Err(SasaError::InvalidInput(format!(
                "position of atom {index} ({atom_name}) is not finite"
            )));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(SasaError::InvalidInput(format!(
                "radius {radius} of atom {index} ({atom_name}) is invalid"
            )));
        }

        let residue_number = residue_number.trim();
        self.enter_chain(chain)?;
        let residue_index = self.enter_residue(residue_number, residue_name)?;

        self.atoms.push(Atom {
            name: atom_name.to_string(),
            residue: residue_index,
        });
        self.positions.push(position);
        self.radii.push(radius);
        self.residues[residue_index].atoms.end = index + 1;
        if let Some(current) = self.chains.last_mut() {
            current.atoms.end = index + 1;
        }
        Ok(self)
    }

    fn enter_chain(&mut self, label: char) -> Result<(), SasaError> {
        if self.chains.last().is_some_and(|c| c.label == label) {
            return Ok(());
        }
        if !self.seen_chains.insert(label) {
            return Err(SasaError::InvalidStructure(format!(
                "chain '{label}' reappears after another chain was started"
            )));
        }
        let atom_start = self.atoms.len();
        let residue_start = self.residues.len();
        self.chains.push(Chain {
            label,
            residues: residue_start..residue_start,
            atoms: atom_start..atom_start,
        });
        self.seen_residues.clear();
        Ok(())
    }

    fn enter_residue(&mut self, number: &str, name: &str) -> Result<usize, SasaError> {
        let chain_index = self.chains.len() - 1;
        if let Some(current) = self.residues.last() {
            if current.chain == chain_index && current.number == number {
                if current.name != name {
                    return Err(SasaError::InvalidStructure(format!(
                        "residue {number} of chain '{}' is named both {} and {name}",
                        self.chains[chain_index].label, current.name
                    )));
                }
                return Ok(self.residues.len() - 1);
            }
        }
        if !self.seen_residues.insert(number.to_string()) {
            return Err(SasaError::InvalidStructure(format!(
                "residue {number} of chain '{}' reappears after another residue was started",
                self.chains[chain_index].label
            )));
        }
        let atom_start = self.atoms.len();
        self.residues.push(Residue {
            name: name.to_string(),
            number: number.to_string(),
            chain: chain_index,
            atoms: atom_start..atom_start,
        });
        let residue_end = self.residues.len();
        self.chains[chain_index].residues.end = residue_end;
        Ok(residue_end - 1)
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn build(self) -> Structure {
        Structure {
            atoms: self.atoms,
            residues: self.residues,
            chains: self.chains,
            coordinates: Coordinates::new(self.positions),
            radii: self.radii,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point3<f64> {
        Point3::origin()
    }

    #[test]
    fn groups_consecutive_records_into_residues_and_chains() {
        let mut builder = StructureBuilder::new();
        builder
            .add_atom('A', "1", "ALA", "N", origin(), 1.5)
            .unwrap()
            .add_atom('A', " 1", "ALA", "CA", origin(), 1.5)
            .unwrap()
            .add_atom('A', "2", "GLY", "CA", origin(), 1.5)
            .unwrap()
            .add_atom('B', "1", "ALA", "CA", origin(), 1.5)
            .unwrap();
        assert_eq!(builder.n_atoms(), 4);
        let structure = builder.build();
        assert_eq!(structure.n_residues(), 3);
        assert_eq!(structure.n_chains(), 2);
        assert_eq!(structure.residue(0).unwrap().atoms(), 0..2);
        assert_eq!(structure.residue(2).unwrap().chain, 1);
        assert_eq!(structure.chain(1).unwrap().atoms(), 3..4);
        assert_eq!(structure.coordinates().len(), 4);
    }

    #[test]
    fn reopening_a_chain_is_rejected() {
        let mut builder = StructureBuilder::new();
        builder.add_atom('A', "1", "ALA", "CA", origin(), 1.5).unwrap();
        builder.add_atom('B', "1", "ALA", "CA", origin(), 1.5).unwrap();
        let result = builder.add_atom('A', "2", "ALA", "CA", origin(), 1.5);
        assert!(matches!(result, Err(SasaError::InvalidStructure(_))));
    }

    #[test]
    fn reopening_a_residue_is_rejected() {
        let mut builder = StructureBuilder::new();
        builder.add_atom('A', "1", "ALA", "CA", origin(), 1.5).unwrap();
        builder.add_atom('A', "2", "GLY", "CA", origin(), 1.5).unwrap();
        let result = builder.add_atom('A', "1", "ALA", "CB", origin(), 1.5);
        assert!(matches!(result, Err(SasaError::InvalidStructure(_))));
    }

    #[test]
    fn same_residue_number_in_another_chain_is_allowed() {
        let mut builder = StructureBuilder::new();
        builder.add_atom('A', "1", "ALA", "CA", origin(), 1.5).unwrap();
        builder.add_atom('B', "1", "ALA", "CA", origin(), 1.5).unwrap();
        assert_eq!(builder.build().n_residues(), 2);
    }

    #[test]
    fn conflicting_residue_name_is_rejected() {
        let mut builder = StructureBuilder::new();
        builder.add_atom('A', "1", "ALA", "CA", origin(), 1.5).unwrap();
        let result = builder.add_atom('A', "1", "GLY", "N", origin(), 1.5);
        assert!(matches!(result, Err(SasaError::InvalidStructure(_))));
    }

    #[test]
    fn invalid_radius_or_position_is_rejected() {
        let mut builder = StructureBuilder::new();
        assert!(matches!(
            builder.add_atom('A', "1", "ALA", "CA", origin(), -0.5),
            Err(SasaError::InvalidInput(_))
        ));
        assert!(matches!(
            builder.add_atom('A', "1", "ALA", "CA", origin(), f64::INFINITY),
            Err(SasaError::InvalidInput(_))
        ));
        assert!(matches!(
            builder.add_atom('A', "1", "ALA", "CA", Point3::new(f64::NAN, 0.0, 0.0), 1.0),
            Err(SasaError::InvalidInput(_))
        ));
        assert_eq!(builder.n_atoms(), 0);
    }

    #[test]
    fn empty_builder_gives_empty_structure() {
        let structure = StructureBuilder::new().build();
        assert_eq!(structure.n_atoms(), 0);
        assert_eq!(structure.n_chains(), 0);
    }
}
