use super::{AtomClass, Classifier, MaxArea};
use crate::core::models::subarea::Subarea;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Residue name whose atom table applies to every residue lacking its own entry.
pub const ANY_RESIDUE: &str = "ANY";

/// Radius and polarity shared by every atom assigned to a type.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AtomType {
    pub radius: f64,
    pub class: AtomClass,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassifierFile {
    name: Option<String>,
    types: HashMap<String, AtomType>,
    #[serde(default)]
    atoms: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    max_area: HashMap<String, Subarea>,
}

/// A classifier defined by a TOML document.
///
/// ```toml
/// name = "protein"
///
/// [types]
/// C_ALI = { radius = 1.88, class = "apolar" }
/// O     = { radius = 1.46, class = "polar" }
///
/// [atoms.ANY]
/// C = "C_ALI"
/// O = "O"
///
/// [atoms.ALA]
/// CB = "C_ALI"
///
/// [max_area.ALA]
/// total = 107.95
/// main_chain = 38.54
/// side_chain = 69.41
/// polar = 38.54
/// apolar = 69.41
/// ```
///
/// Atom lookups try the residue's own table first and fall back to [`ANY_RESIDUE`]. Residue and
/// atom names are trimmed before lookup. A document without a `max_area` table yields a
/// classifier without reference areas ([`MaxArea::Unsupported`]).
#[derive(Debug, Clone, Default)]
pub struct ConfigClassifier {
    name: Option<String>,
    atoms: HashMap<String, HashMap<String, AtomType>>,
    max_areas: HashMap<String, Subarea>,
}

impl ConfigClassifier {
    pub fn load(path: &Path) -> Result<Self, ClassifierLoadError> {
        let origin = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ClassifierLoadError::Io {
            path: origin.clone(),
            source: e,
        })?;
        Self::parse(&content, &origin)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ClassifierLoadError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ClassifierLoadError> {
        let file: ClassifierFile =
            toml::from_str(content).map_err(|e| ClassifierLoadError::Toml {
                path: origin.to_string(),
                source: e,
            })?;

        for (type_name, atom_type) in &file.types {
            if !atom_type.radius.is_finite() || atom_type.radius < 0.0 {
                return Err(ClassifierLoadError::InvalidRadius {
                    type_name: type_name.clone(),
                    radius: atom_type.radius,
                });
            }
        }

        let mut atoms = HashMap::with_capacity(file.atoms.len());
        for (residue_name, table) in file.atoms {
            let residue_name = residue_name.trim().to_string();
            let mut resolved = HashMap::with_capacity(table.len());
            for (atom_name, type_name) in table {
                let atom_type = file.types.get(type_name.trim()).copied().ok_or_else(|| {
                    ClassifierLoadError::UnknownType {
                        residue: residue_name.clone(),
                        atom: atom_name.clone(),
                        type_name: type_name.clone(),
                    }
                })?;
                resolved.insert(atom_name.trim().to_string(), atom_type);
            }
            atoms.insert(residue_name, resolved);
        }

        let max_areas = file
            .max_area
            .into_iter()
            .map(|(residue_name, area)| {
                let residue_name = residue_name.trim().to_string();
                let area = area.with_name(residue_name.clone());
                (residue_name, area)
            })
            .collect();

        Ok(Self {
            name: file.name,
            atoms,
            max_areas,
        })
    }

    /// The atom type assigned to `atom_name` in `residue_name`, if any.
    pub fn atom_type(&self, residue_name: &str, atom_name: &str) -> Option<&AtomType> {
        let atom_name = atom_name.trim();
        self.atoms
            .get(residue_name.trim())
            .and_then(|table| table.get(atom_name))
            .or_else(|| {
                self.atoms
                    .get(ANY_RESIDUE)
                    .and_then(|table| table.get(atom_name))
            })
    }

    pub fn has_reference_areas(&self) -> bool {
        !self.max_areas.is_empty()
    }
}

impl Classifier for ConfigClassifier {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn classify(&self, residue_name: &str, atom_name: &str) -> AtomClass {
        self.atom_type(residue_name, atom_name)
            .map_or(AtomClass::Unknown, |t| t.class)
    }

    fn max_area(&self, residue_name: &str) -> MaxArea<'_> {
        if self.max_areas.is_empty() {
            return MaxArea::Unsupported;
        }
        self.max_areas
            .get(residue_name.trim())
            .map_or(MaxArea::Missing, MaxArea::Found)
    }

    fn radius(&self, residue_name: &str, atom_name: &str) -> Option<f64> {
        self.atom_type(residue_name, atom_name).map(|t| t.radius)
    }
}

#[derive(Debug, Error)]
pub enum ClassifierLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Atom '{atom}' of residue '{residue}' refers to undefined type '{type_name}'")]
    UnknownType {
        residue: String,
        atom: String,
        type_name: String,
    },
    #[error("Type '{type_name}' has invalid radius {radius}")]
    InvalidRadius { type_name: String, radius: f64 },
}
