//! # Classifier Module
//!
//! Classifiers answer the questions the aggregation and RSA layers ask about individual
//! atoms and residues: which class an atom belongs to (polar, apolar or unknown), whether it is
//! a backbone atom, what its van der Waals radius is, and what the reference maximum areas of
//! a residue type are.
//!
//! ## Key Components
//!
//! - [`Classifier`] - The capability trait every classifier implements
//! - [`config`] - A classifier defined by a TOML file of atom types and residue maxima
//! - [`element`] - A fallback classifier that infers everything from the element symbol
//!
//! Lookups are pure: implementations hold no interior mutability and are shared freely across
//! worker threads.

pub mod config;
pub mod element;

use crate::core::models::subarea::Subarea;
use phf::{Set, phf_set};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "CA", "N", "O", "C",
};

/// Returns `true` if `atom_name`, after trimming surrounding whitespace, is exactly one of the
/// main-chain atoms `CA`, `N`, `O` or `C`. The comparison is case-sensitive and independent of
/// the residue type.
pub fn is_backbone_atom(atom_name: &str) -> bool {
    BACKBONE_ATOM_NAMES.contains(atom_name.trim())
}

/// Polarity class of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomClass {
    Polar,
    Apolar,
    #[default]
    Unknown,
}

impl FromStr for AtomClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polar" => Ok(AtomClass::Polar),
            "apolar" | "nonpolar" | "non-polar" => Ok(AtomClass::Apolar),
            "unknown" => Ok(AtomClass::Unknown),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AtomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AtomClass::Polar => "polar",
                AtomClass::Apolar => "apolar",
                AtomClass::Unknown => "unknown",
            }
        )
    }
}

/// Result of looking up the reference maximum areas of a residue type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxArea<'a> {
    /// The classifier carries no reference areas for any residue.
    Unsupported,
    /// The classifier has reference areas, but none for this residue.
    Missing,
    Found(&'a Subarea),
}

/// The capability set used to classify atoms and normalize residue areas.
pub trait Classifier: Send + Sync {
    /// A human-readable name, if the classifier defines one.
    fn name(&self) -> Option<&str>;

    /// Polarity class of atom `atom_name` in a residue of type `residue_name`.
    fn classify(&self, residue_name: &str, atom_name: &str) -> AtomClass;

    /// Whether `atom_name` belongs to the main chain. Everything else is side chain.
    fn is_backbone(&self, atom_name: &str) -> bool {
        is_backbone_atom(atom_name)
    }

    /// Reference maximum areas of residue type `residue_name`, used for RSA.
    fn max_area(&self, residue_name: &str) -> MaxArea<'_>;

    /// Van der Waals radius in Angstroms, or `None` if the atom is not covered.
    fn radius(&self, residue_name: &str, atom_name: &str) -> Option<f64>;
}
