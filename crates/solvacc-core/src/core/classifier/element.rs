use super::{AtomClass, Classifier, MaxArea};
use phf::{Map, phf_map};

static ELEMENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 1.20, "C" => 1.70, "N" => 1.55, "O" => 1.52, "S" => 1.80, "P" => 1.80,
    "F" => 1.47, "CL" => 1.75, "BR" => 1.85, "I" => 1.98, "SE" => 1.90,
};

// Two-letter symbols recognized at the start of an atom name. Calcium, sodium and friends are
// left out because their symbols collide with common protein atom names such as CA and NA.
const TWO_LETTER_ELEMENTS: [&str; 3] = ["CL", "BR", "SE"];

/// Infers the element symbol of a PDB-style atom name.
///
/// Leading digits (as in `1HB`) are skipped; the symbol is the first letter, or one of the
/// unambiguous two-letter symbols `CL`, `BR` and `SE`.
pub fn guess_element(atom_name: &str) -> Option<&'static str> {
    let letters = atom_name
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .to_ascii_uppercase();
    if let Some(symbol) = TWO_LETTER_ELEMENTS
        .iter()
        .find(|symbol| letters.starts_with(**symbol))
    {
        return Some(*symbol);
    }
    let first = letters.chars().next()?;
    let mut buffer = [0u8; 4];
    let first: &str = first.encode_utf8(&mut buffer);
    ELEMENT_RADII.get_entry(first).map(|(symbol, _)| *symbol)
}

/// A classifier that works from element symbols alone.
///
/// Nitrogen and oxygen are polar; carbon, sulfur, phosphorus, selenium and the halogens are
/// apolar; anything else (including hydrogen) is unknown. It carries no reference areas, so
/// relative accessibility is not available with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementClassifier;

impl ElementClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for ElementClassifier {
    fn name(&self) -> Option<&str> {
        Some("element")
    }

    fn classify(&self, _residue_name: &str, atom_name: &str) -> AtomClass {
        match guess_element(atom_name) {
            Some("N" | "O") => AtomClass::Polar,
            Some("C" | "S" | "P" | "SE" | "F" | "CL" | "BR" | "I") => AtomClass::Apolar,
            _ => AtomClass::Unknown,
        }
    }

    fn max_area(&self, _residue_name: &str) -> MaxArea<'_> {
        MaxArea::Unsupported
    }

    fn radius(&self, _residue_name: &str, atom_name: &str) -> Option<f64> {
        guess_element(atom_name).and_then(|symbol| ELEMENT_RADII.get(symbol).copied())
    }
}
