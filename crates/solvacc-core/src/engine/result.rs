use super::config::Parameters;
use super::error::SasaError;

/// Per-atom SASA values in Å², index-aligned with the input coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SasaResult {
    pub atom_sasa: Vec<f64>,
    pub total: f64,
    /// The parameters the values were computed with.
    pub parameters: Parameters,
}

impl SasaResult {
    pub(crate) fn new(atom_sasa: Vec<f64>, parameters: Parameters) -> Self {
        let total = atom_sasa.iter().sum();
        Self {
            atom_sasa,
            total,
            parameters,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atom_sasa.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atom_sasa.is_empty()
    }

    pub fn atom(&self, index: usize) -> Result<f64, SasaError> {
        self.atom_sasa
            .get(index)
            .copied()
            .ok_or_else(|| SasaError::index("atom", index, self.atom_sasa.len()))
    }

    /// Sum of the values of atoms `range`.
    pub fn sum_over(&self, range: std::ops::Range<usize>) -> Result<f64, SasaError> {
        let len = self.atom_sasa.len();
        self.atom_sasa
            .get(range.clone())
            .map(|values| values.iter().sum())
            .ok_or_else(|| SasaError::index("atom", range.end.saturating_sub(1), len))
    }
}
