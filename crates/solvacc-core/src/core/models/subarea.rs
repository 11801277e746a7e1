use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Breakdown of an accessible surface area into its classified components.
///
/// For a classifier that assigns every atom a polar or apolar class, `total == polar + apolar`
/// and `total == main_chain + side_chain` hold up to floating-point rounding. Atoms classified
/// as unknown contribute to `total` only.
///
/// The `name` is not part of the arithmetic: adding into a subarea keeps the accumulator's
/// name, so a running residue total stays labelled with the residue it was started for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Subarea {
    #[serde(skip)]
    pub name: Option<String>,
    pub total: f64,
    pub polar: f64,
    pub apolar: f64,
    pub main_chain: f64,
    pub side_chain: f64,
}

impl Subarea {
    /// The identity element for addition: no name and all areas zero.
    pub const NULL: Subarea = Subarea {
        name: None,
        total: 0.0,
        polar: 0.0,
        apolar: 0.0,
        main_chain: 0.0,
        side_chain: 0.0,
    };

    pub fn new(total: f64, polar: f64, apolar: f64, main_chain: f64, side_chain: f64) -> Self {
        Self {
            name: None,
            total,
            polar,
            apolar,
            main_chain,
            side_chain,
        }
    }

    #[inline]
    pub fn null() -> Self {
        Self::NULL
    }

    /// A null subarea carrying `name`, used as the starting point of a named fold.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::NULL
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds the five areas of `term` into `self`, leaving `self.name` untouched.
    pub fn add_subarea(&mut self, term: &Subarea) {
        self.total += term.total;
        self.polar += term.polar;
        self.apolar += term.apolar;
        self.main_chain += term.main_chain;
        self.side_chain += term.side_chain;
    }

    /// Field-wise ratio of `self` to `reference`, keeping `self.name`.
    ///
    /// A zero reference field yields `0.0` for that field so that no NaN or infinity can
    /// leak into downstream sums.
    pub fn relative_to(&self, reference: &Subarea) -> Subarea {
        Subarea {
            name: self.name.clone(),
            total: ratio(self.total, reference.total),
            polar: ratio(self.polar, reference.polar),
            apolar: ratio(self.apolar, reference.apolar),
            main_chain: ratio(self.main_chain, reference.main_chain),
            side_chain: ratio(self.side_chain, reference.side_chain),
        }
    }

    /// Whether all five areas are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.total == 0.0
            && self.polar == 0.0
            && self.apolar == 0.0
            && self.main_chain == 0.0
            && self.side_chain == 0.0
    }
}

#[inline]
fn ratio(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        value / reference
    }
}

impl AddAssign<&Subarea> for Subarea {
    fn add_assign(&mut self, rhs: &Subarea) {
        self.add_subarea(rhs);
    }
}

impl AddAssign for Subarea {
    fn add_assign(&mut self, rhs: Subarea) {
        self.add_subarea(&rhs);
    }
}

impl Add for Subarea {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl<'a> std::iter::Sum<&'a Subarea> for Subarea {
    fn sum<I: Iterator<Item = &'a Subarea>>(iter: I) -> Self {
        iter.fold(Subarea::null(), |mut acc, term| {
            acc += term;
            acc
        })
    }
}
