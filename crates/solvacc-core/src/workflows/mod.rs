//! # Workflows Module
//!
//! This module provides the high-level entry points of the library. They combine the
//! algorithms of [`crate::engine`] with the models and classifiers of [`crate::core`].
//!
//! ## Architecture
//!
//! - **Calculation** ([`calculate`]) - Runs the algorithm selected in the parameters on raw
//!   coordinates or on a `Structure`
//! - **Aggregation** ([`aggregate`]) - Folds per-atom areas into classified atom, residue, chain
//!   and structure subareas
//! - **Relative accessibility** ([`rsa`]) - Normalizes residue subareas by the reference
//!   maxima of a classifier
//!
//! ## Example
//!
//! ```ignore
//! let classifier = ConfigClassifier::load(Path::new("protein.toml"))?;
//! let structure = structure.with_radii_from(&classifier).value;
//! let result = calculate::calculate_structure(&structure, None)?.value;
//! let chain_a = aggregate::chain_subarea(&structure, &result, &classifier, 0)?;
//! let rsa = rsa::structure_rsa(&structure, &result, &classifier)?;
//! ```

pub mod aggregate;
pub mod calculate;
pub mod rsa;
