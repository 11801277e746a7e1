//! # Core Module
//!
//! This module provides the data models and the atom classification capability that the
//! SASA engines and the aggregation workflows operate on.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Coordinates, structures grouped into residues
//!   and chains, and the `Subarea` breakdown of accessible area
//! - **Atom Classification** ([`classifier`]) - Polar/apolar classes, backbone detection,
//!   van der Waals radii and reference maximum areas
//!
//! ## Key Capabilities
//!
//! - **Contiguous structure layout** where residues and chains are index ranges over atoms
//! - **Pluggable classifiers** loaded from TOML or inferred from element symbols
//! - **Additive area records** that fold naturally over residues and chains

pub mod classifier;
pub mod models;
