//! # Core Models Module
//!
//! This module contains the data structures used to describe the geometry of a molecule and
//! the areas computed for it.
//!
//! ## Key Components
//!
//! - [`coords`] - Immutable coordinate sets, one point per atom
//! - [`structure`] - Atoms grouped into contiguous residues and chains, with radii
//! - [`builder`] - Incremental construction of a `Structure` that enforces contiguity
//! - [`subarea`] - The total/polar/apolar/main-chain/side-chain area record
//!
//! ## Usage
//!
//! ```ignore
//! use solvacc::core::models::builder::StructureBuilder;
//! use nalgebra::Point3;
//!
//! let mut builder = StructureBuilder::new();
//! builder.add_atom('A', "1", "ALA", "CA", Point3::new(0.0, 0.0, 0.0), 1.87)?;
//! let structure = builder.build();
//! ```

pub mod builder;
pub mod coords;
pub mod structure;
pub mod subarea;
