//! # solvacc Core Library
//!
//! A high-performance library for computing the Solvent Accessible Surface Area (SASA) of
//! molecular structures, with classification of the per-atom areas into polar/apolar and
//! main-chain/side-chain components and normalization against reference residue areas (RSA).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Coordinates`, `Structure`,
//!   `Subarea`) and the `Classifier` capability with its concrete implementations.
//!
//! - **[`engine`]: The Computation Layer.** The two SASA algorithms (`shrake_rupley` and
//!   `lee_richards`), their shared parameters, neighbor search, worker threads and the
//!   error and diagnostic types every operation reports through.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together: dispatching a
//!   calculation on the configured algorithm, aggregating atom areas into residues and
//!   chains, and computing relative accessibility.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod fixtures;
