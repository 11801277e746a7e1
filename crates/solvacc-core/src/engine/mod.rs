//! # Engine Module
//!
//! This module implements the two SASA algorithms and the machinery they share: validated
//! parameters, neighbor search over inflated spheres, partitioning of work across threads and
//! the error and diagnostic types every operation reports through.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Algorithm choice, probe radius, resolution and thread count
//! - **Algorithms** ([`shrake_rupley`], [`lee_richards`]) - Per-atom SASA from coordinates and radii
//! - **Results** ([`result`]) - Per-atom areas and their total
//! - **Error Handling** ([`error`], [`diagnostics`]) - Hard failures and recoverable warnings
//!
//! Internally, `geometry` validates and inflates the input spheres, `neighbors` finds the
//! overlapping spheres with a k-d tree and `workers` runs contiguous partitions of the work on a
//! call-scoped thread pool.
//!
//! Both algorithms are pure functions of their inputs: nothing is cached between calls and the
//! inputs are only borrowed for the duration of a call.

pub mod config;
pub mod diagnostics;
pub mod error;
pub(crate) mod geometry;
pub mod lee_richards;
pub(crate) mod neighbors;
pub mod result;
pub(crate) mod scratch;
pub mod shrake_rupley;
pub(crate) mod workers;
