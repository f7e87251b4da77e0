//! Core types and definitions for the transit simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! coordinates and paths, the stop/route/vehicle records, report views,
//! geometry helpers, constants and error types. It has no dependency on
//! any runtime or store implementation.

pub mod constants;
pub mod enums;
pub mod error;
pub mod geometry;
pub mod model;
pub mod state;
pub mod types;

pub use error::{Result, StoreError, TransitError};
pub use types::{Coordinate, Path, SimTime};

#[cfg(test)]
mod tests;
