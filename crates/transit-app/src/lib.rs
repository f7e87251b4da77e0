//! Transit simulator application.
//!
//! This crate wires the simulator to its runtime: configuration, logging,
//! the periodic tick and metrics drivers, and the query service that a
//! request layer calls into.

pub mod config;
pub mod driver;
pub mod error;
pub mod service;
pub mod state;

pub use transit_core as core;
