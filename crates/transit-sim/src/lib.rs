//! Vehicle motion simulator.
//!
//! Moves buses along their route paths one tick at a time, predicts their
//! next few positions, and keeps the aggregate counters. All state lives in
//! a `TransitStore`; randomness is always passed in, so a seeded RNG gives
//! reproducible runs.

pub mod engine;
pub mod metrics;
pub mod optimizer;
pub mod path_follower;
pub mod prediction;
pub mod seed;
pub mod store;
pub mod updater;

pub use engine::{SimConfig, TickEngine, TickReport};
pub use metrics::MetricsCollector;
pub use path_follower::{advance, MotionConfig};
pub use prediction::{predict, track_vehicle};
pub use store::{InMemoryStore, TransitStore};
pub use transit_core as core;
