//! Error types for the transit simulator.

use thiserror::Error;

use crate::enums::EntityKind;

/// Failures of the backing store. All of these are transient from the
/// simulator's point of view: the next tick simply tries again.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store lock poisoned: {0}")]
    Poisoned(&'static str),
}

#[derive(Debug, Error)]
pub enum TransitError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Path must contain at least one coordinate")]
    EmptyPath,

    #[error("Vehicle {vehicle_id} has unusable speed {speed}")]
    InvalidSpeed { vehicle_id: String, speed: f64 },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl TransitError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        TransitError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// True when the failure is a missing record rather than a store fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransitError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
