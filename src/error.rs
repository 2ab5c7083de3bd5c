//! Error types for each stage of an analysis run.

use crate::state::{Level, QuantumState};
use thiserror::Error;

/// Quantum numbers that do not describe a valid state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("principal quantum number must be at least 1")]
    ZeroPrincipal,

    #[error("{name} = {value} is not a half-integer")]
    NotHalfInteger { name: &'static str, value: f64 },

    #[error("j = {j} is not l +/- 1/2 for l = {l}")]
    InvalidJ { l: u32, j: f64 },

    #[error("mj = {mj} lies outside [-{j}, {j}]")]
    InvalidMj { j: f64, mj: f64 },
}

/// Malformed spectroscopic state string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseStateError {
    #[error("invalid spectroscopic state string: {0:?}")]
    Format(String),

    #[error("invalid quantum numbers in {input:?}: {source}")]
    State {
        input: String,
        #[source]
        source: StateError,
    },
}

/// Failure reported by an atomic-data provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("state {0} lies outside the provider's domain")]
    InvalidState(Level),

    #[error("no energy tabulated for level {0}")]
    MissingLevel(Level),

    #[error("no dipole matrix element tabulated for {lower} -> {upper} (q = {q})")]
    MissingDipole {
        lower: QuantumState,
        upper: QuantumState,
        q: i32,
    },

    #[error("atomic data provider failed: {0}")]
    Provider(String),
}

/// Violation of the transition table's canonical-pair invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("transition {lower} -> {upper} is already present")]
    Duplicate {
        lower: QuantumState,
        upper: QuantumState,
    },

    #[error("transition {lower} -> {upper} is not canonical (lower l must be smaller)")]
    NotCanonical {
        lower: QuantumState,
        upper: QuantumState,
    },
}

/// Failure while assembling a transition table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("lookup failed for transition {lower} -> {upper}: {source}")]
    Lookup {
        lower: QuantumState,
        upper: QuantumState,
        #[source]
        source: LookupError,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Failure while loading or validating an analysis configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure while loading tabulated atomic data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse atomic data: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse atomic data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid state label in atomic data: {0}")]
    State(#[from] ParseStateError),

    #[error("invalid polarization index q = {0}")]
    Polarization(i32),
}
