use std::collections::TryReserveError;

use thiserror::Error;

/// Failures surfaced by [`HashTable`](crate::HashTable) operations.
///
/// A failed call leaves the table exactly as it was before the call.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
    #[error("a table with base size {requested} cannot be allocated")]
    CapacityOverflow { requested: usize },
    #[error("invalid table configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a [`TableConfig`](crate::TableConfig) is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum base size must be at least 1")]
    ZeroMinBaseSize,
    #[error("load thresholds must satisfy 0 < shrink < grow < 100, got shrink {shrink}% and grow {grow}%")]
    InvalidLoadThresholds { shrink: usize, grow: usize },
    #[error("hash constants must be distinct primes of at least 128, got {prime_a} and {prime_b}")]
    InvalidHashPrimes { prime_a: usize, prime_b: usize },
}
