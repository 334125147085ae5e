//! Tunables for [`HashTable`](crate::HashTable).

use crate::error::ConfigError;
use crate::prime::is_prime;

/// Default minimum base size; rounds up to a first capacity of 53.
pub const DEFAULT_MIN_BASE_SIZE: usize = 50;
/// Grow once live entries would exceed this percentage of capacity.
pub const DEFAULT_GROW_PERCENT: usize = 70;
/// Shrink once live entries fall below this percentage of capacity.
pub const DEFAULT_SHRINK_PERCENT: usize = 10;
/// Multiplier of the primary hash (initial probe position).
pub const DEFAULT_PRIME_A: usize = 151;
/// Multiplier of the secondary hash (probe step).
pub const DEFAULT_PRIME_B: usize = 163;

/// Sizing, resize thresholds and hash constants of a table.
///
/// Build with `TableConfig::default()` and the `with_*` methods; the table
/// validates the result on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    pub(crate) min_base_size: usize,
    pub(crate) grow_percent: usize,
    pub(crate) shrink_percent: usize,
    pub(crate) prime_a: usize,
    pub(crate) prime_b: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_base_size: DEFAULT_MIN_BASE_SIZE,
            grow_percent: DEFAULT_GROW_PERCENT,
            shrink_percent: DEFAULT_SHRINK_PERCENT,
            prime_a: DEFAULT_PRIME_A,
            prime_b: DEFAULT_PRIME_B,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor for the base size: new tables start here and shrinking never
    /// goes below it.
    pub fn with_min_base_size(mut self, n: usize) -> Self {
        self.min_base_size = n;
        self
    }

    /// Live-load percentage above which the table doubles its base size.
    pub fn with_grow_percent(mut self, pct: usize) -> Self {
        self.grow_percent = pct;
        self
    }

    /// Live-load percentage below which a delete halves the base size.
    pub fn with_shrink_percent(mut self, pct: usize) -> Self {
        self.shrink_percent = pct;
        self
    }

    /// Multipliers of the primary and secondary string hashes.
    pub fn with_hash_primes(mut self, prime_a: usize, prime_b: usize) -> Self {
        self.prime_a = prime_a;
        self.prime_b = prime_b;
        self
    }

    pub fn min_base_size(&self) -> usize {
        self.min_base_size
    }
    pub fn grow_percent(&self) -> usize {
        self.grow_percent
    }
    pub fn shrink_percent(&self) -> usize {
        self.shrink_percent
    }
    pub fn hash_primes(&self) -> (usize, usize) {
        (self.prime_a, self.prime_b)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_base_size == 0 {
            return Err(ConfigError::ZeroMinBaseSize);
        }
        if !(0 < self.shrink_percent
            && self.shrink_percent < self.grow_percent
            && self.grow_percent < 100)
        {
            return Err(ConfigError::InvalidLoadThresholds {
                shrink: self.shrink_percent,
                grow: self.grow_percent,
            });
        }
        let usable = |p: usize| p >= 128 && is_prime(p);
        if self.prime_a == self.prime_b || !usable(self.prime_a) || !usable(self.prime_b) {
            return Err(ConfigError::InvalidHashPrimes {
                prime_a: self.prime_a,
                prime_b: self.prime_b,
            });
        }
        Ok(())
    }
}
