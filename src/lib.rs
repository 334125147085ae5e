//! dh-hashtable: a single-threaded map from string keys to string values,
//! built on open addressing with double hashing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a dependency-light key/value store with explicit control over
//!   memory layout and collision resolution.
//! - Layers:
//!   - `slot`: the backing array's element, a tagged
//!     `Empty | Occupied(Entry) | Tombstone` variant.
//!   - `probe`: two polynomial string hashes with distinct prime
//!     multipliers, combined into a probe sequence over the slot array.
//!   - `prime`: trial-division primality and "next prime" search used to
//!     size the array.
//!   - `HashTable`: insert/search/delete over the probe sequence, plus the
//!     resize policy that keeps load bounded.
//!
//! Slots and tombstones
//! - `Empty` ends a probe: a search that reaches it reports "absent".
//! - `Tombstone` marks a deleted entry. Searches walk past it because other
//!   keys may have been placed further along the same path. Inserts reuse the
//!   first tombstone on the path, but only after confirming the key is not
//!   stored further along.
//!
//! Probe sequence
//! - Capacity `m` is always prime. Attempt `i` for key `k` visits
//!   `(h_a(k, m) + i * (h_b(k, m) + 1)) mod m`. When `h_b(k, m) = m - 1` the
//!   step would be `m ≡ 0`, so a step of 1 is used instead. Every step is then
//!   in `[1, m - 1]` and the first `m` attempts cover every slot once.
//!
//! Resize policy
//! - Each table tracks a `base_size`; capacity is the smallest prime
//!   `>= base_size`. Grow/shrink targets derive from `base_size`, not from
//!   the rounded capacity, so repeated cycles do not drift.
//! - Grow: before a new key is stored, if `(len + 1) * 100 / capacity`
//!   exceeds the grow threshold (70%), `base_size` doubles (as many times as
//!   needed, computed up front so the table is rebuilt once).
//! - Compact: if live entries plus tombstones would exceed the same
//!   threshold, the table is rebuilt at its current size, dropping
//!   tombstones. An empty slot is therefore always reachable.
//! - Shrink: before a delete, if `len * 100 / capacity` is under the shrink
//!   threshold (10%), `base_size` halves. Requests that would go below the
//!   configured floor are ignored.
//! - Every resize allocates the new array first and then moves entries over,
//!   so a failed allocation leaves the table unchanged.
//!
//! Errors
//! - Allocation failure surfaces as `TableError` rather than aborting.
//!   Missing keys are ordinary `None` results, never errors.
//!
//! Notes and non-goals
//! - No internal synchronization; wrap in a `Mutex` for shared use.
//! - Keys and values are owned `String`s; no generic value types.
//! - No iteration, persistence or custom allocators.

mod config;
mod error;
mod hash_table;
#[cfg(test)]
mod hash_table_proptest;
pub mod prime;
pub mod probe;
mod slot;

// Public surface
pub use config::TableConfig;
pub use error::{ConfigError, TableError};
pub use hash_table::HashTable;
