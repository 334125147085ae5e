//! HashTable: open-addressed string map with prime capacity, double hashing,
//! tombstone deletion and load-driven resizing.

use log::{debug, trace};

use crate::config::TableConfig;
use crate::error::TableError;
use crate::prime::next_prime;
use crate::probe::ProbeSeq;
use crate::slot::{try_alloc_slots, try_copy, Entry, Slot};

/// Largest slot count whose backing array stays within `isize::MAX` bytes.
const MAX_SLOTS: usize = isize::MAX as usize / std::mem::size_of::<Slot>();

/// Where a key lives, or where it would go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Found(usize),
    /// First tombstone or empty slot on the probe path, if any.
    Vacant(Option<usize>),
}

#[derive(Debug, Clone, Copy)]
enum ResizeReason {
    Grow,
    Shrink,
    Compact,
}

/// A map from string keys to string values.
///
/// Entries live directly in a prime-sized slot array. Collisions are resolved
/// by double hashing; deletes leave tombstones so later probes keep walking.
/// The array doubles its base size when live entries would pass the grow
/// threshold and halves it when a delete finds the load under the shrink
/// threshold. Every resize is a full, blocking rehash.
///
/// The table is plain owned data: it is `Send + Sync` but does no locking of
/// its own.
#[derive(Debug)]
pub struct HashTable {
    slots: Vec<Slot>,
    count: usize,
    tombstones: usize,
    base_size: usize,
    config: TableConfig,
}

impl HashTable {
    /// Empty table at the default minimum capacity (53 slots).
    pub fn new() -> Result<Self, TableError> {
        Self::with_config(TableConfig::default())
    }

    /// Empty table at `config.min_base_size()`, after validating `config`.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Self::sized(config.min_base_size, config)
    }

    /// Empty table whose capacity is the smallest prime `>= base_size`, using
    /// the default configuration. Base sizes under the floor are raised to it.
    pub fn with_base_size(base_size: usize) -> Result<Self, TableError> {
        let config = TableConfig::default();
        Self::sized(base_size.max(config.min_base_size), config)
    }

    fn sized(base_size: usize, config: TableConfig) -> Result<Self, TableError> {
        let capacity = capacity_for(base_size)?;
        let slots = try_alloc_slots(capacity)?;
        trace!("new table: base size {}, capacity {}", base_size, capacity);
        Ok(Self {
            slots,
            count: 0,
            tombstones: 0,
            base_size,
            config,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots in the backing array. Always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Capacity target before rounding up to a prime.
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Number of slots currently holding a tombstone.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Live load as a whole percentage, `len * 100 / capacity` rounded down.
    pub fn load_percent(&self) -> usize {
        self.percent_of_capacity(self.count)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Inserts `key -> value`, copying both strings.
    ///
    /// If `key` is already present its value is replaced in place and the
    /// previous value is returned; the table never resizes on overwrite.
    /// A new key may first grow the table (or compact away tombstones).
    ///
    /// On error the table's contents are unchanged.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<Option<String>, TableError> {
        let vacant = match self.lookup(key) {
            Lookup::Found(i) => {
                let value = try_copy(value)?;
                let Slot::Occupied(e) = &mut self.slots[i] else {
                    unreachable!("lookup reported a non-occupied slot as found");
                };
                return Ok(Some(std::mem::replace(&mut e.value, value)));
            }
            Lookup::Vacant(v) => v,
        };

        let entry = Entry::try_new(key, value)?;
        let at = if self.make_room()? {
            self.first_vacant(key)
        } else {
            vacant
        };
        let Some(i) = at else {
            unreachable!("load bound leaves a vacant slot on every probe path");
        };
        if self.slots[i].is_tombstone() {
            self.tombstones -= 1;
        }
        self.slots[i] = Slot::Occupied(entry);
        self.count += 1;
        Ok(None)
    }

    /// Value stored under `key`, if any. Never mutates the table.
    pub fn search(&self, key: &str) -> Option<&str> {
        self.probe(key)
            .map(|i| &self.slots[i])
            .take_while(|slot| !slot.is_empty())
            .find_map(|slot| match slot {
                Slot::Occupied(e) if e.key == key => Some(e.value.as_str()),
                Slot::Occupied(_) | Slot::Tombstone | Slot::Empty => None,
            })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.lookup(key), Lookup::Found(_))
    }

    /// Removes `key` and returns its value.
    ///
    /// The shrink check runs first, so a delete against a sparse table may
    /// rehash even when `key` is absent. Deleting an absent key leaves
    /// `len()` unchanged.
    pub fn delete(&mut self, key: &str) -> Result<Option<String>, TableError> {
        if self.load_percent() < self.config.shrink_percent {
            self.shrink()?;
        }
        let Lookup::Found(i) = self.lookup(key) else {
            return Ok(None);
        };
        let Some(entry) = self.slots[i].bury() else {
            unreachable!("lookup reported a non-occupied slot as found");
        };
        self.count -= 1;
        self.tombstones += 1;
        Ok(Some(entry.value))
    }

    /// Releases every entry and the slot array. Equivalent to dropping the
    /// table.
    pub fn destroy(self) {
        drop(self);
    }

    // [private]

    fn probe(&self, key: &str) -> ProbeSeq {
        ProbeSeq::new(
            key.as_bytes(),
            self.config.prime_a,
            self.config.prime_b,
            self.slots.len(),
        )
    }

    /// Walks the probe path of `key`, skipping tombstones, until it finds the
    /// key or an empty slot.
    fn lookup(&self, key: &str) -> Lookup {
        let mut vacant = None;
        for i in self.probe(key) {
            let slot = &self.slots[i];
            match slot {
                Slot::Empty => return Lookup::Vacant(vacant.or(Some(i))),
                Slot::Tombstone => {
                    vacant.get_or_insert(i);
                }
                Slot::Occupied(_) if slot.key() == Some(key) => return Lookup::Found(i),
                Slot::Occupied(_) => {}
            }
        }
        Lookup::Vacant(vacant)
    }

    /// First tombstone or empty slot on the probe path of `key`.
    fn first_vacant(&self, key: &str) -> Option<usize> {
        self.probe(key)
            .find(|&i| matches!(self.slots[i], Slot::Empty | Slot::Tombstone))
    }

    fn percent_of_capacity(&self, n: usize) -> usize {
        percent(n, self.slots.len())
    }

    fn exceeds_grow(&self, n: usize) -> bool {
        self.percent_of_capacity(n) > self.config.grow_percent
    }

    /// Base size the table must grow to so one more entry stays under the
    /// grow threshold, or `None` if it already fits. Doubles repeatedly for
    /// tiny floors where a single doubling is not enough.
    fn grow_target(&self) -> Result<Option<usize>, TableError> {
        let needed = self.count + 1;
        if !self.exceeds_grow(needed) {
            return Ok(None);
        }
        let mut base = self.base_size;
        loop {
            base = base
                .checked_mul(2)
                .ok_or(TableError::CapacityOverflow { requested: base })?;
            if percent(needed, capacity_for(base)?) <= self.config.grow_percent {
                return Ok(Some(base));
            }
        }
    }

    /// Ensures one more entry fits under the grow threshold, counting
    /// tombstones as used. Returns whether the slot array was rebuilt.
    fn make_room(&mut self) -> Result<bool, TableError> {
        if let Some(base) = self.grow_target()? {
            self.resize(base, ResizeReason::Grow)?;
            return Ok(true);
        }
        if self.exceeds_grow(self.count + self.tombstones + 1) {
            trace!(
                "compacting {} tombstones at capacity {}",
                self.tombstones,
                self.capacity()
            );
            self.resize(self.base_size, ResizeReason::Compact)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn shrink(&mut self) -> Result<(), TableError> {
        let next = self.base_size / 2;
        if next < self.config.min_base_size {
            trace!(
                "shrink ignored: base size {} would drop below floor {}",
                next,
                self.config.min_base_size
            );
            return Ok(());
        }
        let capacity = capacity_for(next)?;
        if percent(self.count, capacity) > self.config.grow_percent {
            trace!(
                "shrink ignored: {} entries would overload capacity {}",
                self.count,
                capacity
            );
            return Ok(());
        }
        self.resize(next, ResizeReason::Shrink)
    }

    /// Rebuilds the slot array for `base_size` and re-inserts every live
    /// entry. Tombstones are dropped. Allocation happens before any entry
    /// moves, so a failure leaves `self` untouched.
    fn resize(&mut self, base_size: usize, reason: ResizeReason) -> Result<(), TableError> {
        let capacity = capacity_for(base_size)?;
        let fresh = try_alloc_slots(capacity)?;
        debug!(
            "{:?}: capacity {} -> {}, {} live entries, {} tombstones dropped",
            reason,
            self.capacity(),
            capacity,
            self.count,
            self.tombstones
        );

        let old = std::mem::replace(&mut self.slots, fresh);
        self.base_size = base_size;
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(entry) = slot {
                let Some(i) = self.probe(&entry.key).find(|&i| self.slots[i].is_empty()) else {
                    unreachable!("rehash target holds every live entry");
                };
                self.slots[i] = Slot::Occupied(entry);
            }
        }
        Ok(())
    }

    /// Checks every structural invariant; used by tests after each step.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use crate::prime::is_prime;
        use std::collections::HashSet;

        assert!(is_prime(self.capacity()), "capacity {} not prime", self.capacity());
        assert_eq!(Some(self.capacity()), next_prime(self.base_size));
        assert!(self.base_size >= self.config.min_base_size);

        let mut keys = HashSet::new();
        let mut tombstones = 0;
        for slot in &self.slots {
            match slot {
                Slot::Occupied(e) => assert!(keys.insert(e.key.as_str()), "duplicate {:?}", e.key),
                Slot::Tombstone => tombstones += 1,
                Slot::Empty => {}
            }
        }
        assert_eq!(keys.len(), self.count);
        assert_eq!(tombstones, self.tombstones);
        assert!(self.slots.iter().any(Slot::is_empty), "no empty slot left");
        for k in keys {
            assert!(self.contains_key(k), "{:?} unreachable by probing", k);
        }
    }
}

impl Drop for HashTable {
    fn drop(&mut self) {
        trace!(
            "dropping table: {} entries, capacity {}",
            self.count,
            self.slots.len()
        );
    }
}

/// `n * 100 / capacity`, rounded down.
fn percent(n: usize, capacity: usize) -> usize {
    (n as u128 * 100 / capacity as u128) as usize
}

/// Capacity for `base_size`: the smallest prime `>= base_size`, provided the
/// resulting slot array can be represented.
fn capacity_for(base_size: usize) -> Result<usize, TableError> {
    let overflow = TableError::CapacityOverflow {
        requested: base_size,
    };
    if base_size > MAX_SLOTS {
        return Err(overflow);
    }
    match next_prime(base_size) {
        Some(p) if p <= MAX_SLOTS => Ok(p),
        _ => Err(overflow),
    }
}
