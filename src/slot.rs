//! Slot storage: the three states a position in the backing array can be in.

use crate::error::TableError;

/// An owned key/value pair living in exactly one `Occupied` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
}

impl Entry {
    /// Copies `key` and `value` into freshly allocated strings, reporting
    /// allocation failure instead of aborting.
    pub(crate) fn try_new(key: &str, value: &str) -> Result<Self, TableError> {
        Ok(Self {
            key: try_copy(key)?,
            value: try_copy(value)?,
        })
    }
}

pub(crate) fn try_copy(s: &str) -> Result<String, TableError> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())?;
    out.push_str(s);
    Ok(out)
}

/// `Tombstone` keeps probe chains intact across deletes; `Empty` ends them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Slot {
    #[default]
    Empty,
    Occupied(Entry),
    Tombstone,
}

impl Slot {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Key stored in this slot, if occupied.
    #[inline]
    pub(crate) fn key(&self) -> Option<&str> {
        match self {
            Slot::Occupied(e) => Some(&e.key),
            _ => None,
        }
    }

    /// Replaces the slot with a tombstone and hands back the entry it held.
    /// Empty slots and tombstones are left untouched.
    pub(crate) fn bury(&mut self) -> Option<Entry> {
        match std::mem::take(self) {
            Slot::Occupied(e) => {
                *self = Slot::Tombstone;
                Some(e)
            }
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Allocates `capacity` empty slots, reporting allocation failure.
pub(crate) fn try_alloc_slots(capacity: usize) -> Result<Vec<Slot>, TableError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_copies_both_strings() {
        let e = Entry::try_new("k", "v").unwrap();
        assert_eq!(e.key, "k");
        assert_eq!(e.value, "v");
    }

    #[test]
    fn bury_turns_occupied_into_tombstone() {
        let mut s = Slot::Occupied(Entry::try_new("a", "1").unwrap());
        assert_eq!(s.key(), Some("a"));

        let e = s.bury().expect("occupied slot yields its entry");
        assert_eq!(e.value, "1");
        assert!(s.is_tombstone());
        assert_eq!(s.key(), None);

        // A second bury is a no-op.
        assert!(s.bury().is_none());
        assert!(s.is_tombstone());
    }

    #[test]
    fn bury_leaves_empty_alone() {
        let mut s = Slot::Empty;
        assert!(s.bury().is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn alloc_slots_are_all_empty() {
        let slots = try_alloc_slots(53).unwrap();
        assert_eq!(slots.len(), 53);
        assert!(slots.iter().all(Slot::is_empty));
    }

    #[test]
    fn alloc_slots_reports_overflow() {
        match try_alloc_slots(usize::MAX) {
            Err(TableError::Allocation(_)) => {}
            other => panic!("unexpected result: {:?}", other.map(|v| v.len())),
        }
    }
}
