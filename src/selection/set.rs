// Ordered selection membership with a hard capacity.
use crate::constants::MAX_SELECTED;
use crate::registry::UnitId;

/// The list of currently selected units. Insertion order is preserved and
/// meaningful: the first member is the primary selection. Never holds
/// duplicates, never grows past its capacity.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    members: Vec<UnitId>,
    capacity: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new(MAX_SELECTED)
    }
}

impl SelectionSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn members(&self) -> &[UnitId] {
        &self.members
    }

    /// First selected unit, the one detail panes and follow commands track.
    pub fn primary(&self) -> Option<UnitId> {
        self.members.first().copied()
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.members.contains(&unit)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Appends a unit. Returns false when the unit is already a member or
    /// the set is at capacity.
    pub fn push(&mut self, unit: UnitId) -> bool {
        if self.is_full() || self.contains(unit) {
            return false;
        }
        self.members.push(unit);
        true
    }

    /// Removes a unit, keeping the order of the rest. Returns false when it
    /// was not a member.
    pub fn remove(&mut self, unit: UnitId) -> bool {
        match self.members.iter().position(|&m| m == unit) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every member, returning them in selection order.
    pub fn clear(&mut self) -> Vec<UnitId> {
        std::mem::take(&mut self.members)
    }

    /// Drops members the predicate rejects, returning them in selection
    /// order. Used for lazy validation against the unit registry.
    pub fn sweep(&mut self, mut keep: impl FnMut(UnitId) -> bool) -> Vec<UnitId> {
        let mut dropped = Vec::new();
        self.members.retain(|&unit| {
            if keep(unit) {
                true
            } else {
                dropped.push(unit);
                false
            }
        });
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{UnitRecord, UnitRegistry};

    fn ids(n: usize) -> Vec<UnitId> {
        let mut registry = UnitRegistry::default();
        (0..n)
            .map(|_| registry.register(UnitRecord::default()))
            .collect()
    }

    #[test]
    fn push_keeps_insertion_order() {
        let units = ids(3);
        let mut set = SelectionSet::default();
        for &unit in &units {
            assert!(set.push(unit));
        }
        assert_eq!(set.members(), units.as_slice());
        assert_eq!(set.primary(), Some(units[0]));
    }

    #[test]
    fn push_rejects_duplicates() {
        let units = ids(2);
        let mut set = SelectionSet::default();
        assert!(set.push(units[0]));
        assert!(!set.push(units[0]));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn push_rejects_beyond_capacity() {
        let units = ids(MAX_SELECTED + 3);
        let mut set = SelectionSet::default();
        for &unit in &units[..MAX_SELECTED] {
            assert!(set.push(unit));
        }
        assert!(set.is_full());
        assert!(!set.push(units[MAX_SELECTED]));
        assert_eq!(set.members(), &units[..MAX_SELECTED]);
    }

    #[test]
    fn remove_shifts_primary() {
        let units = ids(3);
        let mut set = SelectionSet::default();
        for &unit in &units {
            set.push(unit);
        }
        assert!(set.remove(units[0]));
        assert_eq!(set.primary(), Some(units[1]));
        assert!(!set.remove(units[0]));
    }

    #[test]
    fn clear_returns_members_in_order() {
        let units = ids(3);
        let mut set = SelectionSet::default();
        for &unit in &units {
            set.push(unit);
        }
        assert_eq!(set.clear(), units);
        assert!(set.is_empty());
    }

    #[test]
    fn sweep_reports_dropped_in_order() {
        let units = ids(4);
        let mut set = SelectionSet::default();
        for &unit in &units {
            set.push(unit);
        }
        let dropped = set.sweep(|unit| unit != units[0] && unit != units[2]);
        assert_eq!(dropped, vec![units[0], units[2]]);
        assert_eq!(set.members(), &[units[1], units[3]]);
    }
}
