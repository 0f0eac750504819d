// Control groups: nine recallable snapshots of unit lists.
use std::fmt;

use thiserror::Error;

use crate::constants::CONTROL_GROUP_COUNT;
use crate::registry::UnitId;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("control group slot must be 1..=9, got {0}")]
pub struct InvalidGroupSlot(pub u8);

/// One of the nine control-group slots, matching the digit keys 1 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupSlot(u8);

impl GroupSlot {
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based storage index.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn all() -> impl Iterator<Item = GroupSlot> {
        (1..=CONTROL_GROUP_COUNT as u8).map(GroupSlot)
    }
}

impl TryFrom<u8> for GroupSlot {
    type Error = InvalidGroupSlot;

    fn try_from(digit: u8) -> Result<Self, Self::Error> {
        if (1..=CONTROL_GROUP_COUNT as u8).contains(&digit) {
            Ok(GroupSlot(digit))
        } else {
            Err(InvalidGroupSlot(digit))
        }
    }
}

impl fmt::Display for GroupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage for the nine control groups. Each slot holds an independent,
/// duplicate-free unit list in assignment order. Slots are snapshots: they
/// never track later selection changes, and stale members stay in place
/// until a recall filters them out.
#[derive(Debug, Default)]
pub struct ControlGroups {
    slots: [Vec<UnitId>; CONTROL_GROUP_COUNT],
}

impl ControlGroups {
    /// Replaces the slot contents. Duplicates in the input collapse to their
    /// first occurrence; an empty list erases the slot. No size cap applies
    /// here, only the selection itself is capped.
    pub fn set(&mut self, slot: GroupSlot, members: Vec<UnitId>) {
        let stored = &mut self.slots[slot.index()];
        stored.clear();
        for unit in members {
            if !stored.contains(&unit) {
                stored.push(unit);
            }
        }
    }

    pub fn get(&self, slot: GroupSlot) -> &[UnitId] {
        &self.slots[slot.index()]
    }

    pub fn is_set(&self, slot: GroupSlot) -> bool {
        !self.slots[slot.index()].is_empty()
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

    fn slot(digit: u8) -> GroupSlot {
        GroupSlot::try_from(digit).unwrap()
    }

    #[test]
    fn slot_range_is_one_through_nine() {
        assert!(GroupSlot::try_from(0).is_err());
        assert!(GroupSlot::try_from(10).is_err());
        assert_eq!(GroupSlot::try_from(0).unwrap_err(), InvalidGroupSlot(0));
        for digit in 1..=9u8 {
            assert_eq!(slot(digit).get(), digit);
        }
        assert_eq!(GroupSlot::all().count(), CONTROL_GROUP_COUNT);
    }

    #[test]
    fn set_replaces_previous_contents() {
        let units = ids(4);
        let mut groups = ControlGroups::default();
        groups.set(slot(3), vec![units[0], units[1]]);
        groups.set(slot(3), vec![units[2], units[3]]);
        assert_eq!(groups.get(slot(3)), &[units[2], units[3]]);
    }

    #[test]
    fn set_collapses_duplicates() {
        let units = ids(2);
        let mut groups = ControlGroups::default();
        groups.set(slot(1), vec![units[0], units[1], units[0]]);
        assert_eq!(groups.get(slot(1)), &[units[0], units[1]]);
    }

    #[test]
    fn slots_are_independent_and_may_share_units() {
        let units = ids(3);
        let mut groups = ControlGroups::default();
        groups.set(slot(1), vec![units[0], units[1]]);
        groups.set(slot(2), vec![units[1], units[2]]);
        assert_eq!(groups.get(slot(1)), &[units[0], units[1]]);
        assert_eq!(groups.get(slot(2)), &[units[1], units[2]]);
        assert!(!groups.is_set(slot(9)));
    }

    #[test]
    fn storage_has_no_size_cap() {
        let units = ids(20);
        let mut groups = ControlGroups::default();
        groups.set(slot(5), units.clone());
        assert_eq!(groups.get(slot(5)).len(), 20);
    }

    #[test]
    fn empty_set_erases_slot() {
        let units = ids(1);
        let mut groups = ControlGroups::default();
        groups.set(slot(7), units.clone());
        assert!(groups.is_set(slot(7)));
        groups.set(slot(7), Vec::new());
        assert!(!groups.is_set(slot(7)));
        assert!(groups.get(slot(7)).is_empty());
    }
}
