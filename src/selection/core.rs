// Selection core: every mutation of "what the player controls" runs through here.
use bevy::prelude::*;

use crate::constants::MAX_SELECTED;
use crate::registry::{UnitId, UnitRegistry};

use super::groups::{ControlGroups, GroupSlot};
use super::observer::{ObserverSet, SelectionCue, SelectionObserver};
use super::set::SelectionSet;

/// Owns the selection set, the control groups and the observer list, and
/// enforces the notification choreography: per-unit notices first, then one
/// change notice, then the audio cue, then any group notice. One core exists
/// per session; callers hand in the unit registry explicitly on every
/// operation, nothing here is global.
///
/// Membership is validated lazily: stale or unselectable units are dropped
/// at the head of the next mutating operation (or via [`revalidate`]), and
/// their deselection notices fold into that operation's batch. Nothing
/// purges per frame.
///
/// [`revalidate`]: SelectionCore::revalidate
pub struct SelectionCore {
    selected: SelectionSet,
    groups: ControlGroups,
    observers: ObserverSet,
}

impl Default for SelectionCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionCore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SELECTED)
    }

    pub fn with_capacity(max_selected: usize) -> Self {
        Self {
            selected: SelectionSet::new(max_selected),
            groups: ControlGroups::default(),
            observers: ObserverSet::default(),
        }
    }

    /// Observers are notified in registration order.
    pub fn register_observer(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observers.register(observer);
    }

    // ===== ACCESSORS =====

    /// Current members in selection order. First entry is the primary.
    pub fn selected(&self) -> &[UnitId] {
        self.selected.members()
    }

    pub fn primary(&self) -> Option<UnitId> {
        self.selected.primary()
    }

    pub fn is_selected(&self, unit: UnitId) -> bool {
        self.selected.contains(unit)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Raw stored snapshot for a control group, unfiltered.
    pub fn group(&self, slot: GroupSlot) -> &[UnitId] {
        self.groups.get(slot)
    }

    // ===== SELECTION OPERATIONS =====

    /// Replaces the selection with the picked unit, or clears it on a miss.
    /// Re-picking the sole selected unit changes nothing and stays silent.
    pub fn select_single(&mut self, registry: &UnitRegistry, unit: Option<UnitId>) {
        let before = self.selected.members().to_vec();
        self.selected.clear();
        let mut admitted = false;
        if let Some(unit) = unit {
            if Self::admissible(registry, unit) {
                admitted = self.selected.push(unit);
            } else {
                debug!("pick resolved to stale or unselectable unit {:?}", unit);
            }
        }
        let cue = admitted.then_some(SelectionCue::Single);
        self.finish(before, cue);
    }

    /// Replaces the selection with the given units in order, skipping
    /// duplicates and invalid entries without spending capacity on them,
    /// stopping at the cap. The cue matches the resulting size.
    pub fn select_multiple(&mut self, registry: &UnitRegistry, units: &[UnitId]) {
        let before = self.selected.members().to_vec();
        self.selected.clear();
        for &unit in units {
            if self.selected.is_full() {
                debug!("selection full, ignoring the rest of the pick");
                break;
            }
            if Self::admissible(registry, unit) {
                self.selected.push(unit);
            }
        }
        let cue = match self.selected.len() {
            0 => None,
            1 => Some(SelectionCue::Single),
            _ => Some(SelectionCue::Multiple),
        };
        self.finish(before, cue);
    }

    /// Appends the given units without clearing first (additive box pick).
    /// The cue matches how many were actually admitted.
    pub fn extend_selection(&mut self, registry: &UnitRegistry, units: &[UnitId]) {
        let before = self.selected.members().to_vec();
        self.sweep(registry);
        let mut admitted = 0usize;
        for &unit in units {
            if Self::admissible(registry, unit) && self.selected.push(unit) {
                admitted += 1;
            }
        }
        let cue = match admitted {
            0 => None,
            1 => Some(SelectionCue::Single),
            _ => Some(SelectionCue::Multiple),
        };
        self.finish(before, cue);
    }

    /// Appends one unit. Returns false when the unit is invalid, already
    /// selected, or the selection is at capacity (no eviction).
    pub fn add_to_selection(&mut self, registry: &UnitRegistry, unit: UnitId) -> bool {
        let before = self.selected.members().to_vec();
        self.sweep(registry);
        let mut admitted = false;
        if !Self::admissible(registry, unit) {
            debug!("add ignored stale or unselectable unit {:?}", unit);
        } else if self.selected.is_full() && !self.selected.contains(unit) {
            debug!("selection full, rejecting {:?}", unit);
        } else {
            admitted = self.selected.push(unit);
        }
        let cue = admitted.then_some(SelectionCue::Single);
        self.finish(before, cue);
        admitted
    }

    /// Removes one unit. Absent units are a quiet no-op.
    pub fn remove_from_selection(&mut self, registry: &UnitRegistry, unit: UnitId) -> bool {
        let before = self.selected.members().to_vec();
        self.sweep(registry);
        let removed = self.selected.remove(unit);
        self.finish(before, None);
        removed
    }

    /// Removes the unit if selected, otherwise adds it under the usual
    /// admission rules. A toggled-off then toggled-on unit rejoins at the
    /// back of the selection order.
    pub fn toggle(&mut self, registry: &UnitRegistry, unit: UnitId) {
        let before = self.selected.members().to_vec();
        self.sweep(registry);
        let mut cue = None;
        if self.selected.contains(unit) {
            self.selected.remove(unit);
        } else if !Self::admissible(registry, unit) {
            debug!("toggle ignored stale or unselectable unit {:?}", unit);
        } else if self.selected.is_full() {
            debug!("selection full, rejecting {:?}", unit);
        } else if self.selected.push(unit) {
            cue = Some(SelectionCue::Single);
        }
        self.finish(before, cue);
    }

    /// Deselects everything. Already-empty selections stay silent.
    pub fn clear(&mut self) {
        let before = self.selected.clear();
        self.finish(before, None);
    }

    /// Drops members that died or turned unselectable since the last
    /// operation. Command layers call this before consuming the selection;
    /// nothing runs it per frame.
    pub fn revalidate(&mut self, registry: &UnitRegistry) {
        let before = self.selected.members().to_vec();
        self.sweep(registry);
        self.finish(before, None);
    }

    // ===== CONTROL GROUPS =====

    /// Snapshots the current selection into the slot, replacing whatever was
    /// stored there. Storing an empty selection erases the slot; the
    /// assignment notice fires either way.
    pub fn set_group(&mut self, registry: &UnitRegistry, slot: GroupSlot) {
        let before = self.selected.members().to_vec();
        self.sweep(registry);
        self.finish(before, None);

        let members = self.selected.members().to_vec();
        self.set_group_members(slot, &members);
    }

    /// Stores an explicit member list into the slot, replacing whatever was
    /// stored there. Duplicates collapse to their first occurrence and no
    /// capacity cap applies, so a group may hold more units than fit in a
    /// selection at once. Stale entries are stored as-is and filtered on
    /// recall, like any other group member.
    pub fn set_group_members(&mut self, slot: GroupSlot, members: &[UnitId]) {
        self.groups.set(slot, members.to_vec());
        let stored = self.groups.get(slot).to_vec();
        info!("control group {}: stored {} unit(s)", slot, stored.len());
        self.observers.each(|o| o.on_group_set(slot, &stored));
    }

    /// Recalls the slot: filters its snapshot down to live, selectable
    /// members (writing the filtered list back), then selects them as a
    /// batch. An unset or fully stale slot leaves the current selection
    /// untouched and emits nothing.
    pub fn select_group(&mut self, registry: &UnitRegistry, slot: GroupSlot) {
        let stored = self.groups.get(slot).to_vec();
        let live: Vec<UnitId> = stored
            .iter()
            .copied()
            .filter(|&unit| Self::admissible(registry, unit))
            .collect();
        if live.len() != stored.len() {
            debug!(
                "control group {}: dropped {} stale member(s)",
                slot,
                stored.len() - live.len()
            );
            self.groups.set(slot, live.clone());
        }
        if live.is_empty() {
            return;
        }
        self.select_multiple(registry, &live);
        self.observers.each(|o| o.on_group_selected(slot));
    }

    // ===== INTERNALS =====

    fn admissible(registry: &UnitRegistry, unit: UnitId) -> bool {
        registry.get(unit).map_or(false, |record| record.selectable)
    }

    fn sweep(&mut self, registry: &UnitRegistry) {
        let dropped = self
            .selected
            .sweep(|unit| Self::admissible(registry, unit));
        if !dropped.is_empty() {
            debug!("dropped {} stale member(s) from selection", dropped.len());
        }
    }

    /// Diffs the selection against `before` and delivers the notices for
    /// this operation. Operations that end up changing nothing (same
    /// members, same order) deliver nothing, including the cue.
    fn finish(&mut self, before: Vec<UnitId>, cue: Option<SelectionCue>) {
        let after = self.selected.members().to_vec();
        if before == after {
            return;
        }
        for &unit in before.iter().filter(|u| !after.contains(u)) {
            self.observers.each(|o| o.on_unit_deselected(unit));
        }
        for &unit in after.iter().filter(|u| !before.contains(u)) {
            self.observers.each(|o| o.on_unit_selected(unit));
        }
        self.observers.each(|o| o.on_selection_changed(&after));
        if let Some(cue) = cue {
            self.observers.each(|o| o.on_cue(cue));
        }
    }
}
