// Observer seam: how UI, audio and other listeners learn about selection changes.
use crate::registry::UnitId;

use super::groups::GroupSlot;

/// Audio feedback categories requested by selection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCue {
    /// One unit confirmed.
    Single,
    /// Several units confirmed at once.
    Multiple,
}

/// Listener for selection lifecycle notices. Every method defaults to a
/// no-op, implement the ones you care about. Callbacks run synchronously
/// inside the operation that caused them, so they must not call back into
/// the selection core.
#[allow(unused_variables)]
pub trait SelectionObserver: Send + Sync {
    fn on_unit_selected(&mut self, unit: UnitId) {}

    fn on_unit_deselected(&mut self, unit: UnitId) {}

    /// Fired once per operation that changed membership or order, after the
    /// per-unit notices. `selected` is the full post-operation list.
    fn on_selection_changed(&mut self, selected: &[UnitId]) {}

    fn on_group_set(&mut self, slot: GroupSlot, members: &[UnitId]) {}

    fn on_group_selected(&mut self, slot: GroupSlot) {}

    fn on_cue(&mut self, cue: SelectionCue) {}
}

/// Observers in registration order. Dispatch walks the list front to back,
/// so listeners registered earlier always hear a notice first.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl ObserverSet {
    pub fn register(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn each(&mut self, mut notify: impl FnMut(&mut dyn SelectionObserver)) {
        for observer in &mut self.observers {
            notify(observer.as_mut());
        }
    }
}
