// ECS fan-out: selection notices cross from observer callbacks into Bevy events.
use bevy::prelude::*;
use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::registry::UnitId;

use super::groups::GroupSlot;
use super::observer::{SelectionCue, SelectionObserver};

#[derive(Event, Debug, Clone)]
pub struct SelectionChanged {
    /// Full post-operation selection, in order.
    pub selected: Vec<UnitId>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct UnitSelected {
    pub unit: UnitId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct UnitDeselected {
    pub unit: UnitId,
}

#[derive(Event, Debug, Clone)]
pub struct ControlGroupSet {
    pub slot: GroupSlot,
    pub members: Vec<UnitId>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ControlGroupSelected {
    pub slot: GroupSlot,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct CueRequest {
    pub cue: SelectionCue,
}

/// Wire format between the observer callback and the drain system.
#[derive(Debug, Clone)]
enum SelectionNotice {
    Selected(UnitId),
    Deselected(UnitId),
    Changed(Vec<UnitId>),
    GroupSet {
        slot: GroupSlot,
        members: Vec<UnitId>,
    },
    GroupSelected(GroupSlot),
    Cue(SelectionCue),
}

/// Observer half of the bridge: registered with the selection core, forwards
/// every notice into the channel in callback order.
pub struct NoticeRelay {
    tx: Sender<SelectionNotice>,
}

impl SelectionObserver for NoticeRelay {
    fn on_unit_selected(&mut self, unit: UnitId) {
        let _ = self.tx.send(SelectionNotice::Selected(unit));
    }

    fn on_unit_deselected(&mut self, unit: UnitId) {
        let _ = self.tx.send(SelectionNotice::Deselected(unit));
    }

    fn on_selection_changed(&mut self, selected: &[UnitId]) {
        let _ = self.tx.send(SelectionNotice::Changed(selected.to_vec()));
    }

    fn on_group_set(&mut self, slot: GroupSlot, members: &[UnitId]) {
        let _ = self.tx.send(SelectionNotice::GroupSet {
            slot,
            members: members.to_vec(),
        });
    }

    fn on_group_selected(&mut self, slot: GroupSlot) {
        let _ = self.tx.send(SelectionNotice::GroupSelected(slot));
    }

    fn on_cue(&mut self, cue: SelectionCue) {
        let _ = self.tx.send(SelectionNotice::Cue(cue));
    }
}

/// Resource half of the bridge, drained once per frame.
#[derive(Resource)]
pub struct NoticeQueue {
    rx: Receiver<SelectionNotice>,
}

pub fn notice_channel() -> (NoticeRelay, NoticeQueue) {
    let (tx, rx) = unbounded();
    (NoticeRelay { tx }, NoticeQueue { rx })
}

/// System: drains the relay channel into Bevy events. Chained right after
/// the input systems, so downstream systems see this frame's notices this
/// frame.
pub fn relay_notices_system(
    queue: Res<NoticeQueue>,
    mut changed: EventWriter<SelectionChanged>,
    mut selected: EventWriter<UnitSelected>,
    mut deselected: EventWriter<UnitDeselected>,
    mut group_set: EventWriter<ControlGroupSet>,
    mut group_selected: EventWriter<ControlGroupSelected>,
    mut cues: EventWriter<CueRequest>,
) {
    for notice in queue.rx.try_iter() {
        match notice {
            SelectionNotice::Selected(unit) => {
                selected.write(UnitSelected { unit });
            }
            SelectionNotice::Deselected(unit) => {
                deselected.write(UnitDeselected { unit });
            }
            SelectionNotice::Changed(list) => {
                changed.write(SelectionChanged { selected: list });
            }
            SelectionNotice::GroupSet { slot, members } => {
                group_set.write(ControlGroupSet { slot, members });
            }
            SelectionNotice::GroupSelected(slot) => {
                group_selected.write(ControlGroupSelected { slot });
            }
            SelectionNotice::Cue(cue) => {
                cues.write(CueRequest { cue });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_preserves_notice_order() {
        let (mut relay, queue) = notice_channel();
        let mut registry = crate::registry::UnitRegistry::default();
        let unit = registry.register(crate::registry::UnitRecord::default());

        relay.on_unit_deselected(unit);
        relay.on_unit_selected(unit);
        relay.on_selection_changed(&[unit]);
        relay.on_cue(SelectionCue::Single);

        let drained: Vec<SelectionNotice> = queue.rx.try_iter().collect();
        assert_eq!(drained.len(), 4);
        assert!(matches!(drained[0], SelectionNotice::Deselected(u) if u == unit));
        assert!(matches!(drained[1], SelectionNotice::Selected(u) if u == unit));
        assert!(matches!(&drained[2], SelectionNotice::Changed(list) if list.as_slice() == [unit]));
        assert!(matches!(drained[3], SelectionNotice::Cue(SelectionCue::Single)));
    }

    #[test]
    fn dropped_receiver_does_not_panic_the_relay() {
        let (mut relay, queue) = notice_channel();
        drop(queue);
        relay.on_cue(SelectionCue::Multiple);
    }
}
