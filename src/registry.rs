// Unit registry: the roster of everything the selection subsystem can act on.
use bevy::prelude::*;

/// Generational handle to a registered unit. Cheap to copy and safe to hold
/// across frames: once the unit deregisters, every lookup through the stale
/// handle fails instead of hitting a recycled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId {
    index: u32,
    generation: u32,
}

impl UnitId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// What the selection subsystem knows about a unit. Position is kept in sync
/// by whoever owns the actual simulation; `selectable` gates admission into
/// selections and picks.
#[derive(Debug, Clone)]
pub struct UnitRecord {
    pub position: Vec3,
    pub selectable: bool,
    /// Radius of the sphere used by pointer picks.
    pub collider_radius: f32,
    /// Radius used by indicator visuals (selection rings).
    pub footprint_radius: f32,
}

impl UnitRecord {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            selectable: true,
            collider_radius: 1.0,
            footprint_radius: 1.0,
        }
    }
}

impl Default for UnitRecord {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    record: Option<UnitRecord>,
}

/// Slot arena over [`UnitRecord`]s with a free list. Deregistering bumps the
/// slot generation, so stale handles never resolve again even after the slot
/// is reused. Iteration is in slot order, which is the enumeration order all
/// spatial queries report their results in.
#[derive(Resource, Debug, Default)]
pub struct UnitRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl UnitRegistry {
    pub fn register(&mut self, record: UnitRecord) -> UnitId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(record);
            UnitId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            UnitId {
                index,
                generation: 0,
            }
        }
    }

    /// Frees the unit's slot. Returns false when the handle is already stale.
    pub fn deregister(&mut self, id: UnitId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation && slot.record.is_some() => {
                slot.record = None;
                slot.generation += 1;
                self.free.push(id.index);
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_live(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: UnitId) -> Option<&UnitRecord> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_ref())
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut UnitRecord> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_mut())
    }

    /// Live units in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &UnitRecord)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.record.as_ref().map(|record| {
                (
                    UnitId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    record,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_returns_distinct_handles() {
        let mut registry = UnitRegistry::default();
        let a = registry.register(UnitRecord::at(Vec3::ZERO));
        let b = registry.register(UnitRecord::at(Vec3::X));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(b).unwrap().position, Vec3::X);
    }

    #[test]
    fn deregister_kills_handle() {
        let mut registry = UnitRegistry::default();
        let id = registry.register(UnitRecord::default());
        assert!(registry.deregister(id));
        assert!(!registry.is_live(id));
        assert!(registry.get(id).is_none());
        assert!(registry.is_empty());
        // Second deregister is a stale handle, not a double free
        assert!(!registry.deregister(id));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn slot_reuse_does_not_resurrect_stale_handles() {
        let mut registry = UnitRegistry::default();
        let old = registry.register(UnitRecord::default());
        registry.deregister(old);
        let new = registry.register(UnitRecord::at(Vec3::Y));

        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert!(!registry.is_live(old));
        assert!(registry.is_live(new));
        assert!(registry.get_mut(old).is_none());
    }

    #[test]
    fn iteration_follows_slot_order() {
        let mut registry = UnitRegistry::default();
        let a = registry.register(UnitRecord::default());
        let b = registry.register(UnitRecord::default());
        let c = registry.register(UnitRecord::default());

        registry.deregister(b);
        let d = registry.register(UnitRecord::default());

        let order: Vec<UnitId> = registry.iter().map(|(id, _)| id).collect();
        // d reused b's slot, so it enumerates between a and c
        assert_eq!(order, vec![a, d, c]);
    }

    #[test]
    fn get_mut_updates_record() {
        let mut registry = UnitRegistry::default();
        let id = registry.register(UnitRecord::default());
        registry.get_mut(id).unwrap().selectable = false;
        assert!(!registry.get(id).unwrap().selectable);
    }
}
