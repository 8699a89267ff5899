//! EntityContainer: columnar storage for one entity kind.
//!
//! A container owns
//! - a dense array of entity structs (live and dead slots interleaved),
//! - per-slot alive flags and a free list (stack) of reclaimed slots,
//! - the [`AttributeSet`] of columns attached to this kind,
//! - a `capacity` (in slots) that every attached column covers.
//!
//! # Invariants
//!
//! - `capacity >= slot_count()`; every column holds exactly `capacity` slots.
//! - The free list holds each dead slot exactly once.
//! - Handles of live entities change only in [`compact`](Self::compact).
//!
//! Creation and destruction are crate-private: entities only come and go
//! through the [`Mesh`](crate::mesh::Mesh) operators, which keep the link
//! cycles consistent.

use crate::data::attribute::Attribute;
use crate::data::attribute_set::{AttributeScalar, AttributeSet, TaggedAttribute};
use crate::data::object_attribute::{AttributeObject, ObjectAttribute};
use crate::mesh_error::MeshBrepError;
use crate::topology::entity::{Entity, MeshRemap, Remap};
use crate::topology::handle::Handle;

/// Smallest capacity a container grows to on its first allocation.
pub const MIN_CAPACITY: usize = 8;

/// Dense storage of entities of type `T` plus their attribute columns.
#[derive(Clone, Debug)]
pub struct EntityContainer<T: Entity> {
    entities: Vec<T>,
    alive: Vec<bool>,
    free: Vec<usize>,
    capacity: usize,
    attributes: AttributeSet,
}

impl<T: Entity> Default for EntityContainer<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            alive: Vec::new(),
            free: Vec::new(),
            capacity: 0,
            attributes: AttributeSet::new(),
        }
    }
}

impl<T: Entity> EntityContainer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len() - self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots in use, live or dead.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of slots every attribute column currently covers.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of dead slots waiting for reuse.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn is_alive(&self, id: T::Id) -> bool {
        self.alive.get(id.index()).copied().unwrap_or(false)
    }

    /// The entity at `id`, or `None` if the slot is dead or out of range.
    #[inline]
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.is_alive(id).then(|| &self.entities[id.index()])
    }

    /// Like [`get`](Self::get) but reports a dead handle as `InvalidHandle`.
    pub fn try_get(&self, id: T::Id) -> Result<&T, MeshBrepError> {
        self.get(id).ok_or(MeshBrepError::InvalidHandle {
            kind: T::KIND,
            index: id.index(),
        })
    }

    /// Fails with `InvalidHandle` unless `id` is live.
    #[inline]
    pub fn check(&self, id: T::Id) -> Result<(), MeshBrepError> {
        self.try_get(id).map(|_| ())
    }

    /// Unchecked access for the facade; a dead slot here is a kernel bug.
    #[inline]
    pub(crate) fn entity(&self, id: T::Id) -> &T {
        debug_assert!(self.is_alive(id), "access to dead {} {id}", T::KIND);
        &self.entities[id.index()]
    }

    #[inline]
    pub(crate) fn entity_mut(&mut self, id: T::Id) -> &mut T {
        debug_assert!(self.is_alive(id), "access to dead {} {id}", T::KIND);
        &mut self.entities[id.index()]
    }

    /// Allocate a slot: pop the free list or append, growing every column.
    ///
    /// A reused slot keeps the stale attribute values of its previous
    /// occupant; callers overwrite what they care about.
    pub(crate) fn create(&mut self) -> T::Id {
        if let Some(index) = self.free.pop() {
            let id = T::Id::from_index(index);
            self.entities[index] = T::detached(id);
            self.alive[index] = true;
            return id;
        }
        let index = self.entities.len();
        if index >= self.capacity {
            let target = (self.capacity * 2).max(MIN_CAPACITY).max(index + 1);
            self.grow_to(target);
        }
        let id = T::Id::from_index(index);
        self.entities.push(T::detached(id));
        self.alive.push(true);
        id
    }

    /// Release the slot: run the release hook, mark it dead, push it on the
    /// free list. Storage is never shrunk here.
    pub(crate) fn destroy(&mut self, id: T::Id) {
        let index = id.index();
        assert!(self.is_alive(id), "double destroy of {} {id}", T::KIND);
        self.entities[index].release(id);
        self.alive[index] = false;
        self.free.push(index);
    }

    /// Pre-grow storage so that `slots` slots exist without reallocating.
    /// Never shrinks.
    pub fn ensure_capacity(&mut self, slots: usize) {
        if slots > self.capacity {
            self.grow_to(slots);
        }
    }

    fn grow_to(&mut self, slots: usize) {
        log::debug!(
            "growing {} container from {} to {} slots",
            T::KIND,
            self.capacity,
            slots
        );
        self.capacity = slots;
        self.entities.reserve(slots - self.entities.len());
        self.alive.reserve(slots - self.alive.len());
        for column in self.attributes.iter_mut() {
            column.resize_slots(slots);
        }
    }

    /// Drop every dead slot, shifting each retained slot down by the number of
    /// freed slots below it. Relative order is preserved; afterwards capacity
    /// equals the live count and the free list is empty.
    ///
    /// Only moves storage: links held by entities are rewritten by the mesh
    /// through [`remap_links`](Self::remap_links).
    pub(crate) fn compact(&mut self) -> Remap {
        let slots = self.entities.len();
        let mut remap = Remap::with_slots(slots);
        let mut next = 0usize;
        for old in 0..slots {
            if !self.alive[old] {
                continue;
            }
            remap.insert(old, next);
            if old != next {
                self.entities.swap(old, next);
                for column in self.attributes.iter_mut() {
                    column.move_slot(old, next);
                }
            }
            next += 1;
        }
        self.entities.truncate(next);
        self.entities.shrink_to_fit();
        self.alive.clear();
        self.alive.resize(next, true);
        self.free.clear();
        self.capacity = next;
        for column in self.attributes.iter_mut() {
            column.resize_slots(next);
        }
        log::debug!(
            "compacted {} container: {} slots -> {} live",
            T::KIND,
            slots,
            next
        );
        remap
    }

    /// Rewrite the links of every live entity after a compaction.
    pub(crate) fn remap_links(&mut self, remap: &MeshRemap) {
        for (entity, &alive) in self.entities.iter_mut().zip(&self.alive) {
            if alive {
                entity.remap(remap);
            }
        }
    }

    /// Copy every attached attribute value from `from` onto `to`. Object
    /// values are cloned, never shared.
    ///
    /// # Errors
    /// Returns `Err(InvalidHandle)` if either entity is dead.
    pub fn copy_properties(&mut self, from: T::Id, to: T::Id) -> Result<(), MeshBrepError> {
        self.check(from)?;
        self.check(to)?;
        if from != to {
            for column in self.attributes.iter_mut() {
                column.copy_slot(from.index(), to.index());
            }
        }
        Ok(())
    }

    /// Interpolate every floating column at `dst` between `a` and `b`.
    pub(crate) fn interpolate(&mut self, dst: T::Id, a: T::Id, b: T::Id, t: f64) {
        for column in self.attributes.iter_mut() {
            column.lerp_slots(dst.index(), a.index(), b.index(), t);
        }
    }

    // ---------------------------------------------------------------------
    // Attribute registry
    // ---------------------------------------------------------------------

    /// Attach a new column filled with `default`, or return the existing one
    /// if a column of the same name, type and arity is already attached.
    ///
    /// # Errors
    /// `ZeroArity` for `arity == 0`; `AttributeTypeMismatch` if the name is
    /// taken by a column of another type or arity.
    pub fn add_attribute<V: AttributeScalar>(
        &mut self,
        name: &str,
        arity: usize,
        default: V,
    ) -> Result<&mut Attribute<V>, MeshBrepError> {
        if !self.attributes.contains(name) {
            let mut column = Attribute::<V>::try_new(name, arity, default)?;
            column.resize_slots(self.capacity);
            self.attributes.insert(V::wrap(column))?;
        }
        self.attribute_mut::<V>(name, arity)?
            .ok_or_else(|| MeshBrepError::DuplicateAttribute {
                name: name.to_string(),
            })
    }

    /// Attach a new object column filled with clones of `default`, or return
    /// the existing one if the name already holds `V` values of that arity.
    ///
    /// # Errors
    /// `ZeroArity` for `arity == 0`; `AttributeTypeMismatch` or
    /// `ObjectTypeMismatch` if the name is taken by another kind of column.
    pub fn add_object_attribute<V: AttributeObject>(
        &mut self,
        name: &str,
        arity: usize,
        default: V,
    ) -> Result<&mut ObjectAttribute<V>, MeshBrepError> {
        if !self.attributes.contains(name) {
            let mut column = ObjectAttribute::try_new(name, arity, default)?;
            column.resize_slots(self.capacity);
            self.attributes.insert(column.into())?;
        }
        self.object_attribute_mut::<V>(name, arity)?
            .ok_or_else(|| MeshBrepError::DuplicateAttribute {
                name: name.to_string(),
            })
    }

    /// Attach an existing column. Its buffer is reallocated to this
    /// container's capacity; values already present keep their slot index.
    ///
    /// # Errors
    /// Returns `Err(DuplicateAttribute)` if the name is taken.
    pub fn insert_attribute(&mut self, mut column: TaggedAttribute) -> Result<(), MeshBrepError> {
        if self.attributes.contains(column.name()) {
            return Err(MeshBrepError::DuplicateAttribute {
                name: column.name().to_string(),
            });
        }
        column.resize_slots(self.capacity);
        self.attributes.insert(column)
    }

    /// Detach and return the column called `name`.
    pub fn remove_attribute(&mut self, name: &str) -> Option<TaggedAttribute> {
        self.attributes.remove(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Typed lookup: `Ok(None)` when absent, `AttributeTypeMismatch` when the
    /// column has another type or arity.
    pub fn attribute<V: AttributeScalar>(
        &self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&Attribute<V>>, MeshBrepError> {
        self.attributes.get(name, arity)
    }

    pub fn attribute_mut<V: AttributeScalar>(
        &mut self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&mut Attribute<V>>, MeshBrepError> {
        self.attributes.get_mut(name, arity)
    }

    /// Typed lookup of an object column; see [`AttributeSet::get_object`].
    pub fn object_attribute<V: AttributeObject>(
        &self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&ObjectAttribute<V>>, MeshBrepError> {
        self.attributes.get_object(name, arity)
    }

    pub fn object_attribute_mut<V: AttributeObject>(
        &mut self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&mut ObjectAttribute<V>>, MeshBrepError> {
        self.attributes.get_object_mut(name, arity)
    }

    /// All attached columns, in attachment order.
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    // ---------------------------------------------------------------------
    // Iteration
    // ---------------------------------------------------------------------

    /// Lazy iterator over live handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = T::Id> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(i, &alive)| alive.then(|| T::Id::from_index(i)))
    }

    /// Lazy iterator over live `(handle, entity)` pairs, in slot order.
    pub fn iter_entities(&self) -> impl Iterator<Item = (T::Id, &T)> + '_ {
        self.entities
            .iter()
            .zip(&self.alive)
            .enumerate()
            .filter_map(|(i, (e, &alive))| alive.then(|| (T::Id::from_index(i), e)))
    }

    /// Snapshot of live handles, for callers that mutate while traversing.
    pub fn handles(&self) -> Vec<T::Id> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::handle::VertexId;
    use crate::topology::vertex::Vertex;

    fn with_position() -> EntityContainer<Vertex> {
        let mut c = EntityContainer::<Vertex>::new();
        c.add_attribute::<f64>("position", 3, 0.0).unwrap();
        c
    }

    #[test]
    fn create_grows_columns_geometrically() {
        let mut c = with_position();
        assert_eq!(c.capacity(), 0);
        let v0 = c.create();
        assert_eq!(v0, VertexId::new(0));
        assert_eq!(c.capacity(), MIN_CAPACITY);
        for _ in 1..=MIN_CAPACITY {
            c.create();
        }
        assert_eq!(c.capacity(), 2 * MIN_CAPACITY);
        let pos = c.attribute::<f64>("position", 3).unwrap().unwrap();
        assert_eq!(pos.slots(), c.capacity());
    }

    #[test]
    fn destroy_then_create_reuses_slot_and_stale_data() {
        let mut c = with_position();
        let a = c.create();
        let b = c.create();
        c.attribute_mut::<f64>("position", 3)
            .unwrap()
            .unwrap()
            .try_set_values(a, &[1.0, 2.0, 3.0])
            .unwrap();
        c.destroy(a);
        assert!(!c.is_alive(a));
        assert_eq!(c.len(), 1);
        assert_eq!(c.free_count(), 1);
        let again = c.create();
        assert_eq!(again, a);
        assert!(c.is_alive(b));
        let pos = c.attribute::<f64>("position", 3).unwrap().unwrap();
        assert_eq!(pos.values(again), &[1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "double destroy")]
    fn double_destroy_panics() {
        let mut c = EntityContainer::<Vertex>::new();
        let a = c.create();
        c.destroy(a);
        c.destroy(a);
    }

    struct Capture;

    static RECORDS: std::sync::Mutex<Vec<(log::Level, String)>> = std::sync::Mutex::new(Vec::new());

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }
        fn log(&self, record: &log::Record) {
            RECORDS
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
        fn flush(&self) {}
    }

    #[test]
    fn growth_is_logged_at_debug() {
        static CAPTURE: Capture = Capture;
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        let mut c = with_position();
        c.ensure_capacity(1234);
        let records = RECORDS.lock().unwrap();
        let growth: Vec<_> = records
            .iter()
            .filter(|(_, msg)| msg.contains("to 1234 slots"))
            .collect();
        assert_eq!(growth.len(), 1);
        assert_eq!(growth[0].0, log::Level::Debug);
    }

    #[test]
    fn ensure_capacity_is_monotonic() {
        let mut c = with_position();
        c.ensure_capacity(100);
        assert_eq!(c.capacity(), 100);
        c.ensure_capacity(10);
        assert_eq!(c.capacity(), 100);
        assert_eq!(c.slot_count(), 0);
    }

    #[test]
    fn compact_preserves_order_and_values() {
        let mut c = with_position();
        let ids: Vec<_> = (0..5).map(|_| c.create()).collect();
        {
            let pos = c.attribute_mut::<f64>("position", 3).unwrap().unwrap();
            for (i, &id) in ids.iter().enumerate() {
                pos.try_set_values(id, &[i as f64; 3]).unwrap();
            }
        }
        c.destroy(ids[1]);
        c.destroy(ids[3]);
        let remap = c.compact();

        assert_eq!(c.len(), 3);
        assert_eq!(c.slot_count(), 3);
        assert_eq!(c.capacity(), 3);
        assert_eq!(c.free_count(), 0);
        assert_eq!(remap.get(ids[0]), Some(VertexId::new(0)));
        assert_eq!(remap.get(ids[1]), None);
        assert_eq!(remap.get(ids[2]), Some(VertexId::new(1)));
        assert_eq!(remap.get(ids[4]), Some(VertexId::new(2)));

        let pos = c.attribute::<f64>("position", 3).unwrap().unwrap();
        assert_eq!(pos.array().len(), 9);
        assert_eq!(pos.values(VertexId::new(1)), &[2.0; 3]);
        assert_eq!(pos.values(VertexId::new(2)), &[4.0; 3]);
    }

    #[test]
    fn attaching_sizes_to_capacity_and_keeps_old_values() {
        let mut c = EntityContainer::<Vertex>::new();
        c.ensure_capacity(4);
        let mut col = Attribute::<i32>::try_new("id", 1, -1).unwrap();
        col.resize_slots(2);
        col.set(VertexId::new(1), 0, 42);
        c.insert_attribute(i32::wrap(col)).unwrap();
        let col = c.attribute::<i32>("id", 1).unwrap().unwrap();
        assert_eq!(col.array(), &[-1, 42, -1, -1]);

        let detached = c.remove_attribute("id").unwrap();
        assert_eq!(detached.slots(), 4);
        assert!(!c.has_attribute("id"));
    }

    #[test]
    fn add_attribute_is_idempotent_but_typed() {
        let mut c = with_position();
        assert!(c.add_attribute::<f64>("position", 3, 1.0).is_ok());
        assert!(matches!(
            c.add_attribute::<f32>("position", 3, 0.0),
            Err(MeshBrepError::AttributeTypeMismatch { .. })
        ));
        assert_eq!(c.attributes().len(), 1);
    }

    #[test]
    fn copy_properties_copies_every_column() {
        let mut c = with_position();
        c.add_attribute::<bool>("selected", 1, false).unwrap();
        let a = c.create();
        let b = c.create();
        c.attribute_mut::<f64>("position", 3)
            .unwrap()
            .unwrap()
            .try_set_values(a, &[5.0, 6.0, 7.0])
            .unwrap();
        c.attribute_mut::<bool>("selected", 1)
            .unwrap()
            .unwrap()
            .set(a, 0, true);
        c.copy_properties(a, b).unwrap();
        assert!(c.attribute::<f64>("position", 3).unwrap().unwrap().equals(a, b));
        assert!(c.attribute::<bool>("selected", 1).unwrap().unwrap().get(b, 0));

        c.destroy(b);
        assert!(matches!(
            c.copy_properties(a, b),
            Err(MeshBrepError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn interpolate_works_on_any_kind() {
        use crate::topology::face_loop::Loop;
        let mut c = EntityContainer::<Loop>::new();
        c.add_attribute::<f32>("uv", 2, 0.0).unwrap();
        c.add_attribute::<u32>("seam", 1, 7).unwrap();
        let ids: Vec<_> = (0..3).map(|_| c.create()).collect();
        c.attribute_mut::<f32>("uv", 2)
            .unwrap()
            .unwrap()
            .try_set_values(ids[1], &[2.0, 4.0])
            .unwrap();
        c.interpolate(ids[2], ids[0], ids[1], 0.5);
        let uv = c.attribute::<f32>("uv", 2).unwrap().unwrap();
        assert_eq!(uv.values(ids[2]), &[1.0, 2.0]);
        assert_eq!(c.attribute::<u32>("seam", 1).unwrap().unwrap().get(ids[2], 0), 7);
    }

    #[test]
    fn object_columns_clone_on_copy_and_compact() {
        let mut c = EntityContainer::<Vertex>::new();
        c.add_object_attribute("tags", 1, Vec::<String>::new()).unwrap();
        let ids: Vec<_> = (0..3).map(|_| c.create()).collect();
        c.object_attribute_mut::<Vec<String>>("tags", 1)
            .unwrap()
            .unwrap()
            .set(ids[2], 0, vec!["corner".into()]);
        c.copy_properties(ids[2], ids[0]).unwrap();
        c.object_attribute_mut::<Vec<String>>("tags", 1)
            .unwrap()
            .unwrap()
            .values_mut(ids[2])[0]
            .push("moved".into());

        c.destroy(ids[1]);
        let remap = c.compact();
        let tags = c.object_attribute::<Vec<String>>("tags", 1).unwrap().unwrap();
        assert_eq!(tags.get(ids[0], 0), &vec!["corner".to_string()]);
        let moved = remap.get(ids[2]).unwrap();
        assert_eq!(tags.get(moved, 0), &vec!["corner".to_string(), "moved".to_string()]);
        assert_eq!(tags.slots(), 2);
        assert!(matches!(
            c.add_object_attribute("tags", 1, String::new()),
            Err(MeshBrepError::ObjectTypeMismatch { .. })
        ));
    }

    #[test]
    fn iteration_skips_dead_slots_and_restarts() {
        let mut c = EntityContainer::<Vertex>::new();
        let ids: Vec<_> = (0..4).map(|_| c.create()).collect();
        c.destroy(ids[2]);
        let first: Vec<_> = c.iter().collect();
        let second: Vec<_> = c.iter().collect();
        assert_eq!(first, vec![ids[0], ids[1], ids[3]]);
        assert_eq!(first, second);
        assert_eq!(c.iter_entities().count(), 3);
        assert_eq!(c.handles(), first);
    }
}
