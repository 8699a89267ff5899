//! Object-valued attribute columns.
//!
//! Scalar columns cover geometry, ids and flags. Anything else (material
//! records, names, user payloads) lives in an [`ObjectAttribute<V>`] for any
//! `V: Clone + PartialEq`. Copying between entities clones the value, so two
//! entities never end up sharing one object, and equality is exact.
//!
//! Inside an [`AttributeSet`](crate::data::attribute_set::AttributeSet) an
//! object column is held type-erased as an [`ObjectColumn`]; typed access is a
//! downcast checked against the stored value type.

use crate::data::storage::VecStorage;
use crate::mesh_error::MeshBrepError;
use crate::topology::handle::Handle;
use std::any::{Any, type_name};
use std::fmt::Debug;

/// Values that can be stored in an [`ObjectAttribute`].
pub trait AttributeObject: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> AttributeObject for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// A named column of `arity` owned values of type `V` per entity slot.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectAttribute<V> {
    name: String,
    arity: usize,
    default: V,
    comparable: bool,
    data: VecStorage<V>,
}

impl<V: AttributeObject> ObjectAttribute<V> {
    /// Creates an empty, detached column.
    ///
    /// # Errors
    /// Returns `Err(ZeroArity)` if `arity == 0`.
    pub fn try_new(name: impl Into<String>, arity: usize, default: V) -> Result<Self, MeshBrepError> {
        let name = name.into();
        if arity == 0 {
            return Err(MeshBrepError::ZeroArity { name });
        }
        Ok(Self {
            name,
            arity,
            data: VecStorage::with_len(0, default.clone()),
            default,
            comparable: true,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn default_value(&self) -> &V {
        &self.default
    }

    #[inline]
    pub fn is_comparable(&self) -> bool {
        self.comparable
    }

    pub fn set_comparable(&mut self, comparable: bool) {
        self.comparable = comparable;
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.data.len() / self.arity
    }

    #[inline]
    fn offset<H: Handle>(&self, entity: H, component: usize) -> usize {
        assert!(
            component < self.arity,
            "component {component} out of range for attribute `{}` (arity {})",
            self.name,
            self.arity
        );
        entity.index() * self.arity + component
    }

    /// # Panics
    /// Panics if `component >= arity` or `entity` lies beyond the column.
    #[inline]
    pub fn get<H: Handle>(&self, entity: H, component: usize) -> &V {
        &self.data.as_slice()[self.offset(entity, component)]
    }

    /// # Panics
    /// Panics if `component >= arity` or `entity` lies beyond the column.
    #[inline]
    pub fn set<H: Handle>(&mut self, entity: H, component: usize, value: V) {
        let at = self.offset(entity, component);
        self.data.as_mut_slice()[at] = value;
    }

    #[inline]
    pub fn values<H: Handle>(&self, entity: H) -> &[V] {
        let start = self.offset(entity, 0);
        &self.data.as_slice()[start..start + self.arity]
    }

    #[inline]
    pub fn values_mut<H: Handle>(&mut self, entity: H) -> &mut [V] {
        let start = self.offset(entity, 0);
        let arity = self.arity;
        &mut self.data.as_mut_slice()[start..start + arity]
    }

    /// # Errors
    /// Returns `Err(SliceLengthMismatch)` if `values.len() != arity`.
    pub fn try_set_values<H: Handle>(&mut self, entity: H, values: &[V]) -> Result<(), MeshBrepError> {
        if values.len() != self.arity {
            return Err(MeshBrepError::SliceLengthMismatch {
                expected: self.arity,
                found: values.len(),
            });
        }
        self.values_mut(entity).clone_from_slice(values);
        Ok(())
    }

    /// Exact component-wise comparison of two entities.
    pub fn equals<H: Handle>(&self, a: H, b: H) -> bool {
        self.slots_equal(a.index(), b.index())
    }

    /// Clone every component of `from` onto `to`.
    pub fn copy<H: Handle>(&mut self, from: H, to: H) {
        self.copy_slot(from.index(), to.index());
    }

    pub fn reset<H: Handle>(&mut self, entity: H) {
        let default = self.default.clone();
        self.values_mut(entity).fill(default);
    }

    /// Raw backing store, `arity` values per slot, dead slots included.
    #[inline]
    pub fn array(&self) -> &[V] {
        self.data.as_slice()
    }

    pub(crate) fn resize_slots(&mut self, slots: usize) {
        self.data.resize(slots * self.arity, self.default.clone());
    }

    pub(crate) fn move_slot(&mut self, from: usize, to: usize) {
        debug_assert!(to <= from);
        self.copy_slot(from, to);
    }

    pub(crate) fn copy_slot(&mut self, from: usize, to: usize) {
        if from != to {
            let a = self.arity;
            self.data.clone_within(from * a..(from + 1) * a, to * a);
        }
    }

    pub fn slots_equal(&self, a: usize, b: usize) -> bool {
        let n = self.arity;
        let data = self.data.as_slice();
        data[a * n..(a + 1) * n] == data[b * n..(b + 1) * n]
    }
}

/// Object-safe view of an `ObjectAttribute<V>` with `V` erased.
trait ErasedColumn: Debug + Send + Sync {
    fn name(&self) -> &str;
    fn arity(&self) -> usize;
    fn is_comparable(&self) -> bool;
    fn slots(&self) -> usize;
    fn value_type(&self) -> &'static str;
    fn resize_slots(&mut self, slots: usize);
    fn move_slot(&mut self, from: usize, to: usize);
    fn copy_slot(&mut self, from: usize, to: usize);
    fn slots_equal(&self, a: usize, b: usize) -> bool;
    fn clone_box(&self) -> Box<dyn ErasedColumn>;
    fn eq_dyn(&self, other: &dyn ErasedColumn) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<V: AttributeObject> ErasedColumn for ObjectAttribute<V> {
    fn name(&self) -> &str {
        ObjectAttribute::name(self)
    }
    fn arity(&self) -> usize {
        ObjectAttribute::arity(self)
    }
    fn is_comparable(&self) -> bool {
        ObjectAttribute::is_comparable(self)
    }
    fn slots(&self) -> usize {
        ObjectAttribute::slots(self)
    }
    fn value_type(&self) -> &'static str {
        type_name::<V>()
    }
    fn resize_slots(&mut self, slots: usize) {
        ObjectAttribute::resize_slots(self, slots)
    }
    fn move_slot(&mut self, from: usize, to: usize) {
        ObjectAttribute::move_slot(self, from, to)
    }
    fn copy_slot(&mut self, from: usize, to: usize) {
        ObjectAttribute::copy_slot(self, from, to)
    }
    fn slots_equal(&self, a: usize, b: usize) -> bool {
        ObjectAttribute::slots_equal(self, a, b)
    }
    fn clone_box(&self) -> Box<dyn ErasedColumn> {
        Box::new(self.clone())
    }
    fn eq_dyn(&self, other: &dyn ErasedColumn) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other == self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Type-erased object column, as stored in a
/// [`TaggedAttribute`](crate::data::attribute_set::TaggedAttribute).
#[derive(Debug)]
pub struct ObjectColumn(Box<dyn ErasedColumn>);

impl ObjectColumn {
    pub fn new<V: AttributeObject>(column: ObjectAttribute<V>) -> Self {
        Self(Box::new(column))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn arity(&self) -> usize {
        self.0.arity()
    }

    pub fn is_comparable(&self) -> bool {
        self.0.is_comparable()
    }

    pub fn slots(&self) -> usize {
        self.0.slots()
    }

    /// Name of the stored value type, as reported by [`std::any::type_name`].
    pub fn value_type(&self) -> &'static str {
        self.0.value_type()
    }

    /// Borrow as a typed column if the value type is `V`.
    pub fn downcast<V: AttributeObject>(&self) -> Option<&ObjectAttribute<V>> {
        self.0.as_any().downcast_ref()
    }

    pub fn downcast_mut<V: AttributeObject>(&mut self) -> Option<&mut ObjectAttribute<V>> {
        self.0.as_any_mut().downcast_mut()
    }

    pub fn slots_equal(&self, a: usize, b: usize) -> bool {
        self.0.slots_equal(a, b)
    }

    pub(crate) fn resize_slots(&mut self, slots: usize) {
        self.0.resize_slots(slots)
    }

    pub(crate) fn move_slot(&mut self, from: usize, to: usize) {
        self.0.move_slot(from, to)
    }

    pub(crate) fn copy_slot(&mut self, from: usize, to: usize) {
        self.0.copy_slot(from, to)
    }
}

impl Clone for ObjectColumn {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl PartialEq for ObjectColumn {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_dyn(other.0.as_ref())
    }
}
