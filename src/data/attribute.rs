//! Attribute: a named, fixed-arity column of per-entity values.
//!
//! An `Attribute<V>` stores `arity` values of type `V` for every slot of the
//! container it is attached to, flattened into one buffer. The value of
//! component `c` of the entity at index `i` lives at `i * arity + c`.
//!
//! Columns are sized by the owning [`EntityContainer`](crate::data::container::EntityContainer):
//! they always cover at least the container's slot count, and dead slots keep
//! whatever value was last written there.

use crate::data::attribute_set::AttributeScalar;
use crate::data::storage::VecStorage;
use crate::mesh_error::MeshBrepError;
use crate::topology::handle::Handle;
use num_traits::Float;

/// Absolute tolerance used by [`Attribute::equals`] on floating columns.
pub const FLOAT_EPSILON: f64 = 1e-6;

/// A named column of `arity` values of type `V` per entity slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute<V> {
    name: String,
    arity: usize,
    default: V,
    comparable: bool,
    data: VecStorage<V>,
}

impl<V: AttributeScalar> Attribute<V> {
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
            default,
            comparable: true,
            data: VecStorage::with_len(0, default),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of components per entity.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Value written into freshly grown slots.
    #[inline]
    pub fn default_value(&self) -> V {
        self.default
    }

    /// Whether export adapters may use this column for deduplication.
    #[inline]
    pub fn is_comparable(&self) -> bool {
        self.comparable
    }

    pub fn set_comparable(&mut self, comparable: bool) {
        self.comparable = comparable;
    }

    /// Number of entity slots covered by the buffer.
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

    /// Component `component` of `entity`.
    ///
    /// # Panics
    /// Panics if `component >= arity` or `entity` lies beyond the column.
    #[inline]
    pub fn get<H: Handle>(&self, entity: H, component: usize) -> V {
        self.data.as_slice()[self.offset(entity, component)]
    }

    /// Overwrite component `component` of `entity`.
    ///
    /// # Panics
    /// Panics if `component >= arity` or `entity` lies beyond the column.
    #[inline]
    pub fn set<H: Handle>(&mut self, entity: H, component: usize, value: V) {
        let at = self.offset(entity, component);
        self.data.as_mut_slice()[at] = value;
    }

    /// All components of `entity`.
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

    /// Overwrite all components of `entity`.
    ///
    /// # Errors
    /// Returns `Err(SliceLengthMismatch)` if `values.len() != arity`.
    pub fn try_set_values<H: Handle>(&mut self, entity: H, values: &[V]) -> Result<(), MeshBrepError> {
        if values.len() != self.arity {
            return Err(MeshBrepError::SliceLengthMismatch {
                expected: self.arity,
                found: values.len(),
            });
        }
        self.values_mut(entity).copy_from_slice(values);
        Ok(())
    }

    /// Component-wise comparison of two entities.
    ///
    /// Floating columns compare within [`FLOAT_EPSILON`]; every other scalar
    /// type compares exactly.
    pub fn equals<H: Handle>(&self, a: H, b: H) -> bool {
        self.slots_equal(a.index(), b.index())
    }

    /// Copy every component of `from` onto `to`.
    pub fn copy<H: Handle>(&mut self, from: H, to: H) {
        self.copy_slot(from.index(), to.index());
    }

    /// Reset every component of `entity` to the column default.
    pub fn reset<H: Handle>(&mut self, entity: H) {
        let default = self.default;
        self.values_mut(entity).fill(default);
    }

    /// Raw backing store, `arity` values per slot, dead slots included.
    #[inline]
    pub fn array(&self) -> &[V] {
        self.data.as_slice()
    }

    /// Mutable raw backing store, for bulk import.
    #[inline]
    pub fn array_mut(&mut self) -> &mut [V] {
        self.data.as_mut_slice()
    }

    /// Grow or shrink the column to cover exactly `slots` entities.
    pub(crate) fn resize_slots(&mut self, slots: usize) {
        self.data.resize(slots * self.arity, self.default);
    }

    /// Move the values of slot `from` down to slot `to` during compaction.
    pub(crate) fn move_slot(&mut self, from: usize, to: usize) {
        debug_assert!(to <= from);
        self.copy_slot(from, to);
    }

    pub(crate) fn copy_slot(&mut self, from: usize, to: usize) {
        if from != to {
            let a = self.arity;
            self.data.copy_within(from * a..(from + 1) * a, to * a);
        }
    }

    /// Component-wise equality of two slots with the column's tolerance.
    pub fn slots_equal(&self, a: usize, b: usize) -> bool {
        let n = self.arity;
        let data = self.data.as_slice();
        data[a * n..(a + 1) * n]
            .iter()
            .zip(&data[b * n..(b + 1) * n])
            .all(|(x, y)| V::approx_eq(*x, *y))
    }
}

impl<V: AttributeScalar + bytemuck::Pod> Attribute<V> {
    /// Backing store reinterpreted as bytes, for upload to an external sink.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }
}

impl<V: AttributeScalar + Float> Attribute<V> {
    /// `dst = a + (b - a) * t`, component-wise.
    pub fn lerp<H: Handle>(&mut self, dst: H, a: H, b: H, t: V) {
        self.lerp_slot(dst.index(), a.index(), b.index(), t);
    }

    pub(crate) fn lerp_slot(&mut self, dst: usize, a: usize, b: usize, t: V) {
        let n = self.arity;
        let data = self.data.as_mut_slice();
        for c in 0..n {
            let x = data[a * n + c];
            let y = data[b * n + c];
            data[dst * n + c] = x + (y - x) * t;
        }
    }
}
