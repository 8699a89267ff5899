//! Typed attribute registry with tagged columns.
//!
//! Each entity container keeps an [`AttributeSet`]: columns keyed by name,
//! stored as a [`TaggedAttribute`] sum type so that columns of different value
//! types live side by side. Typed access goes through [`AttributeScalar`],
//! which maps a Rust type to its tag, or through a checked downcast for object
//! columns. A lookup with the wrong type or arity is reported as an error
//! instead of a failed cast.

use crate::data::attribute::{Attribute, FLOAT_EPSILON};
use crate::data::object_attribute::{AttributeObject, ObjectAttribute, ObjectColumn};
use crate::mesh_error::MeshBrepError;
use hashbrown::HashMap;
use std::any::type_name;
use std::fmt::Debug;

/// Value type tag for attribute columns.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ScalarType {
    F32,
    F64,
    I32,
    I64,
    U32,
    U64,
    Bool,
    /// Any [`AttributeObject`]; the concrete type is checked on downcast.
    Object,
}

impl ScalarType {
    /// Returns a stable string label for the scalar type.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::Bool => "bool",
            ScalarType::Object => "object",
        }
    }
}

/// Trait mapping scalar types to tagged attribute columns.
pub trait AttributeScalar: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// Scalar type tag for this concrete type.
    const SCALAR_TYPE: ScalarType;

    /// Equality used by [`Attribute::equals`].
    fn approx_eq(a: Self, b: Self) -> bool;
    /// Wrap a typed column into a tagged container.
    fn wrap(attr: Attribute<Self>) -> TaggedAttribute;
    /// Borrow a typed column if the tag matches.
    fn unwrap(attr: &TaggedAttribute) -> Option<&Attribute<Self>>;
    /// Mutably borrow a typed column if the tag matches.
    fn unwrap_mut(attr: &mut TaggedAttribute) -> Option<&mut Attribute<Self>>;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident, |$a:ident, $b:ident| $eq:expr) => {
        impl AttributeScalar for $ty {
            const SCALAR_TYPE: ScalarType = ScalarType::$variant;

            #[inline]
            fn approx_eq($a: Self, $b: Self) -> bool {
                $eq
            }

            fn wrap(attr: Attribute<Self>) -> TaggedAttribute {
                TaggedAttribute::$variant(attr)
            }

            fn unwrap(attr: &TaggedAttribute) -> Option<&Attribute<Self>> {
                if let TaggedAttribute::$variant(attr) = attr {
                    Some(attr)
                } else {
                    None
                }
            }

            fn unwrap_mut(attr: &mut TaggedAttribute) -> Option<&mut Attribute<Self>> {
                if let TaggedAttribute::$variant(attr) = attr {
                    Some(attr)
                } else {
                    None
                }
            }
        }
    };
}

impl_scalar!(f32, F32, |a, b| f64::from(a - b).abs() <= FLOAT_EPSILON);
impl_scalar!(f64, F64, |a, b| (a - b).abs() <= FLOAT_EPSILON);
impl_scalar!(i32, I32, |a, b| a == b);
impl_scalar!(i64, I64, |a, b| a == b);
impl_scalar!(u32, U32, |a, b| a == b);
impl_scalar!(u64, U64, |a, b| a == b);
impl_scalar!(bool, Bool, |a, b| a == b);

/// Tagged, type-erased attribute column.
#[derive(Clone, Debug, PartialEq)]
pub enum TaggedAttribute {
    F32(Attribute<f32>),
    F64(Attribute<f64>),
    I32(Attribute<i32>),
    I64(Attribute<i64>),
    U32(Attribute<u32>),
    U64(Attribute<u64>),
    Bool(Attribute<bool>),
    Object(ObjectColumn),
}

/// Runs `$body` with `$a` bound to the typed column inside `$self`.
macro_rules! with_column {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            TaggedAttribute::F32($a) => $body,
            TaggedAttribute::F64($a) => $body,
            TaggedAttribute::I32($a) => $body,
            TaggedAttribute::I64($a) => $body,
            TaggedAttribute::U32($a) => $body,
            TaggedAttribute::U64($a) => $body,
            TaggedAttribute::Bool($a) => $body,
            TaggedAttribute::Object($a) => $body,
        }
    };
}

impl TaggedAttribute {
    /// Return the scalar type tag for this column.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            TaggedAttribute::F32(_) => ScalarType::F32,
            TaggedAttribute::F64(_) => ScalarType::F64,
            TaggedAttribute::I32(_) => ScalarType::I32,
            TaggedAttribute::I64(_) => ScalarType::I64,
            TaggedAttribute::U32(_) => ScalarType::U32,
            TaggedAttribute::U64(_) => ScalarType::U64,
            TaggedAttribute::Bool(_) => ScalarType::Bool,
            TaggedAttribute::Object(_) => ScalarType::Object,
        }
    }

    pub fn name(&self) -> &str {
        with_column!(self, a => a.name())
    }

    pub fn arity(&self) -> usize {
        with_column!(self, a => a.arity())
    }

    pub fn is_comparable(&self) -> bool {
        with_column!(self, a => a.is_comparable())
    }

    /// Number of entity slots covered by the column.
    pub fn slots(&self) -> usize {
        with_column!(self, a => a.slots())
    }

    /// Borrow as a typed column.
    pub fn downcast<V: AttributeScalar>(&self) -> Option<&Attribute<V>> {
        V::unwrap(self)
    }

    /// Mutably borrow as a typed column.
    pub fn downcast_mut<V: AttributeScalar>(&mut self) -> Option<&mut Attribute<V>> {
        V::unwrap_mut(self)
    }

    /// Borrow as an object column holding `V`.
    pub fn downcast_object<V: AttributeObject>(&self) -> Option<&ObjectAttribute<V>> {
        match self {
            TaggedAttribute::Object(col) => col.downcast(),
            _ => None,
        }
    }

    pub fn downcast_object_mut<V: AttributeObject>(&mut self) -> Option<&mut ObjectAttribute<V>> {
        match self {
            TaggedAttribute::Object(col) => col.downcast_mut(),
            _ => None,
        }
    }

    pub(crate) fn resize_slots(&mut self, slots: usize) {
        with_column!(self, a => a.resize_slots(slots))
    }

    pub(crate) fn move_slot(&mut self, from: usize, to: usize) {
        with_column!(self, a => a.move_slot(from, to))
    }

    /// Copy slot `from` onto slot `to`; object values are cloned.
    pub(crate) fn copy_slot(&mut self, from: usize, to: usize) {
        with_column!(self, a => a.copy_slot(from, to))
    }

    /// Component-wise equality of two slots: within [`FLOAT_EPSILON`] for
    /// floating columns, exact otherwise.
    pub fn slots_equal(&self, a: usize, b: usize) -> bool {
        with_column!(self, col => col.slots_equal(a, b))
    }

    /// `dst = a + (b - a) * t` on floating columns; other columns are left alone.
    pub(crate) fn lerp_slots(&mut self, dst: usize, a: usize, b: usize, t: f64) {
        match self {
            TaggedAttribute::F32(col) => col.lerp_slot(dst, a, b, t as f32),
            TaggedAttribute::F64(col) => col.lerp_slot(dst, a, b, t),
            _ => {}
        }
    }
}

impl<V: AttributeObject> From<ObjectAttribute<V>> for TaggedAttribute {
    fn from(column: ObjectAttribute<V>) -> Self {
        TaggedAttribute::Object(ObjectColumn::new(column))
    }
}

/// Columns attached to one container, keyed by name, in attachment order.
#[derive(Clone, Debug, Default)]
pub struct AttributeSet {
    columns: Vec<TaggedAttribute>,
    by_name: HashMap<String, usize>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Untyped lookup.
    pub fn get_tagged(&self, name: &str) -> Option<&TaggedAttribute> {
        self.by_name.get(name).map(|&i| &self.columns[i])
    }

    /// Typed lookup: `Ok(None)` when absent, `AttributeTypeMismatch` when the
    /// column exists with another scalar type or arity.
    pub fn get<V: AttributeScalar>(
        &self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&Attribute<V>>, MeshBrepError> {
        let Some(&i) = self.by_name.get(name) else {
            return Ok(None);
        };
        let column = &self.columns[i];
        check_tag(column, name, V::SCALAR_TYPE, arity)?;
        Ok(V::unwrap(column))
    }

    /// Mutable typed lookup, same contract as [`get`](Self::get).
    pub fn get_mut<V: AttributeScalar>(
        &mut self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&mut Attribute<V>>, MeshBrepError> {
        let Some(&i) = self.by_name.get(name) else {
            return Ok(None);
        };
        let column = &mut self.columns[i];
        check_tag(column, name, V::SCALAR_TYPE, arity)?;
        Ok(V::unwrap_mut(column))
    }

    /// Typed lookup of an object column: `Ok(None)` when absent,
    /// `AttributeTypeMismatch` for a scalar column or another arity,
    /// `ObjectTypeMismatch` when the column holds another value type.
    pub fn get_object<V: AttributeObject>(
        &self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&ObjectAttribute<V>>, MeshBrepError> {
        let Some(&i) = self.by_name.get(name) else {
            return Ok(None);
        };
        let column = &self.columns[i];
        check_tag(column, name, ScalarType::Object, arity)?;
        column
            .downcast_object::<V>()
            .map(Some)
            .ok_or_else(|| object_mismatch::<V>(column, name))
    }

    pub fn get_object_mut<V: AttributeObject>(
        &mut self,
        name: &str,
        arity: usize,
    ) -> Result<Option<&mut ObjectAttribute<V>>, MeshBrepError> {
        let Some(&i) = self.by_name.get(name) else {
            return Ok(None);
        };
        let column = &mut self.columns[i];
        check_tag(column, name, ScalarType::Object, arity)?;
        if column.downcast_object::<V>().is_none() {
            return Err(object_mismatch::<V>(column, name));
        }
        Ok(column.downcast_object_mut::<V>())
    }

    /// Attach `column`, which must already be sized by the caller.
    ///
    /// # Errors
    /// Returns `Err(DuplicateAttribute)` if the name is taken.
    pub fn insert(&mut self, column: TaggedAttribute) -> Result<(), MeshBrepError> {
        if self.by_name.contains_key(column.name()) {
            return Err(MeshBrepError::DuplicateAttribute {
                name: column.name().to_string(),
            });
        }
        self.by_name
            .insert(column.name().to_string(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Detach the column called `name`. Remaining columns keep their order.
    pub fn remove(&mut self, name: &str) -> Option<TaggedAttribute> {
        let i = self.by_name.remove(name)?;
        let column = self.columns.remove(i);
        for idx in self.by_name.values_mut() {
            if *idx > i {
                *idx -= 1;
            }
        }
        Some(column)
    }

    /// Columns in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &TaggedAttribute> {
        self.columns.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TaggedAttribute> {
        self.columns.iter_mut()
    }
}

fn check_tag(
    column: &TaggedAttribute,
    name: &str,
    expected_type: ScalarType,
    arity: usize,
) -> Result<(), MeshBrepError> {
    if column.scalar_type() != expected_type || column.arity() != arity {
        return Err(MeshBrepError::AttributeTypeMismatch {
            name: name.to_string(),
            expected_type,
            expected_arity: arity,
            found_type: column.scalar_type(),
            found_arity: column.arity(),
        });
    }
    Ok(())
}

fn object_mismatch<V: AttributeObject>(column: &TaggedAttribute, name: &str) -> MeshBrepError {
    let found = match column {
        TaggedAttribute::Object(col) => col.value_type(),
        other => other.scalar_type().as_str(),
    };
    MeshBrepError::ObjectTypeMismatch {
        name: name.to_string(),
        expected: type_name::<V>(),
        found,
    }
}
