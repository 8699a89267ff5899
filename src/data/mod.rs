//! Data module: scalar and object attribute columns, entity containers

pub mod attribute;
pub mod attribute_set;
pub mod container;
pub mod object_attribute;
pub mod storage;

pub use attribute::{Attribute, FLOAT_EPSILON};
pub use attribute_set::{AttributeScalar, AttributeSet, ScalarType, TaggedAttribute};
pub use container::EntityContainer;
pub use object_attribute::{AttributeObject, ObjectAttribute, ObjectColumn};
pub use storage::VecStorage;
