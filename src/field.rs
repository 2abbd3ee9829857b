//! The traits every schema participant implements.
//!
//! [`Field`] is the per-kind rule set: how a value of that type is zero-initialized,
//! encoded, decoded, deep-copied and recycled. The scalar types, [`Text`](crate::Text),
//! fixed arrays and [`VarArray`](crate::VarArray) implement it in this crate;
//! `#[derive(Record)]` implements it for records by applying the field rules to each
//! field in declaration order. Because all four record operations are generated from
//! the same ordered field list, they always traverse fields identically.

use crate::Document;
use crate::api::JsonWrap;
use crate::error::Result;
use crate::schema::{ElementType, FieldDescriptor, Schema};

/// A value that can occupy a record field.
pub trait Field: Sized {
    /// Layout of a field of this type.
    const DESCRIPTOR: FieldDescriptor;

    /// The zero-initialized value: scalars are 0, owned content is absent.
    fn zeroed() -> Self;

    /// Encodes the value as a document node.
    fn encode(&self, cx: &JsonWrap) -> Document;

    /// Returns true when the field should not be written as a key at all.
    fn omit(&self, _cx: &JsonWrap) -> bool {
        false
    }

    /// Decodes `node` into the value in place.
    fn decode(&mut self, node: &Document, cx: &JsonWrap) -> Result<()>;

    /// Deep-copies the value into `dst`, replacing its owned content.
    fn copy_to(&self, dst: &mut Self, cx: &JsonWrap) -> Result<()>;

    /// Releases all owned content. Safe to call repeatedly.
    fn recycle(&mut self, cx: &JsonWrap);
}

/// A type allowed as the element of an array field.
pub trait Element: Field {
    /// The element type recorded in array descriptors.
    const ELEMENT: ElementType;
}

/// A composite record type.
///
/// Implemented by `#[derive(Record)]`; see [`record!`](crate::record) for the
/// descriptor-list front end.
pub trait Record: Field + Element {
    /// The record's field list.
    fn schema() -> &'static Schema;
}
