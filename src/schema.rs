//! The field descriptor model.
//!
//! A [`Schema`] is the runtime description of one record type: its name and its
//! ordered, named fields. Each field carries a [`FieldDescriptor`] stating its kind,
//! its element type and, for fixed arrays, its cardinality. Schemas are built at
//! compile time by `#[derive(Record)]` and live in statics.

use serde::Serialize;
use std::fmt;

/// The value types a scalar field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarKind {
    /// `bool`, encoded as a JSON boolean.
    Boolean,
    /// `char`, encoded as its code point number.
    Character,
    /// `i32`, encoded as a JSON number.
    Integer,
    /// [`Text`](crate::Text), encoded as a JSON string.
    Text,
}

impl ScalarKind {
    /// Display name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Character => "Character",
            Self::Integer => "Integer",
            Self::Text => "Text",
        }
    }
}

/// How a field is laid out and traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    /// A single scalar value.
    Scalar,
    /// A nested record held by value.
    Object,
    /// Exactly N elements embedded by value.
    FixedArray,
    /// An owned [`VarArray`](crate::VarArray) of runtime length.
    VariableArray,
}

/// The type of the value (or of each element) a field holds.
#[derive(Clone, Copy)]
pub enum ElementType {
    /// A scalar value type.
    Scalar(ScalarKind),
    /// A record type, resolved lazily through its schema accessor.
    Composite(fn() -> &'static Schema),
}

impl ElementType {
    /// Name of the element type: the scalar kind or the record name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.name(),
            Self::Composite(schema) => schema().name,
        }
    }

    /// The record schema of a composite element.
    pub fn schema(&self) -> Option<&'static Schema> {
        match self {
            Self::Scalar(_) => None,
            Self::Composite(schema) => Some(schema()),
        }
    }
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Composite(a), Self::Composite(b)) => std::ptr::eq(a(), b()),
            _ => false,
        }
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "Scalar({kind:?})"),
            Self::Composite(schema) => write!(f, "Composite({})", schema().name),
        }
    }
}

/// Schema metadata for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Layout of the field.
    pub kind: FieldKind,
    /// Type of the value or of each element.
    pub element: ElementType,
    /// Element count for fixed arrays, `None` otherwise.
    pub cardinality: Option<usize>,
}

impl FieldDescriptor {
    /// Descriptor of a scalar field.
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self {
            kind: FieldKind::Scalar,
            element: ElementType::Scalar(kind),
            cardinality: None,
        }
    }

    /// Descriptor of a nested record field.
    pub const fn object(schema: fn() -> &'static Schema) -> Self {
        Self {
            kind: FieldKind::Object,
            element: ElementType::Composite(schema),
            cardinality: None,
        }
    }

    /// Descriptor of a fixed array of `len` elements.
    pub const fn fixed_array(element: ElementType, len: usize) -> Self {
        Self {
            kind: FieldKind::FixedArray,
            element,
            cardinality: Some(len),
        }
    }

    /// Descriptor of a variable-length array.
    pub const fn variable_array(element: ElementType) -> Self {
        Self {
            kind: FieldKind::VariableArray,
            element,
            cardinality: None,
        }
    }

    /// True for kinds that own dynamically-sized content themselves.
    pub fn is_owned(&self) -> bool {
        match self.kind {
            FieldKind::VariableArray => true,
            FieldKind::Scalar => matches!(self.element, ElementType::Scalar(ScalarKind::Text)),
            FieldKind::Object | FieldKind::FixedArray => false,
        }
    }
}

/// A named field of a record.
#[derive(Debug)]
pub struct FieldInfo {
    /// Field name, also the document key.
    pub name: &'static str,
    /// Field layout.
    pub descriptor: FieldDescriptor,
}

/// The ordered field list of a record type.
#[derive(Debug)]
pub struct Schema {
    /// Record type name.
    pub name: &'static str,
    /// Fields in declaration order, which is also traversal order.
    pub fields: &'static [FieldInfo],
}

impl Schema {
    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true for a record without fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'static, FieldInfo> {
        self.fields.iter()
    }
}
