//! `Field` implementations for the built-in field types.
//!
//! Records get theirs from `#[derive(Record)]`; everything a record field can be
//! made of is covered here: the scalar value types, `Text`, fixed arrays and
//! `VarArray`.

use crate::Document;
use crate::api::{JsonWrap, NullText};
use crate::codec;
use crate::error::Result;
use crate::field::{Element, Field};
use crate::lifecycle;
use crate::schema::{ElementType, FieldDescriptor, ScalarKind};
use crate::text::Text;
use crate::va_array::VarArray;
use serde_json::Value;

/// Implements `Field` and `Element` for a plain value scalar.
macro_rules! impl_value_scalar {
    ($t:ty, $kind:expr, $zero:expr, $encode:expr, $decode:path) => {
        impl Field for $t {
            const DESCRIPTOR: FieldDescriptor = FieldDescriptor::scalar($kind);

            fn zeroed() -> Self {
                $zero
            }

            fn encode(&self, _cx: &JsonWrap) -> Document {
                let encode: fn($t) -> Document = $encode;
                encode(*self)
            }

            fn decode(&mut self, node: &Document, cx: &JsonWrap) -> Result<()> {
                *self = $decode(node, cx)?;
                Ok(())
            }

            fn copy_to(&self, dst: &mut Self, _cx: &JsonWrap) -> Result<()> {
                *dst = *self;
                Ok(())
            }

            fn recycle(&mut self, _cx: &JsonWrap) {}
        }

        impl Element for $t {
            const ELEMENT: ElementType = ElementType::Scalar($kind);
        }
    };
}

impl_value_scalar!(bool, ScalarKind::Boolean, false, Value::Bool, codec::decode_bool);
impl_value_scalar!(
    char,
    ScalarKind::Character,
    '\0',
    |c| Value::from(u32::from(c)),
    codec::decode_char
);
impl_value_scalar!(i32, ScalarKind::Integer, 0, Value::from, codec::decode_int);

impl Field for Text {
    const DESCRIPTOR: FieldDescriptor = FieldDescriptor::scalar(ScalarKind::Text);

    fn zeroed() -> Self {
        Text::null()
    }

    fn encode(&self, cx: &JsonWrap) -> Document {
        codec::encode_text(self, cx)
    }

    fn omit(&self, cx: &JsonWrap) -> bool {
        self.is_null() && cx.options().null_text == NullText::Omit
    }

    fn decode(&mut self, node: &Document, cx: &JsonWrap) -> Result<()> {
        codec::decode_text(self, node, cx)
    }

    fn copy_to(&self, dst: &mut Self, cx: &JsonWrap) -> Result<()> {
        lifecycle::copy_text(self, dst, cx)
    }

    fn recycle(&mut self, cx: &JsonWrap) {
        self.release(cx.hooks());
    }
}

impl Element for Text {
    const ELEMENT: ElementType = ElementType::Scalar(ScalarKind::Text);
}

impl<T: Element, const N: usize> Field for [T; N] {
    const DESCRIPTOR: FieldDescriptor = FieldDescriptor::fixed_array(T::ELEMENT, N);

    fn zeroed() -> Self {
        std::array::from_fn(|_| T::zeroed())
    }

    fn encode(&self, cx: &JsonWrap) -> Document {
        codec::encode_elements(self.iter(), cx)
    }

    fn decode(&mut self, node: &Document, cx: &JsonWrap) -> Result<()> {
        codec::decode_fixed(self, node, cx)
    }

    fn copy_to(&self, dst: &mut Self, cx: &JsonWrap) -> Result<()> {
        lifecycle::copy_fixed(self, dst, cx)
    }

    fn recycle(&mut self, cx: &JsonWrap) {
        lifecycle::recycle_fixed(self, cx);
    }
}

impl<T: Element> Field for VarArray<T> {
    const DESCRIPTOR: FieldDescriptor = FieldDescriptor::variable_array(T::ELEMENT);

    fn zeroed() -> Self {
        VarArray::new()
    }

    fn encode(&self, cx: &JsonWrap) -> Document {
        codec::encode_elements(self.iter(), cx)
    }

    fn decode(&mut self, node: &Document, cx: &JsonWrap) -> Result<()> {
        codec::decode_variable(self, node, cx)
    }

    fn copy_to(&self, dst: &mut Self, cx: &JsonWrap) -> Result<()> {
        lifecycle::copy_variable(self, dst, cx)
    }

    fn recycle(&mut self, cx: &JsonWrap) {
        lifecycle::recycle_variable(self, cx);
    }
}
