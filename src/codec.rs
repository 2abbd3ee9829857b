//! Encode and decode rules for each field kind.
//!
//! Lenient decoding (the default) follows the conversions of a classic C JSON
//! tree: numbers are truncated and saturated into `i32`, `true` reads as 1 and
//! every other non-number as 0; Text accepts strings and `null` and ignores
//! anything else; array fields ignore non-array nodes. Strict decoding turns each
//! of those conversions into a [`WrapError::Type`].

use crate::Document;
use crate::api::{JsonWrap, NullText};
use crate::error::{Result, WrapError, node_kind};
use crate::field::Field;
use crate::lifecycle;
use crate::text::Text;
use crate::va_array::VarArray;
use serde_json::Value;

// --- Scalars ---

/// Reads an integer out of `node`.
pub(crate) fn decode_int(node: &Document, cx: &JsonWrap) -> Result<i32> {
    if cx.options().strict {
        return match node {
            Value::Number(n) => strict_int(n),
            other => Err(WrapError::mismatch("number", other)),
        };
    }
    Ok(lenient_int(node))
}

/// Integers and whole-valued floats within `i32` range are accepted.
fn strict_int(n: &serde_json::Number) -> Result<i32> {
    if let Some(v) = n.as_i64() {
        return i32::try_from(v).map_err(|_| WrapError::out_of_range("integer"));
    }
    match n.as_f64() {
        Some(f) if f.fract() != 0.0 => Err(WrapError::Type {
            path: String::new(),
            expected: "integer",
            found: "fractional number",
        }),
        Some(f) if f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) => Ok(f as i32),
        _ => Err(WrapError::out_of_range("integer")),
    }
}

fn lenient_int(node: &Document) -> i32 {
    match node {
        // `as` truncates toward zero and saturates, NaN cannot occur in a Value.
        Value::Number(n) => n.as_f64().map_or(0, |f| f as i32),
        Value::Bool(b) => i32::from(*b),
        _ => 0,
    }
}

pub(crate) fn decode_bool(node: &Document, cx: &JsonWrap) -> Result<bool> {
    match node {
        Value::Bool(b) => Ok(*b),
        other if cx.options().strict => Err(WrapError::mismatch("bool", other)),
        other => Ok(lenient_int(other) != 0),
    }
}

pub(crate) fn decode_char(node: &Document, cx: &JsonWrap) -> Result<char> {
    let code = decode_int(node, cx)?;
    let ch = u32::try_from(code).ok().and_then(char::from_u32);
    match ch {
        Some(c) => Ok(c),
        None if cx.options().strict => Err(WrapError::out_of_range("character code point")),
        None => Ok('\0'),
    }
}

pub(crate) fn encode_text(text: &Text, cx: &JsonWrap) -> Document {
    match text.as_str() {
        Some(s) => Value::String(s.to_string()),
        None => match cx.options().null_text {
            NullText::Empty => Value::String(String::new()),
            NullText::Null | NullText::Omit => Value::Null,
        },
    }
}

pub(crate) fn decode_text(text: &mut Text, node: &Document, cx: &JsonWrap) -> Result<()> {
    match node {
        Value::String(s) => text.assign(s, cx.hooks()),
        Value::Null => {
            text.release(cx.hooks());
            Ok(())
        }
        other if cx.options().strict => Err(WrapError::mismatch("string", other)),
        other => {
            log::debug!("[jsonwrap] text field ignores {} node", node_kind(other));
            Ok(())
        }
    }
}

// --- Arrays ---

/// Encodes a sequence of elements as a document array.
pub(crate) fn encode_elements<'a, T: Field + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    cx: &JsonWrap,
) -> Document {
    Value::Array(items.into_iter().map(|item| item.encode(cx)).collect())
}

/// Returns the items of an array node, or `None` when a lenient decode skips it.
pub(crate) fn expect_array<'n>(node: &'n Document, cx: &JsonWrap) -> Result<Option<&'n [Value]>> {
    match node {
        Value::Array(items) => Ok(Some(items)),
        other if cx.options().strict => Err(WrapError::mismatch("array", other)),
        other => {
            log::debug!("[jsonwrap] array field ignores {} node", node_kind(other));
            Ok(None)
        }
    }
}

/// Decodes into a fixed array, clamped to `min(N, len)` elements.
///
/// Slots past the end of a short input keep their previous value.
pub(crate) fn decode_fixed<T: Field>(slots: &mut [T], node: &Document, cx: &JsonWrap) -> Result<()> {
    let Some(items) = expect_array(node, cx)? else {
        return Ok(());
    };
    if items.len() > slots.len() {
        log::debug!(
            "[jsonwrap] fixed array of {} ignores {} trailing elements",
            slots.len(),
            items.len() - slots.len()
        );
    }
    for (index, (slot, item)) in slots.iter_mut().zip(items).enumerate() {
        slot.decode(item, cx).map_err(|e| e.at_index(index))?;
    }
    Ok(())
}

/// Decodes into a variable array, replacing its previous content.
///
/// The previous buffer is recycled and released first. An empty input leaves the
/// container absent. If an element fails to decode, the new buffer is still
/// installed so the record keeps ownership of everything allocated.
pub(crate) fn decode_variable<T: Field>(
    array: &mut VarArray<T>,
    node: &Document,
    cx: &JsonWrap,
) -> Result<()> {
    let Some(items) = expect_array(node, cx)? else {
        return Ok(());
    };
    lifecycle::recycle_variable(array, cx);
    if items.is_empty() {
        return Ok(());
    }

    let mut buffer = cx.hooks().alloc_elements(items.len(), T::zeroed)?;
    let outcome = buffer
        .iter_mut()
        .zip(items)
        .enumerate()
        .try_for_each(|(index, (slot, item))| slot.decode(item, cx).map_err(|e| e.at_index(index)));
    array.install(buffer, true);
    outcome
}
