//! Runtime utilities for code generated by `#[derive(Record)]`.
//! Do not use directly.

use crate::Document;
use crate::api::JsonWrap;
use crate::error::{Result, WrapError, node_kind};
use crate::field::Field;

/// The map type behind a record's document object.
pub type Object = serde_json::Map<String, Document>;

/// Writes one field under its key, unless the field asks to be omitted.
pub fn encode_field<F: Field>(map: &mut Object, key: &str, field: &F, cx: &JsonWrap) {
    if !field.omit(cx) {
        map.insert(key.to_string(), field.encode(cx));
    }
}

/// Decodes one field from its key. A missing key leaves the field untouched.
pub fn decode_field<F: Field>(map: &Object, key: &str, field: &mut F, cx: &JsonWrap) -> Result<()> {
    match map.get(key) {
        Some(node) => field.decode(node, cx).map_err(|e| e.at_field(key)),
        None => Ok(()),
    }
}

/// Returns the map of an object node, or `None` when a lenient decode skips it.
pub fn expect_object<'n>(node: &'n Document, record: &str, cx: &JsonWrap) -> Result<Option<&'n Object>> {
    match node {
        Document::Object(map) => Ok(Some(map)),
        other if cx.options().strict => Err(WrapError::mismatch("object", other)),
        other => {
            log::debug!("[jsonwrap] {record} ignores {} node", node_kind(other));
            Ok(None)
        }
    }
}
