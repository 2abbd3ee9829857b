//! # jsonwrap
//!
//! Describe a record once and get four consistent operations for it: encode to a
//! JSON document, decode from one, deep-copy into another record and recycle its
//! owned content.
//!
//! ## Overview
//!
//! Hand-writing a serializer, a parser, a copy routine and a release routine for
//! every data type means four functions that must walk the same fields in the same
//! way and agree on who owns which buffer. jsonwrap derives all four from the
//! struct definition itself, so they cannot drift apart.
//!
//! ### Field Kinds
//!
//! | Kind | Rust type | Document |
//! |---|---|---|
//! | Scalar | `bool`, `char`, `i32`, [`Text`] | bool, number, number, string |
//! | Object | any `Record` | object |
//! | Fixed array | `[T; N]` | array of N |
//! | Variable array | [`VarArray<T>`] | array |
//!
//! `Text` and `VarArray` are the owned kinds: either absent or holding a buffer the
//! record owns exclusively. A zero-initialized record has every owned field absent.
//!
//! ### Ownership Rules
//!
//! * **Decode** allocates into owned fields and releases whatever they held before.
//!   Keys missing from the document leave their fields untouched.
//! * **Copy** replaces every owned field of the destination with a fresh copy.
//! * **Recycle** releases every owned field and leaves it absent. Recycling twice is
//!   harmless.
//!
//! Every buffer the engine allocates (decode, copy, [`JsonWrap::text`],
//! [`JsonWrap::va_array`]) is charged to the [`Hooks`] of the context, and only
//! those buffers are reported back when released. Content built directly with
//! `Text::from` or `VarArray::from` bypasses the hooks in both directions.
//!
//! ## Usage
//!
//! ```rust
//! use jsonwrap::{JsonWrap, Text, record};
//!
//! record! {
//!     pub struct Son {
//!         pub name: obj(Text),
//!         pub age: obj(i32),
//!         pub birthday: obj(Text),
//!         pub sex: obj(char),
//!     }
//! }
//!
//! record! {
//!     pub struct Person {
//!         pub name: obj(Text),
//!         pub age: obj(i32),
//!         pub son: obj(Son),
//!         pub sons: array(Son, 2),
//!         pub v_sons: va_array(Son),
//!     }
//! }
//!
//! let cx = JsonWrap::default();
//! let mut person = Person::default();
//! person.name = cx.text("Alice")?;
//! person.age = 9;
//!
//! let json = cx.to_json(&person)?;
//!
//! let mut decoded = Person::default();
//! cx.from_json(&json, &mut decoded)?;
//! assert_eq!(decoded.name.as_str(), Some("Alice"));
//! assert!(decoded.v_sons.elements().is_none());
//!
//! let mut copy = Person::default();
//! cx.copy(&decoded, &mut copy)?;
//!
//! cx.recycle(&mut person);
//! cx.recycle(&mut decoded);
//! cx.recycle(&mut copy);
//! # Ok::<(), jsonwrap::WrapError>(())
//! ```
//!
//! Structs written by hand can use `#[derive(Record)]` directly, as long as every
//! field type implements [`Field`].
//!
//! ## Safety and Error Handling
//!
//! * No `unsafe`, no `unwrap()`, no `panic!()` in the library.
//! * Every failure is a [`WrapError`]; see the [`error`] module.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod api;
pub mod error;
pub mod field;
pub mod hooks;
pub mod inspector;
pub mod schema;
pub mod text;
pub mod va_array;

// --- INTERNAL IMPLEMENTATION MODULES ---
mod codec;
mod field_impls;
mod lifecycle;
mod synth;

// --- MACRO SUPPORT MODULES ---

/// Runtime utilities used by the derived code.
#[doc(hidden)]
pub mod rt;

/// The document tree records are encoded to and decoded from.
pub type Document = serde_json::Value;

// --- RE-EXPORTS ---

pub use api::{JsonWrap, JsonWrapBuilder, NullText, WrapOptions};
pub use error::{Result, WrapError};
pub use field::{Element, Field, Record};
pub use hooks::{AllocFn, FreeFn, Hooks};
pub use inspector::{FieldReport, SchemaInspector, SchemaReport};
pub use text::Text;
pub use va_array::VarArray;

// Re-export the derive macro so it is accessible as `jsonwrap::Record`
pub use jsonwrap_derive::Record;
