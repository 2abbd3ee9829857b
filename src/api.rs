//! The public entry point: a configured context and the per-record operations.

use crate::Document;
use crate::error::{Result, WrapError};
use crate::field::Record;
use crate::hooks::{AllocFn, FreeFn, Hooks, elements_bytes};
use crate::text::Text;
use crate::va_array::VarArray;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// How an absent Text field is written by encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullText {
    /// Write the key with a JSON `null`. Decodes back to absent.
    #[default]
    Null,
    /// Leave the key out. Decoding leaves the field untouched.
    Omit,
    /// Write an empty string. Decodes back to a present, empty Text.
    Empty,
}

/// Encoding and decoding options of a [`JsonWrap`] context.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapOptions {
    /// Encoding of absent Text fields.
    pub null_text: NullText,
    /// Reject mistyped nodes instead of converting or skipping them.
    pub strict: bool,
    /// Pretty-print text output.
    pub pretty: bool,
}

/// The context every record operation runs in.
///
/// A `JsonWrap` bundles the [`WrapOptions`] and the allocation [`Hooks`]. It is
/// cheap to clone and can be shared between threads; hooks can only be changed
/// through `&mut self`, never while the context is borrowed by an operation.
///
/// ```rust
/// use jsonwrap::{JsonWrap, Text, record};
///
/// record! {
///     pub struct Point { x: obj(i32), y: obj(i32), label: obj(Text) }
/// }
///
/// let cx = JsonWrap::default();
/// let mut p = Point::default();
/// p.x = 3;
/// p.label = cx.text("origin")?;
///
/// let json = cx.to_json(&p)?;
/// assert_eq!(json, r#"{"x":3,"y":0,"label":"origin"}"#);
///
/// let mut q = Point::default();
/// cx.from_json(&json, &mut q)?;
/// assert_eq!(p, q);
///
/// cx.recycle(&mut p);
/// cx.recycle(&mut q);
/// # Ok::<(), jsonwrap::WrapError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonWrap {
    options: WrapOptions,
    hooks: Hooks,
}

impl JsonWrap {
    /// A context with default options and the platform allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts configuring a context.
    pub fn builder() -> JsonWrapBuilder {
        JsonWrapBuilder::default()
    }

    /// The active options.
    pub fn options(&self) -> &WrapOptions {
        &self.options
    }

    /// The active allocation hooks.
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Installs the allocate hook; `None` restores the platform default.
    pub fn set_allocator(&mut self, hook: Option<AllocFn>) {
        self.hooks.set_allocator(hook);
    }

    /// Installs the deallocate hook; `None` restores the platform default.
    pub fn set_deallocator(&mut self, hook: Option<FreeFn>) {
        self.hooks.set_deallocator(hook);
    }

    /// Creates a Text whose buffer is charged to the allocate hook.
    pub fn text(&self, content: &str) -> Result<Text> {
        let mut text = Text::null();
        text.assign(content, &self.hooks)?;
        Ok(text)
    }

    /// Creates a `VarArray` whose buffer is charged to the allocate hook.
    pub fn va_array<T>(&self, items: Vec<T>) -> Result<VarArray<T>> {
        let charged = !items.is_empty();
        if charged {
            self.hooks.allocate(elements_bytes::<T>(items.len()))?;
        }
        let mut array = VarArray::new();
        array.install(items, charged);
        Ok(array)
    }

    // --- Codec ---

    /// Encodes `record` as a document.
    pub fn encode<R: Record>(&self, record: &R) -> Document {
        log::trace!("[jsonwrap] encoding {}", R::schema().name);
        record.encode(self)
    }

    /// Encodes `record` as JSON text.
    pub fn to_json<R: Record>(&self, record: &R) -> Result<String> {
        let document = self.encode(record);
        let text = if self.options.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        text.map_err(|e| WrapError::Serialization(e.to_string()))
    }

    /// Encodes `record` as JSON text into `writer`.
    pub fn to_writer<R: Record, W: Write>(&self, writer: W, record: &R) -> Result<()> {
        let document = self.encode(record);
        let written = if self.options.pretty {
            serde_json::to_writer_pretty(writer, &document)
        } else {
            serde_json::to_writer(writer, &document)
        };
        written.map_err(|e| {
            if e.is_io() {
                WrapError::from(std::io::Error::from(e))
            } else {
                WrapError::Serialization(e.to_string())
            }
        })
    }

    /// Decodes `document` into `record`.
    ///
    /// This is a merge: keys missing from the document leave their fields as they
    /// were. Owned content that gets replaced is released through the hooks.
    pub fn decode<R: Record>(&self, document: &Document, record: &mut R) -> Result<()> {
        log::trace!("[jsonwrap] decoding {}", R::schema().name);
        record.decode(document, self)
    }

    /// Parses `text` and decodes it into `record`.
    ///
    /// A parse failure leaves `record` untouched.
    pub fn from_json<R: Record>(&self, text: &str, record: &mut R) -> Result<()> {
        let document: Document =
            serde_json::from_str(text).map_err(|e| WrapError::Parse(e.to_string()))?;
        self.decode(&document, record)
    }

    // --- Lifecycle ---

    /// Deep-copies `src` into `dst`.
    ///
    /// Every owned field of `dst` is replaced by a freshly allocated copy; nothing
    /// is shared with `src` afterwards.
    pub fn copy<R: Record>(&self, src: &R, dst: &mut R) -> Result<()> {
        log::trace!("[jsonwrap] copying {}", R::schema().name);
        src.copy_to(dst, self)
    }

    /// Releases all owned content of `record`, leaving it zero-sized but usable.
    pub fn recycle<R: Record>(&self, record: &mut R) {
        log::trace!("[jsonwrap] recycling {}", R::schema().name);
        record.recycle(self);
    }

    // --- Files ---

    /// Writes `record` as JSON to the file at `path`, replacing it.
    pub fn save<R: Record, P: AsRef<Path>>(&self, path: P, record: &R) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer, record)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads the JSON file at `path` and decodes it into `record`.
    pub fn load<R: Record, P: AsRef<Path>>(&self, path: P, record: &mut R) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.from_json(&text, record)
    }
}

/// Builder for [`JsonWrap`].
#[derive(Debug, Clone, Default)]
pub struct JsonWrapBuilder {
    options: WrapOptions,
    hooks: Hooks,
}

impl JsonWrapBuilder {
    /// Sets how absent Text fields are encoded.
    pub fn null_text(mut self, policy: NullText) -> Self {
        self.options.null_text = policy;
        self
    }

    /// Enables or disables strict decoding.
    pub fn strict(mut self, enable: bool) -> Self {
        self.options.strict = enable;
        self
    }

    /// Enables or disables pretty-printed text output.
    pub fn pretty(mut self, enable: bool) -> Self {
        self.options.pretty = enable;
        self
    }

    /// Installs an allocate hook.
    pub fn allocator<F>(mut self, hook: F) -> Self
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        self.hooks.set_allocator(Some(Arc::new(hook)));
        self
    }

    /// Installs a deallocate hook.
    pub fn deallocator<F>(mut self, hook: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.hooks.set_deallocator(Some(Arc::new(hook)));
        self
    }

    /// Finishes the context.
    pub fn build(self) -> JsonWrap {
        JsonWrap {
            options: self.options,
            hooks: self.hooks,
        }
    }
}
