//! The owned, nullable string used for Text fields.

use crate::error::Result;
use crate::hooks::{Hooks, text_bytes};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An owned, nullable heap string.
///
/// A `Text` is either absent (null) or holds content that contains no NUL
/// character. Content handed to a `Text` is cut at its first NUL, the same way a
/// C string would end there.
///
/// `Text::default()` is absent.
///
/// Only buffers obtained through the allocation hooks are reported to the
/// deallocate hook when released. A Text built with [`Text::new`] or `From` is
/// dropped silently.
#[derive(Default)]
pub struct Text {
    content: Option<String>,
    charged: bool,
}

impl Text {
    /// An absent Text.
    pub const fn null() -> Self {
        Self {
            content: None,
            charged: false,
        }
    }

    /// Creates a present Text from `content`, truncated at the first NUL.
    ///
    /// The buffer is not charged to any allocation hook; use
    /// [`JsonWrap::text`](crate::JsonWrap::text) for accounted construction.
    pub fn new(content: &str) -> Self {
        Self::unaccounted(until_nul(content).to_string())
    }

    /// Returns true when the Text is absent.
    pub fn is_null(&self) -> bool {
        self.content.is_none()
    }

    /// Borrows the content, `None` when absent.
    pub fn as_str(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Length of the content in bytes, 0 when absent.
    pub fn len(&self) -> usize {
        self.content.as_ref().map_or(0, String::len)
    }

    /// Returns true when the Text is absent or holds no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the content with an accounted copy of `content`, releasing the
    /// previous buffer first.
    pub(crate) fn assign(&mut self, content: &str, hooks: &Hooks) -> Result<()> {
        self.release(hooks);
        self.content = Some(hooks.alloc_text(until_nul(content))?);
        self.charged = true;
        Ok(())
    }

    /// Releases the buffer, if any, and leaves the Text absent.
    pub(crate) fn release(&mut self, hooks: &Hooks) {
        let charged = std::mem::take(&mut self.charged);
        if let (Some(buffer), true) = (self.content.take(), charged) {
            hooks.release(text_bytes(&buffer));
        }
    }

    fn unaccounted(content: String) -> Self {
        Self {
            content: Some(content),
            charged: false,
        }
    }
}

fn until_nul(content: &str) -> &str {
    match content.find('\0') {
        Some(end) => &content[..end],
        None => content,
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Some(s) => fmt::Debug::fmt(s, f),
            None => f.write_str("null"),
        }
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        if content.contains('\0') {
            Self::new(&content)
        } else {
            Self::unaccounted(content)
        }
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content.hash(state);
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}
