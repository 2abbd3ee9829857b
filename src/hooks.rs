//! Pluggable allocation hooks for owned record content.
//!
//! Every dynamically-sized buffer the engine creates on behalf of a record (Text
//! content and `VarArray` element buffers) is first requested from the allocate hook,
//! and every such buffer the engine gives back (recycle, or replacement during decode
//! and copy) is reported to the deallocate hook. With no hook installed the platform
//! allocator is used directly.
//!
//! The hooks live in a [`Hooks`] value owned by a [`JsonWrap`](crate::JsonWrap)
//! context, not in process-wide state. Installing a hook needs `&mut` access to the
//! context, so hooks cannot change underneath a shared context that is in use.
//! Hook bodies must be thread-safe if the context is shared across threads.
//!
//! Byte accounting is symmetric: a Text of `n` bytes is charged and released as
//! `n + 1` bytes, a `VarArray<T>` of `len` elements as `size_of::<T>() * len`.

use crate::error::{Result, WrapError};
use std::fmt;
use std::sync::Arc;

/// Allocate hook. Receives the byte size of the buffer about to be created and
/// returns whether the request is granted.
pub type AllocFn = Arc<dyn Fn(usize) -> bool + Send + Sync>;

/// Deallocate hook. Receives the byte size of a buffer the engine released.
pub type FreeFn = Arc<dyn Fn(usize) + Send + Sync>;

/// The pair of allocation hooks consulted for owned content.
#[derive(Clone, Default)]
pub struct Hooks {
    alloc: Option<AllocFn>,
    free: Option<FreeFn>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |custom: bool| if custom { "custom" } else { "system" };
        f.debug_struct("Hooks")
            .field("alloc", &name(self.alloc.is_some()))
            .field("free", &name(self.free.is_some()))
            .finish()
    }
}

impl Hooks {
    /// Creates hooks that use the platform allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the allocate hook. `None` restores the platform default.
    pub fn set_allocator(&mut self, hook: Option<AllocFn>) {
        self.alloc = hook;
    }

    /// Installs the deallocate hook. `None` restores the platform default.
    pub fn set_deallocator(&mut self, hook: Option<FreeFn>) {
        self.free = hook;
    }

    /// Returns true when neither hook is overridden.
    pub fn is_default(&self) -> bool {
        self.alloc.is_none() && self.free.is_none()
    }

    /// Asks the allocate hook for `bytes`.
    ///
    /// The platform default always grants; the real reservation happens right after
    /// and can still fail.
    pub fn allocate(&self, bytes: usize) -> Result<()> {
        let granted = self.alloc.as_ref().is_none_or(|hook| hook(bytes));
        if granted {
            Ok(())
        } else {
            log::warn!("[jsonwrap] allocate hook refused {bytes} bytes");
            Err(WrapError::Alloc { requested: bytes })
        }
    }

    /// Reports `bytes` of owned content as released.
    pub fn release(&self, bytes: usize) {
        if let Some(hook) = &self.free {
            hook(bytes);
        }
    }

    /// Allocates an owned copy of `content` for a Text field.
    pub(crate) fn alloc_text(&self, content: &str) -> Result<String> {
        let bytes = text_bytes(content);
        self.allocate(bytes)?;
        let mut buffer = String::new();
        buffer.try_reserve_exact(content.len()).map_err(|_| {
            log::warn!("[jsonwrap] text reservation of {bytes} bytes failed");
            WrapError::Alloc { requested: bytes }
        })?;
        buffer.push_str(content);
        Ok(buffer)
    }

    /// Allocates a buffer of `len` elements produced by `fill`.
    pub(crate) fn alloc_elements<T>(&self, len: usize, fill: impl FnMut() -> T) -> Result<Vec<T>> {
        let bytes = elements_bytes::<T>(len);
        self.allocate(bytes)?;
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(len).map_err(|_| {
            log::warn!("[jsonwrap] element buffer reservation of {bytes} bytes failed");
            WrapError::Alloc { requested: bytes }
        })?;
        buffer.extend(std::iter::repeat_with(fill).take(len));
        Ok(buffer)
    }
}

/// Bytes charged for a Text buffer holding `content`.
pub(crate) fn text_bytes(content: &str) -> usize {
    content.len().saturating_add(1)
}

/// Bytes charged for an element buffer of `len` values of `T`.
pub(crate) fn elements_bytes<T>(len: usize) -> usize {
    std::mem::size_of::<T>().saturating_mul(len)
}
