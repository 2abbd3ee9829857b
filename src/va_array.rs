//! The owned container behind variable-length array fields.

use crate::hooks::{Hooks, elements_bytes};
use std::fmt;

/// A uniquely-owned, variable-length sequence of `T`.
///
/// The container is either absent (`elements()` is `None`, `size()` is 0) or holds
/// a non-empty buffer. An empty buffer is never stored, so `elements == None`
/// exactly when `size == 0`.
///
/// One generic container serves every element type, so any number of fields may
/// share an element type without conflicting definitions.
///
/// As with [`Text`](crate::Text), only buffers charged to the allocation hooks are
/// reported to the deallocate hook when recycled.
pub struct VarArray<T> {
    elements: Option<Vec<T>>,
    charged: bool,
}

impl<T> VarArray<T> {
    /// An absent container.
    pub const fn new() -> Self {
        Self {
            elements: None,
            charged: false,
        }
    }

    /// Takes ownership of `items`. An empty vector yields an absent container.
    ///
    /// The buffer is not charged to any allocation hook; use
    /// [`JsonWrap::va_array`](crate::JsonWrap::va_array) for accounted construction.
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut array = Self::new();
        array.install(items, false);
        array
    }

    /// The element buffer, `None` when absent.
    pub fn elements(&self) -> Option<&[T]> {
        self.elements.as_deref()
    }

    /// Mutable access to the element buffer, `None` when absent.
    pub fn elements_mut(&mut self) -> Option<&mut [T]> {
        self.elements.as_deref_mut()
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.elements.as_ref().map_or(0, Vec::len)
    }

    /// Returns true when the container is absent.
    pub fn is_empty(&self) -> bool {
        self.elements.is_none()
    }

    /// The elements as a slice, empty when absent.
    pub fn as_slice(&self) -> &[T] {
        self.elements.as_deref().unwrap_or(&[])
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns the element at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elements.as_mut().and_then(|items| items.get_mut(index))
    }

    /// Detaches the buffer and leaves the container absent.
    pub(crate) fn take(&mut self) -> Option<Detached<T>> {
        let charged = std::mem::take(&mut self.charged);
        self.elements.take().map(|items| Detached { items, charged })
    }

    /// Stores `items` as the buffer, normalizing an empty vector to absent.
    /// `charged` records whether the buffer was obtained through the hooks.
    pub(crate) fn install(&mut self, items: Vec<T>, charged: bool) {
        if items.is_empty() {
            self.elements = None;
            self.charged = false;
        } else {
            self.elements = Some(items);
            self.charged = charged;
        }
    }
}

/// A buffer taken out of a [`VarArray`], still to be released.
pub(crate) struct Detached<T> {
    pub(crate) items: Vec<T>,
    charged: bool,
}

impl<T> Detached<T> {
    /// Reports the buffer as released if it was charged to the hooks.
    pub(crate) fn release(self, hooks: &Hooks) {
        if self.charged {
            hooks.release(elements_bytes::<T>(self.items.len()));
        }
    }
}

impl<T> Default for VarArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for VarArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VarArray")
            .field("size", &self.size())
            .field("elements", &self.elements)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for VarArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T> From<Vec<T>> for VarArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<'a, T> IntoIterator for &'a VarArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
