//! Deep-copy and recycle rules for the owned field kinds.
//!
//! These mirror the allocations made by decoding: whatever decode can allocate,
//! copy allocates the same way and recycle releases the same way.

use crate::api::JsonWrap;
use crate::error::Result;
use crate::field::Field;
use crate::text::Text;
use crate::va_array::VarArray;

/// Copies a Text. An absent source leaves the destination absent.
pub(crate) fn copy_text(src: &Text, dst: &mut Text, cx: &JsonWrap) -> Result<()> {
    match src.as_str() {
        Some(content) => dst.assign(content, cx.hooks()),
        None => {
            dst.release(cx.hooks());
            Ok(())
        }
    }
}

pub(crate) fn copy_fixed<T: Field>(src: &[T], dst: &mut [T], cx: &JsonWrap) -> Result<()> {
    for (from, to) in src.iter().zip(dst.iter_mut()) {
        from.copy_to(to, cx)?;
    }
    Ok(())
}

/// Copies a variable array into a freshly allocated destination buffer.
///
/// The destination's previous content is recycled and released first, so its
/// prior size does not matter.
pub(crate) fn copy_variable<T: Field>(
    src: &VarArray<T>,
    dst: &mut VarArray<T>,
    cx: &JsonWrap,
) -> Result<()> {
    recycle_variable(dst, cx);
    let Some(items) = src.elements() else {
        return Ok(());
    };

    let mut buffer = cx.hooks().alloc_elements(items.len(), T::zeroed)?;
    let outcome = items
        .iter()
        .zip(buffer.iter_mut())
        .try_for_each(|(from, to)| from.copy_to(to, cx));
    dst.install(buffer, true);
    outcome
}

pub(crate) fn recycle_fixed<T: Field>(slots: &mut [T], cx: &JsonWrap) {
    for slot in slots {
        slot.recycle(cx);
    }
}

/// Recycles every element, releases the buffer and leaves the container absent.
pub(crate) fn recycle_variable<T: Field>(array: &mut VarArray<T>, cx: &JsonWrap) {
    if let Some(mut detached) = array.take() {
        recycle_fixed(&mut detached.items, cx);
        detached.release(cx.hooks());
    }
}
