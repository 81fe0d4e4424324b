// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heap-indirected aggregates: metadata header and handle facts.
//!
//! A reference-allocated composite lives on the heap behind a fixed
//! bookkeeping header and is embedded elsewhere as a pointer-sized handle.
//! Both facts are modeled as explicit constants rather than queried from a
//! live runtime, so the model stays portable.

use crate::layout::LayoutResult;
use crate::WORD_SIZE;

/// Metadata header prepended to every heap instance: a dynamic-type
/// descriptor slot plus a reference-count slot, each pointer-sized.
pub const HEAP_HEADER_SIZE: usize = 2 * WORD_SIZE;
pub const HEAP_HEADER_ALIGN: usize = WORD_SIZE;

/// What a reference-allocated composite contributes when embedded as a
/// field of another composite: a handle, never its full heap footprint.
pub const HANDLE_SIZE: usize = WORD_SIZE;
pub const HANDLE_ALIGN: usize = WORD_SIZE;

/// Heap-side facts for a reference-allocated composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapLayout {
    /// Header plus the payload's padded stride.
    pub instance_size: usize,
    /// Fixed at word alignment; a heap allocator satisfies word alignment
    /// for every allocation regardless of payload.
    pub alignment: usize,
}

impl HeapLayout {
    /// Decorate an inline payload layout with the metadata header.
    ///
    /// Uses the payload's stride rather than its raw size, so a contiguous
    /// allocation of several instances stays self-aligned without extra
    /// bookkeeping.
    pub(crate) fn over(inner: &LayoutResult) -> Self {
        Self {
            instance_size: HEAP_HEADER_SIZE + inner.stride(),
            alignment: HEAP_HEADER_ALIGN,
        }
    }
}
