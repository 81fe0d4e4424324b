// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout engine: field offsets, size, alignment, stride.

use crate::descriptor::{AllocationModel, FieldSpec, TypeDescriptor, TypeKind, TypeRef};
use crate::error::LayoutError;
use crate::graph::TypeGraph;
use crate::heap::{HeapLayout, HANDLE_ALIGN, HANDLE_SIZE};
use std::collections::HashMap;

/// Round `value` up to the next multiple of `alignment` (a power of two).
pub(crate) fn align_up(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) & !(alignment - 1)
}

/// Computed layout of one type.
///
/// A plain value: it holds no reference back to the descriptor it was
/// computed from, and two structurally identical descriptors always yield
/// equal results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    size: usize,
    alignment: usize,
    stride: usize,
    field_offsets: HashMap<String, usize>,
    heap: Option<HeapLayout>,
}

impl LayoutResult {
    /// Bytes occupied by the value's own data, excluding trailing padding.
    ///
    /// For a reference-allocated composite this is the payload's inline
    /// size; see [`Self::heap_instance_size`] for the full heap footprint.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Required alignment: the maximum field alignment, or 1 with no fields.
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Distance between consecutive elements in a sequence of this type.
    /// Always a multiple of [`Self::alignment`] and `>= size`.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of a field from the start of the composite's own data.
    ///
    /// For a reference-allocated composite, offsets are within the payload
    /// area, after the metadata header.
    pub fn offset_of(&self, field: &str) -> Result<usize, LayoutError> {
        self.field_offsets
            .get(field)
            .copied()
            .ok_or_else(|| LayoutError::UnknownField(field.to_string()))
    }

    /// `(size, alignment)` this type contributes as a field of another
    /// composite: its own size and alignment when inline, a fixed handle
    /// when reference-allocated.
    pub fn field_contribution(&self) -> (usize, usize) {
        if self.heap.is_some() {
            (HANDLE_SIZE, HANDLE_ALIGN)
        } else {
            (self.size, self.alignment)
        }
    }

    /// Whether this layout describes a reference-allocated composite.
    pub fn is_reference(&self) -> bool {
        self.heap.is_some()
    }

    /// Full heap footprint (header + padded payload) for a
    /// reference-allocated composite, `None` otherwise.
    pub fn heap_instance_size(&self) -> Option<usize> {
        self.heap.map(|h| h.instance_size)
    }

    /// Heap allocation alignment for a reference-allocated composite,
    /// `None` otherwise.
    pub fn heap_alignment(&self) -> Option<usize> {
        self.heap.map(|h| h.alignment)
    }

    /// Heap-side facts, when reference-allocated.
    pub fn heap(&self) -> Option<HeapLayout> {
        self.heap
    }
}

/// Compute the layout of `descriptor` against `graph`.
///
/// `path` holds the names of the inline composites currently being expanded;
/// it is pushed on entry and popped on exit, so shared substructure in
/// sibling positions is not mistaken for a cycle.
pub(crate) fn compute(
    graph: &TypeGraph,
    descriptor: &TypeDescriptor,
    path: &mut Vec<String>,
) -> Result<LayoutResult, LayoutError> {
    match &descriptor.kind {
        TypeKind::Primitive(kind) => {
            let info = graph.primitives().lookup(kind)?;
            Ok(LayoutResult {
                size: info.size,
                alignment: info.alignment,
                stride: align_up(info.size, info.alignment),
                field_offsets: HashMap::new(),
                heap: None,
            })
        }
        TypeKind::Composite { fields, allocation } => {
            if path.iter().any(|name| *name == descriptor.name) {
                let mut cycle = path.clone();
                cycle.push(descriptor.name.clone());
                return Err(LayoutError::CyclicInlineComposite(cycle));
            }
            path.push(descriptor.name.clone());
            let inner = compute_inline(graph, fields, path);
            path.pop();
            let mut result = inner?;
            if *allocation == AllocationModel::Reference {
                result.heap = Some(HeapLayout::over(&result));
            }
            log::debug!(
                "layout of {}: size {} align {} stride {}",
                descriptor.name,
                result.size,
                result.alignment,
                result.stride
            );
            Ok(result)
        }
    }
}

/// The offset/size/alignment/stride algorithm for an ordered field list.
fn compute_inline(
    graph: &TypeGraph,
    fields: &[FieldSpec],
    path: &mut Vec<String>,
) -> Result<LayoutResult, LayoutError> {
    let mut cursor = 0usize;
    let mut max_align = 1usize;
    let mut field_offsets = HashMap::with_capacity(fields.len());
    for field in fields {
        let (size, alignment) = field_contribution(graph, &field.type_ref, path)?;
        let offset = align_up(cursor, alignment);
        log::trace!(
            "  field {} at {} (size {}, align {})",
            field.name,
            offset,
            size,
            alignment
        );
        field_offsets.insert(field.name.clone(), offset);
        cursor = offset + size;
        max_align = max_align.max(alignment);
    }
    // No padding after the last field; only the stride rounds up. A
    // zero-field composite lays out as size 0, alignment 1, stride 0.
    let size = cursor;
    let alignment = max_align;
    Ok(LayoutResult {
        size,
        alignment,
        stride: align_up(size, alignment),
        field_offsets,
        heap: None,
    })
}

/// Resolve what one field adds to its containing composite.
///
/// A reference-allocated composite terminates the cycle check here: it
/// contributes a fixed handle instead of expanding its referent inline.
fn field_contribution(
    graph: &TypeGraph,
    type_ref: &TypeRef,
    path: &mut Vec<String>,
) -> Result<(usize, usize), LayoutError> {
    match type_ref {
        TypeRef::Primitive(kind) => {
            let info = graph.primitives().lookup(kind)?;
            Ok((info.size, info.alignment))
        }
        TypeRef::Composite(name) => {
            let descriptor = graph
                .get(name)
                .ok_or_else(|| LayoutError::UnknownFieldType(name.clone()))?;
            if descriptor.allocation() == Some(AllocationModel::Reference) {
                return Ok((HANDLE_SIZE, HANDLE_ALIGN));
            }
            let inner = compute(graph, &descriptor, path)?;
            Ok(inner.field_contribution())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_powers_of_two() {
        assert_eq!(align_up(0, 1), 0);
        assert_eq!(align_up(5, 1), 5);
        assert_eq!(align_up(5, 4), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(17, 8), 24);
        assert_eq!(align_up(0, 8), 0);
    }
}
