// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # typelayout - layout computation for runtime-described composite types
//!
//! Given an ordered list of typed fields and an allocation model (inline
//! value vs. heap-indirected reference), computes the byte offset of every
//! field plus the aggregate's total size, required alignment, and stride
//! (the spacing between consecutive elements in a sequence).
//!
//! The engine is a pure function of the type graph: no I/O, no retained
//! state across calls, safe to invoke from multiple threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use typelayout::{AllocationModel, FieldSpec, LayoutError, TypeGraph, TypeRef};
//!
//! fn main() -> Result<(), LayoutError> {
//!     let graph = TypeGraph::with_builtins();
//!
//!     graph.define_composite(
//!         "Resume",
//!         vec![
//!             FieldSpec::new("id", TypeRef::primitive("string")),
//!             FieldSpec::new("age", TypeRef::primitive("i64")),
//!             FieldSpec::new("has_vehicle", TypeRef::primitive("bool")),
//!         ],
//!         AllocationModel::Inline,
//!     )?;
//!
//!     let layout = graph.layout_of("Resume")?;
//!     assert_eq!(layout.size(), 25);
//!     assert_eq!(layout.alignment(), 8);
//!     assert_eq!(layout.stride(), 32);
//!     assert_eq!(layout.offset_of("age")?, 16);
//!
//!     Ok(())
//! }
//! ```
//!
//! Reference-allocated composites embed as a pointer-sized handle and carry
//! a fixed metadata header (dynamic-type descriptor plus reference count) on
//! the heap; [`LayoutResult::heap_instance_size`] exposes the full footprint
//! while [`LayoutResult::field_contribution`] stays at one word.

mod descriptor;
mod error;
mod graph;
mod heap;
mod layout;
mod primitive;

pub use descriptor::{
    AllocationModel, CompositeBuilder, FieldSpec, TypeDescriptor, TypeKind, TypeRef,
};
pub use error::LayoutError;
pub use graph::TypeGraph;
pub use heap::{HeapLayout, HANDLE_ALIGN, HANDLE_SIZE, HEAP_HEADER_ALIGN, HEAP_HEADER_SIZE};
pub use layout::LayoutResult;
pub use primitive::{PrimitiveInfo, PrimitiveRegistry};

/// Pointer width of the modeled 64-bit target, in bytes.
pub const WORD_SIZE: usize = 8;
