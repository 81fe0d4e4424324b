// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named type graph: composite definitions, resolution, memoized layouts.
//!
//! The type universe is an explicit directed graph of [`TypeDescriptor`]
//! nodes keyed by name, not live recursive storage. Fields reference other
//! composites by name, which is what makes self-referential types
//! expressible at all: legal behind a reference-allocated field, a
//! [`LayoutError::CyclicInlineComposite`] when inline.

use crate::descriptor::{AllocationModel, FieldSpec, TypeDescriptor, TypeRef};
use crate::error::LayoutError;
use crate::layout::{self, align_up, LayoutResult};
use crate::primitive::PrimitiveRegistry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Directed graph of named composite types over a primitive registry.
///
/// All methods take `&self` and are safe to call from multiple threads:
/// definitions sit behind a reader-writer lock and the layout cache is a
/// concurrent map. Layout computation itself is a pure function of the
/// graph contents; the cache is an optimization, cleared on every mutation.
#[derive(Debug, Default)]
pub struct TypeGraph {
    primitives: PrimitiveRegistry,
    composites: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
    cache: DashMap<String, LayoutResult>,
}

impl TypeGraph {
    /// Graph over an empty primitive registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph over the built-in primitives of a 64-bit target.
    pub fn with_builtins() -> Self {
        Self {
            primitives: PrimitiveRegistry::with_builtins(),
            composites: RwLock::new(HashMap::new()),
            cache: DashMap::new(),
        }
    }

    /// The underlying primitive registry.
    pub fn primitives(&self) -> &PrimitiveRegistry {
        &self.primitives
    }

    /// Register a primitive fact; see [`PrimitiveRegistry::register`].
    pub fn register_primitive(
        &self,
        kind: &str,
        size: usize,
        alignment: usize,
    ) -> Result<(), LayoutError> {
        self.primitives.register(kind, size, alignment)?;
        self.cache.clear();
        Ok(())
    }

    /// Define a named composite from an ordered field list.
    ///
    /// Builds the descriptor without computing a layout. Field names must be
    /// unique within the composite. Redefining a name with an identical
    /// structure is a no-op returning the stored descriptor; a different
    /// structure fails with [`LayoutError::ConflictingTypeDefinition`] and
    /// leaves the graph unchanged.
    pub fn define_composite(
        &self,
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        allocation: AllocationModel,
    ) -> Result<Arc<TypeDescriptor>, LayoutError> {
        let name = name.into();
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(LayoutError::DuplicateFieldName(field.name.clone()));
            }
        }
        let descriptor = Arc::new(TypeDescriptor::composite(name.clone(), fields, allocation));
        let mut composites = self.composites.write();
        if let Some(existing) = composites.get(&name) {
            if *existing == descriptor {
                return Ok(Arc::clone(existing));
            }
            return Err(LayoutError::ConflictingTypeDefinition(name));
        }
        log::debug!(
            "defined composite {} ({} fields, {:?})",
            name,
            descriptor.fields().map_or(0, |f| f.len()),
            descriptor.allocation()
        );
        composites.insert(name, Arc::clone(&descriptor));
        drop(composites);
        self.cache.clear();
        Ok(descriptor)
    }

    /// Define the derived presence wrapper for `payload`:
    /// `{ present: bool, payload: T }`, laid out by the general algorithm.
    /// Its cost is exactly the payload size plus padding to the payload's
    /// alignment; there is no special-cased "optional overhead" constant.
    pub fn define_optional(
        &self,
        name: impl Into<String>,
        payload: TypeRef,
    ) -> Result<Arc<TypeDescriptor>, LayoutError> {
        self.define_composite(
            name,
            vec![
                FieldSpec::new("present", TypeRef::primitive("bool")),
                FieldSpec::new("payload", payload),
            ],
            AllocationModel::Inline,
        )
    }

    /// Descriptor for a defined composite name.
    pub fn get(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.composites.read().get(name).cloned()
    }

    /// Layout of a named composite, memoized across calls.
    pub fn layout_of(&self, name: &str) -> Result<LayoutResult, LayoutError> {
        if let Some(hit) = self.cache.get(name) {
            return Ok(hit.value().clone());
        }
        let descriptor = self
            .get(name)
            .ok_or_else(|| LayoutError::UnknownFieldType(name.to_string()))?;
        let result = self.compute_layout(&descriptor)?;
        self.cache.insert(name.to_string(), result.clone());
        Ok(result)
    }

    /// Compute the layout of a caller-held descriptor.
    ///
    /// Zero-field composites lay out as size 0, alignment 1, stride 0;
    /// address distinctness for zero-size elements in a sequence is the
    /// caller's responsibility.
    pub fn compute_layout(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Result<LayoutResult, LayoutError> {
        let mut path = Vec::new();
        layout::compute(self, descriptor, &mut path)
    }

    /// Bytes spanned by `len` contiguous elements of the named type.
    ///
    /// Elements of a reference-allocated composite are handles, so the span
    /// is `len` pointer-sized slots; inline elements span
    /// `stride * (len - 1) + size`.
    pub fn array_span(&self, name: &str, len: usize) -> Result<usize, LayoutError> {
        let layout = self.layout_of(name)?;
        let (size, alignment) = layout.field_contribution();
        let stride = align_up(size, alignment);
        Ok(match len {
            0 => 0,
            n => stride * (n - 1) + size,
        })
    }
}
