// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type descriptors: the caller-facing description of what to lay out.

/// Storage model for a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationModel {
    /// The value's bytes live directly within its containing storage.
    Inline,
    /// The containing storage holds a pointer-sized handle; the instance
    /// lives on the heap behind a metadata header.
    Reference,
}

/// Reference to a field's type: a registered primitive kind or a composite
/// defined by name in the type graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(String),
    Composite(String),
}

impl TypeRef {
    /// Reference a registered primitive kind.
    pub fn primitive(kind: impl Into<String>) -> Self {
        Self::Primitive(kind.into())
    }

    /// Reference a named composite in the graph.
    pub fn composite(name: impl Into<String>) -> Self {
        Self::Composite(name.into())
    }
}

/// A named, typed field of a composite. Declaration order drives layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub name: String,
    pub type_ref: TypeRef,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A registered primitive kind.
    Primitive(String),
    /// Ordered fields plus an allocation model.
    Composite {
        fields: Vec<FieldSpec>,
        allocation: AllocationModel,
    },
}

/// A complete type descriptor.
///
/// Immutable once submitted for layout; the engine never retains it across
/// calls, and a [`crate::LayoutResult`] holds no backward reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Descriptor for a bare primitive kind.
    pub fn primitive(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Primitive(kind.into()))
    }

    /// Descriptor for a composite with the given fields and allocation model.
    pub fn composite(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        allocation: AllocationModel,
    ) -> Self {
        Self::new(name, TypeKind::Composite { fields, allocation })
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, TypeKind::Composite { .. })
    }

    /// Fields if this is a composite.
    pub fn fields(&self) -> Option<&[FieldSpec]> {
        match &self.kind {
            TypeKind::Composite { fields, .. } => Some(fields),
            TypeKind::Primitive(_) => None,
        }
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Allocation model if this is a composite.
    pub fn allocation(&self) -> Option<AllocationModel> {
        match &self.kind {
            TypeKind::Composite { allocation, .. } => Some(*allocation),
            TypeKind::Primitive(_) => None,
        }
    }
}

/// Fluent builder for composite descriptors.
///
/// ```rust
/// use typelayout::{CompositeBuilder, TypeGraph};
///
/// let graph = TypeGraph::with_builtins();
/// let desc = CompositeBuilder::new("SensorReading")
///     .primitive_field("sensor_id", "i32")
///     .primitive_field("temperature", "f64")
///     .primitive_field("label", "string")
///     .build();
/// let layout = graph.compute_layout(&desc).unwrap();
/// assert_eq!(layout.offset_of("temperature").unwrap(), 8);
/// ```
#[derive(Debug)]
pub struct CompositeBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    allocation: AllocationModel,
}

impl CompositeBuilder {
    /// Start an inline composite with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            allocation: AllocationModel::Inline,
        }
    }

    /// Switch to the heap-indirected allocation model.
    pub fn reference(mut self) -> Self {
        self.allocation = AllocationModel::Reference;
        self
    }

    /// Set the allocation model explicitly.
    pub fn allocation(mut self, model: AllocationModel) -> Self {
        self.allocation = model;
        self
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.fields.push(FieldSpec::new(name, type_ref));
        self
    }

    /// Append a field of a registered primitive kind.
    pub fn primitive_field(self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        let type_ref = TypeRef::primitive(kind);
        self.field(name, type_ref)
    }

    /// Append a field whose type is a named composite in the graph.
    pub fn composite_field(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_ref = TypeRef::composite(type_name);
        self.field(name, type_ref)
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::composite(self.name, self.fields, self.allocation)
    }
}
