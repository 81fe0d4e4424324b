// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout error types.

use std::fmt;

/// Errors produced by type registration and layout computation.
///
/// Every failure is deterministic and side-effect-free: a malformed
/// descriptor fails identically on every call, and a failed registration
/// or definition leaves the registry/graph unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Primitive kind was never registered.
    UnknownPrimitive(String),
    /// A field references a composite name not defined in the type graph.
    UnknownFieldType(String),
    /// An inline composite contains itself by value, directly or
    /// transitively. Carries the resolution path from the top-level call
    /// down to the repeated node.
    CyclicInlineComposite(Vec<String>),
    /// Primitive kind already registered with different size/alignment.
    ConflictingPrimitiveRegistration(String),
    /// Field name not present in the laid-out composite.
    UnknownField(String),
    /// Field name repeated within a single composite.
    DuplicateFieldName(String),
    /// Composite name already defined with a different structure.
    ConflictingTypeDefinition(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPrimitive(kind) => write!(f, "Unknown primitive kind: {}", kind),
            Self::UnknownFieldType(name) => write!(f, "Unknown field type: {}", name),
            Self::CyclicInlineComposite(path) => {
                write!(f, "Inline composite contains itself: {}", path.join(" -> "))
            }
            Self::ConflictingPrimitiveRegistration(kind) => {
                write!(f, "Primitive already registered with different facts: {}", kind)
            }
            Self::UnknownField(name) => write!(f, "Unknown field: {}", name),
            Self::DuplicateFieldName(name) => write!(f, "Duplicate field name: {}", name),
            Self::ConflictingTypeDefinition(name) => {
                write!(f, "Composite already defined with different structure: {}", name)
            }
        }
    }
}

impl std::error::Error for LayoutError {}
