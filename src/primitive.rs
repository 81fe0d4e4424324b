// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive type registry: kind identifier -> (size, alignment) facts.

use crate::error::LayoutError;
use crate::WORD_SIZE;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Size and alignment of one primitive kind, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveInfo {
    pub size: usize,
    /// Byte boundary the value's address must satisfy. Power of two.
    pub alignment: usize,
}

/// Built-in primitive facts for a 64-bit target.
///
/// The textual handle is pointer + length + capacity metadata for
/// dynamically sized text; the sequence handle is a single pointer-sized
/// slot. A presence-wrapped ("optional") type is not a primitive, it is
/// derived as a two-field composite (see [`crate::TypeGraph::define_optional`]).
const BUILTIN_FACTS: &[(&str, usize, usize)] = &[
    ("bool", 1, 1),
    ("i8", 1, 1),
    ("i16", 2, 2),
    ("i32", 4, 4),
    ("i64", 8, 8),
    ("int", WORD_SIZE, WORD_SIZE),
    ("f32", 4, 4),
    ("f64", 8, 8),
    ("string", 2 * WORD_SIZE, WORD_SIZE),
    ("seq", WORD_SIZE, WORD_SIZE),
];

/// Registry mapping primitive kind identifiers to size/alignment facts.
///
/// Read-mostly state: populate it up front, then share it across threads.
/// Late registration is also safe; the inner map is behind a reader-writer
/// lock, so concurrent layout computations only contend on reads.
#[derive(Debug, Default)]
pub struct PrimitiveRegistry {
    facts: RwLock<HashMap<String, PrimitiveInfo>>,
}

impl PrimitiveRegistry {
    /// Empty registry with no kinds registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in kinds of a 64-bit target.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        {
            let mut facts = registry.facts.write();
            for &(kind, size, alignment) in BUILTIN_FACTS {
                facts.insert(kind.to_string(), PrimitiveInfo { size, alignment });
            }
        }
        registry
    }

    /// Register a primitive fact.
    ///
    /// Re-registration with identical values is a no-op; conflicting values
    /// fail with [`LayoutError::ConflictingPrimitiveRegistration`] and leave
    /// the registry unchanged.
    pub fn register(&self, kind: &str, size: usize, alignment: usize) -> Result<(), LayoutError> {
        debug_assert!(alignment.is_power_of_two());
        let info = PrimitiveInfo { size, alignment };
        let mut facts = self.facts.write();
        match facts.get(kind) {
            Some(existing) if *existing == info => Ok(()),
            Some(_) => Err(LayoutError::ConflictingPrimitiveRegistration(
                kind.to_string(),
            )),
            None => {
                log::debug!("registered primitive {} ({}/{})", kind, size, alignment);
                facts.insert(kind.to_string(), info);
                Ok(())
            }
        }
    }

    /// Look up a primitive's facts.
    pub fn lookup(&self, kind: &str) -> Result<PrimitiveInfo, LayoutError> {
        self.facts
            .read()
            .get(kind)
            .copied()
            .ok_or_else(|| LayoutError::UnknownPrimitive(kind.to_string()))
    }

    /// Whether a kind is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.facts.read().contains_key(kind)
    }
}
