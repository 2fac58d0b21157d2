//! Overlay layer keeping guide primitives by key.

use crate::guides::{LinePrimitive, MarkerPrimitive, Primitive, PrimitiveKey};
use crate::host::Overlay;
use std::collections::BTreeMap;

/// Retained overlay. Drawing is left to whoever reads the primitives.
#[derive(Debug, Clone, Default)]
pub struct Sky {
    primitives: BTreeMap<u64, Primitive>,
    next_key: u64,
    added: usize,
    updates: usize,
}

impl Sky {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives currently on the overlay.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Total primitives ever added.
    pub fn added(&self) -> usize {
        self.added
    }

    /// Total updates received.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn get(&self, key: PrimitiveKey) -> Option<&Primitive> {
        self.primitives.get(&key.0)
    }

    pub fn visible_count(&self) -> usize {
        self.primitives.values().filter(|p| p.is_visible()).count()
    }

    /// Visible guide lines, oldest first.
    pub fn visible_lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives
            .values()
            .filter(|p| p.is_visible())
            .filter_map(Primitive::as_line)
    }

    /// Visible endpoint markers, oldest first.
    pub fn visible_markers(&self) -> impl Iterator<Item = &MarkerPrimitive> {
        self.primitives
            .values()
            .filter(|p| p.is_visible())
            .filter_map(Primitive::as_marker)
    }
}

impl Overlay for Sky {
    fn add(&mut self, primitive: Primitive) -> PrimitiveKey {
        self.next_key += 1;
        self.added += 1;
        self.primitives.insert(self.next_key, primitive);
        PrimitiveKey(self.next_key)
    }

    fn update(&mut self, key: PrimitiveKey, primitive: &Primitive) {
        if let Some(slot) = self.primitives.get_mut(&key.0) {
            *slot = primitive.clone();
            self.updates += 1;
        }
    }

    fn destroy(&mut self, key: PrimitiveKey) {
        self.primitives.remove(&key.0);
    }
}
