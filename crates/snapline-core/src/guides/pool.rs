//! Growable pool of overlay primitives.

use super::primitive::{Primitive, PrimitiveKey};
use crate::host::Overlay;

#[derive(Debug, Clone)]
struct Pooled {
    key: PrimitiveKey,
    primitive: Primitive,
}

/// Primitives kept on the overlay between frames.
///
/// The pool only grows. Entries that are not needed for the current frame
/// are hidden, never removed, until [`PrimitivePool::destroy_all`].
#[derive(Debug, Clone, Default)]
pub struct PrimitivePool {
    entries: Vec<Pooled>,
}

impl PrimitivePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pooled primitives, visible or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pooled primitives currently shown.
    pub fn visible_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.primitive.is_visible())
            .count()
    }

    /// Keys of the pooled primitives, in pool order.
    pub fn keys(&self) -> impl Iterator<Item = PrimitiveKey> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// Grow the pool to at least `count` entries, adding each new primitive
    /// to the overlay hidden. Returns how many were created.
    pub fn ensure<O, F>(&mut self, overlay: &mut O, count: usize, make: F) -> usize
    where
        O: Overlay + ?Sized,
        F: Fn() -> Primitive,
    {
        let missing = count.saturating_sub(self.entries.len());
        for _ in 0..missing {
            let mut primitive = make();
            primitive.set_visible(false);
            let key = overlay.add(primitive.clone());
            self.entries.push(Pooled { key, primitive });
        }
        missing
    }

    /// Replace the primitive at `index` and push it to the overlay.
    ///
    /// Out of range indices are ignored; call [`PrimitivePool::ensure`] first.
    pub fn set<O: Overlay + ?Sized>(&mut self, overlay: &mut O, index: usize, primitive: Primitive) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        if entry.primitive != primitive {
            overlay.update(entry.key, &primitive);
            entry.primitive = primitive;
        }
    }

    /// Hide every entry from `start` on.
    pub fn hide_from<O: Overlay + ?Sized>(&mut self, overlay: &mut O, start: usize) {
        for entry in self.entries.iter_mut().skip(start) {
            if entry.primitive.is_visible() {
                entry.primitive.set_visible(false);
                overlay.update(entry.key, &entry.primitive);
            }
        }
    }

    /// Hide every entry.
    pub fn hide_all<O: Overlay + ?Sized>(&mut self, overlay: &mut O) {
        self.hide_from(overlay, 0);
    }

    /// Remove every entry from the overlay and empty the pool.
    pub fn destroy_all<O: Overlay + ?Sized>(&mut self, overlay: &mut O) {
        for entry in self.entries.drain(..) {
            overlay.destroy(entry.key);
        }
    }
}
