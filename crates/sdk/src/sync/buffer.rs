//! Append-only buffer of validated entrypoints
//!
//! Every sync sends the whole buffer, so it only ever grows for the lifetime
//! of a client. Insertion order is kept and duplicates are allowed.

use crate::models::EntrypointDescriptor;

/// Ordered, append-only sequence of validated entrypoints
#[derive(Debug, Clone, Default)]
pub struct EntrypointBuffer {
    entries: Vec<EntrypointDescriptor>,
}

impl EntrypointBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entrypoint
    pub fn push(&mut self, entrypoint: EntrypointDescriptor) {
        self.entries.push(entrypoint);
    }

    /// Append a batch, keeping its order
    pub fn extend(&mut self, entrypoints: Vec<EntrypointDescriptor>) {
        self.entries.extend(entrypoints);
    }

    /// All buffered entrypoints in insertion order
    pub fn as_slice(&self) -> &[EntrypointDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntrypointDescriptor> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a EntrypointBuffer {
    type Item = &'a EntrypointDescriptor;
    type IntoIter = std::slice::Iter<'a, EntrypointDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
