//! Inline object registry.
//!
//! Styled text can only hold characters, so non-text content (images, and
//! whatever hosts dream up) is represented by a placeholder character plus
//! an anchor naming a renderer key and a payload. The registry maps those
//! keys to host-supplied render functions and a reserved placeholder size,
//! keeping the engine free of any UI types: `R` is whatever the host's
//! widget type is.

use std::collections::HashMap;

use crate::text::{InlineAnchor, StyledText};

/// Space to reserve for an inline object, in em units of the current font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderSize {
    pub width_em: f32,
    pub height_em: f32,
}

impl Default for PlaceholderSize {
    fn default() -> Self {
        Self {
            width_em: 1.0,
            height_em: 1.0,
        }
    }
}

struct Entry<R> {
    size: PlaceholderSize,
    render: Box<dyn Fn(&str) -> R>,
}

/// An anchor resolved against the registry, ready for layout.
pub struct ResolvedObject<R> {
    /// Byte offset of the placeholder character in the text.
    pub offset: usize,
    pub size: PlaceholderSize,
    pub output: R,
}

/// Maps inline-object keys to renderers.
pub struct InlineObjectRegistry<R> {
    entries: HashMap<String, Entry<R>>,
}

impl<R> InlineObjectRegistry<R> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a renderer for `key`, replacing any previous one.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        size: PlaceholderSize,
        render: impl Fn(&str) -> R + 'static,
    ) {
        self.entries.insert(
            key.into(),
            Entry {
                size,
                render: Box::new(render),
            },
        );
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn size_of(&self, key: &str) -> Option<PlaceholderSize> {
        self.entries.get(key).map(|e| e.size)
    }

    /// Render a single anchor. `None` when no renderer is registered for
    /// its key; the host should then leave the placeholder character as-is.
    pub fn render(&self, anchor: &InlineAnchor) -> Option<ResolvedObject<R>> {
        let entry = self.entries.get(&anchor.key)?;
        Some(ResolvedObject {
            offset: anchor.offset,
            size: entry.size,
            output: (entry.render)(&anchor.payload),
        })
    }

    /// Resolve every anchor in `text` that has a registered renderer, in
    /// text order.
    pub fn resolve(&self, text: &StyledText) -> Vec<ResolvedObject<R>> {
        text.objects()
            .iter()
            .filter_map(|anchor| self.render(anchor))
            .collect()
    }
}

impl<R> Default for InlineObjectRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
