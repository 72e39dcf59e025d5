//! Styled text: a flat string plus style spans, annotations, and inline
//! object anchors.
//!
//! [`StyledText`] is the output type of the whole engine. It deliberately
//! carries no tree structure: consumers get one string per block and byte
//! ranges into it, which is what text layout wants. [`StyledTextBuilder`]
//! is the only way to make one; its `with_style` / `with_annotation`
//! closures guarantee that every pushed scope is popped, even on early
//! return.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The character appended as a placeholder for an inline object.
pub const OBJECT_REPLACEMENT_CHAR: char = '\u{FFFC}';

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with its alpha channel replaced (not multiplied).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn alpha(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Font weight for a run. Only the weights Markdown can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Style attributes of a run of text.
///
/// Every field is optional; `None` means "inherit". Merging happens in push
/// order, so an inner span's `Some` fields win over an outer span's.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunStyle {
    pub weight: Option<FontWeight>,
    pub italic: Option<bool>,
    pub strikethrough: Option<bool>,
    pub monospace: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<Color>,
    pub background: Option<Color>,
    /// Font size in points.
    pub size: Option<f32>,
}

impl RunStyle {
    pub fn bold() -> Self {
        Self {
            weight: Some(FontWeight::Bold),
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: Some(true),
            ..Self::default()
        }
    }

    pub fn strikethrough() -> Self {
        Self {
            strikethrough: Some(true),
            ..Self::default()
        }
    }

    pub fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Overlay `over` on top of `self`; `over`'s set fields win.
    pub fn merge(self, over: Self) -> Self {
        Self {
            weight: over.weight.or(self.weight),
            italic: over.italic.or(self.italic),
            strikethrough: over.strikethrough.or(self.strikethrough),
            monospace: over.monospace.or(self.monospace),
            underline: over.underline.or(self.underline),
            color: over.color.or(self.color),
            background: over.background.or(self.background),
            size: over.size.or(self.size),
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A style applied to a byte range of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpan {
    pub range: Range<usize>,
    pub style: RunStyle,
}

/// A string annotation (link targets, image sources) over a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub range: Range<usize>,
    pub tag: String,
    pub value: String,
}

/// Anchor for an inline object. The text contains
/// [`OBJECT_REPLACEMENT_CHAR`] at `offset`; `key` selects the renderer and
/// `payload` is passed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAnchor {
    pub offset: usize,
    pub key: String,
    pub payload: String,
}

/// A maximal run of uniformly styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub range: Range<usize>,
    pub style: RunStyle,
}

/// Immutable styled text. Built with [`StyledTextBuilder`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    spans: Vec<StyleSpan>,
    annotations: Vec<Annotation>,
    objects: Vec<InlineAnchor>,
}

impl StyledText {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn objects(&self) -> &[InlineAnchor] {
        &self.objects
    }

    pub fn slice(&self, range: Range<usize>) -> &str {
        &self.text[range]
    }

    /// The merged style in effect at a byte offset.
    pub fn style_at(&self, offset: usize) -> RunStyle {
        let mut style = RunStyle::default();
        for span in &self.spans {
            if span.range.contains(&offset) {
                style = style.merge(span.style);
            }
        }
        style
    }

    /// Annotations of the given tag covering a byte offset.
    pub fn annotations_at<'a>(
        &'a self,
        tag: &'a str,
        offset: usize,
    ) -> impl Iterator<Item = &'a Annotation> {
        self.annotations
            .iter()
            .filter(move |a| a.tag == tag && a.range.contains(&offset))
    }

    /// Remove trailing whitespace, clamping span and annotation ranges and
    /// dropping any that end up empty.
    pub fn trim_end(mut self) -> Self {
        let new_len = self.text.trim_end().len();
        if new_len == self.text.len() {
            return self;
        }
        self.text.truncate(new_len);
        self.spans.retain_mut(|s| {
            s.range.end = s.range.end.min(new_len);
            s.range.start < s.range.end
        });
        self.annotations.retain_mut(|a| {
            a.range.end = a.range.end.min(new_len);
            a.range.start < a.range.end
        });
        self.objects.retain(|o| o.offset < new_len);
        self
    }

    /// A copy with extra spans layered on top. Later spans win during
    /// merging, so an overlay can override color without touching the rest.
    pub fn overlay(mut self, extra: impl IntoIterator<Item = StyleSpan>) -> Self {
        self.spans.extend(extra);
        self
    }

    /// Split the text into maximal uniformly-styled runs. Adjacent runs
    /// with identical styles are merged, so plain text yields one run.
    pub fn runs(&self) -> Vec<StyledRun> {
        if self.text.is_empty() {
            return Vec::new();
        }
        let mut bounds: Vec<usize> = vec![0, self.text.len()];
        for span in &self.spans {
            bounds.push(span.range.start);
            bounds.push(span.range.end);
        }
        bounds.sort_unstable();
        bounds.dedup();
        bounds.retain(|&b| b <= self.text.len());

        let mut runs: Vec<StyledRun> = Vec::new();
        for pair in bounds.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            if start == end {
                continue;
            }
            let style = self.style_at(start);
            match runs.last_mut() {
                Some(last) if last.style == style && last.range.end == start => {
                    last.range.end = end;
                }
                _ => runs.push(StyledRun {
                    range: start..end,
                    style,
                }),
            }
        }
        runs
    }
}

/// Builder for [`StyledText`].
pub struct StyledTextBuilder {
    text: String,
    spans: Vec<StyleSpan>,
    annotations: Vec<Annotation>,
    objects: Vec<InlineAnchor>,
    // indices into `spans`; each open scope owns the placeholder span it
    // pushed, so spans land in push order and inner scopes merge last
    style_stack: Vec<usize>,
    annotation_stack: Vec<(usize, String, String)>,
}

impl StyledTextBuilder {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            spans: Vec::new(),
            annotations: Vec::new(),
            objects: Vec::new(),
            style_stack: Vec::new(),
            annotation_stack: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn append(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn append_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Append a placeholder character and record an inline object anchor
    /// under `key` with the given payload.
    pub fn append_inline_object(&mut self, key: &str, payload: &str) {
        let offset = self.text.len();
        self.text.push(OBJECT_REPLACEMENT_CHAR);
        self.objects.push(InlineAnchor {
            offset,
            key: key.to_owned(),
            payload: payload.to_owned(),
        });
    }

    /// Open a style scope. The span is recorded at push time, so spans end
    /// up ordered outer-before-inner and the later-wins merge in
    /// [`StyledText::style_at`] lets the innermost scope override.
    pub fn push_style(&mut self, style: RunStyle) {
        let start = self.text.len();
        self.spans.push(StyleSpan {
            range: start..start,
            style,
        });
        self.style_stack.push(self.spans.len() - 1);
    }

    pub fn pop_style(&mut self) {
        if let Some(index) = self.style_stack.pop() {
            if self.spans[index].range.start < self.text.len() {
                self.spans[index].range.end = self.text.len();
            } else {
                // nothing was appended inside the scope
                self.spans.remove(index);
            }
        }
    }

    /// Apply `style` for the duration of the closure. The span is closed
    /// however the closure exits.
    pub fn with_style(&mut self, style: RunStyle, f: impl FnOnce(&mut Self)) {
        self.push_style(style);
        f(self);
        self.pop_style();
    }

    pub fn push_annotation(&mut self, tag: &str, value: &str) {
        self.annotation_stack
            .push((self.text.len(), tag.to_owned(), value.to_owned()));
    }

    pub fn pop_annotation(&mut self) {
        if let Some((start, tag, value)) = self.annotation_stack.pop() {
            if start < self.text.len() {
                self.annotations.push(Annotation {
                    range: start..self.text.len(),
                    tag,
                    value,
                });
            }
        }
    }

    /// Record an annotation over everything appended inside the closure.
    pub fn with_annotation(&mut self, tag: &str, value: &str, f: impl FnOnce(&mut Self)) {
        self.push_annotation(tag, value);
        f(self);
        self.pop_annotation();
    }

    /// Finish, closing any still-open style or annotation scopes at the end
    /// of the text.
    pub fn build(mut self) -> StyledText {
        while !self.style_stack.is_empty() {
            self.pop_style();
        }
        while !self.annotation_stack.is_empty() {
            self.pop_annotation();
        }
        StyledText {
            text: self.text,
            spans: self.spans,
            annotations: self.annotations,
            objects: self.objects,
        }
    }
}

impl Default for StyledTextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
