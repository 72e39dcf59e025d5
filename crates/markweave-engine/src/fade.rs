//! Streaming fade effect.
//!
//! While text is arriving, the tail of each block is rendered with
//! exponentially decaying alpha so new characters appear to materialize.
//! Once the stream stalls, the fade animates away and the text settles at
//! full opacity.
//!
//! Nothing here owns a clock or a timer thread. [`FadeState`] is driven by
//! the host: call [`FadeState::note_content`] whenever the text changes and
//! [`FadeState::poll`] on every frame, both with the current time, then ask
//! for [`FadeState::multiplier`] and feed it to [`apply_fade`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::text::{Color, StyleSpan, StyledText};

/// Per-character alpha decay factor for the fade tail.
const BASE_DECAY: f32 = 0.89;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeSettings {
    /// How many trailing characters take part in the fade.
    pub fade_length: usize,
    /// How long the stream must stall before the fade starts dissolving.
    pub debounce: Duration,
    /// Duration of the dissolve animation.
    pub transition: Duration,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            fade_length: 20,
            debounce: Duration::from_millis(100),
            transition: Duration::from_millis(500),
        }
    }
}

/// Overlay the fade onto `text`.
///
/// The last `fade_length` characters before any trailing whitespace get an
/// alpha of `BASE_DECAY.powi(i)`, where `i` counts forward from the start of
/// the fade window, so the most recent character is the most transparent.
/// `multiplier` blends the effect: at `1.0` the fade is fully applied, at
/// `0.0` every character is opaque again.
pub fn apply_fade(
    text: StyledText,
    text_color: Color,
    fade_length: usize,
    multiplier: f32,
) -> StyledText {
    let trimmed_len = text.text().trim_end().chars().count();
    let actual_fade = trimmed_len.min(fade_length);
    if actual_fade == 0 {
        return text;
    }
    let fade_start = trimmed_len - actual_fade;

    let mut overlay = Vec::with_capacity(actual_fade);
    for (i, (offset, c)) in text
        .text()
        .char_indices()
        .skip(fade_start)
        .take(actual_fade)
        .enumerate()
    {
        let base_alpha = BASE_DECAY.powi(i as i32);
        let final_alpha = base_alpha + (1.0 - base_alpha) * (1.0 - multiplier);
        overlay.push(StyleSpan {
            range: offset..offset + c.len_utf8(),
            style: crate::text::RunStyle::colored(text_color.with_alpha(final_alpha)),
        });
    }
    text.overlay(overlay)
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    len: usize,
    due: Instant,
}

/// Debounce and animation state for one streaming text block.
#[derive(Debug, Clone)]
pub struct FadeState {
    settings: FadeSettings,
    last_len: Option<usize>,
    pending: Option<Pending>,
    anim_from: f32,
    anim_target: f32,
    anim_started: Option<Instant>,
}

impl FadeState {
    pub fn new(settings: FadeSettings) -> Self {
        Self {
            settings,
            last_len: None,
            pending: None,
            // streams start faded-in
            anim_from: 1.0,
            anim_target: 1.0,
            anim_started: None,
        }
    }

    pub fn settings(&self) -> &FadeSettings {
        &self.settings
    }

    /// Record the current content length. Any length change re-arms the
    /// fade and schedules a stall check one debounce interval out.
    pub fn note_content(&mut self, len: usize, now: Instant) {
        if self.last_len == Some(len) {
            return;
        }
        self.last_len = Some(len);
        self.set_target(1.0, now);
        self.pending = Some(Pending {
            len,
            due: now + self.settings.debounce,
        });
    }

    /// Fire any due stall check. A check only counts when the content
    /// length it captured is still current; a stale check is a no-op.
    pub fn poll(&mut self, now: Instant) {
        let Some(pending) = self.pending else { return };
        if pending.due > now {
            return;
        }
        self.pending = None;
        if self.last_len == Some(pending.len) {
            self.set_target(0.0, now);
        }
    }

    /// Current fade multiplier: `1.0` fully faded tail, `0.0` fully opaque.
    pub fn multiplier(&self, now: Instant) -> f32 {
        let Some(started) = self.anim_started else {
            return self.anim_target;
        };
        let progress = (now.saturating_duration_since(started).as_secs_f32()
            / self.settings.transition.as_secs_f32())
        .clamp(0.0, 1.0);
        self.anim_from + (self.anim_target - self.anim_from) * progress
    }

    /// True while the fade is visible or still animating away.
    pub fn is_active(&self, now: Instant) -> bool {
        self.multiplier(now) > 0.0
    }

    fn set_target(&mut self, target: f32, now: Instant) {
        if self.anim_target != target {
            self.anim_from = self.multiplier(now);
            self.anim_target = target;
            self.anim_started = Some(now);
        }
    }
}

impl Default for FadeState {
    fn default() -> Self {
        Self::new(FadeSettings::default())
    }
}
