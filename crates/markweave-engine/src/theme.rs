//! Theme: the colors and type styles the renderer hands out.
//!
//! Hosts construct (or deserialize) a [`Theme`] once and pass it to the
//! renderer; everything here is plain data so a theme can live in host
//! config files.

use serde::{Deserialize, Serialize};

use crate::text::{Color, FontWeight, RunStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ThemeColors,
    pub typography: Typography,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub text: Color,
    pub link: Color,
    pub code_text: Color,
    pub code_background: Color,
    pub quote: Color,
    pub divider: Color,
    /// De-emphasized text (collapsed block titles, table headers).
    pub muted: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            text: Color::rgb(0xE6, 0xE6, 0xE6),
            link: Color::rgb(0x58, 0xA6, 0xFF),
            code_text: Color::rgb(0xE6, 0xED, 0xF3),
            code_background: Color::rgba(0x6E, 0x76, 0x81, 0x33),
            quote: Color::rgb(0x9D, 0xA5, 0xB0),
            divider: Color::rgb(0x30, 0x36, 0x3D),
            muted: Color::rgb(0x8B, 0x94, 0x9E),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    /// Body text size in points.
    pub text_size: f32,
    /// Heading sizes for levels 1 through 6.
    pub heading_sizes: [f32; 6],
    pub code_size: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            text_size: 16.0,
            heading_sizes: [32.0, 24.0, 20.0, 18.0, 16.0, 14.0],
            code_size: 14.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            typography: Typography::default(),
        }
    }
}

impl Theme {
    /// Style for a heading. Levels outside 1..=6 clamp to the nearest.
    pub fn heading(&self, level: u8) -> RunStyle {
        let idx = usize::from(level.clamp(1, 6)) - 1;
        RunStyle {
            weight: Some(FontWeight::Bold),
            size: Some(self.typography.heading_sizes[idx]),
            color: Some(self.colors.text),
            ..RunStyle::default()
        }
    }

    pub fn link(&self) -> RunStyle {
        RunStyle {
            color: Some(self.colors.link),
            underline: Some(true),
            ..RunStyle::default()
        }
    }

    pub fn inline_code(&self) -> RunStyle {
        RunStyle {
            monospace: Some(true),
            size: Some(self.typography.code_size),
            color: Some(self.colors.code_text),
            background: Some(self.colors.code_background),
            ..RunStyle::default()
        }
    }

    pub fn quote(&self) -> RunStyle {
        RunStyle {
            color: Some(self.colors.quote),
            ..RunStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_clamp() {
        let theme = Theme::default();
        assert_eq!(theme.heading(0), theme.heading(1));
        assert_eq!(theme.heading(9), theme.heading(6));
        assert!(theme.heading(1).size.unwrap() > theme.heading(6).size.unwrap());
    }

    #[test]
    fn theme_round_trips_through_config_text() {
        let theme = Theme::default();
        let text = toml::to_string(&theme).unwrap();
        let back: Theme = toml::from_str(&text).unwrap();
        assert_eq!(back, theme);
    }

    #[test]
    fn link_style_is_colored_and_underlined() {
        let theme = Theme::default();
        let style = theme.link();
        assert_eq!(style.color, Some(theme.colors.link));
        assert_eq!(style.underline, Some(true));
    }

    #[test]
    fn inline_code_is_monospace_with_background() {
        let style = Theme::default().inline_code();
        assert_eq!(style.monospace, Some(true));
        assert!(style.background.is_some());
    }
}
