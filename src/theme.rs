//! Theme colors for the portal.
//! Defaults follow the portal's slate/emerald palette; any color can be overridden
//! with a hex value in the `[theme]` table of config.toml.

use ratatui::style::Color;

use crate::config::ThemeOverrides;
use crate::portal::LinkColor;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, selection marker, SECURE badge
    pub danger: Color,      // Wrong password banner
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hints, placeholders, footer
    pub bg_selected: Color, // Selected row background
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Screen titles
    pub emerald: Color,
    pub yellow: Color,
    pub red: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(16, 185, 129),       // emerald-500
            danger: Color::Rgb(220, 38, 38),        // red-600
            text: Color::Rgb(226, 232, 240),        // slate-200
            text_dim: Color::Rgb(148, 163, 184),    // slate-400
            bg_selected: Color::Rgb(51, 65, 85),    // slate-700
            inactive: Color::Rgb(71, 85, 105),      // slate-600
            header: Color::Rgb(241, 245, 249),      // slate-100
            emerald: Color::Rgb(5, 150, 105),       // emerald-600
            yellow: Color::Rgb(234, 179, 8),        // yellow-500
            red: Color::Rgb(239, 68, 68),           // red-500
        }
    }
}

impl Theme {
    /// Build the theme from defaults plus config overrides.
    /// Unparseable values are ignored with a warning.
    pub fn load(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();

        let slots: [(&Option<String>, &mut Color, &str); 7] = [
            (&overrides.accent, &mut theme.accent, "accent"),
            (&overrides.danger, &mut theme.danger, "danger"),
            (&overrides.text, &mut theme.text, "text"),
            (&overrides.text_dim, &mut theme.text_dim, "text_dim"),
            (&overrides.bg_selected, &mut theme.bg_selected, "bg_selected"),
            (&overrides.inactive, &mut theme.inactive, "inactive"),
            (&overrides.header, &mut theme.header, "header"),
        ];

        for (value, slot, name) in slots {
            if let Some(value) = value {
                match Self::parse_hex_color(value) {
                    Some(color) => *slot = color,
                    None => tracing::warn!("Ignoring invalid theme color {} = {:?}", name, value),
                }
            }
        }

        theme
    }

    /// Terminal color for a link's color family
    pub fn link_color(&self, color: LinkColor) -> Color {
        match color {
            LinkColor::Emerald => self.emerald,
            LinkColor::Yellow => self.yellow,
            LinkColor::Red => self.red,
        }
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#10b981"), Some(Color::Rgb(16, 185, 129)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
        assert_eq!(Theme::parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = ThemeOverrides {
            accent: Some("#000000".to_string()),
            danger: Some("not a color".to_string()),
            ..Default::default()
        };
        let theme = Theme::load(&overrides);
        let default = Theme::default();

        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.danger, default.danger);
        assert_eq!(theme.text, default.text);
    }

    #[test]
    fn test_link_colors_are_distinct() {
        let theme = Theme::default();
        assert_ne!(theme.link_color(LinkColor::Emerald), theme.link_color(LinkColor::Yellow));
        assert_ne!(theme.link_color(LinkColor::Yellow), theme.link_color(LinkColor::Red));
    }
}
