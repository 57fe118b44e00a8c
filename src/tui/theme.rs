use ratatui::style::Color;

use crate::config::ThemeSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
}

fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 { return None; }
    if let Ok(rgb) = u32::from_str_radix(hex, 16) {
        let r = ((rgb >> 16) & 0xFF) as u8;
        let g = ((rgb >> 8) & 0xFF) as u8;
        let b = (rgb & 0xFF) as u8;
        return Some(Color::Rgb(r, g, b));
    }
    None
}

/// Configured colors over the zenburn palette; bad hex values fall back.
pub fn from_settings(cfg: &ThemeSettings) -> Theme {
    let fallback = zenburn();
    let pick = |v: &Option<String>, default: Color| {
        v.as_deref().and_then(hex_to_color).unwrap_or(default)
    };
    Theme {
        bg: pick(&cfg.bg, fallback.bg),
        fg: pick(&cfg.fg, fallback.fg),
        accent: pick(&cfg.accent, fallback.accent),
        muted: pick(&cfg.muted, fallback.muted),
    }
}

pub fn zenburn() -> Theme {
    Theme {
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(220, 220, 204),
        accent: Color::Rgb(181, 189, 104),
        muted: Color::Rgb(150, 150, 150),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(hex_to_color("ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(hex_to_color("#fff"), None);
        assert_eq!(hex_to_color("#gggggg"), None);
    }

    #[test]
    fn test_partial_theme_keeps_fallback() {
        let cfg = ThemeSettings {
            accent: Some("#010203".into()),
            bg: Some("nope".into()),
            ..Default::default()
        };
        let t = from_settings(&cfg);
        assert_eq!(t.accent, Color::Rgb(1, 2, 3));
        assert_eq!(t.bg, zenburn().bg);
        assert_eq!(t.fg, zenburn().fg);
    }
}
