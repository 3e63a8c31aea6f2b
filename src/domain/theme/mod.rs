//! Theme domain: the persisted light/dark flag and the colours derived from it.

pub mod state;

use serde::{Deserialize, Serialize};

pub use state::{SubscriptionId, ThemeFlag, ThemeMirror};

/// Durable storage key holding `"dark"` or `"light"`.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Class applied to the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interpret a stored value. Only the literal `"dark"` selects dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn palette(&self) -> Palette {
        match self {
            Self::Light => Palette::LIGHT,
            Self::Dark => Palette::DARK,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart colours selected by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Axis tick and legend label colour.
    pub text: &'static str,
    pub grid: &'static str,
    pub line_border: &'static str,
    pub line_fill: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        text: "#1f2937",
        grid: "rgba(0, 0, 0, 0.1)",
        line_border: "rgba(75, 192, 192, 1)",
        line_fill: "rgba(75, 192, 192, 0.2)",
    };

    pub const DARK: Palette = Palette {
        text: "#f3f4f6",
        grid: "rgba(255, 255, 255, 0.1)",
        line_border: "rgba(96, 165, 250, 1)",
        line_fill: "rgba(96, 165, 250, 0.2)",
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn test_toggled_is_an_involution() {
        for t in [Theme::Light, Theme::Dark] {
            assert_ne!(t.toggled(), t);
            assert_eq!(t.toggled().toggled(), t);
        }
    }

    #[test]
    fn test_palette_follows_theme() {
        assert_eq!(Theme::Dark.palette(), Palette::DARK);
        assert_eq!(Theme::Light.palette(), Palette::LIGHT);
        assert_ne!(Palette::DARK.text, Palette::LIGHT.text);
    }
}
