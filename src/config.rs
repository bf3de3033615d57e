use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Color,
    pub directory: Color,
    pub marker: Color,
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Color::Rgb(80, 200, 220),
            directory: Color::Yellow,
            marker: Color::Rgb(100, 100, 100),
            text: Color::White,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    theme: TomlTheme,
}

#[derive(Debug, Deserialize, Default)]
struct TomlTheme {
    header: Option<String>,
    directory: Option<String>,
    marker: Option<String>,
    text: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let path = Self::config_file_path();
        if let Some(path) = path {
            if let Ok(contents) = fs::read_to_string(&path) {
                if let Ok(toml_config) = toml::from_str::<TomlConfig>(&contents) {
                    return Self::from_toml(toml_config);
                }
            }
        }
        Self::default()
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dirnav").join("config.toml"))
    }

    fn from_toml(toml: TomlConfig) -> Self {
        let default = Theme::default();
        Self {
            theme: Theme {
                header: toml.theme.header.as_deref().and_then(parse_color).unwrap_or(default.header),
                directory: toml.theme.directory.as_deref().and_then(parse_color).unwrap_or(default.directory),
                marker: toml.theme.marker.as_deref().and_then(parse_color).unwrap_or(default.marker),
                text: toml.theme.text.as_deref().and_then(parse_color).unwrap_or(default.text),
            },
        }
    }
}

// Accepts whatever ratatui's own parser does: named colors, "#rrggbb" hex,
// and indexed values.
fn parse_color(s: &str) -> Option<Color> {
    s.trim().parse().ok()
}
