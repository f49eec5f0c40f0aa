use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from config. Only the first call has any effect.
pub fn init(theme: Theme) {
    let _ = THEME.set(theme);
}

/// Get the active theme, falling back to the default palette.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub outside_month: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub focus: Style,
    pub status: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::White).bg(Color::Red),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            outside_month: Style::default().fg(Color::DarkGray),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            focus: Style::default().fg(Color::Cyan),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            error: Style::default().fg(Color::LightRed),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(255, 85, 85)), // red
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            outside_month: Style::default().fg(Color::Rgb(68, 71, 90)),
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            focus: Style::default().fg(Color::Rgb(189, 147, 249)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            error: Style::default().fg(Color::Rgb(255, 85, 85)),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(251, 73, 52)), // red
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)), // aqua
            outside_month: Style::default().fg(Color::Rgb(102, 92, 84)),
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            focus: Style::default().fg(Color::Rgb(250, 189, 47)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            error: Style::default().fg(Color::Rgb(251, 73, 52)),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(191, 97, 106)), // aurora red
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)), // frost
            outside_month: Style::default().fg(Color::Rgb(67, 76, 94)),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            focus: Style::default().fg(Color::Rgb(136, 192, 208)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            error: Style::default().fg(Color::Rgb(191, 97, 106)),
        }
    }
}

// ── [theme] table of config.toml ──

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub focus_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub error_fg: Option<String>,
}

impl ThemeConfig {
    pub fn to_theme(&self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let overrides: [(&Option<String>, fn(&mut Theme, Color)); 11] = [
            (&self.today_fg, |t, c| t.today = t.today.fg(c)),
            (&self.today_bg, |t, c| t.today = t.today.bg(c)),
            (&self.selected_fg, |t, c| t.selected = t.selected.fg(c)),
            (&self.selected_bg, |t, c| t.selected = t.selected.bg(c)),
            (&self.header_fg, |t, c| t.header = t.header.fg(c)),
            (&self.dim_fg, |t, c| {
                t.dim = t.dim.fg(c);
                t.outside_month = t.outside_month.fg(c);
            }),
            (&self.border_fg, |t, c| t.border = t.border.fg(c)),
            (&self.focus_fg, |t, c| t.focus = t.focus.fg(c)),
            (&self.status_fg, |t, c| t.status = t.status.fg(c)),
            (&self.status_bg, |t, c| t.status = t.status.bg(c)),
            (&self.error_fg, |t, c| t.error = t.error.fg(c)),
        ];

        for (value, apply) in overrides {
            match value.as_deref().map(|s| (s, parse_color(s))) {
                Some((_, Some(color))) => apply(&mut theme, color),
                Some((raw, None)) => tracing::warn!(value = raw, "ignoring unknown theme color"),
                None => {}
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}
