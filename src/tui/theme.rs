use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Semantic colour theme for the UI.
///
/// Every colour the renderer uses is stored here so any of them can be
/// overridden via `[theme]` in `config.toml`.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    /// Completed tasks render in this colour, struck through.
    pub task_done: Color,
    pub selection_indicator: Color,
    pub button: Color,
    pub modal_warning: Color,
    pub modal_info: Color,
    pub modal_confirm: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::Cyan,
            task_done: Color::DarkGray,
            selection_indicator: Color::Cyan,
            button: Color::White,
            modal_warning: Color::Yellow,
            modal_info: Color::Blue,
            modal_confirm: Color::Red,
        }
    }
}

impl Theme {
    /// Style for a task row's text: struck-through and muted once completed,
    /// plain in the primary colour otherwise.
    pub fn task_style(&self, completed: bool) -> Style {
        if completed {
            Style::default()
                .fg(self.task_done)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(self.text_primary)
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border_unfocused)
        }
    }
}

/// `[theme]` section of `config.toml`: every field optional, unknown or
/// unparsable colours fall back to the default.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ThemeConfig {
    pub border_focused: Option<String>,
    pub border_unfocused: Option<String>,
    pub text_primary: Option<String>,
    pub text_secondary: Option<String>,
    pub accent: Option<String>,
    pub task_done: Option<String>,
    pub selection_indicator: Option<String>,
    pub button: Option<String>,
    pub modal_warning: Option<String>,
    pub modal_info: Option<String>,
    pub modal_confirm: Option<String>,
}

impl ThemeConfig {
    pub fn build(&self) -> Theme {
        fn apply(slot: &mut Color, value: Option<&String>) {
            if let Some(color) = value.and_then(|s| parse_color(s)) {
                *slot = color;
            }
        }

        let mut t = Theme::default();
        apply(&mut t.border_focused, self.border_focused.as_ref());
        apply(&mut t.border_unfocused, self.border_unfocused.as_ref());
        apply(&mut t.text_primary, self.text_primary.as_ref());
        apply(&mut t.text_secondary, self.text_secondary.as_ref());
        apply(&mut t.accent, self.accent.as_ref());
        apply(&mut t.task_done, self.task_done.as_ref());
        apply(&mut t.selection_indicator, self.selection_indicator.as_ref());
        apply(&mut t.button, self.button.as_ref());
        apply(&mut t.modal_warning, self.modal_warning.as_ref());
        apply(&mut t.modal_info, self.modal_info.as_ref());
        apply(&mut t.modal_confirm, self.modal_confirm.as_ref());
        t
    }
}

/// Parse a colour from a config string: a named colour (`"cyan"`,
/// `"dark_gray"`, case-insensitive) or an `rgb(r, g, b)` triple.
fn parse_color(s: &str) -> Option<Color> {
    let normalized = s.trim().to_lowercase().replace(['_', '-'], "");

    if let Some(args) = normalized.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let mut parts = args.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        return Some(Color::Rgb(r, g, b));
    }

    match normalized.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_has_expected_colors() {
        let t = Theme::default();
        assert_eq!(t.border_focused, Color::Cyan);
        assert_eq!(t.task_done, Color::DarkGray);
        assert_eq!(t.text_primary, Color::White);
    }

    #[test]
    fn completed_task_style_is_struck_through_and_muted() {
        let t = Theme::default();
        let style = t.task_style(true);
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn active_task_style_is_plain() {
        let t = Theme::default();
        let style = t.task_style(false);
        assert_eq!(style.fg, Some(Color::White));
        assert!(!style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn parse_named_colors() {
        assert_eq!(parse_color("cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("dark_gray"), Some(Color::DarkGray));
        assert_eq!(parse_color("DarkGray"), Some(Color::DarkGray));
        assert_eq!(parse_color("light-red"), Some(Color::LightRed));
        assert_eq!(parse_color("nope"), None);
    }

    #[test]
    fn parse_rgb_color() {
        assert_eq!(
            parse_color("rgb(255, 165, 0)"),
            Some(Color::Rgb(255, 165, 0))
        );
        assert_eq!(parse_color("rgb(0,0,0)"), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(parse_color("rgb(256,0,0)"), None); // overflow
        assert_eq!(parse_color("rgb(1,2)"), None); // too few
        assert_eq!(parse_color("rgb(1,2,3,4)"), None); // too many
    }

    #[test]
    fn theme_config_overrides() {
        let cfg = ThemeConfig {
            border_focused: Some("red".into()),
            task_done: Some("rgb(100, 100, 100)".into()),
            modal_warning: Some("not a color".into()),
            ..Default::default()
        };
        let t = cfg.build();
        assert_eq!(t.border_focused, Color::Red);
        assert_eq!(t.task_done, Color::Rgb(100, 100, 100));
        // Unparsable and non-overridden fields keep defaults
        assert_eq!(t.modal_warning, Color::Yellow);
        assert_eq!(t.text_primary, Color::White);
    }
}
