use shl_api::color::Rgb;
use shl_api::playoffs::TeamColor;
use tui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Accent,
    Dim,
    Winner,
    Loser,
    Selected,
}

pub fn resolve(tone: Tone) -> Style {
    match tone {
        Tone::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Tone::Dim => Style::default().fg(Color::Indexed(240)),
        Tone::Winner => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Tone::Loser => Style::default().fg(Color::DarkGray),
        Tone::Selected => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    }
}

/// Terminal color for an index hex color; unparseable input is black.
pub fn hex_color(raw: &str) -> Color {
    let Rgb { r, g, b } = Rgb::parse(raw).unwrap_or_default();
    Color::Rgb(r, g, b)
}

/// Team color as background with readable text on top.
pub fn team_style(color: &TeamColor) -> Style {
    let fg = if color.is_dark { Color::White } else { Color::Black };
    Style::default().bg(hex_color(&color.background)).fg(fg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_map_to_rgb() {
        assert_eq!(hex_color("#DDD"), Color::Rgb(0xDD, 0xDD, 0xDD));
        assert_eq!(hex_color("garbage"), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn dark_team_color_gets_white_text() {
        let style = team_style(&TeamColor { background: "#002D62".into(), is_dark: true });
        assert_eq!(style.fg, Some(Color::White));
        assert_eq!(style.bg, Some(Color::Rgb(0x00, 0x2D, 0x62)));
    }

    #[test]
    fn light_fallback_gets_black_text() {
        let style = team_style(&TeamColor { background: "#BBB".into(), is_dark: false });
        assert_eq!(style.fg, Some(Color::Black));
    }
}
