//! Colours: piece palette by colour id, UI colours, and hex → ratatui Color.

use crate::Palette;
use ratatui::style::Color;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Theme {
    /// Piece colours indexed by colour id - 1 (O, Z, T, S, J, L, I).
    pub pieces: [Color; 7],
    /// Landing preview.
    pub ghost: Color,
    /// Playfield background.
    pub bg: Color,
    /// Borders.
    pub div_line: Color,
    /// Text (score, level).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

const ONEDARK: [&str; 7] = [
    "#E5C07B", // O yellow
    "#E06C75", // Z red
    "#C678DD", // T magenta
    "#98C379", // S green
    "#61AFEF", // J blue
    "#D19A66", // L orange
    "#56B6C2", // I cyan
];

const HIGH_CONTRAST: [&str; 7] = [
    "#FFFF00", "#FF0000", "#FF00FF", "#00FF00", "#0088FF", "#FF8800", "#00FFFF",
];

impl Default for Theme {
    fn default() -> Self {
        Self::for_palette(Palette::Normal)
    }
}

impl Theme {
    pub fn for_palette(palette: Palette) -> Self {
        let (pieces, ghost, bg, div_line, main_fg, title) = match palette {
            Palette::Normal => (ONEDARK, "#5C6370", "#282C34", "#3F444F", "#ABB2BF", "#E5C07B"),
            Palette::HighContrast => {
                (HIGH_CONTRAST, "#808080", "#000000", "#FFFFFF", "#FFFFFF", "#FFFF00")
            }
        };
        Self {
            pieces: pieces.map(hex_or_white),
            ghost: hex_or_white(ghost),
            bg: hex_or_white(bg),
            div_line: hex_or_white(div_line),
            main_fg: hex_or_white(main_fg),
            title: hex_or_white(title),
        }
    }

    /// Colour for a board colour id (1..=7). Out-of-range ids wrap.
    #[inline]
    pub fn piece_color(&self, id: u8) -> Color {
        self.pieces[usize::from(id.saturating_sub(1)) % self.pieces.len()]
    }
}

fn hex_or_white(s: &str) -> Color {
    parse_hex(s).unwrap_or(Color::White)
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
    }

    #[test]
    fn test_piece_color_by_id() {
        let t = Theme::default();
        assert_eq!(t.piece_color(1), Color::Rgb(0xE5, 0xC0, 0x7B));
        assert_eq!(t.piece_color(7), Color::Rgb(0x56, 0xB6, 0xC2));
    }
}
