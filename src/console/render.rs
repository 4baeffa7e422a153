use std::{fmt, str::FromStr};

use tui::style::Color;

use super::error::{Error, Result};

/// horizontal anchor of a text entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Center,
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            "center" => Ok(Side::Center),
            other => Err(Error::invalid_argument(format!("unknown side `{}`", other))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Center => "center",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self { Self { x, y } }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub face: &'static str,
    pub color: Color,
    pub bold: bool,
    pub font_size: f32,
}

/// Drawing capability the console model is handed. Positions are in
/// content coordinates; `translate_layer` moves all entries at once.
pub trait Renderer {
    type Handle: Copy + fmt::Debug;

    fn create_text_entry(
        &mut self,
        text: &str,
        style: &TextStyle,
        alignment: Side,
        position: Position,
    ) -> Self::Handle;

    fn update_text(&mut self, handle: Self::Handle, text: &str);

    fn move_entry(&mut self, handle: Self::Handle, position: Position);

    fn translate_layer(&mut self, dy: f32);
}

/// Parses `#rrggbb` hex colors and the basic terminal color names.
pub fn parse_color(color: &str) -> Result<Color> {
    if let Some(hex) = color.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::invalid_argument(format!("bad hex color `{}`", color)));
        }

        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        };

        return match (hex.len(), channel(0..2), channel(2..4), channel(4..6)) {
            (6, Some(r), Some(g), Some(b)) => Ok(Color::Rgb(r, g, b)),
            _ => Err(Error::invalid_argument(format!("bad hex color `{}`", color))),
        };
    }

    let named = match color.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => return Err(Error::invalid_argument(format!("unknown color `{}`", color))),
    };

    Ok(named)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_parse_from_their_names() {
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("right".parse::<Side>().unwrap(), Side::Right);
        assert_eq!("center".parse::<Side>().unwrap(), Side::Center);
        assert_eq!(Side::Center.to_string(), "center");
    }

    #[test]
    fn unknown_side_is_an_invalid_argument() {
        let err = "top".parse::<Side>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn hex_colors_parse_to_rgb() {
        assert_eq!(parse_color("#00805A").unwrap(), Color::Rgb(0x00, 0x80, 0x5a));
        assert_eq!(parse_color("#1463a3").unwrap(), Color::Rgb(0x14, 0x63, 0xa3));
    }

    #[test]
    fn named_colors_parse() {
        assert_eq!(parse_color("Grey").unwrap(), Color::Gray);
        assert_eq!(parse_color("red").unwrap(), Color::Red);
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for bad in &["#12345", "#GG0000", "#1234567", "chartreuse", "#ééé", "#+1+2+3"] {
            assert!(
                matches!(parse_color(bad), Err(Error::InvalidArgument(_))),
                "{} should be rejected",
                bad
            );
        }
    }
}
