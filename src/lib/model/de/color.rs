//! Parser & deserializer for the Color type.

use std::fmt;
use std::str::FromStr;

use css_color_parser::Color as CssColor;
use serde::de::{self, Deserialize, Visitor};
use thiserror::Error;

use super::super::Color;


const CHANNELS: &[&str] = &["r", "g", "b"];
const EXPECTING_MSG: &str = "color string or array/map of RGB values";


impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse the color from a string.
    ///
    /// Accepted forms are `R,G,B` and `R G B` decimal triples,
    /// CSS color names and functions, and hex RGB numbers
    /// with `#`, `0x`, or `$` prefix.
    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let s = v.trim().to_lowercase();
        if let Some(color) = parse_triple(&s) {
            return Ok(color);
        }

        // Non-CSS prefixes are only allowed in front of full 24-bit hex numbers.
        let mut s = s;
        for &prefix in ["0x", "$"].iter() {
            if s.starts_with(prefix) {
                let hex = s.trim_start_matches(prefix);
                if hex.len() != 6 {
                    return Err(ColorParseError::Css(v.trim().to_owned()));
                }
                s = format!("#{}", hex);
                break;
            }
        }

        let css_color: CssColor = s.parse()
            .map_err(|_| ColorParseError::Css(v.trim().to_owned()))?;
        if css_color.a != 1.0 {
            return Err(ColorParseError::Alpha(css_color.a));
        }
        Ok(Color(css_color.r, css_color.g, css_color.b))
    }
}

/// Parse a decimal `R,G,B` or `R G B` triple.
fn parse_triple(s: &str) -> Option<Color> {
    let parts: Vec<&str> = if s.contains(',') {
        s.split(',').map(|p| p.trim()).collect()
    } else {
        s.split_whitespace().collect()
    };
    if parts.len() != CHANNELS.len() {
        return None;
    }
    let mut channels = parts.into_iter().map(|p| p.parse::<u8>().ok());
    Some(Color(channels.next()??, channels.next()??, channels.next()??))
}


/// Error that may occur while parsing a Color.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ColorParseError {
    /// String is neither an RGB triple nor a valid CSS color.
    #[error("invalid color `{0}` (expected R,G,B or a CSS color)")]
    Css(String),
    /// The color erroneously includes an alpha channel value.
    #[error("color transparency not supported (alpha = {0})")]
    Alpha(f32),
}


impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;
impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Color::from_str(v).map_err(|e| {
            warn!("Failed to parse color `{}`: {}", v, e);
            E::custom(e)
        })
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where A: de::SeqAccess<'de>
    {
        let expected_len = &"3";
        if let Some(size) = seq.size_hint() {
            if size != CHANNELS.len() {
                return Err(de::Error::invalid_length(size, expected_len));
            }
        }

        let mut channels = [0u8; 3];
        let mut count = 0;
        while let Some(value) = seq.next_element::<u8>()? {
            if count == CHANNELS.len() {
                return Err(de::Error::invalid_length(count + 1, expected_len));
            }
            channels[count] = value;
            count += 1;
        }
        if count != CHANNELS.len() {
            return Err(de::Error::invalid_length(count, expected_len));
        }
        Ok(Color(channels[0], channels[1], channels[2]))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where A: de::MapAccess<'de>
    {
        let mut channels: [Option<u8>; 3] = [None, None, None];
        while let Some(key) = map.next_key::<String>()? {
            let index = match key.trim().to_lowercase().as_str() {
                "r" | "red" => 0,
                "g" | "green" => 1,
                "b" | "blue" => 2,
                _ => return Err(de::Error::unknown_field(&key, CHANNELS)),
            };
            if channels[index].is_some() {
                return Err(de::Error::duplicate_field(CHANNELS[index]));
            }
            channels[index] = Some(map.next_value()?);
        }

        let channel = |i: usize| channels[i].ok_or_else(|| de::Error::missing_field(CHANNELS[i]));
        Ok(Color(channel(0)?, channel(1)?, channel(2)?))
    }
}
