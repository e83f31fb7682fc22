/* Copyright (C) 2021 Casper Meijn <casper@meijn.net>
 * SPDX-License-Identifier: GPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Conversions between hex notation and RGBA colors

use crate::error::{Error, Result};
use image::Rgba;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Formats as `#rrggbb` with lowercase digits
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parses `#rrggbb`, the `#` is optional and digits may be either case
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    match parse_hex_digits(hex)?.as_slice() {
        &[r, g, b] => Some((r, g, b)),
        _ => None,
    }
}

/// Parses `#rrggbb` or `#rrggbbaa`
pub fn parse_color(hex: &str) -> Result<Rgba<u8>> {
    match parse_hex_digits(hex).as_deref() {
        Some(&[r, g, b]) => Ok(Rgba([r, g, b, 255])),
        Some(&[r, g, b, a]) => Ok(Rgba([r, g, b, a])),
        _ => Err(Error::InvalidColor(hex.to_string())),
    }
}

/// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == u8::MAX {
        rgb_to_hex(r, g, b)
    } else {
        format!("{}{:02x}", rgb_to_hex(r, g, b), a)
    }
}

fn parse_hex_digits(hex: &str) -> Option<Vec<u8>> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect()
}

/// Serde adapter storing an [`Rgba`] color as a hex string
pub mod hex {
    use super::{parse_color, to_hex};
    use image::Rgba;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Rgba<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Rgba<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module, for optional fields
    pub mod option {
        use super::{parse_color, to_hex};
        use image::Rgba;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(color: &Option<Rgba<u8>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match color {
                Some(color) => serializer.serialize_some(&to_hex(*color)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Rgba<u8>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s: Option<String> = Deserialize::deserialize(deserializer)?;
            s.map(|s| parse_color(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
