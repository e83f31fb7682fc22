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

//! Splitting the payload into runs of a single encoding mode.
//!
//! The split minimizes the total amount of bits needed. Costs are tracked in
//! sixths of a bit, so numeric (10 bits per 3 digits) and alphanumeric (11
//! bits per 2 characters) runs can be compared exactly.

use crate::error_correction::ErrorCorrectionLevel;
use crate::qr_version::Version;

const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum EncodingMode {
    Numeric,
    Alphanumeric,
    Byte,
}

impl EncodingMode {
    const ALL: [EncodingMode; 3] = [
        EncodingMode::Numeric,
        EncodingMode::Alphanumeric,
        EncodingMode::Byte,
    ];

    pub fn mode_indicator(self) -> u32 {
        match self {
            EncodingMode::Numeric => 0b0001,
            EncodingMode::Alphanumeric => 0b0010,
            EncodingMode::Byte => 0b0100,
        }
    }

    pub fn can_encode(self, byte: u8) -> bool {
        match self {
            EncodingMode::Numeric => byte.is_ascii_digit(),
            EncodingMode::Alphanumeric => alphanumeric_value(byte).is_some(),
            EncodingMode::Byte => true,
        }
    }

    /// Bits needed for `count` characters, without mode and count indicator
    pub fn payload_bit_len(self, count: usize) -> usize {
        match self {
            EncodingMode::Numeric => {
                10 * (count / 3)
                    + match count % 3 {
                        0 => 0,
                        1 => 4,
                        _ => 7,
                    }
            }
            EncodingMode::Alphanumeric => 11 * (count / 2) + 6 * (count % 2),
            EncodingMode::Byte => 8 * count,
        }
    }

    fn sixths_per_character(self) -> usize {
        match self {
            EncodingMode::Numeric => 20,
            EncodingMode::Alphanumeric => 33,
            EncodingMode::Byte => 48,
        }
    }
}

/// Position of a character in the alphanumeric character set
pub fn alphanumeric_value(byte: u8) -> Option<u32> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&c| c == byte)
        .map(|index| index as u32)
}

/// A run of payload bytes encoded in a single mode
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Segment<'a> {
    pub mode: EncodingMode,
    pub data: &'a [u8],
}

impl Segment<'_> {
    pub fn char_count(&self) -> usize {
        self.data.len()
    }

    /// Total bits of this segment including its header, or `None` if the
    /// character count does not fit the count indicator of this version
    pub fn bit_len(&self, version: Version) -> Option<usize> {
        let count_bits = version.character_count_indicator_bit_length(self.mode);
        if self.char_count() >= 1 << count_bits {
            return None;
        }
        Some(4 + count_bits + self.mode.payload_bit_len(self.char_count()))
    }
}

/// Bits needed for the whole segment list, or `None` if any segment is too long
pub fn total_bit_len(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .map(|segment| segment.bit_len(version))
        .sum()
}

fn round_up_to_bit(sixths: usize) -> usize {
    (sixths + 5) / 6 * 6
}

/// Splits `data` into segments with minimal encoded length for `version`
///
/// Ties are resolved towards numeric, then alphanumeric, then byte mode.
pub fn segment(data: &[u8], version: Version) -> Vec<Segment<'_>> {
    if data.is_empty() {
        return Vec::new();
    }

    let header_cost = EncodingMode::ALL
        .map(|mode| (4 + version.character_count_indicator_bit_length(mode)) * 6);
    let mode_index = |mode: EncodingMode| mode as usize;

    // cost[m]: cheapest encoding of the prefix ending in the current byte with mode m
    let mut cost: [Option<usize>; 3] = [None; 3];
    for mode in EncodingMode::ALL {
        if mode.can_encode(data[0]) {
            cost[mode_index(mode)] =
                Some(header_cost[mode_index(mode)] + mode.sixths_per_character());
        }
    }

    let mut previous_mode: Vec<[usize; 3]> = Vec::with_capacity(data.len());
    previous_mode.push([0; 3]);

    for &byte in &data[1..] {
        let mut next_cost: [Option<usize>; 3] = [None; 3];
        let mut next_previous = [0; 3];
        for mode in EncodingMode::ALL.iter().filter(|mode| mode.can_encode(byte)) {
            let m = mode_index(*mode);
            for (p, previous_cost) in cost.iter().enumerate() {
                let previous_cost = match previous_cost {
                    Some(previous_cost) => *previous_cost,
                    None => continue,
                };
                let candidate = if p == m {
                    previous_cost + mode.sixths_per_character()
                } else {
                    round_up_to_bit(previous_cost) + header_cost[m] + mode.sixths_per_character()
                };
                if next_cost[m].map_or(true, |current| candidate < current) {
                    next_cost[m] = Some(candidate);
                    next_previous[m] = p;
                }
            }
        }
        cost = next_cost;
        previous_mode.push(next_previous);
    }

    // Byte mode accepts everything, so at least one cost is always known
    let mut mode = (0..3)
        .filter_map(|m| cost[m].map(|c| (c, m)))
        .min()
        .map_or(2, |(_, m)| m);

    let mut modes = vec![EncodingMode::Byte; data.len()];
    for index in (0..data.len()).rev() {
        modes[index] = EncodingMode::ALL[mode];
        mode = previous_mode[index][mode];
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for end in 1..=data.len() {
        if end == data.len() || modes[end] != modes[start] {
            segments.push(Segment {
                mode: modes[start],
                data: &data[start..end],
            });
            start = end;
        }
    }
    segments
}

/// Finds the smallest version of `versions` that holds `data`
///
/// Returns the version together with the segmentation for that version.
pub fn select_version(
    data: &[u8],
    versions: impl Iterator<Item = Version>,
    error_correction: ErrorCorrectionLevel,
) -> Option<(Version, Vec<Segment<'_>>)> {
    let mut cached: Option<(usize, Vec<Segment>)> = None;
    for version in versions {
        let class = version.character_count_class();
        let segments = match cached.take() {
            Some((cached_class, segments)) if cached_class == class => segments,
            _ => segment(data, version),
        };
        if let Some(bit_len) = total_bit_len(&segments, version) {
            if bit_len <= version.data_codeword_bit_len(error_correction) {
                return Some((version, segments));
            }
        }
        cached = Some((class, segments));
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::error_correction::ErrorCorrectionLevel;
    use crate::qr_version::Version;
    use crate::segment::{segment, select_version, total_bit_len, EncodingMode, Segment};

    fn modes<'a>(segments: &[Segment<'a>]) -> Vec<(EncodingMode, &'a str)> {
        segments
            .iter()
            .map(|s| (s.mode, std::str::from_utf8(s.data).unwrap()))
            .collect()
    }

    #[test]
    fn numeric_run_followed_by_letters() {
        let segments = segment(b"0123456789ABCDEF", Version::MIN);
        assert_eq!(
            modes(&segments),
            [
                (EncodingMode::Numeric, "0123456789"),
                (EncodingMode::Alphanumeric, "ABCDEF")
            ]
        );
    }

    #[test]
    fn long_digit_run_inside_bytes() {
        let segments = segment(b"a1234567b", Version::MIN);
        assert_eq!(
            modes(&segments),
            [
                (EncodingMode::Byte, "a"),
                (EncodingMode::Numeric, "1234567"),
                (EncodingMode::Byte, "b")
            ]
        );
    }

    #[test]
    fn short_digit_run_stays_in_bytes() {
        let segments = segment(b"a12b", Version::MIN);
        assert_eq!(modes(&segments), [(EncodingMode::Byte, "a12b")]);
    }

    #[test]
    fn uppercase_url() {
        let segments = segment(b"HTTPS://EXAMPLE.COM/123456789012", Version::MIN);
        assert_eq!(
            modes(&segments),
            [
                (EncodingMode::Alphanumeric, "HTTPS://EXAMPLE.COM/"),
                (EncodingMode::Numeric, "123456789012")
            ]
        );
    }

    #[test]
    fn empty() {
        assert!(segment(b"", Version::MIN).is_empty());
        let (version, segments) =
            select_version(b"", Version::all(), ErrorCorrectionLevel::High).unwrap();
        assert_eq!(version, Version::MIN);
        assert!(segments.is_empty());
    }

    #[test]
    fn digits_use_numeric_bit_length() {
        for len in 1..40 {
            let data = "7".repeat(len);
            let segments = segment(data.as_bytes(), Version::MIN);
            assert_eq!(segments.len(), 1);
            assert_eq!(segments[0].mode, EncodingMode::Numeric);
            let expected = 10 * (len / 3) + [0, 4, 7][len % 3];
            assert_eq!(
                total_bit_len(&segments, Version::MIN),
                Some(4 + 10 + expected)
            );
        }
    }

    #[test]
    fn mixed_content_picks_version_2() {
        let (version, segments) = select_version(
            b"ABCDEF0123456789abc",
            Version::all(),
            ErrorCorrectionLevel::Medium,
        )
        .unwrap();
        assert_eq!(version.number(), 2);
        assert_eq!(
            modes(&segments),
            [
                (EncodingMode::Alphanumeric, "ABCDEF"),
                (EncodingMode::Numeric, "0123456789"),
                (EncodingMode::Byte, "abc")
            ]
        );
        assert_eq!(total_bit_len(&segments, version), Some(130));
    }

    #[test]
    fn url_at_high_needs_version_3() {
        let (version, segments) = select_version(
            b"https://example.com",
            Version::all(),
            ErrorCorrectionLevel::High,
        )
        .unwrap();
        assert_eq!(version.number(), 3);
        assert_eq!(modes(&segments), [(EncodingMode::Byte, "https://example.com")]);
        assert_eq!(total_bit_len(&segments, version), Some(164));
    }

    #[test]
    fn count_indicator_overflow() {
        let data = vec![b'a'; 256];
        let segments = segment(&data, Version::MIN);
        assert_eq!(total_bit_len(&segments, Version::MIN), None);
    }

    #[test]
    fn too_long() {
        let data = "9".repeat(7090);
        assert!(
            select_version(data.as_bytes(), Version::all(), ErrorCorrectionLevel::Low).is_none()
        );
        let data = "9".repeat(7089);
        let (version, _) =
            select_version(data.as_bytes(), Version::all(), ErrorCorrectionLevel::Low).unwrap();
        assert_eq!(version, Version::MAX);
    }
}
