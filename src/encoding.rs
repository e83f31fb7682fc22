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

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::error_correction::ErrorCorrectionLevel;
use crate::qr_version::Version;
use crate::segment::{self, alphanumeric_value, EncodingMode, Segment};
use tracing::debug;

#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum VersionRestriction {
    MaxVersion(Version),
    SpecificVersion(Version),
}

impl VersionRestriction {
    fn candidates(self) -> impl Iterator<Item = Version> {
        let (min, max) = match self {
            VersionRestriction::MaxVersion(version) => (Version::MIN, version),
            VersionRestriction::SpecificVersion(version) => (version, version),
        };
        Version::all().filter(move |version| (min..=max).contains(version))
    }
}

impl Default for VersionRestriction {
    fn default() -> Self {
        VersionRestriction::MaxVersion(Version::MAX)
    }
}

#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum ErrorCorrectionRestriction {
    MinErrorCorrection(ErrorCorrectionLevel),
    SpecificErrorCorrection(ErrorCorrectionLevel),
}

impl ErrorCorrectionRestriction {
    fn to_error_correction(self) -> ErrorCorrectionLevel {
        match self {
            ErrorCorrectionRestriction::MinErrorCorrection(error_correction) => error_correction,
            ErrorCorrectionRestriction::SpecificErrorCorrection(error_correction) => {
                error_correction
            }
        }
    }
}

impl Default for ErrorCorrectionRestriction {
    fn default() -> Self {
        ErrorCorrectionRestriction::SpecificErrorCorrection(ErrorCorrectionLevel::Medium)
    }
}

/// Selects version and error correction level, then encodes the data codewords
pub fn encode_data(
    version_restriction: VersionRestriction,
    error_correction_restriction: ErrorCorrectionRestriction,
    data: &[u8],
) -> Result<EncodedData> {
    let min_error_correction = error_correction_restriction.to_error_correction();
    let (version, segments) = segment::select_version(
        data,
        version_restriction.candidates(),
        min_error_correction,
    )
    .ok_or(Error::DataTooLong {
        len: data.len(),
        level: min_error_correction,
    })?;

    let bit_len = segment::total_bit_len(&segments, version).unwrap_or_default();

    // Try to increase the error correction while the data still fits and it is allowed by the restriction
    let error_correction = match error_correction_restriction {
        ErrorCorrectionRestriction::MinErrorCorrection(min_error_correction) => {
            let mut selected_error_correction = min_error_correction;
            while let Some(increased_error_correction) = selected_error_correction.increment() {
                if version.data_codeword_bit_len(increased_error_correction) >= bit_len {
                    selected_error_correction = increased_error_correction;
                } else {
                    break;
                }
            }
            selected_error_correction
        }
        ErrorCorrectionRestriction::SpecificErrorCorrection(error_correction) => error_correction,
    };

    debug!(
        version = version.number(),
        ?error_correction,
        bit_len,
        segments = ?segments.iter().map(|s| (s.mode, s.char_count())).collect::<Vec<_>>(),
        "Selected symbol size"
    );

    let encoder = DataEncoder {
        version,
        error_correction,
    };
    Ok(EncodedData {
        version,
        error_correction,
        buffer: encoder.encode(&segments),
    })
}

pub struct DataEncoder {
    pub(crate) version: Version,
    pub(crate) error_correction: ErrorCorrectionLevel,
}

impl DataEncoder {
    fn encode_mode_indicator(&self, mode: EncodingMode, buffer: &mut Buffer) {
        buffer.append_number(mode.mode_indicator(), 4)
    }

    fn encode_character_count_indicator(
        &self,
        mode: EncodingMode,
        count: usize,
        buffer: &mut Buffer,
    ) {
        let bit_len = self.version.character_count_indicator_bit_length(mode);
        buffer.append_number(count as u32, bit_len);
    }

    fn encode_numeric(data: &[u8], buffer: &mut Buffer) {
        for chunk in data.chunks(3) {
            let number = chunk
                .iter()
                .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'));
            let bit_len = match chunk.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            buffer.append_number(number, bit_len);
        }
    }

    fn encode_alphanumeric(data: &[u8], buffer: &mut Buffer) {
        for chunk in data.chunks(2) {
            let values: Vec<u32> = chunk
                .iter()
                .map(|&c| alphanumeric_value(c).unwrap_or_default())
                .collect();
            match values.as_slice() {
                [first, second] => buffer.append_number(45 * first + second, 11),
                [single] => buffer.append_number(*single, 6),
                _ => {}
            }
        }
    }

    fn encode_segment(&self, segment: &Segment, buffer: &mut Buffer) {
        self.encode_mode_indicator(segment.mode, buffer);
        self.encode_character_count_indicator(segment.mode, segment.char_count(), buffer);
        match segment.mode {
            EncodingMode::Numeric => Self::encode_numeric(segment.data, buffer),
            EncodingMode::Alphanumeric => Self::encode_alphanumeric(segment.data, buffer),
            EncodingMode::Byte => buffer.append_bytes(segment.data),
        }
    }

    fn encode_terminator(&self, buffer: &mut Buffer) {
        let max_data_bit_len = self.version.data_codeword_bit_len(self.error_correction);

        let buffer_bit_len = buffer.bit_len();
        if max_data_bit_len - buffer_bit_len < 4 {
            buffer.append_number(0, max_data_bit_len - buffer_bit_len)
        } else {
            let alignment = (8 - (buffer_bit_len + 4) % 8) % 8;
            buffer.append_number(0, 4 + alignment)
        }
    }

    fn encode_padding(&self, buffer: &mut Buffer) {
        let max_data_bit_len = self.version.data_codeword_bit_len(self.error_correction);
        for &pad in [0b1110_1100, 0b0001_0001].iter().cycle() {
            if buffer.bit_len() >= max_data_bit_len {
                break;
            }
            buffer.append_byte(pad);
        }
    }

    pub fn encode(&self, segments: &[Segment]) -> Buffer {
        let mut buffer = Buffer::new();
        for segment in segments {
            self.encode_segment(segment, &mut buffer);
        }
        self.encode_terminator(&mut buffer);
        self.encode_padding(&mut buffer);
        buffer
    }
}

/// Data codewords together with the symbol parameters they were encoded for
pub struct EncodedData {
    pub(crate) version: Version,
    pub(crate) error_correction: ErrorCorrectionLevel,
    pub(crate) buffer: Buffer,
}
