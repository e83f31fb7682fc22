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

use crate::blocks::BlockLengthIterator;
use crate::encoding::EncodedData;
use crate::error::Error;
use crate::qr_version::Version;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Qr codes use Reed–Solomon error correction
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    /// Allows recovery of 7% of missing data
    #[serde(rename = "L", alias = "low", alias = "Low")]
    Low,
    /// Allows recovery of 15% of missing data
    #[serde(rename = "M", alias = "medium", alias = "Medium")]
    Medium,
    /// Allows recovery of 25% of missing data
    #[serde(rename = "Q", alias = "quartile", alias = "Quartile")]
    Quartile,
    /// Allows recovery of 30% of missing data
    #[serde(rename = "H", alias = "high", alias = "High")]
    High,
}

impl ErrorCorrectionLevel {
    pub fn increment(self) -> Option<Self> {
        match self {
            ErrorCorrectionLevel::Low => Some(ErrorCorrectionLevel::Medium),
            ErrorCorrectionLevel::Medium => Some(ErrorCorrectionLevel::Quartile),
            ErrorCorrectionLevel::Quartile => Some(ErrorCorrectionLevel::High),
            ErrorCorrectionLevel::High => None,
        }
    }

    /// The two bits identifying the level in the format information
    pub(crate) fn format_bits(self) -> u8 {
        match self {
            ErrorCorrectionLevel::Low => 0b01,
            ErrorCorrectionLevel::Medium => 0b00,
            ErrorCorrectionLevel::Quartile => 0b11,
            ErrorCorrectionLevel::High => 0b10,
        }
    }

    /// Fraction of the symbol that can be damaged while still decoding
    pub fn recovery_fraction(self) -> f64 {
        match self {
            ErrorCorrectionLevel::Low => 0.07,
            ErrorCorrectionLevel::Medium => 0.15,
            ErrorCorrectionLevel::Quartile => 0.25,
            ErrorCorrectionLevel::High => 0.30,
        }
    }
}

impl Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorCorrectionLevel::Low => "L",
            ErrorCorrectionLevel::Medium => "M",
            ErrorCorrectionLevel::Quartile => "Q",
            ErrorCorrectionLevel::High => "H",
        })
    }
}

impl FromStr for ErrorCorrectionLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ErrorCorrectionLevel::Low),
            "m" | "medium" => Ok(ErrorCorrectionLevel::Medium),
            "q" | "quartile" => Ok(ErrorCorrectionLevel::Quartile),
            "h" | "high" => Ok(ErrorCorrectionLevel::High),
            _ => Err(Error::UnsupportedEcc(s.to_string())),
        }
    }
}

pub struct ErrorCorrectionEncoder {
    pub(crate) version: Version,
    pub(crate) error_correction: ErrorCorrectionLevel,
}

impl ErrorCorrectionEncoder {
    /// Appends the error correction codewords of every block, in block order
    pub fn encode(&self, data: &EncodedData) -> ErrorCorrectedData {
        let mut codewords = data.buffer.data();
        for block in BlockLengthIterator::new(self.version, self.error_correction) {
            let encoder = reed_solomon::Encoder::new(block.ecc_len);
            let ecc_buffer =
                encoder.encode(&codewords[block.data_pos..block.data_pos + block.data_len]);
            codewords.extend_from_slice(ecc_buffer.ecc());
        }
        ErrorCorrectedData {
            version: self.version,
            error_correction: self.error_correction,
            codewords,
        }
    }
}

/// Data codewords of all blocks followed by the error correction codewords of all blocks
pub struct ErrorCorrectedData {
    pub(crate) version: Version,
    pub(crate) error_correction: ErrorCorrectionLevel,
    pub(crate) codewords: Vec<u8>,
}
