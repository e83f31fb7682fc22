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

use crate::error_correction::ErrorCorrectionLevel;
use crate::mask::MaskPattern;
use crate::qr_version::Version;

pub struct FormatEncoder {
    pub(crate) error_correction_level: ErrorCorrectionLevel,
    pub(crate) mask_pattern: MaskPattern,
}

impl FormatEncoder {
    /// BCH(15,5) code words, already XORed with 0x5412
    const MASKED_SEQUENCES: [u16; 32] = [
        0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, 0x77c4, 0x72f3, 0x7daa,
        0x789d, 0x662f, 0x6318, 0x6c41, 0x6976, 0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255,
        0x0d0c, 0x083b, 0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed,
    ];

    pub fn encode(&self) -> u16 {
        let error_correction_level = self.error_correction_level.format_bits();
        let data = (error_correction_level << 3) | self.mask_pattern.reference();
        Self::MASKED_SEQUENCES[data as usize]
    }
}

/// BCH(18,6) encoded version number, for versions 7 and up
pub fn version_information(version: Version) -> Option<u32> {
    let bits = match version.number() {
        7 => 0x07c94,
        8 => 0x085bc,
        9 => 0x09a99,
        10 => 0x0a4d3,
        11 => 0x0bbf6,
        12 => 0x0c762,
        13 => 0x0d847,
        14 => 0x0e60d,
        15 => 0x0f928,
        16 => 0x10b78,
        17 => 0x1145d,
        18 => 0x12a17,
        19 => 0x13532,
        20 => 0x149a6,
        21 => 0x15683,
        22 => 0x168c9,
        23 => 0x177ec,
        24 => 0x18ec4,
        25 => 0x191e1,
        26 => 0x1afab,
        27 => 0x1b08e,
        28 => 0x1cc1a,
        29 => 0x1d33f,
        30 => 0x1ed75,
        31 => 0x1f250,
        32 => 0x209d5,
        33 => 0x216f0,
        34 => 0x228ba,
        35 => 0x2379f,
        36 => 0x24b0b,
        37 => 0x2542e,
        38 => 0x26a64,
        39 => 0x27541,
        40 => 0x28c69,
        _ => return None,
    };
    Some(bits)
}
