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

use crate::capacity;
use crate::error::{Error, Result};
use crate::error_correction::ErrorCorrectionLevel;
use crate::segment::EncodingMode;

pub const fn version_to_size(version: u8) -> usize {
    version as usize * 4 + 17
}

#[rustfmt::skip]
const ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// Size of a QR code symbol, ranging from 1 (21x21 modules) to 40 (177x177 modules)
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct Version {
    pub(crate) version: u8,
}

impl Version {
    pub const MIN: Version = Version { version: 1 };
    pub const MAX: Version = Version { version: 40 };

    pub fn new(version: u8) -> Result<Self> {
        if (Self::MIN.version..=Self::MAX.version).contains(&version) {
            Ok(Self { version })
        } else {
            Err(Error::UnsupportedVersion(version))
        }
    }

    /// Iterates all versions from the smallest to the largest
    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.version..=Self::MAX.version).map(|version| Version { version })
    }

    pub fn number(self) -> u8 {
        self.version
    }

    pub(crate) fn index(self) -> usize {
        self.version as usize - 1
    }

    pub fn increment(self) -> Option<Self> {
        if self < Self::MAX {
            Some(Self {
                version: self.version + 1,
            })
        } else {
            None
        }
    }

    pub const fn width(&self) -> usize {
        version_to_size(self.version)
    }

    /// Versions sharing a class use the same character count indicator lengths
    pub(crate) fn character_count_class(&self) -> usize {
        match self.version {
            0..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    pub fn character_count_indicator_bit_length(&self, encoding: EncodingMode) -> usize {
        let lengths = match encoding {
            EncodingMode::Numeric => [10, 12, 14],
            EncodingMode::Alphanumeric => [9, 11, 13],
            EncodingMode::Byte => [8, 16, 16],
        };
        lengths[self.character_count_class()]
    }

    pub fn total_codeword_count(&self) -> usize {
        match self.version {
            1 => 26,
            2 => 44,
            3 => 70,
            4 => 100,
            5 => 134,
            6 => 172,
            7 => 196,
            8 => 242,
            9 => 292,
            10 => 346,
            11 => 404,
            12 => 466,
            13 => 532,
            14 => 581,
            15 => 655,
            16 => 733,
            17 => 815,
            18 => 901,
            19 => 991,
            20 => 1085,
            21 => 1156,
            22 => 1258,
            23 => 1364,
            24 => 1474,
            25 => 1588,
            26 => 1706,
            27 => 1828,
            28 => 1921,
            29 => 2051,
            30 => 2185,
            31 => 2323,
            32 => 2465,
            33 => 2611,
            34 => 2761,
            35 => 2876,
            36 => 3034,
            37 => 3196,
            38 => 3362,
            39 => 3532,
            _ => 3706,
        }
    }

    pub fn data_codeword_count(&self, error_correction: ErrorCorrectionLevel) -> usize {
        capacity::data_codeword_count(*self, error_correction)
    }

    pub fn data_codeword_bit_len(&self, error_correction: ErrorCorrectionLevel) -> usize {
        self.data_codeword_count(error_correction) * 8
    }

    pub fn error_correction_codeword_count(&self, error_correction: ErrorCorrectionLevel) -> usize {
        capacity::ec_codeword_count(*self, error_correction)
    }

    /// Row and column coordinates of the alignment pattern centers
    pub fn alignment_pattern_positions(&self) -> &'static [usize] {
        ALIGNMENT_PATTERN_POSITIONS[self.index()]
    }

    /// Versions 7 and up carry two copies of the version information
    pub fn has_version_information(&self) -> bool {
        self.version >= 7
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::qr_version::Version;
    use crate::segment::EncodingMode;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(matches!(Version::new(0), Err(Error::UnsupportedVersion(0))));
        assert!(matches!(
            Version::new(41),
            Err(Error::UnsupportedVersion(41))
        ));
        assert_eq!(Version::new(40).unwrap(), Version::MAX);
    }

    #[test]
    fn width() {
        assert_eq!(Version::MIN.width(), 21);
        assert_eq!(Version::new(7).unwrap().width(), 45);
        assert_eq!(Version::MAX.width(), 177);
    }

    #[test]
    fn increment() {
        assert_eq!(Version::MAX.increment(), None);
        assert_eq!(Version::MIN.increment(), Some(Version::new(2).unwrap()));
        assert_eq!(Version::all().count(), 40);
    }

    #[test]
    fn character_count_bits() {
        let v9 = Version::new(9).unwrap();
        let v10 = Version::new(10).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(v9.character_count_indicator_bit_length(EncodingMode::Numeric), 10);
        assert_eq!(v10.character_count_indicator_bit_length(EncodingMode::Numeric), 12);
        assert_eq!(v27.character_count_indicator_bit_length(EncodingMode::Numeric), 14);
        assert_eq!(v9.character_count_indicator_bit_length(EncodingMode::Alphanumeric), 9);
        assert_eq!(v10.character_count_indicator_bit_length(EncodingMode::Alphanumeric), 11);
        assert_eq!(v27.character_count_indicator_bit_length(EncodingMode::Alphanumeric), 13);
        assert_eq!(v9.character_count_indicator_bit_length(EncodingMode::Byte), 8);
        assert_eq!(v10.character_count_indicator_bit_length(EncodingMode::Byte), 16);
        assert_eq!(v27.character_count_indicator_bit_length(EncodingMode::Byte), 16);
    }

    #[test]
    fn total_codewords_match_module_count() {
        for version in Version::all() {
            let v = version.number() as usize;
            let mut raw = (16 * v + 128) * v + 64;
            if v >= 2 {
                let n = v / 7 + 2;
                raw -= (25 * n - 10) * n - 55;
                if v >= 7 {
                    raw -= 36;
                }
            }
            assert_eq!(version.total_codeword_count(), raw / 8);
        }
    }

    #[test]
    fn alignment_positions() {
        assert!(Version::MIN.alignment_pattern_positions().is_empty());
        assert_eq!(
            Version::new(2).unwrap().alignment_pattern_positions(),
            [6, 18]
        );
        assert_eq!(
            Version::MAX.alignment_pattern_positions(),
            [6, 30, 58, 86, 114, 142, 170]
        );
        for version in Version::all() {
            if let Some(&last) = version.alignment_pattern_positions().last() {
                assert_eq!(last, version.width() - 7);
            }
        }
    }
}
