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

//! Error correction characteristics of every version and error correction level.
//!
//! The values are copied from table 9 of ISO/IEC 18004:2006.

use crate::error_correction::ErrorCorrectionLevel;
use crate::qr_version::Version;

/// A group of equally sized error correction blocks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockGroup {
    pub block_count: usize,
    pub data_codewords_per_block: usize,
    pub ec_codewords_per_block: usize,
}

impl BlockGroup {
    pub fn data_codeword_count(&self) -> usize {
        self.block_count * self.data_codewords_per_block
    }

    pub fn ec_codeword_count(&self) -> usize {
        self.block_count * self.ec_codewords_per_block
    }
}

/// (EC codewords per block, group 1 blocks, group 1 data codewords, group 2 blocks, group 2 data codewords)
type BlockRow = (u8, u8, u8, u8, u8);

// Indexed by version - 1, then by Low, Medium, Quartile, High
#[rustfmt::skip]
const BLOCK_TABLE: [[BlockRow; 4]; 40] = [
    [(7, 1, 19, 0, 0), (10, 1, 16, 0, 0), (13, 1, 13, 0, 0), (17, 1, 9, 0, 0)],
    [(10, 1, 34, 0, 0), (16, 1, 28, 0, 0), (22, 1, 22, 0, 0), (28, 1, 16, 0, 0)],
    [(15, 1, 55, 0, 0), (26, 1, 44, 0, 0), (18, 2, 17, 0, 0), (22, 2, 13, 0, 0)],
    [(20, 1, 80, 0, 0), (18, 2, 32, 0, 0), (26, 2, 24, 0, 0), (16, 4, 9, 0, 0)],
    [(26, 1, 108, 0, 0), (24, 2, 43, 0, 0), (18, 2, 15, 2, 16), (22, 2, 11, 2, 12)],
    [(18, 2, 68, 0, 0), (16, 4, 27, 0, 0), (24, 4, 19, 0, 0), (28, 4, 15, 0, 0)],
    [(20, 2, 78, 0, 0), (18, 4, 31, 0, 0), (18, 2, 14, 4, 15), (26, 4, 13, 1, 14)],
    [(24, 2, 97, 0, 0), (22, 2, 38, 2, 39), (22, 4, 18, 2, 19), (26, 4, 14, 2, 15)],
    [(30, 2, 116, 0, 0), (22, 3, 36, 2, 37), (20, 4, 16, 4, 17), (24, 4, 12, 4, 13)],
    [(18, 2, 68, 2, 69), (26, 4, 43, 1, 44), (24, 6, 19, 2, 20), (28, 6, 15, 2, 16)],
    [(20, 4, 81, 0, 0), (30, 1, 50, 4, 51), (28, 4, 22, 4, 23), (24, 3, 12, 8, 13)],
    [(24, 2, 92, 2, 93), (22, 6, 36, 2, 37), (26, 4, 20, 6, 21), (28, 7, 14, 4, 15)],
    [(26, 4, 107, 0, 0), (22, 8, 37, 1, 38), (24, 8, 20, 4, 21), (22, 12, 11, 4, 12)],
    [(30, 3, 115, 1, 116), (24, 4, 40, 5, 41), (20, 11, 16, 5, 17), (24, 11, 12, 5, 13)],
    [(22, 5, 87, 1, 88), (24, 5, 41, 5, 42), (30, 5, 24, 7, 25), (24, 11, 12, 7, 13)],
    [(24, 5, 98, 1, 99), (28, 7, 45, 3, 46), (24, 15, 19, 2, 20), (30, 3, 15, 13, 16)],
    [(28, 1, 107, 5, 108), (28, 10, 46, 1, 47), (28, 1, 22, 15, 23), (28, 2, 14, 17, 15)],
    [(30, 5, 120, 1, 121), (26, 9, 43, 4, 44), (28, 17, 22, 1, 23), (28, 2, 14, 19, 15)],
    [(28, 3, 113, 4, 114), (26, 3, 44, 11, 45), (26, 17, 21, 4, 22), (26, 9, 13, 16, 14)],
    [(28, 3, 107, 5, 108), (26, 3, 41, 13, 42), (30, 15, 24, 5, 25), (28, 15, 15, 10, 16)],
    [(28, 4, 116, 4, 117), (26, 17, 42, 0, 0), (28, 17, 22, 6, 23), (30, 19, 16, 6, 17)],
    [(28, 2, 111, 7, 112), (28, 17, 46, 0, 0), (30, 7, 24, 16, 25), (24, 34, 13, 0, 0)],
    [(30, 4, 121, 5, 122), (28, 4, 47, 14, 48), (30, 11, 24, 14, 25), (30, 16, 15, 14, 16)],
    [(30, 6, 117, 4, 118), (28, 6, 45, 14, 46), (30, 11, 24, 16, 25), (30, 30, 16, 2, 17)],
    [(26, 8, 106, 4, 107), (28, 8, 47, 13, 48), (30, 7, 24, 22, 25), (30, 22, 15, 13, 16)],
    [(28, 10, 114, 2, 115), (28, 19, 46, 4, 47), (28, 28, 22, 6, 23), (30, 33, 16, 4, 17)],
    [(30, 8, 122, 4, 123), (28, 22, 45, 3, 46), (30, 8, 23, 26, 24), (30, 12, 15, 28, 16)],
    [(30, 3, 117, 10, 118), (28, 3, 45, 23, 46), (30, 4, 24, 31, 25), (30, 11, 15, 31, 16)],
    [(30, 7, 116, 7, 117), (28, 21, 45, 7, 46), (30, 1, 23, 37, 24), (30, 19, 15, 26, 16)],
    [(30, 5, 115, 10, 116), (28, 19, 47, 10, 48), (30, 15, 24, 25, 25), (30, 23, 15, 25, 16)],
    [(30, 13, 115, 3, 116), (28, 2, 46, 29, 47), (30, 42, 24, 1, 25), (30, 23, 15, 28, 16)],
    [(30, 17, 115, 0, 0), (28, 10, 46, 23, 47), (30, 10, 24, 35, 25), (30, 19, 15, 35, 16)],
    [(30, 17, 115, 1, 116), (28, 14, 46, 21, 47), (30, 29, 24, 19, 25), (30, 11, 15, 46, 16)],
    [(30, 13, 115, 6, 116), (28, 14, 46, 23, 47), (30, 44, 24, 7, 25), (30, 59, 16, 1, 17)],
    [(30, 12, 121, 7, 122), (28, 12, 47, 26, 48), (30, 39, 24, 14, 25), (30, 22, 15, 41, 16)],
    [(30, 6, 121, 14, 122), (28, 6, 47, 34, 48), (30, 46, 24, 10, 25), (30, 2, 15, 64, 16)],
    [(30, 17, 122, 4, 123), (28, 29, 46, 14, 47), (30, 49, 24, 10, 25), (30, 24, 15, 46, 16)],
    [(30, 4, 122, 18, 123), (28, 13, 46, 32, 47), (30, 48, 24, 14, 25), (30, 42, 15, 32, 16)],
    [(30, 20, 117, 4, 118), (28, 40, 47, 7, 48), (30, 43, 24, 22, 25), (30, 10, 15, 67, 16)],
    [(30, 19, 118, 6, 119), (28, 18, 47, 31, 48), (30, 34, 24, 34, 25), (30, 20, 15, 61, 16)],
];

fn block_row(version: Version, error_correction: ErrorCorrectionLevel) -> BlockRow {
    let level_index = match error_correction {
        ErrorCorrectionLevel::Low => 0,
        ErrorCorrectionLevel::Medium => 1,
        ErrorCorrectionLevel::Quartile => 2,
        ErrorCorrectionLevel::High => 3,
    };
    BLOCK_TABLE[version.index()][level_index]
}

/// Returns the block groups in placement order, shorter blocks first
pub fn ec_block_structure(
    version: Version,
    error_correction: ErrorCorrectionLevel,
) -> Vec<BlockGroup> {
    let (ec_len, group1_count, group1_len, group2_count, group2_len) =
        block_row(version, error_correction);
    [(group1_count, group1_len), (group2_count, group2_len)]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|&(count, len)| BlockGroup {
            block_count: count as usize,
            data_codewords_per_block: len as usize,
            ec_codewords_per_block: ec_len as usize,
        })
        .collect()
}

pub fn data_codeword_count(version: Version, error_correction: ErrorCorrectionLevel) -> usize {
    ec_block_structure(version, error_correction)
        .iter()
        .map(BlockGroup::data_codeword_count)
        .sum()
}

pub fn ec_codeword_count(version: Version, error_correction: ErrorCorrectionLevel) -> usize {
    ec_block_structure(version, error_correction)
        .iter()
        .map(BlockGroup::ec_codeword_count)
        .sum()
}

pub fn block_count(version: Version, error_correction: ErrorCorrectionLevel) -> usize {
    ec_block_structure(version, error_correction)
        .iter()
        .map(|group| group.block_count)
        .sum()
}

#[cfg(test)]
mod tests {
    use crate::capacity::{
        block_count, data_codeword_count, ec_block_structure, ec_codeword_count, BlockGroup,
    };
    use crate::error_correction::ErrorCorrectionLevel;
    use crate::qr_version::Version;

    const LEVELS: [ErrorCorrectionLevel; 4] = [
        ErrorCorrectionLevel::Low,
        ErrorCorrectionLevel::Medium,
        ErrorCorrectionLevel::Quartile,
        ErrorCorrectionLevel::High,
    ];

    #[test]
    fn version_1() {
        let version = Version::new(1).unwrap();
        let data: Vec<usize> = LEVELS
            .iter()
            .map(|&level| data_codeword_count(version, level))
            .collect();
        assert_eq!(data, [19, 16, 13, 9]);
        let ec: Vec<usize> = LEVELS
            .iter()
            .map(|&level| ec_codeword_count(version, level))
            .collect();
        assert_eq!(ec, [7, 10, 13, 17]);
    }

    #[test]
    fn version_40() {
        let version = Version::new(40).unwrap();
        let data: Vec<usize> = LEVELS
            .iter()
            .map(|&level| data_codeword_count(version, level))
            .collect();
        assert_eq!(data, [2956, 2334, 1666, 1276]);
        assert_eq!(block_count(version, ErrorCorrectionLevel::High), 81);
    }

    #[test]
    fn version_5q_has_two_groups() {
        let groups = ec_block_structure(Version::new(5).unwrap(), ErrorCorrectionLevel::Quartile);
        assert_eq!(
            groups,
            [
                BlockGroup {
                    block_count: 2,
                    data_codewords_per_block: 15,
                    ec_codewords_per_block: 18,
                },
                BlockGroup {
                    block_count: 2,
                    data_codewords_per_block: 16,
                    ec_codewords_per_block: 18,
                },
            ]
        );
    }

    #[test]
    fn version_2h_holds_16_data_codewords() {
        let version = Version::new(2).unwrap();
        assert_eq!(data_codeword_count(version, ErrorCorrectionLevel::High), 16);
    }

    #[test]
    fn codewords_add_up_to_total() {
        for version in Version::all() {
            for &level in &LEVELS {
                assert_eq!(
                    data_codeword_count(version, level) + ec_codeword_count(version, level),
                    version.total_codeword_count(),
                    "version {:?} level {:?}",
                    version,
                    level
                );
                let groups = ec_block_structure(version, level);
                assert!(!groups.is_empty() && groups.len() <= 2);
                if let [short, long] = groups.as_slice() {
                    assert_eq!(
                        short.data_codewords_per_block + 1,
                        long.data_codewords_per_block
                    );
                }
            }
        }
    }
}
