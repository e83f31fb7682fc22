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
use crate::error_correction::{ErrorCorrectedData, ErrorCorrectionLevel};
use crate::qr_version::Version;

/// Interleaves the codewords of all blocks in the order they are placed in the matrix
///
/// First the data codewords column by column, then the error correction codewords.
/// Blocks that run out of data codewords are skipped.
pub struct BlockIterator<'a> {
    codewords: &'a [u8],
    blocks: Vec<BlockLength>,
    block_index: usize,
    offset: usize,
    in_ecc: bool,
}

impl<'a> BlockIterator<'a> {
    pub fn new(data: &'a ErrorCorrectedData) -> BlockIterator<'a> {
        Self::from_codewords(&data.codewords, data.version, data.error_correction)
    }

    pub fn from_codewords(
        codewords: &'a [u8],
        version: Version,
        error_correction: ErrorCorrectionLevel,
    ) -> BlockIterator<'a> {
        BlockIterator {
            codewords,
            blocks: BlockLengthIterator::new(version, error_correction).collect(),
            block_index: 0,
            offset: 0,
            in_ecc: false,
        }
    }

    fn advance_block(&mut self) {
        self.block_index += 1;
        if self.block_index >= self.blocks.len() {
            self.block_index = 0;
            self.offset += 1;
        }
    }
}

impl Iterator for BlockIterator<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let longest_data = self.blocks.iter().map(|b| b.data_len).max().unwrap_or(0);
        let ecc_len = self.blocks.first().map_or(0, |b| b.ecc_len);
        loop {
            if !self.in_ecc && self.offset >= longest_data {
                self.in_ecc = true;
                self.offset = 0;
                self.block_index = 0;
            }
            if self.in_ecc && self.offset >= ecc_len {
                return None;
            }

            let block = self.blocks[self.block_index];
            let position = if self.in_ecc {
                Some(block.ecc_pos + self.offset)
            } else if self.offset < block.data_len {
                Some(block.data_pos + self.offset)
            } else {
                None
            };
            self.advance_block();

            if let Some(position) = position {
                return self.codewords.get(position).copied();
            }
        }
    }
}

/// Location of a single block inside the codeword sequence
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug)]
pub struct BlockLength {
    pub data_pos: usize,
    pub data_len: usize,
    pub ecc_pos: usize,
    pub ecc_len: usize,
}

#[derive(Clone, Debug)]
pub struct BlockLengthIterator {
    blocks: Vec<BlockLength>,
    index: usize,
}

impl BlockLengthIterator {
    pub fn new(version: Version, error_correction: ErrorCorrectionLevel) -> BlockLengthIterator {
        let groups = capacity::ec_block_structure(version, error_correction);
        let block_count: usize = groups.iter().map(|group| group.block_count).sum();
        let data_len: usize = groups.iter().map(|group| group.data_codeword_count()).sum();

        let mut blocks = Vec::with_capacity(block_count);
        let mut data_pos = 0;
        let mut ecc_pos = data_len;
        for group in &groups {
            for _ in 0..group.block_count {
                blocks.push(BlockLength {
                    data_pos,
                    data_len: group.data_codewords_per_block,
                    ecc_pos,
                    ecc_len: group.ec_codewords_per_block,
                });
                data_pos += group.data_codewords_per_block;
                ecc_pos += group.ec_codewords_per_block;
            }
        }
        BlockLengthIterator { blocks, index: 0 }
    }
}

impl Iterator for BlockLengthIterator {
    type Item = BlockLength;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.get(self.index).copied();
        if block.is_some() {
            self.index += 1;
        }
        block
    }
}
