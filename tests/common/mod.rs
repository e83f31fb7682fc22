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

//! Reference QR decoder used to check the encoder from the outside.
//!
//! It reads the symbol the way a scanner would after sampling: format information, function
//! pattern layout, zig-zag placement, block deinterleaving, Reed-Solomon correction and the
//! segment bit stream. Only the block table is shared with the library; block correction uses
//! the `reed_solomon` decoder.

#![allow(dead_code)]

use qrcraft::capacity::ec_block_structure;
use qrcraft::{ErrorCorrectionLevel, QrCode, Version};

/// Dark modules of a symbol, indexed by row then column
pub type Grid = Vec<Vec<bool>>;

pub fn grid(code: &QrCode) -> Grid {
    (0..code.width())
        .map(|row| (0..code.width()).map(|column| code.is_dark(row, column)).collect())
        .collect()
}

/// One error correction block: data codewords followed by EC codewords
#[derive(Clone, Debug)]
pub struct Block {
    pub data_len: usize,
    pub codewords: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub version: u8,
    pub level: ErrorCorrectionLevel,
    pub mask: u8,
    pub blocks: Vec<Block>,
}

pub fn decode(code: &QrCode) -> Option<Vec<u8>> {
    decode_symbol(&read_symbol(&grid(code))?)
}

pub fn read_symbol(grid: &Grid) -> Option<Symbol> {
    let width = grid.len();
    if width < 21 || (width - 17) % 4 != 0 {
        return None;
    }
    let version = ((width - 17) / 4) as u8;
    let (level, mask) = read_format(grid)?;
    if version >= 7 && read_version(grid)? != version {
        return None;
    }

    let raw = read_codewords(grid, version, mask);
    let blocks = deinterleave(&raw, version, level)?;
    Some(Symbol {
        version,
        level,
        mask,
        blocks,
    })
}

pub fn decode_symbol(symbol: &Symbol) -> Option<Vec<u8>> {
    let mut data = Vec::new();
    for block in &symbol.blocks {
        let ec_len = block.codewords.len() - block.data_len;
        let decoder = reed_solomon::Decoder::new(ec_len);
        let corrected = decoder.correct(&block.codewords, None).ok()?;
        data.extend_from_slice(corrected.data());
    }
    parse_segments(&data, symbol.version)
}

fn level_from_bits(bits: u32) -> ErrorCorrectionLevel {
    match bits {
        0b01 => ErrorCorrectionLevel::Low,
        0b00 => ErrorCorrectionLevel::Medium,
        0b11 => ErrorCorrectionLevel::Quartile,
        _ => ErrorCorrectionLevel::High,
    }
}

fn bch_remainder(mut value: u32, generator: u32) -> u32 {
    let degree = 31 - generator.leading_zeros();
    while value != 0 && 31 - value.leading_zeros() >= degree {
        value ^= generator << (31 - value.leading_zeros() - degree);
    }
    value
}

/// Reads the copy around the top left finder and picks the closest valid code word
pub fn read_format(grid: &Grid) -> Option<(ErrorCorrectionLevel, u8)> {
    let mut raw = 0u32;
    for i in 0..15 {
        let (row, column) = match i {
            0..=5 => (i, 8),
            6 => (7, 8),
            7 => (8, 8),
            8 => (8, 7),
            _ => (8, 14 - i),
        };
        if grid[row][column] {
            raw |= 1 << i;
        }
    }

    let (distance, data) = (0..32u32)
        .map(|data| {
            let code = ((data << 10) | bch_remainder(data << 10, 0x537)) ^ 0x5412;
            ((code ^ raw).count_ones(), data)
        })
        .min()?;
    if distance > 3 {
        return None;
    }
    Some((level_from_bits(data >> 3), (data & 0b111) as u8))
}

fn read_version(grid: &Grid) -> Option<u8> {
    let width = grid.len();
    let mut raw = 0u32;
    for i in 0..18 {
        if grid[i / 3][width - 11 + i % 3] {
            raw |= 1 << i;
        }
    }
    let (distance, version) = (7..=40u32)
        .map(|version| {
            let code = (version << 12) | bch_remainder(version << 12, 0x1f25);
            ((code ^ raw).count_ones(), version)
        })
        .min()?;
    (distance <= 3).then_some(version as u8)
}

pub fn alignment_positions(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let version = version as usize;
    let width = 17 + 4 * version;
    let count = version / 7 + 2;
    let step = if version == 32 {
        26
    } else {
        (version * 4 + count * 2 + 1) / (count * 2 - 2) * 2
    };
    let mut positions: Vec<usize> = (0..count - 1).map(|i| width - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}

/// Cells that hold no data: finders, separators, format areas, timing, alignment and version
pub fn function_modules(version: u8) -> Grid {
    let width = 17 + 4 * version as usize;
    let mut function = vec![vec![false; width]; width];
    let mut fill = |rows: std::ops::Range<usize>, columns: std::ops::Range<usize>| {
        for row in rows {
            for column in columns.clone() {
                function[row][column] = true;
            }
        }
    };

    fill(0..9, 0..9);
    fill(0..9, width - 8..width);
    fill(width - 8..width, 0..9);
    fill(6..7, 0..width);
    fill(0..width, 6..7);

    let positions = alignment_positions(version);
    let last = positions.len().saturating_sub(1);
    for (i, &row) in positions.iter().enumerate() {
        for (j, &column) in positions.iter().enumerate() {
            let finder_corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !finder_corner {
                fill(row - 2..row + 3, column - 2..column + 3);
            }
        }
    }

    if version >= 7 {
        fill(0..6, width - 11..width - 8);
        fill(width - 11..width - 8, 0..6);
    }
    function
}

fn mask_bit(mask: u8, row: usize, column: usize) -> bool {
    let (i, j) = (row, column);
    match mask {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => (i * j) % 2 + (i * j) % 3 == 0,
        6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
        _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
    }
}

/// Unmasked codewords in placement order
pub fn read_codewords(grid: &Grid, version: u8, mask: u8) -> Vec<u8> {
    let width = grid.len();
    let function = function_modules(version);
    let mut bits = Vec::new();
    let mut right = width - 1;
    loop {
        if right == 6 {
            right = 5;
        }
        let upward = (right + 1) & 2 == 0;
        for step in 0..width {
            let row = if upward { width - 1 - step } else { step };
            for column in [right, right - 1] {
                if !function[row][column] {
                    bits.push(grid[row][column] ^ mask_bit(mask, row, column));
                }
            }
        }
        if right < 2 {
            break;
        }
        right -= 2;
    }

    bits.chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect()
}

pub fn deinterleave(raw: &[u8], version: u8, level: ErrorCorrectionLevel) -> Option<Vec<Block>> {
    let groups = ec_block_structure(Version::new(version).ok()?, level);
    let mut blocks: Vec<Block> = groups
        .iter()
        .flat_map(|group| {
            (0..group.block_count).map(move |_| Block {
                data_len: group.data_codewords_per_block,
                codewords: Vec::new(),
            })
        })
        .collect();
    let longest = blocks.iter().map(|block| block.data_len).max()?;
    let ec_len = groups.first()?.ec_codewords_per_block;

    let mut codewords = raw.iter().copied();
    for column in 0..longest {
        for block in blocks.iter_mut() {
            if column < block.data_len {
                block.codewords.push(codewords.next()?);
            }
        }
    }
    for _ in 0..ec_len {
        for block in blocks.iter_mut() {
            block.codewords.push(codewords.next()?);
        }
    }
    Some(blocks)
}

struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl BitReader<'_> {
    fn remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    fn read(&mut self, len: usize) -> Option<u32> {
        if len > self.remaining() {
            return None;
        }
        let mut value = 0;
        for _ in 0..len {
            let byte = self.data[self.position / 8];
            let bit = (byte >> (7 - self.position % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            self.position += 1;
        }
        Some(value)
    }
}

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Decodes numeric, alphanumeric and byte segments up to the terminator
pub fn parse_segments(data: &[u8], version: u8) -> Option<Vec<u8>> {
    let class = match version {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    let mut reader = BitReader { data, position: 0 };
    let mut payload = Vec::new();
    while reader.remaining() >= 4 {
        match reader.read(4)? {
            0b0000 => break,
            0b0001 => {
                let mut count = reader.read([10, 12, 14][class])? as usize;
                while count > 0 {
                    let digits = count.min(3);
                    let value = reader.read([4, 7, 10][digits - 1])?;
                    if value >= 10u32.pow(digits as u32) {
                        return None;
                    }
                    payload.extend(format!("{:0width$}", value, width = digits).bytes());
                    count -= digits;
                }
            }
            0b0010 => {
                let mut count = reader.read([9, 11, 13][class])? as usize;
                while count >= 2 {
                    let value = reader.read(11)? as usize;
                    payload.push(*ALPHANUMERIC.get(value / 45)?);
                    payload.push(ALPHANUMERIC[value % 45]);
                    count -= 2;
                }
                if count == 1 {
                    payload.push(*ALPHANUMERIC.get(reader.read(6)? as usize)?);
                }
            }
            0b0100 => {
                let count = reader.read([8, 16, 16][class])?;
                for _ in 0..count {
                    payload.push(reader.read(8)? as u8);
                }
            }
            _ => return None,
        }
    }
    Some(payload)
}
