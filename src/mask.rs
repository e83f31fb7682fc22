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

use crate::error::{Error, Result};
use crate::error_correction::ErrorCorrectionLevel;
use crate::format::{version_information, FormatEncoder};
use crate::matrix::{Color, Matrix, Module};
use std::iter::Peekable;

/// One of the eight data mask patterns
#[derive(Clone, Copy, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(reference: u8) -> Result<Self> {
        if reference < 8 {
            Ok(Self(reference))
        } else {
            Err(Error::UnsupportedMask(reference))
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }

    pub fn reference(self) -> u8 {
        self.0
    }

    /// Whether the module at row `i` and column `j` is inverted
    fn condition(self, i: usize, j: usize) -> bool {
        match self.0 {
            0b000 => (i + j) % 2 == 0,
            0b001 => i % 2 == 0,
            0b010 => j % 3 == 0,
            0b011 => (i + j) % 3 == 0,
            0b100 => ((i / 2) + (j / 3)) % 2 == 0,
            0b101 => (i * j) % 2 + (i * j) % 3 == 0,
            0b110 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        }
    }
}

impl Matrix {
    pub fn mask(&self, pattern: MaskPattern) -> Self {
        let mut masked = self.clone();
        for pos in self.data.coordinates() {
            let module = &mut masked.data[pos];
            if let Module::Filled(color) = *module {
                if pattern.condition(pos.row, pos.column) {
                    *module = Module::Filled(color.inverse())
                }
            }
        }
        masked
    }

    /// Masks the data and writes the format and version information
    pub fn finalize(&self, error_correction: ErrorCorrectionLevel, pattern: MaskPattern) -> Self {
        let mut masked = self.mask(pattern);
        let format = FormatEncoder {
            error_correction_level: error_correction,
            mask_pattern: pattern,
        };
        masked.place_format(format.encode());
        if let Some(version_bits) = version_information(self.version) {
            masked.place_version(version_bits);
        }
        masked
    }

    /// Finalizes the matrix with the pattern of the lowest penalty score
    ///
    /// On equal scores the lowest pattern reference wins.
    pub fn select_mask(&self, error_correction: ErrorCorrectionLevel) -> (MaskPattern, Self) {
        let mut best_pattern = MaskPattern(0);
        let mut best = self.finalize(error_correction, best_pattern);
        let mut best_score = best.score();
        for pattern in MaskPattern::all().skip(1) {
            let candidate = self.finalize(error_correction, pattern);
            let score = candidate.score();
            if score < best_score {
                best_pattern = pattern;
                best = candidate;
                best_score = score;
            }
        }
        (best_pattern, best)
    }

    fn score_adjacent_horizontal(&self) -> usize {
        self.data
            .rows()
            .map(|row| {
                AdjacentIterator::new(row)
                    .filter(|&i| i >= 5)
                    .map(|i| i - 2)
                    .sum::<usize>()
            })
            .sum()
    }

    fn score_adjacent_vertical(&self) -> usize {
        self.data
            .columns()
            .map(|column| {
                AdjacentIterator::new(column)
                    .filter(|&i| i >= 5)
                    .map(|i| i - 2)
                    .sum::<usize>()
            })
            .sum()
    }

    fn score_blocks(&self) -> usize {
        let width = self.width();
        let color = |row: usize, column: usize| -> Color { self.color((row, column).into()) };
        (0..width - 1)
            .map(|row| {
                (0..width - 1)
                    .filter(|&column| {
                        let top_left = color(row, column);
                        top_left == color(row, column + 1)
                            && top_left == color(row + 1, column)
                            && top_left == color(row + 1, column + 1)
                    })
                    .count()
                    * 3
            })
            .sum()
    }

    fn score_match_pattern<'a, T>(iter: T) -> usize
    where
        T: Iterator<Item = &'a Module>,
    {
        use Color::{Black as B, White as W};
        const FINDER_THEN_LIGHT: [Color; 11] = [B, W, B, B, B, W, B, W, W, W, W];
        const LIGHT_THEN_FINDER: [Color; 11] = [W, W, W, W, B, W, B, B, B, W, B];

        let line: Vec<Color> = iter.map(|&module| module.into()).collect();
        line.windows(11)
            .filter(|window| *window == FINDER_THEN_LIGHT || *window == LIGHT_THEN_FINDER)
            .count()
    }

    fn score_pattern_horizontal(&self) -> usize {
        self.data
            .rows()
            .map(Self::score_match_pattern)
            .sum::<usize>()
            * 40
    }

    fn score_pattern_vertical(&self) -> usize {
        self.data
            .columns()
            .map(Self::score_match_pattern)
            .sum::<usize>()
            * 40
    }

    fn score_proportion(&self) -> usize {
        let black_count: usize = self
            .data
            .rows()
            .map(|row| {
                row.filter(|&&module| Color::from(module) == Color::Black)
                    .count()
            })
            .sum();
        let total = self.width() * self.width();
        // Whole 5% steps away from 50% dark, without rounding the percentage first
        let k = (black_count * 20).abs_diff(total * 10) / total;
        k * 10
    }

    pub fn score(&self) -> usize {
        self.score_adjacent_horizontal()
            + self.score_adjacent_vertical()
            + self.score_blocks()
            + self.score_pattern_horizontal()
            + self.score_pattern_vertical()
            + self.score_proportion()
    }
}

/// Yields the lengths of runs of equally colored modules
struct AdjacentIterator<'a, T>
where
    T: Iterator<Item = &'a Module>,
{
    data_iter: Peekable<T>,
}

impl<'a, T> AdjacentIterator<'a, T>
where
    T: Iterator<Item = &'a Module>,
{
    fn new(data_iter: T) -> Self {
        Self {
            data_iter: data_iter.peekable(),
        }
    }
}

impl<'a, T> Iterator for AdjacentIterator<'a, T>
where
    T: Iterator<Item = &'a Module>,
{
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let first: Color = (*self.data_iter.next()?).into();
        let mut count = 1;
        while self
            .data_iter
            .next_if(|&&later| Color::from(later) == first)
            .is_some()
        {
            count += 1;
        }
        Some(count)
    }
}
