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

use crate::array_2d::{Array2D, Coordinate};
use crate::blocks::BlockIterator;
use crate::error_correction::ErrorCorrectedData;
use crate::qr_version::Version;
use std::fmt::{Debug, Display, Formatter, Write};

#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub(crate) fn inverse(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    fn from_bit(bit: bool) -> Self {
        if bit {
            Color::Black
        } else {
            Color::White
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub enum Module {
    /// Part of the encoded region and filled with a specific color
    Filled(Color),
    /// Part of the encoded region, but not yet filled with a color
    #[default]
    Empty,
    /// Part of the finder pattern and filled with a specific color
    Static(Color),
    /// Part of the QR code structure that is not yet filled with a color
    Reserved,
}

impl From<Module> for Color {
    fn from(module: Module) -> Self {
        match module {
            Module::Filled(color) => color,
            Module::Empty => Color::White,
            Module::Static(color) => color,
            Module::Reserved => Color::White,
        }
    }
}

#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Matrix {
    pub(crate) version: Version,
    pub(crate) data: Array2D<Module>,
}

impl Matrix {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            data: Array2D::new(version.width()),
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    #[cfg(test)]
    pub fn module(&self, pos: Coordinate) -> Module {
        self.data[pos]
    }

    pub fn color(&self, pos: Coordinate) -> Color {
        self.data[pos].into()
    }

    #[cfg(test)]
    pub(crate) fn fill_whole(&mut self, data: Module) {
        for pos in self.data.coordinates() {
            self.data[pos] = data;
        }
    }

    fn fill_module(&mut self, pos: Coordinate, data: Module) {
        self.data[pos] = data;
    }

    /// Fills the square of `radius` around `center`, coloring by distance to the center
    fn fill_concentric(
        &mut self,
        center: Coordinate,
        radius: usize,
        color: impl Fn(usize) -> Color,
    ) {
        let width = self.width() as isize;
        let radius = radius as isize;
        for row_offset in -radius..=radius {
            for column_offset in -radius..=radius {
                let row = center.row as isize + row_offset;
                let column = center.column as isize + column_offset;
                if row < 0 || column < 0 || row >= width || column >= width {
                    continue;
                }
                let distance = row_offset.abs().max(column_offset.abs()) as usize;
                self.fill_module(
                    Coordinate::new(row as usize, column as usize),
                    Module::Static(color(distance)),
                );
            }
        }
    }

    fn fill_finder_patterns(&mut self) {
        let last = self.width() - 4;
        for &center in &[(3, 3), (3, last), (last, 3)] {
            // The ring at distance 4 is the separator
            self.fill_concentric(center.into(), 4, |distance| match distance {
                2 | 4 => Color::White,
                _ => Color::Black,
            });
        }
    }

    fn fill_alignment_patterns(&mut self) {
        let positions = self.version.alignment_pattern_positions();
        let last = self.width() - 7;
        for &row in positions {
            for &column in positions {
                let overlaps_finder = matches!((row, column), (6, 6))
                    || (row == 6 && column == last)
                    || (row == last && column == 6);
                if !overlaps_finder {
                    self.fill_concentric(Coordinate::new(row, column), 2, |distance| {
                        if distance == 1 {
                            Color::White
                        } else {
                            Color::Black
                        }
                    });
                }
            }
        }
    }

    fn fill_reserved(&mut self) {
        let reserved = Module::Reserved;
        let width = self.width();

        // Left-top
        for i in (0..=5).chain(7..=8) {
            self.fill_module(Coordinate::new(i, 8), reserved);
            self.fill_module(Coordinate::new(8, i), reserved);
        }

        // Left-bottom, including the dark module
        for row in width - 8..width {
            self.fill_module(Coordinate::new(row, 8), reserved);
        }

        // Right-top
        for column in width - 8..width {
            self.fill_module(Coordinate::new(8, column), reserved);
        }

        if self.version.has_version_information() {
            for i in 0..6 {
                for j in width - 11..width - 8 {
                    self.fill_module(Coordinate::new(i, j), reserved);
                    self.fill_module(Coordinate::new(j, i), reserved);
                }
            }
        }
    }

    fn fill_timing_pattern(&mut self) {
        let width = self.width();
        for i in 8..width - 8 {
            let module = Module::Static(Color::from_bit(i % 2 == 0));
            self.fill_module(Coordinate::new(6, i), module);
            self.fill_module(Coordinate::new(i, 6), module);
        }
    }

    pub(crate) fn fill_symbol(&mut self) {
        self.fill_finder_patterns();
        self.fill_reserved();
        self.fill_timing_pattern();
        self.fill_alignment_patterns();
    }

    /// Places the interleaved codewords in the empty modules
    ///
    /// Remainder modules that are left after the last codeword become white.
    pub fn place_data(&mut self, error_corrected_data: &ErrorCorrectedData) {
        let data = BlockIterator::new(error_corrected_data);
        let mut bits = BitIterator::new(data);

        for pos in PositionIterator::new(self.width()) {
            if self.data[pos] == Module::Empty {
                let bit = bits.next().unwrap_or(false);
                self.data[pos] = Module::Filled(Color::from_bit(bit));
            }
        }
    }

    /// Amount of modules available for data and error correction codewords
    #[cfg(test)]
    pub fn data_module_count(&self) -> usize {
        self.data
            .rows()
            .map(|row| row.filter(|&&module| module == Module::Empty).count())
            .sum()
    }

    pub fn place_format(&mut self, data: u16) {
        let pos_iter = FormatPositionIterator::new(self.width());
        for (index, pos_list) in pos_iter.enumerate() {
            let mask = 1 << index;
            let color = Color::from_bit(data & mask != 0);
            for pos in &pos_list {
                self.fill_module(*pos, Module::Static(color));
            }
        }
        self.fill_module(
            Coordinate::new(self.width() - 8, 8),
            Module::Static(Color::Black),
        );
    }

    /// Places both copies of the 18 bit version information
    pub fn place_version(&mut self, data: u32) {
        let width = self.width();
        for index in 0..18 {
            let color = Color::from_bit(data & (1 << index) != 0);
            let a = width - 11 + index % 3;
            let b = index / 3;
            self.fill_module(Coordinate::new(b, a), Module::Static(color));
            self.fill_module(Coordinate::new(a, b), Module::Static(color));
        }
    }
}

impl Debug for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.data.rows().try_for_each(|mut row| {
            row.try_for_each(|module| match module {
                Module::Filled(color) => match color {
                    Color::White => f.write_char('_'),
                    Color::Black => f.write_char('\u{2588}'),
                },
                Module::Empty => f.write_char('\u{FFFD}'),
                Module::Static(color) => match color {
                    Color::White => f.write_char('\u{2591}'),
                    Color::Black => f.write_char('\u{2593}'),
                },
                Module::Reserved => f.write_char('\u{2592}'),
            })?;
            f.write_char('\n')
        })
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let iter1 = self.data.rows().step_by(2);
        let iter2 = self.data.rows().skip(1).step_by(2);
        iter1.zip(iter2).try_for_each(|rows| {
            rows.0.zip(rows.1).try_for_each(|(&up, &down)| {
                f.write_char(match (up.into(), down.into()) {
                    (Color::Black, Color::Black) => '\u{2588}',
                    (Color::Black, Color::White) => '\u{2580}',
                    (Color::White, Color::Black) => '\u{2584}',
                    (Color::White, Color::White) => ' ',
                })
            })?;
            f.write_char('\n')
        })?;

        // The width is odd, so the last row has no partner
        if let Some(last_row) = self.data.rows().last() {
            last_row.into_iter().try_for_each(|&up| {
                f.write_char(match up.into() {
                    Color::Black => '\u{2580}',
                    Color::White => ' ',
                })
            })?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone)]
struct FormatPositionIterator {
    width: usize,
    index: usize,
}

impl FormatPositionIterator {
    fn new(width: usize) -> FormatPositionIterator {
        FormatPositionIterator { width, index: 0 }
    }
}

impl Iterator for FormatPositionIterator {
    type Item = [Coordinate; 2];

    fn next(&mut self) -> Option<Self::Item> {
        if self.index <= 14 {
            // Left-top
            let pos1 = match self.index {
                0..=5 => Coordinate::new(self.index, 8),
                6..=7 => Coordinate::new(self.index + 1, 8),
                8 => Coordinate::new(8, 7),
                _ => Coordinate::new(8, 14 - self.index),
            };

            // Right-top and Left-bottom
            let pos2 = match self.index {
                0..=7 => Coordinate::new(8, self.width - 1 - self.index),
                _ => Coordinate::new(self.width - 15 + self.index, 8),
            };
            self.index += 1;
            Some([pos1, pos2])
        } else {
            None
        }
    }
}

/// Walks the symbol in two-module wide columns, starting at the bottom right
/// and alternating upwards and downwards. The vertical timing pattern is skipped.
#[derive(Copy, Clone)]
struct PositionIterator {
    width: usize,
    right_column: usize,
    row: usize,
    upwards: bool,
    left: bool,
    done: bool,
}

impl PositionIterator {
    fn new(width: usize) -> PositionIterator {
        PositionIterator {
            width,
            right_column: width - 1,
            row: width - 1,
            upwards: true,
            left: false,
            done: false,
        }
    }

    fn next_column_pair(&mut self) {
        self.upwards = !self.upwards;
        if self.right_column < 3 {
            self.done = true;
        } else {
            self.right_column -= 2;
            if self.right_column == 6 {
                self.right_column = 5;
            }
        }
    }
}

impl Iterator for PositionIterator {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let column = if self.left {
            self.right_column - 1
        } else {
            self.right_column
        };
        let result = Coordinate::new(self.row, column);

        if !self.left {
            self.left = true;
        } else {
            self.left = false;
            if self.upwards {
                if self.row == 0 {
                    self.next_column_pair();
                } else {
                    self.row -= 1;
                }
            } else if self.row == self.width - 1 {
                self.next_column_pair();
            } else {
                self.row += 1;
            }
        }
        Some(result)
    }
}

struct BitIterator<T>
where
    T: Iterator<Item = u8>,
{
    data_iter: T,
    current: Option<u8>,
    bit_pos: usize,
}

impl<T> BitIterator<T>
where
    T: Iterator<Item = u8>,
{
    fn new(data_iter: T) -> Self {
        BitIterator {
            data_iter,
            current: None,
            bit_pos: 0,
        }
    }
}

impl<T> Iterator for BitIterator<T>
where
    T: Iterator<Item = u8>,
{
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bit_pos == 0 {
            self.current = self.data_iter.next();
            self.bit_pos = 8;
        }
        let byte = self.current?;
        self.bit_pos -= 1;
        Some(byte & (1 << self.bit_pos) != 0)
    }
}
