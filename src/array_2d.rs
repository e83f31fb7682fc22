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

use std::ops::{Index, IndexMut};

#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct Coordinate {
    pub row: usize,
    pub column: usize,
}

impl Coordinate {
    pub fn new(row: usize, column: usize) -> Coordinate {
        Coordinate { row, column }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from(pos: (usize, usize)) -> Self {
        let (row, column) = pos;
        Coordinate::new(row, column)
    }
}

/// Square grid stored row by row
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Array2D<T> {
    data: Vec<T>,
    width: usize,
}

impl<T> Index<Coordinate> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Coordinate) -> &Self::Output {
        &self.data[index.row * self.width + index.column]
    }
}

impl<T> IndexMut<Coordinate> for Array2D<T> {
    fn index_mut(&mut self, index: Coordinate) -> &mut Self::Output {
        &mut self.data[index.row * self.width + index.column]
    }
}

impl<T> Array2D<T>
where
    T: Default + Clone,
{
    pub fn new(width: usize) -> Self {
        Self {
            data: vec![T::default(); width * width],
            width,
        }
    }
}

impl<T> Array2D<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> Rows<'_, T> {
        Rows { data: self, row: 0 }
    }

    pub fn columns(&self) -> Columns<'_, T> {
        Columns {
            data: self,
            column: 0,
        }
    }

    /// All coordinates, row by row
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let width = self.width;
        (0..width).flat_map(move |row| (0..width).map(move |column| Coordinate::new(row, column)))
    }
}

pub struct Rows<'a, T> {
    data: &'a Array2D<T>,
    row: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = Line<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row < self.data.width() {
            let result = Line {
                data: self.data,
                fixed: self.row,
                index: 0,
                horizontal: true,
            };
            self.row += 1;
            Some(result)
        } else {
            None
        }
    }
}

pub struct Columns<'a, T> {
    data: &'a Array2D<T>,
    column: usize,
}

impl<'a, T> Iterator for Columns<'a, T> {
    type Item = Line<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.column < self.data.width() {
            let result = Line {
                data: self.data,
                fixed: self.column,
                index: 0,
                horizontal: false,
            };
            self.column += 1;
            Some(result)
        } else {
            None
        }
    }
}

/// A single row or column of the grid
pub struct Line<'a, T> {
    data: &'a Array2D<T>,
    fixed: usize,
    index: usize,
    horizontal: bool,
}

impl<'a, T> Iterator for Line<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.data.width() {
            let pos = if self.horizontal {
                Coordinate::new(self.fixed, self.index)
            } else {
                Coordinate::new(self.index, self.fixed)
            };
            self.index += 1;
            Some(&self.data[pos])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::array_2d::{Array2D, Coordinate};

    #[test]
    fn rows_and_columns() {
        let mut array = Array2D::<u8>::new(3);
        array[Coordinate::new(0, 2)] = 7;
        array[(2, 1).into()] = 9;

        let rows: Vec<Vec<u8>> = array.rows().map(|row| row.copied().collect()).collect();
        assert_eq!(rows, [[0, 0, 7], [0, 0, 0], [0, 9, 0]]);

        let columns: Vec<Vec<u8>> = array
            .columns()
            .map(|column| column.copied().collect())
            .collect();
        assert_eq!(columns, [[0, 0, 0], [0, 0, 9], [7, 0, 0]]);
    }

    #[test]
    fn coordinates_row_by_row() {
        let array = Array2D::<u8>::new(2);
        let coordinates: Vec<(usize, usize)> = array
            .coordinates()
            .map(|pos| (pos.row, pos.column))
            .collect();
        assert_eq!(coordinates, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
