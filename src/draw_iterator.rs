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

use crate::matrix::Color;
use crate::qrcode::QrCode;

/// A module position on the canvas, counted in modules including the quiet zone
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CoordinatedColor {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

/// Walks every module of the symbol and its quiet zone, row by row
pub struct DrawIterator<'a> {
    qrcode: &'a QrCode,
    border: usize,
    x: usize,
    y: usize,
}

impl<'a> DrawIterator<'a> {
    pub fn new(qrcode: &'a QrCode, border: usize) -> Self {
        DrawIterator {
            qrcode,
            border,
            x: 0,
            y: 0,
        }
    }

    pub fn height(&self) -> usize {
        self.qrcode.width() + 2 * self.border
    }

    pub fn width(&self) -> usize {
        self.qrcode.width() + 2 * self.border
    }

    fn is_current_pos_border(&self) -> bool {
        let size = self.qrcode.width();

        self.x < self.border
            || self.y < self.border
            || self.x >= size + self.border
            || self.y >= size + self.border
    }
}

impl Iterator for DrawIterator<'_> {
    type Item = CoordinatedColor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.height() {
            return None;
        }

        let color = if self.is_current_pos_border() {
            Color::White
        } else {
            self.qrcode
                .color(self.y - self.border, self.x - self.border)
        };
        let result = CoordinatedColor {
            x: self.x,
            y: self.y,
            color,
        };

        self.x += 1;
        if self.x >= self.width() {
            self.x = 0;
            self.y += 1;
        }

        Some(result)
    }
}
