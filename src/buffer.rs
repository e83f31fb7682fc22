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

use bitvec::prelude::*;

/// Growable bit buffer, written most significant bit first
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Buffer {
    bits: BitVec<Msb0, u8>,
}

impl Buffer {
    /// Creates a new empty buffer
    ///
    /// # Example
    ///```
    /// use qrcraft::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// assert_eq!(buffer.data(), Vec::<u8>::new());
    /// buffer.append_bytes(&[1, 2, 3]);
    /// assert_eq!(buffer.data(), [1, 2, 3]);
    ///```
    pub fn new() -> Buffer {
        Buffer {
            bits: BitVec::new(),
        }
    }

    /// Return the amount of bytes and bits written to the buffer
    ///
    /// # Example
    ///```
    /// use qrcraft::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.append_bytes(&[1, 2, 3]);
    /// buffer.append_bits(&[true, false, true, false]);
    /// assert_eq!(buffer.byte_bit_len(), (3, 4));
    ///```
    pub fn byte_bit_len(&self) -> (usize, usize) {
        (self.bit_len() / 8, self.bit_len() % 8)
    }

    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Adds a single bit to the buffer
    ///
    /// # Example
    ///```
    /// use qrcraft::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.append_bit(true);
    /// buffer.append_bit(false);
    /// buffer.append_bit(true);
    /// buffer.append_bit(false);
    /// assert_eq!(buffer.data(), [0b1010_0000]);
    ///```
    pub fn append_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn append_bits(&mut self, bits: &[bool]) {
        for bit in bits {
            self.append_bit(*bit)
        }
    }

    pub fn append_byte(&mut self, byte: u8) {
        self.append_number(byte as u32, 8);
    }

    /// Adds multiple bytes to the buffer
    ///
    /// # Example
    ///```
    /// use qrcraft::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.append_bit(true);
    /// buffer.append_bytes(&[0xff, 0x00]);
    /// assert_eq!(buffer.data(), [0xff, 0x80, 0x00]);
    ///```
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.bits.extend_from_bitslice(bytes.view_bits::<Msb0>());
    }

    /// Adds a number of a specific length to the buffer
    ///
    /// # Example
    ///```
    /// use qrcraft::buffer::Buffer;
    /// let mut buffer = Buffer::new();
    /// buffer.append_number(3, 4);
    /// buffer.append_number(0b111100, 6);
    /// buffer.append_number(2, 2);
    /// assert_eq!(buffer.data(), [0b0011_1111, 0b0010_0000]);
    ///```
    pub fn append_number(&mut self, number: u32, bit_len: usize) {
        for index in (0..bit_len).rev() {
            let mask = 1 << index;
            self.append_bit(number & mask != 0)
        }
    }

    /// Returns all written data, the last byte padded with zero bits
    pub fn data(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                let value = chunk
                    .iter()
                    .by_val()
                    .fold(0u8, |acc, bit| (acc << 1) | bit as u8);
                value << (8 - chunk.len())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::Buffer;

    #[test]
    fn unaligned_bytes() {
        let mut buffer = Buffer::new();
        buffer.append_bits(&[false, true, false, false]);
        buffer.append_byte(0xAB);
        assert_eq!(buffer.bit_len(), 12);
        assert_eq!(buffer.byte_bit_len(), (1, 4));
        assert_eq!(buffer.data(), [0b0100_1010, 0b1011_0000]);
    }

    #[test]
    fn partial_byte_is_zero_padded() {
        let mut buffer = Buffer::new();
        buffer.append_number(0b101, 3);
        assert_eq!(buffer.bit_len(), 3);
        assert_eq!(buffer.data(), [0b1010_0000]);
    }
}
