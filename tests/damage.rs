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

mod common;

use qrcraft::{ErrorCorrectionLevel, QrCode, Version};

fn corrupt(symbol: &mut common::Symbol, errors_per_block: impl Fn(usize) -> usize) {
    for block in &mut symbol.blocks {
        let ec_len = block.codewords.len() - block.data_len;
        for codeword in block.codewords.iter_mut().take(errors_per_block(ec_len)) {
            *codeword ^= 0xa5;
        }
    }
}

#[test]
fn high_recovers_half_the_ec_codewords() {
    for version in [1u8, 5, 10] {
        let payload: &[u8] = if version == 1 {
            b"0123456789"
        } else {
            b"https://example.com/contact?id=0123456789"
        };
        let code = QrCode::generator()
            .with_data(payload)
            .with_specific_error_correction_level(ErrorCorrectionLevel::High)
            .with_specific_version(Version::new(version).unwrap())
            .build()
            .unwrap();

        let mut symbol = common::read_symbol(&common::grid(&code)).unwrap();
        corrupt(&mut symbol, |ec_len| ec_len / 2);
        let total: usize = symbol.blocks.iter().map(|b| b.codewords.len()).sum();
        let damaged: usize = symbol
            .blocks
            .iter()
            .map(|b| (b.codewords.len() - b.data_len) / 2)
            .sum();
        assert!(damaged * 100 / total >= 25, "only {} of {} damaged", damaged, total);

        assert_eq!(common::decode_symbol(&symbol).as_deref(), Some(payload));
    }
}

#[test]
fn low_fails_beyond_half_the_ec_codewords() {
    // Fills all data codewords of version 1-L
    let payload = b"abcdefghijklmnopq";
    let code = QrCode::encode(payload, ErrorCorrectionLevel::Low).unwrap();
    assert_eq!(code.version().number(), 1);

    let mut symbol = common::read_symbol(&common::grid(&code)).unwrap();
    corrupt(&mut symbol, |ec_len| ec_len / 2);
    assert_eq!(common::decode_symbol(&symbol).as_deref(), Some(&payload[..]));

    let mut symbol = common::read_symbol(&common::grid(&code)).unwrap();
    corrupt(&mut symbol, |ec_len| ec_len / 2 + 1);
    assert_ne!(common::decode_symbol(&symbol).as_deref(), Some(&payload[..]));
}

#[test]
fn low_fails_in_larger_versions() {
    let payload = vec![b'x'; 200];
    let code = QrCode::encode(&payload, ErrorCorrectionLevel::Low).unwrap();
    assert!(code.version().number() > 5);

    let mut symbol = common::read_symbol(&common::grid(&code)).unwrap();
    corrupt(&mut symbol, |ec_len| ec_len / 2 + 1);
    assert_ne!(common::decode_symbol(&symbol), Some(payload));
}

#[test]
fn damaged_modules() {
    // A dark square over the center of the symbol
    let payload = b"HELLO WORLD 1234567890";
    let code = QrCode::encode(payload, ErrorCorrectionLevel::High).unwrap();
    let mut grid = common::grid(&code);
    let center = grid.len() / 2;
    for row in &mut grid[center - 2..center + 2] {
        for module in &mut row[center - 2..center + 2] {
            *module = true;
        }
    }
    let symbol = common::read_symbol(&grid).unwrap();
    assert_eq!(common::decode_symbol(&symbol).as_deref(), Some(&payload[..]));
}
