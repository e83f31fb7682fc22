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

use crate::error_correction::ErrorCorrectionLevel;
use thiserror::Error;

/// Errors that can occur while generating, rendering or exporting a QR code
#[derive(Error, Debug)]
pub enum Error {
    #[error("Data of {len} bytes does not fit in a QR code with error correction level {level:?}")]
    DataTooLong {
        len: usize,
        level: ErrorCorrectionLevel,
    },

    #[error("Unsupported QR code version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unsupported error correction level: {0}")]
    UnsupportedEcc(String),

    #[error("Unsupported mask pattern: {0}")]
    UnsupportedMask(u8),

    #[error("Pixel buffer is empty")]
    EmptyBuffer,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
