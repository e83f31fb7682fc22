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

//! Generate QR codes with colors and logos, and export them as PNG or SVG.
//!
//! ```
//! use qrcraft::{export_vector, render, ErrorCorrectionLevel, QrCode, RenderConfig};
//!
//! let code = QrCode::encode(b"https://example.com", ErrorCorrectionLevel::High)?;
//! assert_eq!(code.version().number(), 3);
//!
//! let config = RenderConfig::default();
//! let buffer = render(&code, &config)?;
//! assert_eq!(buffer.width(), 370);
//!
//! let svg = export_vector(&buffer, config.background)?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), qrcraft::Error>(())
//! ```

mod array_2d;
mod blocks;
pub mod buffer;
pub mod capacity;
pub mod color;
mod config;
mod contact;
mod draw_iterator;
mod encoding;
mod error;
mod error_correction;
mod export;
mod format;
mod mask;
mod matrix;
mod qr_version;
mod qrcode;
mod render;
mod segment;

pub use config::{LogoStyle, StyleConfig};
pub use contact::ContactRecord;
pub use draw_iterator::{CoordinatedColor, DrawIterator};
pub use error::{Error, Result};
pub use error_correction::ErrorCorrectionLevel;
pub use export::{export_raster, export_vector, save_raster, save_vector, Exporter, VectorStyle};
pub use mask::MaskPattern;
pub use matrix::Color;
pub use qr_version::Version;
pub use qrcode::{QrCode, QrCodeGenerator};
pub use render::{rasterize, render, LogoSpec, PixelBuffer, RenderConfig, RenderWarning};
