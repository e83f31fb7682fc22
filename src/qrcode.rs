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

use crate::array_2d::Coordinate;
use crate::encoding::{encode_data, ErrorCorrectionRestriction, VersionRestriction};
use crate::error::Result;
use crate::error_correction::{ErrorCorrectionEncoder, ErrorCorrectionLevel};
use crate::mask::MaskPattern;
use crate::matrix::{Color, Matrix};
use crate::qr_version::Version;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// A finished QR symbol
///
/// Every module of the matrix is either a function pattern or a masked data module.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct QrCode {
    matrix: Matrix,
    error_correction: ErrorCorrectionLevel,
    mask: MaskPattern,
}

impl QrCode {
    /// Encodes the payload in the smallest version that fits at the given level
    pub fn encode(data: &[u8], error_correction: ErrorCorrectionLevel) -> Result<QrCode> {
        QrCode::generator()
            .with_data(data)
            .with_specific_error_correction_level(error_correction)
            .build()
    }

    pub fn generator<'a>() -> QrCodeGenerator<'a> {
        QrCodeGenerator::default()
    }

    pub fn version(&self) -> Version {
        self.matrix.version()
    }

    pub fn error_correction(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }

    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask
    }

    /// Number of modules along one side
    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    pub fn color(&self, row: usize, column: usize) -> Color {
        self.matrix.color(Coordinate::new(row, column))
    }

    pub fn is_dark(&self, row: usize, column: usize) -> bool {
        self.color(row, column) == Color::Black
    }

    #[cfg(test)]
    pub(crate) fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

impl Display for QrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.matrix, f)
    }
}

/// Builder for a [`QrCode`] with restrictions on version, error correction and mask
#[derive(Clone, Debug, Default)]
pub struct QrCodeGenerator<'a> {
    data: &'a [u8],
    version_restriction: VersionRestriction,
    error_correction_restriction: ErrorCorrectionRestriction,
    mask: Option<MaskPattern>,
}

impl<'a> QrCodeGenerator<'a> {
    pub fn with_data(mut self, data: &'a [u8]) -> Self {
        self.data = data;
        self
    }

    pub fn with_text(self, text: &'a str) -> Self {
        self.with_data(text.as_bytes())
    }

    /// Use exactly this level
    pub fn with_specific_error_correction_level(
        mut self,
        error_correction: ErrorCorrectionLevel,
    ) -> Self {
        self.error_correction_restriction =
            ErrorCorrectionRestriction::SpecificErrorCorrection(error_correction);
        self
    }

    /// Use at least this level; a higher one is chosen when it fits in the same version
    pub fn with_min_error_correction_level(
        mut self,
        error_correction: ErrorCorrectionLevel,
    ) -> Self {
        self.error_correction_restriction =
            ErrorCorrectionRestriction::MinErrorCorrection(error_correction);
        self
    }

    pub fn with_max_version(mut self, version: Version) -> Self {
        self.version_restriction = VersionRestriction::MaxVersion(version);
        self
    }

    pub fn with_specific_version(mut self, version: Version) -> Self {
        self.version_restriction = VersionRestriction::SpecificVersion(version);
        self
    }

    /// Skip the penalty evaluation and apply this pattern
    pub fn with_mask_pattern(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn build(&self) -> Result<QrCode> {
        let encoded = encode_data(
            self.version_restriction,
            self.error_correction_restriction,
            self.data,
        )?;
        let version = encoded.version;
        let error_correction = encoded.error_correction;

        let encoder = ErrorCorrectionEncoder {
            version,
            error_correction,
        };
        let error_corrected = encoder.encode(&encoded);

        let mut matrix = Matrix::new(version);
        matrix.fill_symbol();
        matrix.place_data(&error_corrected);

        let (mask, matrix) = match self.mask {
            Some(mask) => (mask, matrix.finalize(error_correction, mask)),
            None => matrix.select_mask(error_correction),
        };
        debug!(
            version = version.number(),
            %error_correction,
            mask = mask.reference(),
            "Built QR code"
        );

        Ok(QrCode {
            matrix,
            error_correction,
            mask,
        })
    }
}
