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

use crate::color::{BLACK, WHITE};
use crate::draw_iterator::DrawIterator;
use crate::error::{Error, Result};
use crate::error_correction::ErrorCorrectionLevel;
use crate::matrix::Color;
use crate::qrcode::QrCode;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::fmt::{Display, Formatter};
use tracing::{debug, warn};

/// An image drawn centered on top of the symbol
#[derive(Clone, Debug)]
pub struct LogoSpec {
    pub image: RgbaImage,
    pub width_px: u32,
    pub height_px: u32,
    /// Clear the modules underneath the logo before drawing it
    pub excavate: bool,
}

impl LogoSpec {
    /// Uses the size of the image itself
    pub fn new(image: RgbaImage) -> Self {
        let (width_px, height_px) = image.dimensions();
        LogoSpec {
            image,
            width_px,
            height_px,
            excavate: false,
        }
    }

    pub fn with_size(mut self, width_px: u32, height_px: u32) -> Self {
        self.width_px = width_px;
        self.height_px = height_px;
        self
    }

    pub fn with_excavation(mut self, excavate: bool) -> Self {
        self.excavate = excavate;
        self
    }
}

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub module_size_px: u32,
    pub quiet_zone_modules: u32,
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
    pub logo: Option<LogoSpec>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            module_size_px: 10,
            quiet_zone_modules: 4,
            foreground: BLACK,
            background: WHITE,
            logo: None,
        }
    }
}

impl RenderConfig {
    /// Picks the largest module size whose canvas does not exceed `size_px`
    ///
    /// The module size never drops below one pixel.
    pub fn fit_to_size(mut self, code: &QrCode, size_px: u32) -> Self {
        let modules = code.width() as u32 + 2 * self.quiet_zone_modules;
        self.module_size_px = (size_px / modules).max(1);
        self
    }

    /// Side of the canvas in pixels
    pub fn canvas_size(&self, code: &QrCode) -> u32 {
        (code.width() as u32 + 2 * self.quiet_zone_modules) * self.module_size_px
    }

    fn validate(&self) -> Result<()> {
        if self.module_size_px == 0 {
            return Err(Error::InvalidConfig(
                "module size must be at least one pixel".to_string(),
            ));
        }
        Ok(())
    }
}

/// Advisory findings of a render, they never stop the render
#[derive(Clone, Debug, PartialEq)]
pub enum RenderWarning {
    /// The logo covers more of the symbol than the error correction can recover
    LogoTooLarge {
        coverage: f64,
        error_correction: ErrorCorrectionLevel,
    },
}

impl Display for RenderWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::LogoTooLarge {
                coverage,
                error_correction,
            } => write!(
                f,
                "logo covers {:.1}% of the symbol, level {} recovers {:.0}%",
                coverage * 100.0,
                error_correction,
                error_correction.recovery_fraction() * 100.0
            ),
        }
    }
}

/// Rendered RGBA image together with the warnings raised while drawing it
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    image: RgbaImage,
    warnings: Vec<RenderWarning>,
}

impl PixelBuffer {
    pub fn new(image: RgbaImage) -> Self {
        PixelBuffer {
            image,
            warnings: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }
}

/// Pixel rectangle, right and bottom edges exclusive
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Rect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Rect {
    fn centered(canvas: u32, width: u32, height: u32) -> Rect {
        let width = width.min(canvas);
        let height = height.min(canvas);
        Rect {
            x: (canvas - width) / 2,
            y: (canvas - height) / 2,
            width,
            height,
        }
    }

    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Draws the symbol and quiet zone, with the logo area excavated when requested
///
/// The logo itself is not drawn.
pub fn rasterize(code: &QrCode, config: &RenderConfig) -> Result<PixelBuffer> {
    config.validate()?;
    let module_size = config.module_size_px;
    let canvas = config.canvas_size(code);
    let excavation = config
        .logo
        .as_ref()
        .filter(|logo| logo.excavate)
        .map(|logo| Rect::centered(canvas, logo.width_px, logo.height_px));

    let mut image = RgbaImage::from_pixel(canvas, canvas, config.background);
    let mut excavated = 0;
    for module in DrawIterator::new(code, config.quiet_zone_modules as usize) {
        if module.color != Color::Black {
            continue;
        }
        let footprint = Rect {
            x: module.x as u32 * module_size,
            y: module.y as u32 * module_size,
            width: module_size,
            height: module_size,
        };
        if excavation.is_some_and(|area| area.intersects(&footprint)) {
            excavated += 1;
            continue;
        }
        for y in footprint.y..footprint.y + module_size {
            for x in footprint.x..footprint.x + module_size {
                image.put_pixel(x, y, config.foreground);
            }
        }
    }
    debug!(canvas, module_size, excavated, "Rasterized QR code");

    Ok(PixelBuffer::new(image))
}

/// Draws the symbol and composites the logo on top
pub fn render(code: &QrCode, config: &RenderConfig) -> Result<PixelBuffer> {
    let mut buffer = rasterize(code, config)?;
    let logo = match &config.logo {
        Some(logo) => logo,
        None => return Ok(buffer),
    };

    let canvas = buffer.width();
    let area = Rect::centered(canvas, logo.width_px, logo.height_px);
    if area.area() == 0 || logo.image.width() == 0 || logo.image.height() == 0 {
        return Ok(buffer);
    }

    let symbol_side = u64::from(code.width() as u32 * config.module_size_px);
    let coverage = area.area() as f64 / (symbol_side * symbol_side) as f64;
    let error_correction = code.error_correction();
    if coverage > error_correction.recovery_fraction() {
        let warning = RenderWarning::LogoTooLarge {
            coverage,
            error_correction,
        };
        warn!("{}", warning);
        buffer.warnings.push(warning);
    }

    // Copies without resampling when the size already matches
    let resized = imageops::resize(&logo.image, area.width, area.height, FilterType::Triangle);
    imageops::overlay(
        &mut buffer.image,
        &resized,
        i64::from(area.x),
        i64::from(area.y),
    );

    Ok(buffer)
}
