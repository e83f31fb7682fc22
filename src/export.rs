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

use crate::color::{rgb_to_hex, WHITE};
use crate::error::{Error, Result};
use crate::render::PixelBuffer;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// How the vector output draws the pixels
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VectorStyle {
    /// One path of rectangles per color
    #[default]
    Paths,
    /// A PNG of the buffer inside an `<image>` element
    EmbeddedRaster,
}

/// Serializes pixel buffers, optionally inside a band of padding
#[derive(Clone, Debug)]
pub struct Exporter {
    pub padding_px: u32,
    pub padding_color: Rgba<u8>,
    pub vector_style: VectorStyle,
}

impl Default for Exporter {
    fn default() -> Self {
        Exporter {
            padding_px: 0,
            padding_color: WHITE,
            vector_style: VectorStyle::default(),
        }
    }
}

impl Exporter {
    pub fn with_padding(mut self, padding_px: u32, padding_color: Rgba<u8>) -> Self {
        self.padding_px = padding_px;
        self.padding_color = padding_color;
        self
    }

    pub fn with_vector_style(mut self, vector_style: VectorStyle) -> Self {
        self.vector_style = vector_style;
        self
    }

    /// The buffer on a fresh canvas of padding color
    pub fn frame(&self, buffer: &PixelBuffer) -> Result<RgbaImage> {
        if buffer.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        if self.padding_px == 0 {
            return Ok(buffer.image().clone());
        }
        let padding = self.padding_px;
        let mut canvas = RgbaImage::from_pixel(
            buffer.width() + 2 * padding,
            buffer.height() + 2 * padding,
            self.padding_color,
        );
        for (x, y, pixel) in buffer.image().enumerate_pixels() {
            canvas.put_pixel(x + padding, y + padding, *pixel);
        }
        Ok(canvas)
    }

    /// PNG bytes of the framed buffer
    pub fn raster(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        encode_png(&self.frame(buffer)?)
    }

    /// SVG markup of the framed buffer
    ///
    /// `background` is the color of the buffer around the symbol. Without padding it fills the
    /// whole canvas, so only pixels of another color are drawn.
    pub fn vector(&self, buffer: &PixelBuffer, background: Rgba<u8>) -> Result<String> {
        let base = if self.padding_px > 0 {
            self.padding_color
        } else {
            background
        };
        let framed = self.frame(buffer)?;
        let (width, height) = framed.dimensions();

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}" shape-rendering="crispEdges">"#,
            width, height
        );
        svg.push('\n');
        svg.push_str(&format!(
            r#"<rect width="100%" height="100%"{}/>"#,
            fill_attributes(base)
        ));
        svg.push('\n');

        match self.vector_style {
            VectorStyle::Paths => {
                for (color, path) in color_paths(&framed, base) {
                    svg.push_str(&format!(
                        r#"<path{} d="{}"/>"#,
                        fill_attributes(Rgba(color)),
                        path
                    ));
                    svg.push('\n');
                }
            }
            VectorStyle::EmbeddedRaster => {
                let png = encode_png(buffer.image())?;
                svg.push_str(&format!(
                    r#"<image x="{}" y="{}" width="{}" height="{}" href="data:image/png;base64,{}"/>"#,
                    self.padding_px,
                    self.padding_px,
                    buffer.width(),
                    buffer.height(),
                    BASE64.encode(png)
                ));
                svg.push('\n');
            }
        }
        svg.push_str("</svg>\n");

        debug!(width, height, style = ?self.vector_style, "Exported SVG");
        Ok(svg)
    }

    pub fn save_raster(&self, buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.raster(buffer)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(path = %path.as_ref().display(), bytes = bytes.len(), "Saved PNG");
        Ok(())
    }

    pub fn save_vector(
        &self,
        buffer: &PixelBuffer,
        background: Rgba<u8>,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let svg = self.vector(buffer, background)?;
        std::fs::write(path.as_ref(), &svg)?;
        info!(path = %path.as_ref().display(), bytes = svg.len(), "Saved SVG");
        Ok(())
    }
}

/// PNG bytes of the buffer, without padding
pub fn export_raster(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    Exporter::default().raster(buffer)
}

/// SVG markup of the buffer, without padding
pub fn export_vector(buffer: &PixelBuffer, background: Rgba<u8>) -> Result<String> {
    Exporter::default().vector(buffer, background)
}

pub fn save_raster(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<()> {
    Exporter::default().save_raster(buffer, path)
}

pub fn save_vector(buffer: &PixelBuffer, background: Rgba<u8>, path: impl AsRef<Path>) -> Result<()> {
    Exporter::default().save_vector(buffer, background, path)
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

fn fill_attributes(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    let mut attributes = format!(r#" fill="{}""#, rgb_to_hex(r, g, b));
    if a != u8::MAX {
        attributes.push_str(&format!(
            r#" fill-opacity="{:.3}""#,
            f32::from(a) / f32::from(u8::MAX)
        ));
    }
    attributes
}

/// Horizontal runs of equal color, one path per color that differs from `base`
fn color_paths(image: &RgbaImage, base: Rgba<u8>) -> BTreeMap<[u8; 4], String> {
    let mut paths: BTreeMap<[u8; 4], String> = BTreeMap::new();
    for (y, row) in image.rows().enumerate() {
        let mut x = 0;
        let mut row = row.peekable();
        while let Some(&pixel) = row.next() {
            let mut run = 1;
            while row.next_if(|&&next| next == pixel).is_some() {
                run += 1;
            }
            if pixel != base {
                paths
                    .entry(pixel.0)
                    .or_default()
                    .push_str(&format!("M{} {}h{}v1h-{}z", x, y, run, run));
            }
            x += run;
        }
    }
    paths
}
