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

//! Styling loaded from a JSON file
//!
//! Every field is optional, absent fields take the defaults of the web generator: level H,
//! black on white, a 10 pixel white padding band and a 40×40 excavated logo.

use crate::color::{self, BLACK, WHITE};
use crate::error::Result;
use crate::error_correction::ErrorCorrectionLevel;
use crate::export::{Exporter, VectorStyle};
use crate::qrcode::QrCode;
use crate::render::{LogoSpec, RenderConfig};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub error_correction: ErrorCorrectionLevel,
    /// Requested canvas size; takes precedence over `module_size_px`
    pub size_px: Option<u32>,
    pub module_size_px: u32,
    pub quiet_zone_modules: u32,
    #[serde(with = "color::hex")]
    pub foreground: Rgba<u8>,
    #[serde(with = "color::hex")]
    pub background: Rgba<u8>,
    pub padding_px: u32,
    #[serde(with = "color::hex")]
    pub padding_color: Rgba<u8>,
    pub vector_style: VectorStyle,
    pub logo: Option<LogoStyle>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        StyleConfig {
            error_correction: ErrorCorrectionLevel::High,
            size_px: None,
            module_size_px: render.module_size_px,
            quiet_zone_modules: render.quiet_zone_modules,
            foreground: BLACK,
            background: WHITE,
            padding_px: 10,
            padding_color: WHITE,
            vector_style: VectorStyle::default(),
            logo: None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoStyle {
    pub path: PathBuf,
    pub width_px: u32,
    pub height_px: u32,
    pub excavate: bool,
}

impl Default for LogoStyle {
    fn default() -> Self {
        LogoStyle {
            path: PathBuf::new(),
            width_px: 40,
            height_px: 40,
            excavate: true,
        }
    }
}

impl LogoStyle {
    pub fn load(&self) -> Result<LogoSpec> {
        let image = image::open(&self.path)?.to_rgba8();
        Ok(LogoSpec::new(image)
            .with_size(self.width_px, self.height_px)
            .with_excavation(self.excavate))
    }
}

impl StyleConfig {
    pub fn from_json(json: &str) -> Result<StyleConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<StyleConfig> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.as_ref().display(), "Loaded style configuration");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render settings for this code, reading the logo file if one is configured
    pub fn render_config(&self, code: &QrCode) -> Result<RenderConfig> {
        let logo = self.logo.as_ref().map(LogoStyle::load).transpose()?;
        let config = RenderConfig {
            module_size_px: self.module_size_px,
            quiet_zone_modules: self.quiet_zone_modules,
            foreground: self.foreground,
            background: self.background,
            logo,
        };
        Ok(match self.size_px {
            Some(size_px) => config.fit_to_size(code, size_px),
            None => config,
        })
    }

    pub fn exporter(&self) -> Exporter {
        Exporter::default()
            .with_padding(self.padding_px, self.padding_color)
            .with_vector_style(self.vector_style)
    }
}

#[cfg(test)]
mod tests {
    use crate::color::{BLACK, WHITE};
    use crate::config::StyleConfig;
    use crate::error::Error;
    use crate::error_correction::ErrorCorrectionLevel;
    use crate::export::VectorStyle;
    use crate::qrcode::QrCode;
    use image::Rgba;

    #[test]
    fn empty_object_is_default() {
        let config = StyleConfig::from_json("{}").unwrap();
        assert_eq!(config, StyleConfig::default());
        assert_eq!(config.error_correction, ErrorCorrectionLevel::High);
        assert_eq!(config.foreground, BLACK);
        assert_eq!(config.padding_px, 10);
    }

    #[test]
    fn parse() {
        let config = StyleConfig::from_json(
            r##"{
                "error_correction": "Q",
                "size_px": 200,
                "foreground": "#1a2B3c",
                "background": "#ffffff80",
                "padding_px": 0,
                "vector_style": "embedded-raster",
                "logo": { "path": "logo.png" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.error_correction, ErrorCorrectionLevel::Quartile);
        assert_eq!(config.size_px, Some(200));
        assert_eq!(config.foreground, Rgba([0x1a, 0x2b, 0x3c, 255]));
        assert_eq!(config.background, Rgba([255, 255, 255, 0x80]));
        assert_eq!(config.padding_color, WHITE);
        assert_eq!(config.vector_style, VectorStyle::EmbeddedRaster);
        let logo = config.logo.unwrap();
        assert_eq!((logo.width_px, logo.height_px, logo.excavate), (40, 40, true));
    }

    #[test]
    fn invalid_color() {
        let result = StyleConfig::from_json(r#"{"foreground": "black"}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn unknown_field() {
        assert!(StyleConfig::from_json(r##"{"colour": "#000000"}"##).is_err());
    }

    #[test]
    fn json_round_trip() {
        let config = StyleConfig {
            size_px: Some(300),
            foreground: Rgba([1, 2, 3, 4]),
            ..StyleConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains(r##""foreground": "#01020304""##));
        assert_eq!(StyleConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn render_config_fits_size() {
        let code = QrCode::encode(b"12345", ErrorCorrectionLevel::Low).unwrap();
        let config = StyleConfig {
            size_px: Some(200),
            ..StyleConfig::default()
        };
        let render = config.render_config(&code).unwrap();
        assert_eq!(render.module_size_px, 6);
        assert!(render.logo.is_none());

        let exporter = config.exporter();
        assert_eq!(exporter.padding_px, 10);
    }

    #[test]
    fn missing_logo_file() {
        let config = StyleConfig::from_json(r#"{"logo": {"path": "/nonexistent/logo.png"}}"#).unwrap();
        let code = QrCode::encode(b"12345", ErrorCorrectionLevel::Low).unwrap();
        assert!(config.render_config(&code).is_err());
    }
}
