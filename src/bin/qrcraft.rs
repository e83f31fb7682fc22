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

//! Command line front end: encode a URL or a contact card and write PNG and SVG files.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qrcraft::color::parse_color;
use qrcraft::{render, ContactRecord, ErrorCorrectionLevel, LogoStyle, QrCode, StyleConfig, VectorStyle};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrcraft", version)]
#[command(about = "Generate QR codes with colors and logos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    style: StyleArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a URL or any other text
    Url { text: String },
    /// Encode contact details as a vCard
    Contact(ContactArgs),
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<ContactArgs> for ContactRecord {
    fn from(args: ContactArgs) -> Self {
        ContactRecord {
            name: args.name,
            phone: args.phone,
            email: args.email,
            address: args.address,
            company: args.company,
            title: args.title,
            website: args.website,
            notes: args.notes,
        }
    }
}

/// Overrides on top of the style file
#[derive(Args)]
struct StyleArgs {
    /// JSON style file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Error correction level: L, M, Q or H
    #[arg(short = 'e', long, global = true)]
    error_correction: Option<ErrorCorrectionLevel>,

    /// Pixels per module
    #[arg(long, global = true)]
    module_size: Option<u32>,

    /// Largest canvas side in pixels, overrides the module size
    #[arg(long, global = true)]
    size: Option<u32>,

    /// Quiet zone in modules
    #[arg(long, global = true)]
    quiet_zone: Option<u32>,

    /// Dark module color as #rrggbb or #rrggbbaa
    #[arg(long, global = true)]
    foreground: Option<String>,

    /// Light module color as #rrggbb or #rrggbbaa
    #[arg(long, global = true)]
    background: Option<String>,

    /// Padding band around the exported image in pixels
    #[arg(long, global = true)]
    padding: Option<u32>,

    #[arg(long, global = true)]
    padding_color: Option<String>,

    /// Image drawn in the center of the symbol
    #[arg(long, global = true)]
    logo: Option<PathBuf>,

    /// Side of the logo in pixels
    #[arg(long, global = true)]
    logo_size: Option<u32>,

    /// Draw the logo over the modules instead of clearing them
    #[arg(long, global = true)]
    no_excavate: bool,
}

impl StyleArgs {
    fn apply(&self, style: &mut StyleConfig) -> anyhow::Result<()> {
        if let Some(error_correction) = self.error_correction {
            style.error_correction = error_correction;
        }
        if let Some(module_size) = self.module_size {
            style.module_size_px = module_size;
        }
        if let Some(size) = self.size {
            style.size_px = Some(size);
        }
        if let Some(quiet_zone) = self.quiet_zone {
            style.quiet_zone_modules = quiet_zone;
        }
        if let Some(foreground) = &self.foreground {
            style.foreground = parse_color(foreground)?;
        }
        if let Some(background) = &self.background {
            style.background = parse_color(background)?;
        }
        if let Some(padding) = self.padding {
            style.padding_px = padding;
        }
        if let Some(padding_color) = &self.padding_color {
            style.padding_color = parse_color(padding_color)?;
        }
        if let Some(path) = &self.logo {
            let logo = style.logo.get_or_insert_with(LogoStyle::default);
            logo.path = path.clone();
        }
        if let Some(logo) = &mut style.logo {
            if let Some(logo_size) = self.logo_size {
                logo.width_px = logo_size;
                logo.height_px = logo_size;
            }
            if self.no_excavate {
                logo.excavate = false;
            }
        }
        Ok(())
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Write a PNG image
    #[arg(long, global = true)]
    png: Option<PathBuf>,

    /// Write an SVG image
    #[arg(long, global = true)]
    svg: Option<PathBuf>,

    /// Embed a PNG in the SVG instead of drawing paths
    #[arg(long, global = true)]
    embed_raster: bool,

    /// Print the symbol to the terminal
    #[arg(long, global = true)]
    preview: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("qrcraft=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut style = match &cli.style.config {
        Some(path) => StyleConfig::load(path)
            .with_context(|| format!("Failed to load style from {}", path.display()))?,
        None => StyleConfig::default(),
    };
    cli.style.apply(&mut style)?;
    if cli.output.embed_raster {
        style.vector_style = VectorStyle::EmbeddedRaster;
    }

    let payload = match cli.command {
        Commands::Url { text } => text,
        Commands::Contact(contact) => ContactRecord::from(contact).to_vcard(),
    };

    let code = QrCode::generator()
        .with_text(&payload)
        .with_specific_error_correction_level(style.error_correction)
        .build()?;
    info!(
        version = code.version().number(),
        error_correction = %code.error_correction(),
        mask = code.mask_pattern().reference(),
        "Encoded {} bytes",
        payload.len()
    );

    let output = &cli.output;
    if output.preview || (output.png.is_none() && output.svg.is_none()) {
        println!();
        print!("{}", code);
        println!();
    }

    if output.png.is_none() && output.svg.is_none() {
        return Ok(());
    }

    let config = style.render_config(&code)?;
    let buffer = render(&code, &config)?;
    let exporter = style.exporter();
    if let Some(path) = &output.png {
        exporter
            .save_raster(&buffer, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    if let Some(path) = &output.svg {
        exporter
            .save_vector(&buffer, config.background, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
