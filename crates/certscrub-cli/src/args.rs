// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "certscrub", version, about = "Blank and replace the photo and name on a certificate PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Redact the certificate and optionally overlay a new photo and name.
    Redact(RedactArgs),
    /// Write a sample certificate to try the tool on.
    Sample(SampleArgs),
}

#[derive(Debug, Args)]
pub struct RedactArgs {
    /// Certificate PDF to read.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the updated PDF.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Replacement photo (PNG if the extension is exactly `png`, otherwise JPEG).
    #[arg(long, conflicts_with = "keep_photo")]
    pub photo: Option<PathBuf>,

    /// Counter-clockwise rotation of the photo: 0, 90, 180 or 270.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub rotate: i32,

    /// Replacement name.
    #[arg(long, conflicts_with = "keep_name")]
    pub name: Option<String>,

    /// Leave the original photo in place.
    #[arg(long)]
    pub keep_photo: bool,

    /// Leave the original name in place.
    #[arg(long)]
    pub keep_name: bool,

    /// JSON file with `redact_photo`, `redact_name`, `insert_photo`, `insert_name`.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Embed the photo at full resolution instead of bounding it to 540px.
    #[arg(long)]
    pub no_downscale: bool,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Where to write the sample PDF.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name printed on the sample.
    #[arg(long, default_value = "Original Holder")]
    pub holder: String,

    /// Heading printed at the top of the sample.
    #[arg(long, default_value = "Certificate of Completion")]
    pub title: String,
}
