// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command implementations: read inputs from disk, call the document engine,
// and write the result only once the whole render has succeeded.

use std::path::Path;

use tracing::{info, instrument, warn};

use certscrub_core::error::Result;
use certscrub_core::{ImageFormat, OutputSettings, ReplacementImage, Rotation};
use certscrub_document::{RedactionRequest, SampleCertificate, prepare_upload, render};

use crate::args::{RedactArgs, SampleArgs};

/// Run `certscrub redact`.
#[instrument(skip_all, fields(input = %args.input.display(), output = %args.output.display()))]
pub fn redact(args: &RedactArgs) -> Result<()> {
    // Reject a bad angle before touching any file.
    let rotation = Rotation::from_degrees(args.rotate)?;
    let settings = settings_for(args)?;

    let pdf = std::fs::read(&args.input)?;
    let mut request = RedactionRequest::new(settings);
    if let Some(path) = &args.photo {
        request = request.with_image(load_photo(path, rotation, !args.no_downscale)?);
    }
    if let Some(name) = &args.name {
        request = request.with_name(name.clone());
    }

    let output = render(&pdf, &request)?;
    std::fs::write(&args.output, &output)?;
    info!(bytes = output.len(), "Wrote updated certificate");
    Ok(())
}

/// Run `certscrub sample`.
pub fn sample(args: &SampleArgs) -> Result<()> {
    let bytes = SampleCertificate::new()
        .with_title(args.title.clone())
        .with_holder(args.holder.clone())
        .render();
    std::fs::write(&args.output, &bytes)?;
    info!(output = %args.output.display(), "Wrote sample certificate");
    Ok(())
}

/// Combine the settings file (or the redact-only default) with the flags.
fn settings_for(args: &RedactArgs) -> Result<OutputSettings> {
    let mut settings = match &args.settings {
        Some(path) => OutputSettings::load(path)?,
        None => OutputSettings::default(),
    };
    if args.keep_photo {
        settings = settings.without_photo_redaction();
    }
    if args.keep_name {
        settings = settings.without_name_redaction();
    }
    if args.photo.is_some() {
        settings = settings.with_photo_insert();
    }
    if args.name.as_deref().is_some_and(|name| !name.is_empty()) {
        settings = settings.with_name_insert();
    }
    Ok(settings)
}

fn load_photo(path: &Path, rotation: Rotation, downscale: bool) -> Result<ReplacementImage> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = ImageFormat::from_file_name(&file_name);
    let data = std::fs::read(path)?;
    if let Some(sniffed) = ImageFormat::sniff(&data).filter(|sniffed| *sniffed != format) {
        warn!(
            file = %file_name,
            extension = format.mime_type(),
            content = sniffed.mime_type(),
            "Photo extension does not match its content"
        );
    }
    let data = if downscale {
        prepare_upload(&data, format)?
    } else {
        data
    };
    Ok(ReplacementImage::new(data, format, rotation))
}
