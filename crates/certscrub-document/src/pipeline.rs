// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Redaction pipeline — load a certificate, blank the selected regions, draw
// the replacements, and serialise.
//
// A render is a pure function of its inputs: every call owns its own
// document, and either the full output or an error is returned.

use certscrub_core::error::{CertScrubError, Result};
use certscrub_core::{NAME_REGION, OutputSettings, PHOTO_REGION, REDACTION_COLOR, ReplacementImage};
use tracing::{info, instrument, warn};

use crate::image::embed_and_place;
use crate::pdf::PdfCanvas;
use crate::redact::redact;
use crate::text::overlay_text;

/// Everything a single render needs besides the certificate bytes.
#[derive(Debug, Clone, Default)]
pub struct RedactionRequest {
    pub settings: OutputSettings,
    /// Photo drawn into the photo region when `insert_photo` is set.
    pub image: Option<ReplacementImage>,
    /// Name drawn into the name region when `insert_name` is set. Empty means none.
    pub name: Option<String>,
}

impl RedactionRequest {
    pub fn new(settings: OutputSettings) -> Self {
        Self {
            settings,
            image: None,
            name: None,
        }
    }

    pub fn with_image(mut self, image: ReplacementImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The replacement name, if present and non-empty.
    fn replacement_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Apply `request` to the certificate in `pdf` and return the new PDF bytes.
#[instrument(skip_all, fields(bytes_len = pdf.len(), settings = ?request.settings))]
pub fn render(pdf: &[u8], request: &RedactionRequest) -> Result<Vec<u8>> {
    let settings = request.settings;
    let mut canvas = PdfCanvas::load(pdf)?;

    if settings.redact_photo() {
        redact(&mut canvas, &PHOTO_REGION, REDACTION_COLOR);
        match (&request.image, settings.insert_photo()) {
            (Some(image), true) => {
                embed_and_place(&mut canvas, &PHOTO_REGION, image)?;
            }
            (Some(_), false) => warn!("Replacement photo supplied but photo insertion is off"),
            (None, _) => {}
        }
    } else if request.image.is_some() {
        warn!("Replacement photo supplied but the photo region is kept");
    }

    if settings.redact_name() {
        redact(&mut canvas, &NAME_REGION, REDACTION_COLOR);
        match (request.replacement_name(), settings.insert_name()) {
            (Some(name), true) => overlay_text(&mut canvas, name, &NAME_REGION)?,
            (Some(_), false) => warn!("Replacement name supplied but name insertion is off"),
            (None, _) => {}
        }
    } else if request.replacement_name().is_some() {
        warn!("Replacement name supplied but the name region is kept");
    }

    let page_count = canvas.page_count();
    let output = canvas.finish()?;
    info!(page_count, output_bytes = output.len(), "Certificate rendered");
    Ok(output)
}

/// [`render`] on tokio's blocking pool, for callers inside an async runtime.
///
/// Dropping the returned future abandons the result; the worker finishes its
/// current render and discards the document.
pub async fn render_async(pdf: Vec<u8>, request: RedactionRequest) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || render(&pdf, &request))
        .await
        .map_err(|err| CertScrubError::Worker(format!("render task did not complete: {err}")))?
}
