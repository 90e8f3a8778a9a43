// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the front ends.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The origin decides what the user is asked to change.

use crate::error::{CertScrubError, ErrorOrigin};

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Which input needs attention.
    pub origin: ErrorOrigin,
}

/// Convert a `CertScrubError` into a `HumanError`.
pub fn humanize_error(err: &CertScrubError) -> HumanError {
    let origin = err.origin();
    let (message, suggestion): (String, String) = match err {
        // -- Input document --
        CertScrubError::InvalidDocument(reason) if reason.contains("encrypted") => (
            "This PDF is protected with a password or encryption.".into(),
            "Save an unprotected copy of the certificate and choose that file.".into(),
        ),
        CertScrubError::InvalidDocument(_) => (
            "This file doesn't look like a PDF.".into(),
            "Download the certificate again and choose the PDF file.".into(),
        ),
        CertScrubError::EmptyDocument => (
            "This PDF has no pages.".into(),
            "Choose the certificate PDF that shows your details.".into(),
        ),

        // -- Replacement assets --
        CertScrubError::UnsupportedImageFormat(_) => (
            "We couldn't read your photo.".into(),
            "Use a JPEG or PNG photo whose file extension matches its type, or continue without a photo.".into(),
        ),
        CertScrubError::InvalidImageDimensions { .. } => (
            "Your photo is empty.".into(),
            "Pick a photo that opens normally in an image viewer.".into(),
        ),
        CertScrubError::UnencodableText(ch) => (
            "The name contains a character we can't print.".into(),
            format!("Remove or replace {ch:?}; only Western European letters are supported."),
        ),

        // -- Caller errors --
        CertScrubError::InvalidRotation(degrees) => (
            "That rotation isn't supported.".into(),
            format!("Rotate by 0, 90, 180 or 270 degrees (got {degrees})."),
        ),
        CertScrubError::InvalidSettings(detail) => (
            "These options can't be combined.".into(),
            format!("A photo or name can only be added where the original was removed ({detail})."),
        ),

        // -- Internal --
        CertScrubError::FontEmbedFailure(_) => (
            "We couldn't add the name to this certificate.".into(),
            "Try again without a replacement name, or use a different copy of the certificate.".into(),
        ),
        CertScrubError::PdfStructure(_) | CertScrubError::Serialize(_) => (
            "We couldn't write the updated certificate.".into(),
            "This PDF has an unusual structure. Try re-saving it with a PDF viewer first.".into(),
        ),
        CertScrubError::Worker(_) => (
            "Processing stopped before it finished.".into(),
            "Run the update again.".into(),
        ),
        CertScrubError::Io(io) => (
            "A file couldn't be read or written.".into(),
            format!("Check the path and permissions ({io})."),
        ),
        CertScrubError::Json(json) => (
            "The settings file isn't valid.".into(),
            format!("Fix the JSON in the settings file ({json})."),
        ),
    };

    HumanError {
        message,
        suggestion,
        origin,
    }
}
