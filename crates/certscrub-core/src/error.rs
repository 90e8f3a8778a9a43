// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Certscrub.

use thiserror::Error;

/// Top-level error type for all Certscrub operations.
#[derive(Debug, Error)]
pub enum CertScrubError {
    // -- Input document --
    #[error("input is not a readable PDF: {0}")]
    InvalidDocument(String),

    #[error("PDF has no pages")]
    EmptyDocument,

    // -- Replacement assets --
    #[error("replacement image could not be decoded: {0}")]
    UnsupportedImageFormat(String),

    #[error("replacement image has invalid dimensions {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("character {0:?} cannot be shown with a standard PDF font")]
    UnencodableText(char),

    // -- Caller errors --
    #[error("rotation must be 0, 90, 180 or 270 degrees, got {0}")]
    InvalidRotation(i32),

    #[error("invalid output settings: {0}")]
    InvalidSettings(String),

    // -- Embedding / serialisation --
    #[error("font could not be embedded: {0}")]
    FontEmbedFailure(String),

    #[error("PDF page structure error: {0}")]
    PdfStructure(String),

    #[error("PDF could not be serialised: {0}")]
    Serialize(String),

    #[error("render worker failed: {0}")]
    Worker(String),

    // -- Surface --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which party an error should be reported against.
///
/// Callers recover differently per origin: a bad input document means
/// choosing another file, a bad asset means retrying without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// The certificate PDF itself.
    InputDocument,
    /// The replacement photo or name.
    ReplacementAsset,
    /// A programming error in the calling code (bad rotation, bad settings).
    Caller,
    /// Embedding, serialisation, or environment failures.
    Internal,
}

impl CertScrubError {
    /// Classify this error by the input that caused it.
    pub fn origin(&self) -> ErrorOrigin {
        match self {
            Self::InvalidDocument(_) | Self::EmptyDocument => ErrorOrigin::InputDocument,
            Self::UnsupportedImageFormat(_)
            | Self::InvalidImageDimensions { .. }
            | Self::UnencodableText(_) => ErrorOrigin::ReplacementAsset,
            Self::InvalidRotation(_) | Self::InvalidSettings(_) => ErrorOrigin::Caller,
            Self::FontEmbedFailure(_)
            | Self::PdfStructure(_)
            | Self::Serialize(_)
            | Self::Worker(_)
            | Self::Io(_)
            | Self::Json(_) => ErrorOrigin::Internal,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CertScrubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_errors_are_attributed_to_the_input() {
        assert_eq!(
            CertScrubError::InvalidDocument("bad header".into()).origin(),
            ErrorOrigin::InputDocument
        );
        assert_eq!(CertScrubError::EmptyDocument.origin(), ErrorOrigin::InputDocument);
    }

    #[test]
    fn asset_and_caller_errors_are_distinct() {
        assert_eq!(
            CertScrubError::UnsupportedImageFormat("not a png".into()).origin(),
            ErrorOrigin::ReplacementAsset
        );
        assert_eq!(
            CertScrubError::InvalidRotation(45).origin(),
            ErrorOrigin::Caller
        );
        assert_eq!(
            CertScrubError::FontEmbedFailure("no resources".into()).origin(),
            ErrorOrigin::Internal
        );
    }

    #[test]
    fn rotation_message_names_the_value() {
        let msg = CertScrubError::InvalidRotation(45).to_string();
        assert!(msg.contains("45"));
    }
}
