// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// certscrub-document — Redaction and overlay engine for certificate PDFs.
//
// Blanks the fixed photo and name regions of page 0, optionally draws a
// replacement photo (with quarter-turn rotation) and a replacement name, and
// re-serialises the document without object streams.

pub mod geometry;
pub mod image;
pub mod pdf;
pub mod pipeline;
pub mod redact;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the primary entry points so callers can use `certscrub_document::render` etc.
pub use crate::geometry::{Placement, resolve_placement};
pub use crate::image::processor::prepare_upload;
pub use crate::pdf::canvas::PdfCanvas;
pub use crate::pdf::sample::SampleCertificate;
pub use crate::pipeline::{RedactionRequest, render, render_async};
