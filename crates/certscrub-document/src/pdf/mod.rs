// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — the drawing surface over an existing certificate, and a sample
// certificate generator.

pub mod canvas;
pub mod sample;

pub use canvas::PdfCanvas;
pub use sample::SampleCertificate;
