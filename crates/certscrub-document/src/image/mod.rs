// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — embed replacement photos into the page, and bound uploads to
// a sensible resolution first.

pub mod compositor;
pub mod processor;

pub use compositor::{EmbeddedImage, embed_and_place};
pub use processor::prepare_upload;
