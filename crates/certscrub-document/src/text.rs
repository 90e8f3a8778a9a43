// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text overlay — write the replacement name into the vacated name region with
// the built-in Helvetica font.

use certscrub_core::error::{CertScrubError, Result};
use certscrub_core::{BLACK, Region};
use tracing::{info, instrument};

use crate::pdf::PdfCanvas;
use crate::pdf::canvas::TextRun;

const FONT: &str = "Helvetica";
const FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 24.0;
const OPACITY: f32 = 0.75;

/// Offset of the baseline origin from the region's bottom-left corner. The
/// vertical offset roughly centres 12pt text in the 25pt name box.
const ANCHOR_DX: f32 = 5.0;
const ANCHOR_DY: f32 = 10.0;

/// Draw `"- " + text` at the fixed anchor inside `region`.
///
/// The line is neither wrapped nor truncated; long names run past the region.
#[instrument(skip(canvas, text), fields(text_len = text.len()))]
pub fn overlay_text(canvas: &mut PdfCanvas, text: &str, region: &Region) -> Result<()> {
    let line = format!("- {text}");
    let encoded = encode_win_ansi(&line)?;

    let font = canvas
        .register_standard_font(FONT)
        .map_err(|err| CertScrubError::FontEmbedFailure(format!("{FONT}: {err}")))?;
    let graphics_state = canvas
        .register_opacity(OPACITY)
        .map_err(|err| CertScrubError::FontEmbedFailure(format!("text opacity: {err}")))?;

    let (x, y) = (region.x + ANCHOR_DX, region.y + ANCHOR_DY);
    canvas.draw_text(TextRun {
        font: &font,
        graphics_state: Some(&graphics_state),
        size: FONT_SIZE,
        leading: LINE_HEIGHT,
        x,
        y,
        color: BLACK,
        encoded,
    });

    info!(x, y, "Replacement name drawn");
    Ok(())
}

/// Encode `text` for a standard font using WinAnsiEncoding (Windows-1252).
///
/// Fails on the first character the encoding cannot represent.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|ch| win_ansi_byte(ch).ok_or(CertScrubError::UnencodableText(ch)))
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(_, mapped)| *mapped == ch)
            .map(|(byte, _)| *byte),
    }
}

/// The 0x80–0x9F block where Windows-1252 departs from Latin-1.
const WIN_ANSI_HIGH: [(u8, char); 27] = [
    (0x80, '€'),
    (0x82, '‚'),
    (0x83, 'ƒ'),
    (0x84, '„'),
    (0x85, '…'),
    (0x86, '†'),
    (0x87, '‡'),
    (0x88, 'ˆ'),
    (0x89, '‰'),
    (0x8A, 'Š'),
    (0x8B, '‹'),
    (0x8C, 'Œ'),
    (0x8E, 'Ž'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '•'),
    (0x96, '–'),
    (0x97, '—'),
    (0x98, '˜'),
    (0x99, '™'),
    (0x9A, 'š'),
    (0x9B, '›'),
    (0x9C, 'œ'),
    (0x9E, 'ž'),
    (0x9F, 'Ÿ'),
];
