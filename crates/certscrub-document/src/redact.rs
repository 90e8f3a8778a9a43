// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Region redaction — paint over a fixed region of the certificate.
//
// This is visual occlusion only: the original operators stay in the page's
// content stream underneath the fill.

use certscrub_core::{Region, RgbColor};
use tracing::debug;

use crate::pdf::PdfCanvas;

/// Blank `region` with an opaque `color` fill.
///
/// Later draws occlude earlier ones, so redact a region before drawing its
/// replacement.
pub fn redact(canvas: &mut PdfCanvas, region: &Region, color: RgbColor) {
    debug!(?region, ?color, "Redacting region");
    canvas.fill_rect(region, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, assert_close, numbers, operations_of};
    use certscrub_core::{NAME_REGION, PHOTO_REGION, REDACTION_COLOR};

    #[test]
    fn both_regions_are_filled_in_background_colour() {
        let pdf = test_support::certificate_pdf(1);
        let mut canvas = PdfCanvas::load(&pdf).unwrap();
        redact(&mut canvas, &PHOTO_REGION, REDACTION_COLOR);
        redact(&mut canvas, &NAME_REGION, REDACTION_COLOR);
        let ops = operations_of(&canvas.finish().unwrap());

        let rects: Vec<Vec<f32>> = ops
            .iter()
            .filter(|op| op.operator == "re")
            .map(numbers)
            .collect();
        // The template's own photo box comes first.
        assert_eq!(rects.len(), 3);
        assert_close(&rects[1], &[35.0, 145.0, 100.0, 100.0]);
        assert_close(&rects[2], &[145.0, 150.0, 190.0, 25.0]);

        let fills: Vec<Vec<f32>> = ops
            .iter()
            .filter(|op| op.operator == "rg")
            .map(numbers)
            .collect();
        assert_close(fills.last().unwrap(), &[0.91, 0.93, 0.94]);
    }
}
