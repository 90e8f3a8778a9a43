// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sample certificate — a one-page PDF laid out like the certificate template,
// built with `printpdf` 0.8, so the tool can be tried without a real one.
//
// printpdf 0.8 uses a data-oriented API: pages are `PdfPage` structs holding
// `Vec<Op>` operation lists, serialised via `PdfDocument::save()`.

use certscrub_core::{NAME_REGION, PHOTO_REGION};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// A4 landscape.
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;

/// Placeholder photo colour (mid grey).
const PHOTO_GREY: u8 = 128;

/// Generator for a certificate with a photo and a printed holder name in the
/// fixed regions.
#[derive(Debug, Clone)]
pub struct SampleCertificate {
    /// Heading printed at the top of the page.
    title: String,
    /// Name printed in the name region.
    holder: String,
}

impl Default for SampleCertificate {
    fn default() -> Self {
        Self {
            title: "Certificate of Completion".into(),
            holder: "Original Holder".into(),
        }
    }
}

impl SampleCertificate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = holder.into();
        self
    }

    /// Serialise the sample certificate to PDF bytes.
    #[instrument(skip(self), fields(holder = %self.holder))]
    pub fn render(&self) -> Vec<u8> {
        info!(title = %self.title, "Creating sample certificate");

        let mut doc = PdfDocument::new(&self.title);

        // A flat grey square standing in for the holder's photo, 1px = 1pt.
        let side = PHOTO_REGION.width as usize;
        let photo = RawImage {
            pixels: RawImageData::U8(vec![PHOTO_GREY; side * side * 3]),
            width: side,
            height: side,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let photo_id = doc.add_image(&photo);

        let page_h_pt = Mm(PAGE_HEIGHT_MM).into_pt().0;
        let mut ops = vec![Op::UseXobject {
            id: photo_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(PHOTO_REGION.x)),
                translate_y: Some(Pt(PHOTO_REGION.y)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(72.0),
                rotate: None,
            },
        }];

        push_line(&mut ops, &self.title, 35.0, page_h_pt - 80.0, 28.0, BuiltinFont::HelveticaBold);
        push_line(
            &mut ops,
            "This certifies that the person named below has completed the programme.",
            35.0,
            page_h_pt - 120.0,
            12.0,
            BuiltinFont::Helvetica,
        );
        push_line(
            &mut ops,
            &self.holder,
            NAME_REGION.x + 5.0,
            NAME_REGION.y + 8.0,
            14.0,
            BuiltinFont::HelveticaBold,
        );

        let page = PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops);
        doc.with_pages(vec![page]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(
            output_bytes = output.len(),
            warnings = warnings.len(),
            "Sample certificate serialised"
        );
        output
    }
}

/// Append one line of built-in-font text with its baseline at `(x, y)`.
fn push_line(ops: &mut Vec<Op>, text: &str, x: f32, y: f32, size: f32, font: BuiltinFont) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font: font.clone(),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{RedactionRequest, render};
    use certscrub_core::OutputSettings;
    use lopdf::Document;

    #[test]
    fn sample_is_a_single_page_pdf() {
        let bytes = SampleCertificate::new().render();
        assert!(bytes.starts_with(b"%PDF"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn sample_can_be_redacted() {
        let bytes = SampleCertificate::new().with_holder("Sam Sample").render();
        let request =
            RedactionRequest::new(OutputSettings::default().with_name_insert()).with_name("Jane Doe");
        let output = render(&bytes, &request).unwrap();
        let doc = Document::load_mem(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
