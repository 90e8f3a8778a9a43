// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixtures shared by the unit tests: small certificate-like PDFs built with
// lopdf, encoded test images, and helpers for inspecting rendered output.

use std::io::Cursor;

use ::image::{
    DynamicImage, GrayImage, ImageFormat as CodecFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage,
};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// A certificate-shaped PDF with `page_count` pages. Resources live on the
/// /Pages node so pages inherit them.
pub fn certificate_pdf(page_count: usize) -> Vec<u8> {
    build_pdf(page_count, "F1")
}

/// Like [`certificate_pdf`] with a custom name for the template font.
pub fn certificate_pdf_with_font_named(font_name: &str) -> Vec<u8> {
    build_pdf(1, font_name)
}

fn build_pdf(page_count: usize, font_name: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let mut fonts = Dictionary::new();
    fonts.set(font_name.as_bytes().to_vec(), Object::Reference(font_id));
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let original = format!(
        "0.4 0.4 0.4 rg 40 150 90 90 re f\nBT /{font_name} 14 Tf 150 160 Td (Original Holder) Tj ET\n"
    );

    let mut kids = Vec::new();
    for _ in 0..page_count {
        let content_id = doc.add_object(Stream::new(dictionary! {}, original.clone().into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 842.into(), 595.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut output = Vec::new();
    doc.save_to(&mut output).unwrap();
    output
}

/// A one-page certificate whose inherited /Resources points at an integer.
pub fn certificate_pdf_with_broken_resources() -> Vec<u8> {
    let mut doc = Document::load_mem(&certificate_pdf(1)).unwrap();
    let bogus_id = doc.add_object(Object::Integer(7));
    let pages_id = doc
        .catalog()
        .unwrap()
        .get(b"Pages")
        .and_then(Object::as_reference)
        .unwrap();
    doc.get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set("Resources", Object::Reference(bogus_id));
    let mut output = Vec::new();
    doc.save_to(&mut output).unwrap();
    output
}

/// A structurally valid PDF whose page tree is empty.
pub fn empty_pdf() -> Vec<u8> {
    build_pdf(0, "F1")
}

/// A solid-colour JPEG of the given size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
    encode(DynamicImage::ImageRgb8(image), CodecFormat::Jpeg)
}

/// A single-channel JPEG of the given size.
pub fn gray_jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_pixel(width, height, Luma([128]));
    encode(DynamicImage::ImageLuma8(image), CodecFormat::Jpeg)
}

/// A half-transparent PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([10, 90, 200, 128]));
    encode(DynamicImage::ImageRgba8(image), CodecFormat::Png)
}

/// An opaque RGB PNG of the given size.
pub fn opaque_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([10, 90, 200]));
    encode(DynamicImage::ImageRgb8(image), CodecFormat::Png)
}

fn encode(image: DynamicImage, format: CodecFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
}

/// Decoded content operations of the first page.
pub fn operations_of(pdf: &[u8]) -> Vec<Operation> {
    let doc = Document::load_mem(pdf).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    Content::decode(&content).unwrap().operations
}

/// Resource dictionary set directly on the first page.
pub fn page_resources(pdf: &[u8]) -> Dictionary {
    let doc = Document::load_mem(pdf).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let page = doc.get_object(page_id).and_then(Object::as_dict).unwrap();
    match page.get(b"Resources").unwrap() {
        Object::Dictionary(dict) => dict.clone(),
        Object::Reference(id) => doc.get_dictionary(*id).unwrap().clone(),
        other => panic!("unexpected resources object {other:?}"),
    }
}

/// Numeric operands of an operation, accepting integers and reals.
pub fn numbers(op: &Operation) -> Vec<f32> {
    op.operands.iter().map(number).collect()
}

pub fn number(operand: &Object) -> f32 {
    match operand {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("operand {other:?} is not a number"),
    }
}

/// Assert two float slices are equal within rounding of the writer.
pub fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-3, "{actual:?} vs {expected:?}");
    }
}
