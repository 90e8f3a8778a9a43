// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image compositor — decode a replacement photo, embed it as an image XObject,
// and draw it into a page region.
//
// Gray and RGB JPEG data is validated by decoding and then embedded verbatim
// with DCTDecode. PNG data, and JPEGs in any other colour model, are decoded
// to 8-bit samples and embedded with FlateDecode, with any alpha channel split
// into a soft mask.

use std::io::Write;

use certscrub_core::error::{CertScrubError, Result};
use certscrub_core::{ImageFormat, Region, ReplacementImage};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::{DynamicImage, ImageFormat as CodecFormat};
use lopdf::{Dictionary, Object, Stream, dictionary};
use tracing::{debug, info, instrument};

use crate::geometry::{Placement, resolve_placement};
use crate::pdf::PdfCanvas;

/// An image ready to be stored in a PDF.
pub struct EmbeddedImage {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// The image XObject stream (its /SMask is filled in when stored).
    pub stream: Stream,
    /// Alpha channel as a DeviceGray image stream, for PNGs with transparency.
    pub soft_mask: Option<Stream>,
}

impl EmbeddedImage {
    /// Decode `data` as `format` and build the XObject streams.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn decode(data: &[u8], format: ImageFormat) -> Result<Self> {
        let codec = match format {
            ImageFormat::Png => CodecFormat::Png,
            ImageFormat::Jpeg => CodecFormat::Jpeg,
        };
        let decoded = image::load_from_memory_with_format(data, codec).map_err(|err| {
            CertScrubError::UnsupportedImageFormat(format!(
                "{} decoder rejected the data: {}",
                format.mime_type(),
                err
            ))
        })?;

        let embedded = match format {
            ImageFormat::Jpeg => Self::from_jpeg(data, &decoded)?,
            ImageFormat::Png => Self::from_pixels(&decoded)?,
        };
        debug!(
            width = embedded.width,
            height = embedded.height,
            soft_mask = embedded.soft_mask.is_some(),
            "Image decoded"
        );
        Ok(embedded)
    }

    fn from_jpeg(data: &[u8], decoded: &DynamicImage) -> Result<Self> {
        let color_space = match jpeg_components(data) {
            Some(1) => "DeviceGray",
            Some(3) => "DeviceRGB",
            // CMYK and YCCK: the decoder already converted these to RGB.
            components => {
                debug!(?components, "JPEG is neither gray nor RGB, embedding decoded pixels");
                return Self::from_pixels(decoded);
            }
        };
        let dict = image_dict(decoded.width(), decoded.height(), color_space, "DCTDecode");
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            stream: Stream::new(dict, data.to_vec()),
            soft_mask: None,
        })
    }

    fn from_pixels(decoded: &DynamicImage) -> Result<Self> {
        let (width, height) = (decoded.width(), decoded.height());
        let color = decoded.color();

        let (color_space, samples) = if color.has_color() {
            ("DeviceRGB", decoded.to_rgb8().into_raw())
        } else {
            ("DeviceGray", decoded.to_luma8().into_raw())
        };
        let stream = Stream::new(
            image_dict(width, height, color_space, "FlateDecode"),
            deflate(&samples)?,
        );

        let soft_mask = if color.has_alpha() {
            let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|px| px.0[3]).collect();
            Some(Stream::new(
                image_dict(width, height, "DeviceGray", "FlateDecode"),
                deflate(&alpha)?,
            ))
        } else {
            None
        };

        Ok(Self {
            width,
            height,
            stream,
            soft_mask,
        })
    }
}

/// Embed `image` and draw it into `region`, returning the page-space placement.
#[instrument(skip(canvas, image), fields(format = ?image.format, rotation = %image.rotation))]
pub fn embed_and_place(
    canvas: &mut PdfCanvas,
    region: &Region,
    image: &ReplacementImage,
) -> Result<Placement> {
    let embedded = EmbeddedImage::decode(&image.data, image.format)?;
    let placement = resolve_placement(
        region.width,
        region.height,
        embedded.width,
        embedded.height,
        image.rotation,
    )?
    .anchored_at(region);

    let EmbeddedImage {
        mut stream,
        soft_mask,
        ..
    } = embedded;
    if let Some(mask) = soft_mask {
        let mask_id = canvas.add_object(mask);
        stream.dict.set("SMask", Object::Reference(mask_id));
    }
    let image_id = canvas.add_object(stream);
    let name = canvas.register_xobject(image_id)?;
    canvas.draw_xobject(&name, placement.transform_matrix());

    info!(
        x = placement.x,
        y = placement.y,
        width = placement.width,
        height = placement.height,
        "Replacement image placed"
    );
    Ok(placement)
}

/// Number of colour components declared by the first start-of-frame segment.
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        // SOF0..SOF15, excluding DHT, JPG and DAC.
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            return data.get(pos + 9).copied();
        }
        let length = usize::from(u16::from_be_bytes([data[pos + 2], data[pos + 3]]));
        pos += 2 + length;
    }
    None
}

fn image_dict(width: u32, height: u32, color_space: &str, filter: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Filter" => filter,
    }
}

fn deflate(samples: &[u8]) -> Result<Vec<u8>> {
    let compress_err =
        |err: std::io::Error| CertScrubError::Serialize(format!("failed to compress image samples: {err}"));
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(samples).map_err(compress_err)?;
    encoder.finish().map_err(compress_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgb, RgbImage};
    use crate::test_support::{self, assert_close, numbers, operations_of, page_resources};
    use certscrub_core::{PHOTO_REGION, Rotation};
    use lopdf::Document;

    fn first_xobject(pdf: &[u8]) -> lopdf::Stream {
        let doc = Document::load_mem(pdf).unwrap();
        let resources = page_resources(pdf);
        let xobjects = resources.get(b"XObject").and_then(Object::as_dict).unwrap();
        let (_, reference) = xobjects.iter().next().unwrap();
        let id = reference.as_reference().unwrap();
        doc.get_object(id).and_then(Object::as_stream).unwrap().clone()
    }

    #[test]
    fn jpeg_is_embedded_verbatim() {
        let jpeg = test_support::jpeg_bytes(30, 20);
        let pdf = test_support::certificate_pdf(1);
        let mut canvas = PdfCanvas::load(&pdf).unwrap();
        let image = ReplacementImage::new(jpeg.clone(), ImageFormat::Jpeg, Rotation::Deg0);
        embed_and_place(&mut canvas, &PHOTO_REGION, &image).unwrap();
        let output = canvas.finish().unwrap();

        let stream = first_xobject(&output);
        assert_eq!(stream.dict.get(b"Filter").and_then(Object::as_name).unwrap(), b"DCTDecode");
        assert_eq!(stream.dict.get(b"Width").and_then(Object::as_i64).unwrap(), 30);
        assert_eq!(stream.dict.get(b"Height").and_then(Object::as_i64).unwrap(), 20);
        assert_eq!(stream.content, jpeg);
    }

    #[test]
    fn frame_components_are_read_from_the_header() {
        assert_eq!(jpeg_components(&test_support::jpeg_bytes(6, 6)), Some(3));
        assert_eq!(jpeg_components(&test_support::gray_jpeg_bytes(6, 6)), Some(1));
        assert_eq!(jpeg_components(&cmyk_frame_header()), Some(4));
        assert_eq!(jpeg_components(b"not a jpeg"), None);
    }

    #[test]
    fn gray_jpeg_is_labelled_device_gray() {
        let jpeg = test_support::gray_jpeg_bytes(12, 12);
        let embedded = EmbeddedImage::decode(&jpeg, ImageFormat::Jpeg).unwrap();
        let dict = &embedded.stream.dict;
        assert_eq!(dict.get(b"ColorSpace").and_then(Object::as_name).unwrap(), b"DeviceGray");
        assert_eq!(dict.get(b"Filter").and_then(Object::as_name).unwrap(), b"DCTDecode");
        assert_eq!(embedded.stream.content, jpeg);
    }

    #[test]
    fn cmyk_jpeg_is_embedded_as_decoded_rgb() {
        let decoded = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 2, Rgb([30, 60, 90])));
        let embedded = EmbeddedImage::from_jpeg(&cmyk_frame_header(), &decoded).unwrap();
        let dict = &embedded.stream.dict;
        assert_eq!(dict.get(b"ColorSpace").and_then(Object::as_name).unwrap(), b"DeviceRGB");
        assert_eq!(dict.get(b"Filter").and_then(Object::as_name).unwrap(), b"FlateDecode");
        assert_eq!(dict.get(b"Width").and_then(Object::as_i64).unwrap(), 4);
        assert!(embedded.soft_mask.is_none());
    }

    /// SOI, an APP14 "Adobe" segment, then a baseline frame with four components.
    fn cmyk_frame_header() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        data.extend([0xFF, 0xEE, 0x00, 0x0E]);
        data.extend(b"Adobe");
        data.extend([0x00, 0x64, 0x00, 0x00, 0x00, 0x00, 0x02]);
        data.extend([0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00, 0x02, 0x00, 0x04, 0x04]);
        for id in 1..=4u8 {
            data.extend([id, 0x11, 0x00]);
        }
        data
    }

    #[test]
    fn transparent_png_gets_a_soft_mask() {
        let png = test_support::png_bytes(10, 10);
        let embedded = EmbeddedImage::decode(&png, ImageFormat::Png).unwrap();
        assert_eq!((embedded.width, embedded.height), (10, 10));
        assert!(embedded.soft_mask.is_some());

        let opaque = test_support::opaque_png_bytes(10, 10);
        let embedded = EmbeddedImage::decode(&opaque, ImageFormat::Png).unwrap();
        assert!(embedded.soft_mask.is_none());
    }

    #[test]
    fn png_soft_mask_is_linked_in_output() {
        let png = test_support::png_bytes(8, 16);
        let pdf = test_support::certificate_pdf(1);
        let mut canvas = PdfCanvas::load(&pdf).unwrap();
        let image = ReplacementImage::new(png, ImageFormat::Png, Rotation::Deg0);
        let placement = embed_and_place(&mut canvas, &PHOTO_REGION, &image).unwrap();
        assert_eq!((placement.width, placement.height), (100.0, 200.0));
        let output = canvas.finish().unwrap();

        let stream = first_xobject(&output);
        assert!(stream.dict.has(b"SMask"));
        assert_eq!(stream.dict.get(b"Filter").and_then(Object::as_name).unwrap(), b"FlateDecode");
    }

    #[test]
    fn extension_mismatch_is_unsupported_format() {
        let jpeg = test_support::jpeg_bytes(4, 4);
        assert!(matches!(
            EmbeddedImage::decode(&jpeg, ImageFormat::Png),
            Err(CertScrubError::UnsupportedImageFormat(_))
        ));
        assert!(matches!(
            EmbeddedImage::decode(b"not an image", ImageFormat::Jpeg),
            Err(CertScrubError::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn drawn_with_the_rotated_matrix() {
        let jpeg = test_support::jpeg_bytes(300, 200);
        let pdf = test_support::certificate_pdf(1);
        let mut canvas = PdfCanvas::load(&pdf).unwrap();
        let image = ReplacementImage::new(jpeg, ImageFormat::Jpeg, Rotation::Deg270);
        embed_and_place(&mut canvas, &PHOTO_REGION, &image).unwrap();
        let ops = operations_of(&canvas.finish().unwrap());

        let cm = ops.iter().find(|op| op.operator == "cm").unwrap();
        // 150 x 100 turned 270°: origin moves up by the width.
        assert_close(&numbers(cm), &[0.0, -150.0, 100.0, 0.0, 35.0, 295.0]);
        assert!(ops.iter().any(|op| op.operator == "Do"));
    }
}
