// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload preparation — bound a user's photo to a sensible resolution before it
// is embedded. The photo region is only 100pt wide, so camera-sized images
// would bloat the output for no visible gain.

use std::io::Cursor;

use certscrub_core::ImageFormat;
use certscrub_core::error::{CertScrubError, Result};
use image::{DynamicImage, ImageFormat as CodecFormat};
use tracing::{debug, info, instrument};

/// Longest side, in pixels, an uploaded photo is scaled down to.
pub const MAX_UPLOAD_SIDE: u32 = 540;

/// JPEG quality used when a downscaled photo is re-encoded.
const JPEG_QUALITY: u8 = 92;

/// A decoded upload together with the format it arrived in.
pub struct ImageProcessor {
    image: DynamicImage,
    format: ImageFormat,
}

impl ImageProcessor {
    /// Decode `data` as `format`.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8], format: ImageFormat) -> Result<Self> {
        let image = image::load_from_memory_with_format(data, codec_format(format)).map_err(
            |err| CertScrubError::UnsupportedImageFormat(format!("failed to decode upload: {err}")),
        )?;
        debug!(
            width = image.width(),
            height = image.height(),
            "Upload decoded"
        );
        Ok(Self { image, format })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether both sides are within `max_side`.
    pub fn fits_within(&self, max_side: u32) -> bool {
        self.image.width() <= max_side && self.image.height() <= max_side
    }

    /// Scale down so the longer side equals `max_side`, preserving aspect ratio.
    /// Images already within bounds are returned unchanged.
    pub fn bound(self, max_side: u32) -> Self {
        if self.fits_within(max_side) {
            return self;
        }
        let resized = self.image.resize(
            max_side,
            max_side,
            image::imageops::FilterType::Lanczos3,
        );
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Upload downscaled"
        );
        Self {
            image: resized,
            format: self.format,
        }
    }

    /// Encode in the upload's original format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match self.format {
            ImageFormat::Jpeg => {
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
                self.image.to_rgb8().write_with_encoder(encoder)
            }
            ImageFormat::Png => self
                .image
                .write_to(&mut Cursor::new(&mut buffer), CodecFormat::Png),
        }
        .map_err(|err| CertScrubError::UnsupportedImageFormat(format!("re-encoding failed: {err}")))?;
        Ok(buffer)
    }
}

/// Bound an upload to [`MAX_UPLOAD_SIDE`] pixels, re-encoding only when it is
/// actually scaled down.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn prepare_upload(data: &[u8], format: ImageFormat) -> Result<Vec<u8>> {
    let processor = ImageProcessor::from_bytes(data, format)?;
    if processor.fits_within(MAX_UPLOAD_SIDE) {
        return Ok(data.to_vec());
    }

    let (from_w, from_h) = (processor.width(), processor.height());
    let bounded = processor.bound(MAX_UPLOAD_SIDE);
    info!(
        from_w,
        from_h,
        to_w = bounded.width(),
        to_h = bounded.height(),
        "Upload bounded"
    );
    bounded.to_bytes()
}

fn codec_format(format: ImageFormat) -> CodecFormat {
    match format {
        ImageFormat::Png => CodecFormat::Png,
        ImageFormat::Jpeg => CodecFormat::Jpeg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn small_upload_is_passed_through() {
        let jpeg = test_support::jpeg_bytes(300, 200);
        assert_eq!(prepare_upload(&jpeg, ImageFormat::Jpeg).unwrap(), jpeg);
    }

    #[test]
    fn landscape_upload_is_bounded_by_width() {
        let jpeg = test_support::jpeg_bytes(1080, 720);
        let prepared = prepare_upload(&jpeg, ImageFormat::Jpeg).unwrap();
        let decoded = ImageProcessor::from_bytes(&prepared, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (540, 360));
    }

    #[test]
    fn portrait_png_keeps_its_format() {
        let png = test_support::png_bytes(300, 1200);
        let prepared = prepare_upload(&png, ImageFormat::Png).unwrap();
        assert_eq!(ImageFormat::sniff(&prepared), Some(ImageFormat::Png));
        let decoded = ImageProcessor::from_bytes(&prepared, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (135, 540));
    }

    #[test]
    fn undecodable_upload_is_rejected() {
        assert!(matches!(
            prepare_upload(b"GIF89a", ImageFormat::Png),
            Err(CertScrubError::UnsupportedImageFormat(_))
        ));
    }
}
