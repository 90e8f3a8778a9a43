// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for certificate redaction: fixed page regions, colours,
// rotation angles, and replacement image formats.

use serde::{Deserialize, Serialize};

use crate::error::{CertScrubError, Result};

/// An axis-aligned rectangle in page space (bottom-left origin, points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Where the holder's photo is printed on the certificate template.
pub const PHOTO_REGION: Region = Region::new(35.0, 145.0, 100.0, 100.0);

/// Where the holder's name is printed on the certificate template.
pub const NAME_REGION: Region = Region::new(145.0, 150.0, 190.0, 25.0);

/// A DeviceRGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Fill colour approximating the certificate background.
pub const REDACTION_COLOR: RgbColor = RgbColor::new(0.91, 0.93, 0.94);

pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);

/// Counter-clockwise rotation applied to a replacement image.
///
/// Only quarter turns are representable; arbitrary angles are rejected at
/// construction with [`CertScrubError::InvalidRotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation from whole degrees.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(CertScrubError::InvalidRotation(other)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Exact `(cos, sin)` of the angle, avoiding floating-point drift.
    pub fn cos_sin(self) -> (f32, f32) {
        match self {
            Self::Deg0 => (1.0, 0.0),
            Self::Deg90 => (0.0, 1.0),
            Self::Deg180 => (-1.0, 0.0),
            Self::Deg270 => (0.0, -1.0),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = CertScrubError;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Encoding of a replacement photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Infer the format from a bare file extension.
    ///
    /// The comparison is case-sensitive and only `"png"` selects PNG; every
    /// other extension is treated as JPEG.
    pub fn from_extension(ext: &str) -> Self {
        if ext == "png" { Self::Png } else { Self::Jpeg }
    }

    /// Infer the format from the text after the last `.` of a file name.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or(name);
        Self::from_extension(ext)
    }

    /// Identify the format from magic bytes, if recognisable.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
        const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
        if data.starts_with(PNG_MAGIC) {
            Some(Self::Png)
        } else if data.starts_with(JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    /// MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// A user-supplied photo to draw into the vacated photo region.
#[derive(Debug, Clone)]
pub struct ReplacementImage {
    /// Encoded image bytes, exactly as uploaded.
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub rotation: Rotation,
}

impl ReplacementImage {
    pub fn new(data: Vec<u8>, format: ImageFormat, rotation: Rotation) -> Self {
        Self {
            data,
            format,
            rotation,
        }
    }
}
