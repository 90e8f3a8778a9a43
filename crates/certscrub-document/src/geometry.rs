// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement geometry for replacement photos.
//
// The image draw applies `translate(x, y) · rotate(θ) · scale(w, h)`, so the
// image turns counter-clockwise about its own bottom-left corner. To keep a
// rotated image inside the box, the origin is shifted before rotating:
//
//   0°   -> (0, 0)          image spans [0, w] x [0, h]
//   90°  -> (h, 0)          image spans [-h, 0] x [0, w] before the shift
//   180° -> (w, h)          image spans [-w, 0] x [-h, 0] before the shift
//   270° -> (0, w)          image spans [0, h] x [-w, 0] before the shift
//
// These offsets hold only for quarter turns about that pivot.

use certscrub_core::error::{CertScrubError, Result};
use certscrub_core::{Region, Rotation};

/// Where and how large a replacement image is drawn.
///
/// `x` and `y` are relative to the box's bottom-left corner until
/// [`Placement::anchored_at`] moves them into page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    /// Drawn width before rotation.
    pub width: f32,
    /// Drawn height before rotation.
    pub height: f32,
    pub rotation: Rotation,
}

impl Placement {
    /// Translate a box-relative placement to page coordinates.
    pub fn anchored_at(self, region: &Region) -> Self {
        Self {
            x: region.x + self.x,
            y: region.y + self.y,
            ..self
        }
    }

    /// The `cm` matrix mapping the unit image square onto the page.
    pub fn transform_matrix(&self) -> [f32; 6] {
        let (cos, sin) = self.rotation.cos_sin();
        [
            self.width * cos,
            self.width * sin,
            -self.height * sin,
            self.height * cos,
            self.x,
            self.y,
        ]
    }

    /// Axis-aligned bounds `(min_x, min_y, max_x, max_y)` of the drawn image.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let [a, b, c, d, e, f] = self.transform_matrix();
        let corners = [(e, f), (a + e, b + f), (c + e, d + f), (a + c + e, b + d + f)];
        corners.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(min_x, min_y, max_x, max_y), &(x, y)| {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            },
        )
    }
}

/// Fit an `img_width` x `img_height` image to a box and compensate for rotation.
///
/// Portrait and square images take the box width; landscape images take the
/// box height. The other axis follows the aspect ratio and may overflow the
/// box for extreme ratios.
pub fn resolve_placement(
    box_width: f32,
    box_height: f32,
    img_width: u32,
    img_height: u32,
    rotation: Rotation,
) -> Result<Placement> {
    if img_width == 0 || img_height == 0 {
        return Err(CertScrubError::InvalidImageDimensions {
            width: img_width,
            height: img_height,
        });
    }

    let aspect_ratio = img_height as f32 / img_width as f32;
    let (width, height) = if img_width <= img_height {
        (box_width, (box_width * aspect_ratio).round())
    } else {
        ((box_height / aspect_ratio).round(), box_height)
    };

    let (x, y) = match rotation {
        Rotation::Deg0 => (0.0, 0.0),
        Rotation::Deg90 => (height, 0.0),
        Rotation::Deg180 => (width, height),
        Rotation::Deg270 => (0.0, width),
    };

    Ok(Placement {
        x,
        y,
        width,
        height,
        rotation,
    })
}

/// [`resolve_placement`] for an angle in whole degrees.
pub fn resolve_placement_degrees(
    box_width: f32,
    box_height: f32,
    img_width: u32,
    img_height: u32,
    rotation_degrees: i32,
) -> Result<Placement> {
    let rotation = Rotation::from_degrees(rotation_degrees)?;
    resolve_placement(box_width, box_height, img_width, img_height, rotation)
}
