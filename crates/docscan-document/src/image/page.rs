// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page image — the pixel buffer of one captured page, with the lossless
// quarter-turn rotations, ROI cropping and JPEG output the pipeline needs.
// Operates on in-memory images using the `image` crate.

use docscan_core::error::DocscanError;
use image::{DynamicImage, GrayImage};
use tracing::{debug, instrument};

use crate::scan::roi::RegionOfInterest;

/// Axis-aligned rotation applied to a page, clockwise positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// 0°.
    None,
    /// +90° (clockwise).
    Clockwise90,
    /// −90° (counter-clockwise).
    CounterClockwise90,
    /// 180°.
    Half,
}

impl Rotation {
    /// Signed angle in degrees.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::CounterClockwise90 => -90,
            Rotation::Half => 180,
        }
    }

    /// Whether the rotation swaps width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::CounterClockwise90)
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// One scanned page.
///
/// Rotations never mutate the buffer in place: [`PageImage::rotated`] returns
/// a fresh page so the caller decides which candidate survives.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    image: DynamicImage,
}

impl PageImage {
    // -- Construction ---------------------------------------------------------

    /// Decode a page from raw encoded bytes (JPEG, PNG, etc.) without looking
    /// at orientation metadata. See [`crate::image::orientation::load_normalized`]
    /// for the metadata-aware loader.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, DocscanError> {
        let img = image::load_from_memory(data).map_err(|err| {
            DocscanError::ImageError(format!("failed to decode page image: {}", err))
        })?;
        debug!(width = img.width(), height = img.height(), "Page decoded from bytes");
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Landscape layout: strictly wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width() > self.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    // -- Transformations -------------------------------------------------------

    /// Return a rotated copy of the page. Quarter turns are lossless.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let image = match rotation {
            Rotation::None => self.image.clone(),
            Rotation::Clockwise90 => self.image.rotate90(),
            Rotation::CounterClockwise90 => self.image.rotate270(),
            Rotation::Half => self.image.rotate180(),
        };
        Self { image }
    }

    /// Consume the page and return it rotated.
    pub fn into_rotated(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::None => self,
            other => self.rotated(other),
        }
    }

    /// Grayscale crop of `roi`, clamped to the page extent.
    ///
    /// Returns `None` when the clamped region has zero area.
    pub fn crop_luma(&self, roi: &RegionOfInterest) -> Option<GrayImage> {
        let (img_w, img_h) = (self.width(), self.height());
        let x = roi.x.min(img_w);
        let y = roi.y.min(img_h);
        let w = roi.width.min(img_w - x);
        let h = roi.height.min(img_h - y);
        if w == 0 || h == 0 {
            debug!(?roi, img_w, img_h, "ROI has zero area after clamping");
            return None;
        }
        Some(self.image.crop_imm(x, y, w, h).to_luma8())
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the page as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, DocscanError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder).map_err(|err| {
            DocscanError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }
}
