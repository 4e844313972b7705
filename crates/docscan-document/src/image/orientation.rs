// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orientation normalisation — reads the orientation stored with an encoded
// page (EXIF for JPEG/TIFF/WebP) and applies it, so everything downstream sees
// the page in its intended upright pixel layout.

use std::io::Cursor;

use docscan_core::error::DocscanError;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::{debug, instrument, warn};

use crate::image::page::{PageImage, Rotation};

/// Stored orientation of an encoded page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrientationMetadata {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl OrientationMetadata {
    /// The rotation that brings the stored pixels upright.
    pub fn correction(self) -> Rotation {
        match self {
            OrientationMetadata::Normal => Rotation::None,
            OrientationMetadata::Rotate90 => Rotation::Clockwise90,
            OrientationMetadata::Rotate180 => Rotation::Half,
            OrientationMetadata::Rotate270 => Rotation::CounterClockwise90,
        }
    }
}

impl From<Orientation> for OrientationMetadata {
    /// Mirrored orientations have no counterpart and are treated as `Normal`.
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Rotate90 => OrientationMetadata::Rotate90,
            Orientation::Rotate180 => OrientationMetadata::Rotate180,
            Orientation::Rotate270 => OrientationMetadata::Rotate270,
            _ => OrientationMetadata::Normal,
        }
    }
}

/// Read the stored orientation of an encoded image.
///
/// Missing, unsupported or corrupt metadata reads as `Normal`.
pub fn read_orientation(data: &[u8]) -> OrientationMetadata {
    let decoder = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_decoder().ok());
    match decoder {
        Some(mut decoder) => orientation_of(&mut decoder),
        None => OrientationMetadata::Normal,
    }
}

/// Apply `metadata` to `image`. `Normal` returns the page untouched.
pub fn normalize(image: PageImage, metadata: OrientationMetadata) -> PageImage {
    let correction = metadata.correction();
    if correction != Rotation::None {
        debug!(?metadata, %correction, "Applying stored orientation");
    }
    image.into_rotated(correction)
}

/// Decode a page and bring it upright in one pass.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn load_normalized(data: &[u8]) -> Result<PageImage, DocscanError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|err| DocscanError::ImageError(format!("failed to read page: {}", err)))?;
    let mut decoder = reader.into_decoder().map_err(|err| {
        DocscanError::ImageError(format!("unsupported page format: {}", err))
    })?;

    let metadata = orientation_of(&mut decoder);
    let image = DynamicImage::from_decoder(decoder)
        .map_err(|err| DocscanError::ImageError(format!("failed to decode page: {}", err)))?;

    Ok(normalize(PageImage::from_dynamic(image), metadata))
}

fn orientation_of(decoder: &mut impl ImageDecoder) -> OrientationMetadata {
    match decoder.orientation() {
        Ok(orientation) => orientation.into(),
        Err(err) => {
            warn!(error = %err, "Unreadable orientation metadata, assuming upright");
            OrientationMetadata::Normal
        }
    }
}
