// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotation recovery — the document may have been captured in any of four
// quarter-turn orientations. Walk a fixed ladder of rotations until the corner
// barcode decodes, and decide which rotation of the page is committed.

use docscan_core::RoiConfig;
use tracing::{debug, info, instrument};

use crate::image::page::{PageImage, Rotation};
use crate::scan::decoder::BarcodeDecoder;
use crate::scan::roi::{RegionOfInterest, compute_roi};

/// Rotations tried, in order. Each is applied to the normalised page, never
/// on top of a previous candidate.
pub const ROTATION_LADDER: [Rotation; 4] = [
    Rotation::None,
    Rotation::Clockwise90,
    Rotation::CounterClockwise90,
    Rotation::Half,
];

/// One rung of the ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeAttempt {
    pub rotation: Rotation,
    pub roi: RegionOfInterest,
    pub value: Option<String>,
}

/// Outcome of recovering one page.
#[derive(Debug, Clone)]
pub struct Recovery {
    /// The committed page image.
    pub image: PageImage,
    /// Decoded barcode, `None` when the ladder was exhausted.
    pub barcode: Option<String>,
    /// Rotation of `image` relative to the normalised input.
    pub rotation: Rotation,
    /// Attempts made, in ladder order.
    pub attempts: Vec<DecodeAttempt>,
}

/// Runs the rotation ladder for one page at a time.
#[derive(Debug, Clone)]
pub struct RecoveryController {
    decoder: BarcodeDecoder,
    roi: RoiConfig,
}

impl RecoveryController {
    pub fn new(decoder: BarcodeDecoder, roi: RoiConfig) -> Self {
        Self { decoder, roi }
    }

    /// Find the barcode and commit a page orientation.
    ///
    /// The first rotation that decodes wins and its image is committed. When
    /// every rotation fails, a landscape page is committed turned +90° (pages
    /// are assumed to be portrait), anything else is committed as is.
    ///
    /// Only one rotated candidate is alive at a time; a candidate that fails
    /// to decode is dropped before the next one is built.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn recover(&self, image: PageImage) -> Recovery {
        let mut attempts = Vec::with_capacity(ROTATION_LADDER.len());

        for rotation in ROTATION_LADDER {
            let candidate = match rotation {
                Rotation::None => None,
                other => Some(image.rotated(other)),
            };
            let subject = candidate.as_ref().unwrap_or(&image);
            let roi = compute_roi(subject.width(), subject.height(), &self.roi);
            let value = self.decoder.decode(subject, &roi);
            debug!(%rotation, ?roi, found = value.is_some(), "Decode attempt");

            attempts.push(DecodeAttempt {
                rotation,
                roi,
                value: value.clone(),
            });

            if let Some(value) = value {
                info!(%rotation, attempts = attempts.len(), "Barcode decoded");
                return Recovery {
                    image: candidate.unwrap_or(image),
                    barcode: Some(value),
                    rotation,
                    attempts,
                };
            }
        }

        let rotation = if image.is_landscape() {
            Rotation::Clockwise90
        } else {
            Rotation::None
        };
        info!(%rotation, "No barcode on any rotation, committing fallback layout");
        Recovery {
            image: image.into_rotated(rotation),
            barcode: None,
            rotation,
            attempts,
        }
    }
}
