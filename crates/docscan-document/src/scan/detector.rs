// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode detection backends.
//
// The pipeline only needs "find barcodes in this grayscale crop"; the
// `BarcodeDetector` trait is that seam. `RxingDetector` is the portable
// backend; platform detectors (or test doubles) plug in the same way.

use std::collections::HashSet;

use docscan_core::Symbology;
use docscan_core::error::{DocscanError, Result};
use image::GrayImage;
use rxing::common::HybridBinarizer;
use rxing::multi::{GenericMultipleBarcodeReader, MultipleBarcodeReader};
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintValue, DecodeHints, Exceptions, Luma8LuminanceSource,
    MultiFormatReader,
};
use tracing::debug;

/// A barcode reported by a detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedBarcode {
    /// `None` when the detector reported a format outside [`Symbology`].
    pub symbology: Option<Symbology>,
    pub text: String,
}

/// Finds barcodes in a grayscale image.
pub trait BarcodeDetector: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Detect barcodes of `symbology` in `image`, in detection order.
    ///
    /// An image without barcodes yields `Ok(vec![])`; `Err` is reserved for
    /// detector failures.
    fn detect(&self, image: &GrayImage, symbology: Symbology) -> Result<Vec<DetectedBarcode>>;
}

/// Detector backed by the `rxing` port of ZXing.
#[derive(Debug, Clone, Copy)]
pub struct RxingDetector {
    /// Spend more time looking for a barcode (denser row scanning).
    pub try_harder: bool,
}

impl Default for RxingDetector {
    fn default() -> Self {
        Self { try_harder: true }
    }
}

impl BarcodeDetector for RxingDetector {
    fn name(&self) -> &'static str {
        "rxing"
    }

    fn detect(&self, image: &GrayImage, symbology: Symbology) -> Result<Vec<DetectedBarcode>> {
        let (width, height) = image.dimensions();
        let source = Luma8LuminanceSource::new(image.as_raw().clone(), width, height);
        let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));

        let mut formats = HashSet::new();
        formats.insert(rxing_format(symbology));
        let mut hints = DecodeHints::default().with(DecodeHintValue::PossibleFormats(formats));
        if self.try_harder {
            hints = hints.with(DecodeHintValue::TryHarder(true));
        }

        let mut reader = GenericMultipleBarcodeReader::new(MultiFormatReader::default());
        match reader.decode_multiple_with_hints(&mut bitmap, &hints) {
            Ok(results) => Ok(results
                .iter()
                .map(|result| DetectedBarcode {
                    symbology: symbology_of(result.getBarcodeFormat()),
                    text: result.getText().to_string(),
                })
                .collect()),
            Err(Exceptions::NotFoundException(_)) => {
                debug!(width, height, "rxing found no barcode");
                Ok(Vec::new())
            }
            Err(err) => Err(DocscanError::Decode(err.to_string())),
        }
    }
}

fn rxing_format(symbology: Symbology) -> BarcodeFormat {
    match symbology {
        Symbology::Itf => BarcodeFormat::ITF,
    }
}

fn symbology_of(format: &BarcodeFormat) -> Option<Symbology> {
    match format {
        BarcodeFormat::ITF => Some(Symbology::Itf),
        _ => None,
    }
}
