// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode decoder — crops a page to its region of interest and asks the
// detector for exactly one barcode of the configured symbology.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use docscan_core::Symbology;
use tracing::{debug, warn};

use crate::image::page::PageImage;
use crate::scan::detector::BarcodeDetector;
use crate::scan::roi::RegionOfInterest;

/// Decodes the single corner barcode of a page.
///
/// Every failure mode (empty crop, detector error, detector panic, wrong
/// symbology) collapses to "not found".
#[derive(Clone)]
pub struct BarcodeDecoder {
    detector: Arc<dyn BarcodeDetector>,
    symbology: Symbology,
}

impl BarcodeDecoder {
    pub fn new(detector: Arc<dyn BarcodeDetector>, symbology: Symbology) -> Self {
        Self {
            detector,
            symbology,
        }
    }

    /// Decode the barcode inside `roi`, first match of the symbology wins.
    pub fn decode(&self, image: &PageImage, roi: &RegionOfInterest) -> Option<String> {
        let crop = image.crop_luma(roi)?;

        let detected = catch_unwind(AssertUnwindSafe(|| {
            self.detector.detect(&crop, self.symbology)
        }));
        let candidates = match detected {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(err)) => {
                debug!(detector = self.detector.name(), error = %err, "Detector failed, treating as not found");
                return None;
            }
            Err(_) => {
                warn!(detector = self.detector.name(), "Detector panicked, treating as not found");
                return None;
            }
        };

        candidates
            .into_iter()
            .find(|candidate| candidate.symbology == Some(self.symbology))
            .map(|candidate| candidate.text)
    }
}

impl std::fmt::Debug for BarcodeDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarcodeDecoder")
            .field("detector", &self.detector.name())
            .field("symbology", &self.symbology)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::detector::DetectedBarcode;
    use docscan_core::error::{DocscanError, Result};
    use image::{DynamicImage, GrayImage, Luma};

    /// Returns a fixed list of candidates.
    struct Scripted(Vec<DetectedBarcode>);

    impl BarcodeDetector for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn detect(&self, _image: &GrayImage, _symbology: Symbology) -> Result<Vec<DetectedBarcode>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl BarcodeDetector for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn detect(&self, _image: &GrayImage, _symbology: Symbology) -> Result<Vec<DetectedBarcode>> {
            Err(DocscanError::Decode("detector exploded".into()))
        }
    }

    struct Panicking;

    impl BarcodeDetector for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn detect(&self, _image: &GrayImage, _symbology: Symbology) -> Result<Vec<DetectedBarcode>> {
            panic!("native detector crashed")
        }
    }

    fn page() -> PageImage {
        PageImage::from_dynamic(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            100,
            100,
            Luma([255u8]),
        )))
    }

    fn full_roi() -> RegionOfInterest {
        RegionOfInterest {
            x: 0,
            y: 0,
            width: 100,
            height: 100,
        }
    }

    fn decoder(detector: impl BarcodeDetector + 'static) -> BarcodeDecoder {
        BarcodeDecoder::new(Arc::new(detector), Symbology::Itf)
    }

    #[test]
    fn first_matching_symbology_wins() {
        let decoder = decoder(Scripted(vec![
            DetectedBarcode {
                symbology: None,
                text: "QR-PAYLOAD".into(),
            },
            DetectedBarcode {
                symbology: Some(Symbology::Itf),
                text: "12345678".into(),
            },
            DetectedBarcode {
                symbology: Some(Symbology::Itf),
                text: "87654321".into(),
            },
        ]));
        assert_eq!(decoder.decode(&page(), &full_roi()), Some("12345678".into()));
    }

    #[test]
    fn only_foreign_symbologies_is_not_found() {
        let decoder = decoder(Scripted(vec![DetectedBarcode {
            symbology: None,
            text: "QR-PAYLOAD".into(),
        }]));
        assert_eq!(decoder.decode(&page(), &full_roi()), None);
    }

    #[test]
    fn detector_error_is_not_found() {
        assert_eq!(decoder(Failing).decode(&page(), &full_roi()), None);
    }

    #[test]
    fn detector_panic_is_not_found() {
        assert_eq!(decoder(Panicking).decode(&page(), &full_roi()), None);
    }

    #[test]
    fn empty_region_is_not_found_without_detection() {
        let roi = RegionOfInterest {
            x: 100,
            y: 0,
            width: 0,
            height: 10,
        };
        assert_eq!(decoder(Panicking).decode(&page(), &roi), None);
    }
}
