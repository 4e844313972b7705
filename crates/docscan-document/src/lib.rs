// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-document — Page processing for docscan.
//
// Provides page images (decode, orientation normalisation, quarter-turn
// rotation, crop, JPEG output) and the scanning pipeline (corner ROI, ITF
// barcode decoding, rotation recovery, result assembly).

pub mod image;
pub mod scan;

// Re-export the primary structs so callers can use `docscan_document::PageImage` etc.
pub use crate::image::orientation::{OrientationMetadata, load_normalized};
pub use crate::image::page::{PageImage, Rotation};
pub use crate::scan::assemble::{OutputTarget, PageOutcome, ResultAssembler};
pub use crate::scan::decoder::BarcodeDecoder;
pub use crate::scan::detector::{BarcodeDetector, RxingDetector};
pub use crate::scan::recovery::{Recovery, RecoveryController};
