// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — corner region of interest, barcode detection and
// decoding, rotation recovery, and result assembly.

pub mod assemble;
pub mod decoder;
pub mod detector;
pub mod recovery;
pub mod roi;

pub use assemble::{OutputTarget, PageOutcome, ResultAssembler};
pub use decoder::BarcodeDecoder;
pub use detector::{BarcodeDetector, DetectedBarcode, RxingDetector};
pub use recovery::{DecodeAttempt, ROTATION_LADDER, Recovery, RecoveryController};
pub use roi::{RegionOfInterest, compute_roi};
