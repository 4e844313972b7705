// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the rotation recovery ladder in docscan-document.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use docscan_core::{RoiConfig, Symbology};
use docscan_document::{BarcodeDecoder, PageImage, RecoveryController, RxingDetector};
use image::{DynamicImage, GrayImage, Luma};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Worst case of the ladder: a blank landscape A4-at-150dpi page, so all four
/// rotations are decoded and the landscape fallback rotation is committed.
fn bench_recovery_blank_page(c: &mut Criterion) {
    let page = PageImage::from_dynamic(DynamicImage::ImageLuma8(GrayImage::from_pixel(
        1754,
        1240,
        Luma([235u8]),
    )));
    let decoder = BarcodeDecoder::new(Arc::new(RxingDetector::default()), Symbology::Itf);
    let controller = RecoveryController::new(decoder, RoiConfig::COMPACT);

    c.bench_function("recover blank page (1754x1240)", |b| {
        b.iter(|| {
            let recovery = controller.recover(black_box(page.clone()));
            black_box(recovery.image);
        });
    });
}

criterion_group!(benches, bench_recovery_blank_page);
criterion_main!(benches);
