// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document scanner service — one invocation at a time: admit, capture, then
// run every captured page through normalisation, rotation recovery and
// result assembly, in capture order.
//
// Pixel work is CPU-bound, so each page runs on the blocking pool. Pages are
// processed one after another so only one page's buffers are alive at once.

use std::path::PathBuf;
use std::sync::Arc;

use docscan_bridge::{CaptureOutcome, CaptureSurface, PageHandle};
use docscan_core::error::{DocscanError, Result};
use docscan_core::{ResponseType, ScanConfig, ScanId, ScanOptions, ScanResponse};
use docscan_document::{
    BarcodeDecoder, BarcodeDetector, OutputTarget, PageOutcome, RecoveryController,
    ResultAssembler, load_normalized,
};
use tracing::{error, info, instrument, warn};

use super::data_dir;
use super::gate::AdmissionGate;

/// Entry point the host application calls to scan documents.
pub struct DocumentScanner<S> {
    surface: Arc<S>,
    controller: RecoveryController,
    config: ScanConfig,
    cache_dir: PathBuf,
    gate: Arc<AdmissionGate>,
}

impl<S: CaptureSurface + 'static> DocumentScanner<S> {
    /// Build a scanner over `surface`, decoding with `detector`.
    pub fn new(surface: S, detector: Arc<dyn BarcodeDetector>, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let cache_dir = config
            .cache_dir
            .clone()
            .unwrap_or_else(data_dir::cache_root)
            .join(&config.cache_subdir);
        let controller =
            RecoveryController::new(BarcodeDecoder::new(detector, config.symbology), config.roi);

        info!(
            surface = surface.platform_name(),
            cache = %cache_dir.display(),
            "Document scanner ready"
        );
        Ok(Self {
            surface: Arc::new(surface),
            controller,
            config,
            cache_dir,
            gate: AdmissionGate::new(),
        })
    }

    /// Directory committed pages are written to for `FilePath` responses.
    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    /// Whether an invocation is in flight.
    pub fn is_pending(&self) -> bool {
        self.gate.pending().is_some()
    }

    /// Run one scan invocation.
    ///
    /// Rejected with `CaptureUnavailable` when there is no capture surface,
    /// `ScanInProgress` when another invocation holds the slot, and
    /// `Capture` when the surface itself fails. Per-page problems never
    /// reject the invocation.
    #[instrument(skip_all, fields(surface = self.surface.platform_name()))]
    pub async fn scan_document(&self, options: ScanOptions) -> Result<ScanResponse> {
        options.validate()?;
        if !self.surface.is_available() {
            warn!("No capture surface available");
            return Err(DocscanError::CaptureUnavailable);
        }

        let ticket = self.gate.try_admit()?;
        let scan_id = ticket.scan_id();
        info!(%scan_id, max_pages = ?options.max_pages, "Scan admitted");

        let handles = match self.surface.capture(&options).await {
            Ok(CaptureOutcome::Pages(handles)) => handles,
            Ok(CaptureOutcome::Cancelled) => {
                info!(%scan_id, "Capture cancelled by user");
                return Ok(ScanResponse::cancelled());
            }
            Err(err) => {
                error!(%scan_id, error = %err, "Capture failed");
                return Err(match err {
                    DocscanError::Capture(_) => err,
                    other => DocscanError::Capture(other.to_string()),
                });
            }
        };

        let limit = options.max_pages.map_or(usize::MAX, |n| n as usize);
        if handles.len() > limit {
            warn!(%scan_id, captured = handles.len(), limit, "Ignoring pages beyond the limit");
        }

        let assembler = self.assembler(&options, scan_id);
        let mut results = Vec::with_capacity(handles.len().min(limit));
        for (index, handle) in handles.into_iter().take(limit).enumerate() {
            let surface = Arc::clone(&self.surface);
            let controller = self.controller.clone();
            let assembler = assembler.clone();
            let page = tokio::task::spawn_blocking(move || {
                let outcome = process_page(surface.as_ref(), &controller, index, &handle);
                assembler.assemble_page(outcome)
            })
            .await;

            match page {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(err) => warn!(%scan_id, page = index, error = %err, "Page task failed, dropping page"),
            }
        }

        info!(
            %scan_id,
            pages = results.len(),
            decoded = results.iter().filter(|r| r.success).count(),
            "Scan finished"
        );
        drop(ticket);
        Ok(ScanResponse::success(results))
    }

    fn assembler(&self, options: &ScanOptions, scan_id: ScanId) -> ResultAssembler {
        let target = match options.response_type.unwrap_or(self.config.response_type) {
            ResponseType::FilePath => OutputTarget::CacheDir(self.cache_dir.clone()),
            ResponseType::Base64 => OutputTarget::Base64,
        };
        let quality = options.image_quality.unwrap_or(self.config.jpeg_quality);
        ResultAssembler::new(target, quality, scan_id)
    }
}

/// Read, normalise and recover one page. Unreadable sources become `Missing`.
fn process_page<S: CaptureSurface>(
    surface: &S,
    controller: &RecoveryController,
    index: usize,
    handle: &PageHandle,
) -> PageOutcome {
    let Some(reference) = handle.sanitized() else {
        warn!(page = index, "Empty page handle");
        return PageOutcome::Missing { index };
    };

    let image = match surface.open_page(handle).and_then(|bytes| load_normalized(&bytes)) {
        Ok(image) => image,
        Err(err) => {
            warn!(page = index, reference, error = %err, "Unreadable page source");
            return PageOutcome::Missing { index };
        }
    };

    PageOutcome::Processed {
        index,
        source_reference: reference.to_string(),
        recovery: controller.recover(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::io::Cursor;
    use std::sync::Mutex;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use docscan_core::{ScanStatus, Symbology};
    use docscan_document::PageImage;
    use docscan_document::scan::DetectedBarcode;
    use image::{DynamicImage, GrayImage, ImageFormat, Luma};
    use tokio::sync::Notify;

    const PAYLOAD: &str = "00012345678905";

    /// Reports a barcode when most of the crop is dark.
    struct DarkPatchDetector;

    impl BarcodeDetector for DarkPatchDetector {
        fn name(&self) -> &'static str {
            "dark-patch"
        }

        fn detect(&self, image: &GrayImage, symbology: Symbology) -> Result<Vec<DetectedBarcode>> {
            let dark = image.pixels().filter(|p| p.0[0] < 128).count();
            if dark * 2 > (image.width() * image.height()) as usize {
                Ok(vec![DetectedBarcode {
                    symbology: Some(symbology),
                    text: PAYLOAD.into(),
                }])
            } else {
                Ok(Vec::new())
            }
        }
    }

    enum Script {
        Pages(Vec<&'static str>),
        Cancel,
        Fail,
    }

    /// Scripted capture surface serving in-memory pages.
    struct FakeSurface {
        available: bool,
        scripts: Mutex<VecDeque<Script>>,
        pages: HashMap<&'static str, Vec<u8>>,
        started: Arc<Notify>,
        release: Option<Arc<Notify>>,
    }

    impl FakeSurface {
        fn new(scripts: Vec<Script>) -> Self {
            Self {
                available: true,
                scripts: Mutex::new(scripts.into()),
                pages: HashMap::from([
                    ("marked", png(marked_page())),
                    ("blank", png(blank_page())),
                    ("garbage", b"not an image".to_vec()),
                ]),
                started: Arc::new(Notify::new()),
                release: None,
            }
        }
    }

    impl CaptureSurface for FakeSurface {
        fn platform_name(&self) -> &str {
            "fake"
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn capture(&self, _options: &ScanOptions) -> Result<CaptureOutcome> {
            self.started.notify_one();
            if let Some(release) = &self.release {
                release.notified().await;
            }
            let script = self.scripts.lock().unwrap().pop_front();
            match script {
                Some(Script::Pages(pages)) => Ok(CaptureOutcome::Pages(
                    pages.into_iter().map(PageHandle::new).collect(),
                )),
                Some(Script::Cancel) => Ok(CaptureOutcome::Cancelled),
                Some(Script::Fail) | None => Err(DocscanError::Capture("camera exploded".into())),
            }
        }

        fn open_page(&self, handle: &PageHandle) -> Result<Vec<u8>> {
            let key = handle.sanitized().unwrap_or_default();
            self.pages.get(key).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, key.to_string()).into()
            })
        }
    }

    /// Portrait page with a dark block in the top-right corner.
    fn marked_page() -> GrayImage {
        GrayImage::from_fn(400, 600, |x, y| {
            Luma([if x >= 250 && y < 220 { 0u8 } else { 255u8 }])
        })
    }

    fn blank_page() -> GrayImage {
        GrayImage::from_pixel(600, 400, Luma([255u8]))
    }

    fn png(image: GrayImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .expect("encode png");
        buffer
    }

    fn scanner(surface: FakeSurface, cache: &std::path::Path) -> DocumentScanner<FakeSurface> {
        let config = ScanConfig {
            cache_dir: Some(cache.to_path_buf()),
            ..ScanConfig::default()
        };
        DocumentScanner::new(surface, Arc::new(DarkPatchDetector), config).expect("scanner")
    }

    #[tokio::test]
    async fn unreadable_page_is_dropped_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = scanner(
            FakeSurface::new(vec![Script::Pages(vec!["marked", "garbage", "blank"])]),
            dir.path(),
        );

        let response = scanner.scan_document(ScanOptions::default()).await.expect("scan");
        assert_eq!(response.status, ScanStatus::Success);
        assert_eq!(response.scanned_images.len(), 2);

        let first = &response.scanned_images[0];
        assert_eq!(first.barcode_value.as_deref(), Some(PAYLOAD));
        assert!(first.success);
        assert!(first.image_reference.ends_with("_000.jpg"));

        let third = &response.scanned_images[1];
        assert!(third.barcode_value.is_none());
        assert!(!third.success);
        assert!(third.image_reference.ends_with("_002.jpg"));

        // Landscape fallback: the blank page is committed turned upright.
        let path = docscan_core::uri::resolve_path(&third.image_reference);
        let committed = image::open(path).expect("committed page");
        assert_eq!((committed.width(), committed.height()), (400, 600));
        assert!(!scanner.is_pending());
    }

    #[tokio::test]
    async fn empty_handles_are_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = scanner(
            FakeSurface::new(vec![Script::Pages(vec!["  ", " marked "])]),
            dir.path(),
        );
        let response = scanner.scan_document(ScanOptions::default()).await.expect("scan");
        assert_eq!(response.scanned_images.len(), 1);
        assert!(response.scanned_images[0].success);
    }

    #[tokio::test]
    async fn cancellation_returns_empty_and_frees_the_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = scanner(
            FakeSurface::new(vec![Script::Cancel, Script::Pages(vec!["marked"])]),
            dir.path(),
        );

        let cancelled = scanner.scan_document(ScanOptions::default()).await.expect("cancel");
        assert_eq!(cancelled, ScanResponse::cancelled());
        assert!(!scanner.is_pending());

        let next = scanner.scan_document(ScanOptions::default()).await.expect("next");
        assert_eq!(next.scanned_images.len(), 1);
    }

    #[tokio::test]
    async fn second_invocation_is_rejected_while_pending() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut surface = FakeSurface::new(vec![Script::Pages(vec!["marked", "blank"])]);
        let started = Arc::clone(&surface.started);
        let release = Arc::new(Notify::new());
        surface.release = Some(Arc::clone(&release));
        let scanner = Arc::new(scanner(surface, dir.path()));

        let first = tokio::spawn({
            let scanner = Arc::clone(&scanner);
            async move { scanner.scan_document(ScanOptions::default()).await }
        });
        started.notified().await;
        assert!(scanner.is_pending());

        let err = scanner.scan_document(ScanOptions::default()).await.unwrap_err();
        assert!(matches!(err, DocscanError::ScanInProgress));
        assert_eq!(err.code(), "scan_in_progress");

        release.notify_one();
        let response = first.await.expect("join").expect("first scan");
        assert_eq!(response.scanned_images.len(), 2);
        assert_eq!(response.scanned_images[0].barcode_value.as_deref(), Some(PAYLOAD));
        assert!(!scanner.is_pending());
    }

    #[tokio::test]
    async fn unavailable_surface_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut surface = FakeSurface::new(vec![]);
        surface.available = false;
        let scanner = scanner(surface, dir.path());

        let err = scanner.scan_document(ScanOptions::default()).await.unwrap_err();
        assert!(matches!(err, DocscanError::CaptureUnavailable));
        assert_eq!(err.code(), "no_activity");
        assert!(!scanner.is_pending());
    }

    #[tokio::test]
    async fn capture_failure_is_rejected_and_frees_the_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = scanner(
            FakeSurface::new(vec![Script::Fail, Script::Cancel]),
            dir.path(),
        );

        let err = scanner.scan_document(ScanOptions::default()).await.unwrap_err();
        assert_eq!(err.code(), "document_scan_error");
        assert!(!scanner.is_pending());
        assert!(scanner.scan_document(ScanOptions::default()).await.is_ok());
    }

    #[tokio::test]
    async fn page_limit_is_enforced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = scanner(
            FakeSurface::new(vec![Script::Pages(vec!["marked", "blank", "marked"])]),
            dir.path(),
        );
        let options = ScanOptions {
            max_pages: Some(2),
            ..ScanOptions::default()
        };
        let response = scanner.scan_document(options).await.expect("scan");
        assert_eq!(response.scanned_images.len(), 2);
    }

    #[tokio::test]
    async fn invalid_options_are_rejected_before_admission() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = scanner(FakeSurface::new(vec![]), dir.path());
        let options = ScanOptions {
            max_pages: Some(0),
            ..ScanOptions::default()
        };
        let err = scanner.scan_document(options).await.unwrap_err();
        assert!(matches!(err, DocscanError::InvalidOptions(_)));
        assert!(!scanner.is_pending());
    }

    #[tokio::test]
    async fn base64_response_skips_the_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scanner = scanner(
            FakeSurface::new(vec![Script::Pages(vec!["marked"])]),
            dir.path(),
        );
        let options = ScanOptions {
            response_type: Some(ResponseType::Base64),
            image_quality: Some(50),
            ..ScanOptions::default()
        };
        let response = scanner.scan_document(options).await.expect("scan");
        let reference = &response.scanned_images[0].image_reference;
        assert!(!reference.starts_with("file://"));
        assert!(!scanner.cache_dir().exists());

        // The upright page is committed as is, encoded at the requested quality.
        let jpeg = STANDARD.decode(reference).expect("base64");
        let page = PageImage::from_dynamic(DynamicImage::ImageLuma8(marked_page()));
        assert_eq!(jpeg, page.to_jpeg_bytes(50).expect("encode"));
        assert_ne!(jpeg, page.to_jpeg_bytes(90).expect("encode"));
    }
}
