// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result assembly — persist each committed page image and build the
// per-page results in capture order.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use docscan_core::error::Result;
use docscan_core::uri::file_uri;
use docscan_core::{PageResult, ScanId, ScanResponse};
use tracing::{debug, instrument, warn};

use crate::scan::recovery::Recovery;

/// Where committed page images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write a JPEG per page into this directory, reference it by `file://` URI.
    CacheDir(PathBuf),
    /// Inline the JPEG bytes as base64.
    Base64,
}

/// What the pipeline produced for one captured page.
#[derive(Debug)]
pub enum PageOutcome {
    /// The page source could not be read. It is left out of the response.
    Missing { index: usize },
    /// The page went through rotation recovery.
    Processed {
        index: usize,
        /// Reference of the page as handed over by the capture surface.
        source_reference: String,
        recovery: Recovery,
    },
}

/// Persists committed pages and builds [`PageResult`]s for one invocation.
#[derive(Debug, Clone)]
pub struct ResultAssembler {
    target: OutputTarget,
    quality: u8,
    scan_id: ScanId,
    stamp: String,
}

impl ResultAssembler {
    pub fn new(target: OutputTarget, quality: u8, scan_id: ScanId) -> Self {
        Self {
            target,
            quality,
            scan_id,
            stamp: Utc::now().format("%Y%m%dT%H%M%S%3f").to_string(),
        }
    }

    /// Cache file name of page `index` for this invocation.
    pub fn file_name(&self, index: usize) -> String {
        format!("page_{}_{}_{index:03}.jpg", self.stamp, self.scan_id.short())
    }

    /// Build the result of a single page, persisting its committed image.
    ///
    /// Missing pages yield `None`. If the committed image cannot be
    /// persisted, the result falls back to the page's source reference.
    #[instrument(skip_all, fields(scan = %self.scan_id))]
    pub fn assemble_page(&self, outcome: PageOutcome) -> Option<PageResult> {
        match outcome {
            PageOutcome::Missing { index } => {
                debug!(page = index, "Dropping page without a readable source");
                None
            }
            PageOutcome::Processed {
                index,
                source_reference,
                recovery,
            } => {
                let reference = match self.persist(index, &recovery) {
                    Ok(reference) => reference,
                    Err(err) => {
                        warn!(page = index, error = %err, "Could not persist committed page, keeping source reference");
                        source_reference
                    }
                };
                Some(PageResult::new(reference, recovery.barcode))
            }
        }
    }

    /// Assemble a whole invocation, preserving page order.
    pub fn assemble(&self, outcomes: impl IntoIterator<Item = PageOutcome>) -> ScanResponse {
        let results = outcomes
            .into_iter()
            .filter_map(|outcome| self.assemble_page(outcome))
            .collect();
        ScanResponse::success(results)
    }

    fn persist(&self, index: usize, recovery: &Recovery) -> Result<String> {
        let jpeg = recovery.image.to_jpeg_bytes(self.quality)?;
        match &self.target {
            OutputTarget::Base64 => Ok(STANDARD.encode(&jpeg)),
            OutputTarget::CacheDir(dir) => {
                let path = dir.join(self.file_name(index));
                write_file(&path, &jpeg)?;
                debug!(page = index, path = %path.display(), bytes = jpeg.len(), "Committed page written");
                file_uri(&path)
            }
        }
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
