// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory capture — treats the image files of a directory as the pages the
// user captured, in file name order. Used on desktop and in tests.

use std::path::{Path, PathBuf};

use docscan_core::ScanOptions;
use docscan_core::error::{DocscanError, Result};
use docscan_core::uri::{file_uri, resolve_path};
use tracing::{debug, info, instrument};

use crate::traits::*;

const PAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "bmp", "webp"];

/// Capture surface backed by a directory of page images.
#[derive(Debug, Clone)]
pub struct DirectoryCapture {
    dir: PathBuf,
}

impl DirectoryCapture {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CaptureSurface for DirectoryCapture {
    fn platform_name(&self) -> &str {
        "directory"
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    async fn capture(&self, options: &ScanOptions) -> Result<CaptureOutcome> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|err| {
            DocscanError::Capture(format!("cannot list {}: {err}", self.dir.display()))
        })?;

        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_page_file(&path) {
                pages.push(path);
            } else {
                debug!(path = %path.display(), "Skipping non-image entry");
            }
        }
        pages.sort();

        if let Some(limit) = options.max_pages {
            pages.truncate(limit as usize);
        }

        info!(pages = pages.len(), "Directory capture finished");
        let handles = pages
            .iter()
            .map(|path| file_uri(path).map(PageHandle::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(CaptureOutcome::Pages(handles))
    }

    fn open_page(&self, handle: &PageHandle) -> Result<Vec<u8>> {
        let reference = handle
            .sanitized()
            .ok_or_else(|| DocscanError::Capture("empty page handle".into()))?;
        Ok(std::fs::read(resolve_path(reference))?)
    }
}

fn is_page_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
