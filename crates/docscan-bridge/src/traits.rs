// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for page capture.

use std::future::Future;

use docscan_core::ScanOptions;
use docscan_core::error::Result;

/// Reference to one captured page, as handed over by the capture surface
/// (a `file://` URI, a content URI, a plain path...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageHandle(String);

impl PageHandle {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The raw reference, exactly as captured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed reference, `None` when nothing is left.
    pub fn sanitized(&self) -> Option<&str> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl std::fmt::Display for PageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user did with the capture UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Pages in capture order.
    Pages(Vec<PageHandle>),
    /// The user backed out.
    Cancelled,
}

/// Source of captured page images.
pub trait CaptureSurface: Send + Sync {
    /// Human-readable surface name (e.g. "VisionKit", "directory").
    fn platform_name(&self) -> &str;

    /// Whether a capture UI can be presented right now.
    fn is_available(&self) -> bool;

    /// Present the capture UI and wait for the user to finish.
    ///
    /// `options.max_pages` is the page limit the UI should enforce.
    /// `Err` means the capture itself failed, not that the user cancelled.
    fn capture(
        &self,
        options: &ScanOptions,
    ) -> impl Future<Output = Result<CaptureOutcome>> + Send;

    /// Read the encoded bytes of a captured page.
    fn open_page(&self, handle: &PageHandle) -> Result<Vec<u8>>;
}
