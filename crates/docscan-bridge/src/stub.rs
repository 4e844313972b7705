// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub surface for builds where no native capture UI is wired in.
//
// It is never available, so invocations are rejected before admission.

use docscan_core::ScanOptions;
use docscan_core::error::{DocscanError, Result};

use crate::traits::*;

/// Capture surface that has nothing to present.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubSurface;

impl CaptureSurface for StubSurface {
    fn platform_name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn capture(&self, _options: &ScanOptions) -> Result<CaptureOutcome> {
        tracing::warn!("CaptureSurface::capture called on stub surface");
        Err(DocscanError::PlatformUnavailable)
    }

    fn open_page(&self, _handle: &PageHandle) -> Result<Vec<u8>> {
        Err(DocscanError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_is_never_available() {
        let surface = StubSurface;
        assert!(!surface.is_available());
        let err = surface.capture(&ScanOptions::default()).await.unwrap_err();
        assert!(matches!(err, DocscanError::PlatformUnavailable));
        assert!(surface.open_page(&PageHandle::new("file:///x.jpg")).is_err());
    }
}
