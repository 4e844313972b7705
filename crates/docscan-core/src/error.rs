// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for docscan.

use thiserror::Error;

/// Top-level error type for all docscan operations.
///
/// Only the invocation-level variants (`CaptureUnavailable`, `ScanInProgress`,
/// `Capture`, `InvalidOptions`) ever reach the host. Everything that goes
/// wrong with a single page is recovered inside the pipeline.
#[derive(Debug, Error)]
pub enum DocscanError {
    // -- Invocation errors --
    #[error("capture surface not available")]
    CaptureUnavailable,

    #[error("scan already in progress")]
    ScanInProgress,

    #[error("document capture failed: {0}")]
    Capture(String),

    #[error("invalid scan options: {0}")]
    InvalidOptions(String),

    // -- Page processing errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("barcode detection failed: {0}")]
    Decode(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl DocscanError {
    /// Stable rejection code handed to the host application.
    pub fn code(&self) -> &'static str {
        match self {
            DocscanError::CaptureUnavailable | DocscanError::PlatformUnavailable => "no_activity",
            DocscanError::ScanInProgress => "scan_in_progress",
            _ => "document_scan_error",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocscanError>;
