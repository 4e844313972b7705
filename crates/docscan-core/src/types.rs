// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the docscan pipeline and its host-facing contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::validate_quality;
use crate::error::{DocscanError, Result};

/// Unique identifier for one scan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(pub Uuid);

impl ScanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, used to qualify file names.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1D symbology the decoder is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    /// Interleaved 2 of 5.
    #[default]
    Itf,
}

/// How a committed page image is referenced in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseType {
    /// JPEG written to the cache directory, referenced by `file://` URI.
    #[default]
    #[serde(alias = "imageFilePath")]
    FilePath,
    /// JPEG bytes inlined as a base64 string.
    Base64,
}

/// Per-invocation options supplied by the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanOptions {
    /// Upper bound on captured pages.
    #[serde(alias = "maxNumDocuments")]
    pub max_pages: Option<u32>,
    /// Overrides the configured response type.
    pub response_type: Option<ResponseType>,
    /// Overrides the configured JPEG quality (1-100).
    #[serde(alias = "croppedImageQuality")]
    pub image_quality: Option<u8>,
}

impl ScanOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == Some(0) {
            return Err(DocscanError::InvalidOptions(
                "maxPages must be at least 1".into(),
            ));
        }
        if let Some(quality) = self.image_quality {
            validate_quality(quality)
                .map_err(|err| DocscanError::InvalidOptions(err.to_string()))?;
        }
        Ok(())
    }
}

/// Overall outcome tag of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Success,
    Cancelled,
}

/// Result for one captured page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Reference to the committed image (file URI or base64 payload).
    #[serde(rename = "uri")]
    pub image_reference: String,
    /// Decoded barcode payload, `null` when nothing was found.
    #[serde(rename = "barcode")]
    pub barcode_value: Option<String>,
    pub success: bool,
}

impl PageResult {
    /// Build a result whose `success` flag mirrors the presence of a value.
    pub fn new(image_reference: impl Into<String>, barcode_value: Option<String>) -> Self {
        let success = barcode_value.is_some();
        Self {
            image_reference: image_reference.into(),
            barcode_value,
            success,
        }
    }
}

/// The response of one scan invocation, pages in capture order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub status: ScanStatus,
    #[serde(rename = "scannedImages")]
    pub scanned_images: Vec<PageResult>,
}

impl ScanResponse {
    pub fn success(scanned_images: Vec<PageResult>) -> Self {
        Self {
            status: ScanStatus::Success,
            scanned_images,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            status: ScanStatus::Cancelled,
            scanned_images: Vec::new(),
        }
    }
}
