// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DocscanError, Result};
use crate::types::{ResponseType, Symbology};

/// Default JPEG quality for committed page images.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default name of the cache subdirectory holding committed page images.
pub const DEFAULT_CACHE_SUBDIR: &str = "docscan";

/// Percentage rules locating the barcode region in the top-right corner.
///
/// All three values are percentages of the image extent. The region is
/// `width_pct` wide and `height_pct` tall, inset from the right and top
/// borders by `margin_pct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiConfig {
    pub width_pct: u32,
    pub height_pct: u32,
    pub margin_pct: u32,
}

impl RoiConfig {
    /// Narrow corner crop (20% x 16%, 2% margin).
    pub const COMPACT: RoiConfig = RoiConfig {
        width_pct: 20,
        height_pct: 16,
        margin_pct: 2,
    };

    /// Wider corner crop (25% x 20%, 3% margin).
    pub const WIDE: RoiConfig = RoiConfig {
        width_pct: 25,
        height_pct: 20,
        margin_pct: 3,
    };

    /// Reject percentage sets that cannot describe a region inside the image.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width_pct", self.width_pct),
            ("height_pct", self.height_pct),
            ("margin_pct", self.margin_pct),
        ] {
            if value > 100 {
                return Err(DocscanError::Config(format!(
                    "{name} must be at most 100, got {value}"
                )));
            }
        }
        if self.width_pct + self.margin_pct > 100 {
            return Err(DocscanError::Config(
                "width_pct + margin_pct exceeds 100".into(),
            ));
        }
        if self.height_pct + self.margin_pct > 100 {
            return Err(DocscanError::Config(
                "height_pct + margin_pct exceeds 100".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self::COMPACT
    }
}

/// Persistent scan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Where the barcode is searched for on each page.
    pub roi: RoiConfig,
    /// Barcode symbology accepted by the decoder.
    pub symbology: Symbology,
    /// JPEG quality (1-100) of committed page images.
    pub jpeg_quality: u8,
    /// How committed page images are referenced in the response.
    pub response_type: ResponseType,
    /// Subdirectory of the cache root that receives committed images.
    pub cache_subdir: String,
    /// Override for the cache root (platform default when `None`).
    pub cache_dir: Option<PathBuf>,
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        self.roi.validate()?;
        validate_quality(self.jpeg_quality)?;
        if self.cache_subdir.trim().is_empty() {
            return Err(DocscanError::Config("cache_subdir must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roi: RoiConfig::default(),
            symbology: Symbology::Itf,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            response_type: ResponseType::FilePath,
            cache_subdir: DEFAULT_CACHE_SUBDIR.into(),
            cache_dir: None,
        }
    }
}

/// JPEG quality must be in `1..=100`.
pub fn validate_quality(quality: u8) -> Result<()> {
    if (1..=100).contains(&quality) {
        Ok(())
    } else {
        Err(DocscanError::Config(format!(
            "jpeg quality must be within 1..=100, got {quality}"
        )))
    }
}
