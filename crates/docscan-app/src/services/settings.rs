// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration persistence (`config.json` in the data directory).

use std::path::Path;

use docscan_core::ScanConfig;
use docscan_core::error::{DocscanError, Result};
use tracing::warn;

pub const CONFIG_FILE: &str = "config.json";

/// Load the persisted configuration, if there is a usable one.
///
/// A missing file is silent; a file that does not parse or validate is
/// logged and ignored.
pub fn load_config(data_dir: &Path) -> Option<ScanConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    let config = serde_json::from_str::<ScanConfig>(&data)
        .map_err(DocscanError::from)
        .and_then(|config| config.validate().map(|()| config));
    match config {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Ignoring unusable config file");
            None
        }
    }
}

pub fn persist_config(data_dir: &Path, config: &ScanConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
