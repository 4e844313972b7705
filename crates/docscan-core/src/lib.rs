// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — Core types, configuration and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;
pub mod uri;

pub use config::{RoiConfig, ScanConfig};
pub use error::DocscanError;
pub use types::*;
