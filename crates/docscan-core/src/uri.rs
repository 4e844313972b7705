// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `file://` page references.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{DocscanError, Result};

/// Percent-encoded `file://` URI of `path`.
///
/// Existing paths are canonicalized, others made absolute against the
/// current directory.
pub fn file_uri(path: &Path) -> Result<String> {
    let absolute = path
        .canonicalize()
        .or_else(|_| std::path::absolute(path))?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|()| {
            DocscanError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("no file URI for {}", absolute.display()),
            ))
        })
}

/// Local path of a page reference.
///
/// `file://` URIs are percent-decoded; anything else is taken as a path.
pub fn resolve_path(reference: &str) -> PathBuf {
    Url::parse(reference)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(reference))
}
