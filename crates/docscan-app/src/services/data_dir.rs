// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data and cache directory resolution.

use std::path::PathBuf;

const APP_DIR: &str = "docscan";

/// Return the application data directory (config lives here), creating it if
/// needed.
///
/// On mobile the host should hand over its documents directory instead.
pub fn data_dir() -> PathBuf {
    let dir = data_base(non_empty_var("XDG_DATA_HOME"), non_empty_var("HOME")).join(APP_DIR);
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Root under which the cache subdirectory for committed pages is created.
///
/// Not created here; the result assembler creates its subdirectory on demand.
pub fn cache_root() -> PathBuf {
    cache_base(non_empty_var("XDG_CACHE_HOME"), non_empty_var("HOME"))
}

fn cache_base(xdg: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(xdg) = xdg {
        return PathBuf::from(xdg);
    }
    if let Some(home) = home {
        return PathBuf::from(home).join(".cache");
    }
    std::env::temp_dir()
}

fn data_base(xdg: Option<String>, home: Option<String>) -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Some(xdg) = xdg {
        return PathBuf::from(xdg);
    }
    if let Some(home) = home {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
