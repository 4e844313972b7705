// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! docscan — Capture surface abstractions.
//!
//! A capture surface is whatever hands the pipeline its raw page images: a
//! native document scanner UI on a phone, or a directory of images on a
//! desktop. The pipeline only sees the [`traits::CaptureSurface`] trait.

pub mod directory;
pub mod stub;
pub mod traits;

pub use directory::DirectoryCapture;
pub use stub::StubSurface;
pub use traits::{CaptureOutcome, CaptureSurface, PageHandle};
