// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — service layer shared by the binary and host integrations.

pub mod services;

pub use services::scanner::DocumentScanner;
