// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — wires a capture surface to the document pipeline.
//
// The scanner owns the admission gate and runs one invocation at a time; the
// helpers here resolve where configuration and committed pages live.

pub mod data_dir;
pub mod gate;
pub mod scanner;
pub mod settings;
