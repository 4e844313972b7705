// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — page buffers, quarter-turn rotation and orientation normalisation.

pub mod orientation;
pub mod page;

pub use orientation::{OrientationMetadata, load_normalized, normalize, read_orientation};
pub use page::{PageImage, Rotation};
