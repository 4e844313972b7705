// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Region of interest — where on a page the barcode is expected.

use docscan_core::RoiConfig;

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOfInterest {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionOfInterest {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Compute the top-right barcode region of a `width` x `height` page.
///
/// The result always lies inside `[0, width] x [0, height]`; degenerate
/// pages yield an empty region rather than an out-of-bounds one.
pub fn compute_roi(width: u32, height: u32, config: &RoiConfig) -> RegionOfInterest {
    let crop_width = percent_of(width, config.width_pct);
    let crop_height = percent_of(height, config.height_pct);
    let margin_x = percent_of(width, config.margin_pct);
    let margin_y = percent_of(height, config.margin_pct);

    let x = width.saturating_sub(crop_width).saturating_sub(margin_x);
    let y = margin_y.min(height);
    let right = width.saturating_sub(margin_x).clamp(x, width);
    let bottom = crop_height.saturating_add(margin_y).clamp(y, height);

    RegionOfInterest {
        x,
        y,
        width: right - x,
        height: bottom - y,
    }
}

/// `extent * pct / 100` in integer arithmetic, `pct` capped at 100.
fn percent_of(extent: u32, pct: u32) -> u32 {
    (u64::from(extent) * u64::from(pct.min(100)) / 100) as u32
}
