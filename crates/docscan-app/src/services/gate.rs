// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-slot admission gate: at most one scan invocation is pending at a
// time, later requests are rejected rather than queued.

use std::sync::{Arc, Mutex, MutexGuard};

use docscan_core::ScanId;
use docscan_core::error::{DocscanError, Result};
use tracing::debug;

#[derive(Debug, Default)]
pub struct AdmissionGate {
    slot: Mutex<Option<ScanId>>,
}

impl AdmissionGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claim the slot for a new invocation.
    ///
    /// The returned ticket releases the slot when dropped, whichever way the
    /// invocation ends.
    pub fn try_admit(self: &Arc<Self>) -> Result<AdmissionTicket> {
        let mut slot = self.lock();
        if let Some(pending) = *slot {
            debug!(%pending, "Rejecting invocation, slot taken");
            return Err(DocscanError::ScanInProgress);
        }
        let scan_id = ScanId::new();
        *slot = Some(scan_id);
        Ok(AdmissionTicket {
            gate: Arc::clone(self),
            scan_id,
        })
    }

    /// The invocation currently holding the slot.
    pub fn pending(&self) -> Option<ScanId> {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ScanId>> {
        // Poisoning is ignored: the slot holds a plain value.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Proof of admission. Dropping it frees the slot.
#[derive(Debug)]
pub struct AdmissionTicket {
    gate: Arc<AdmissionGate>,
    scan_id: ScanId,
}

impl AdmissionTicket {
    pub fn scan_id(&self) -> ScanId {
        self.scan_id
    }
}

impl Drop for AdmissionTicket {
    fn drop(&mut self) {
        let mut slot = self.gate.lock();
        if *slot == Some(self.scan_id) {
            *slot = None;
        }
    }
}
