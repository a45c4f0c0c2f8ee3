//! Shrines, the journal, and cataclysm gating.
//!
//! A shrine activates once every journal entry it requires has been
//! documented. Activations are append-only within a cycle and are read
//! once per cataclysm trigger: all shrines active means the cycle was
//! stabilized. Activations reset for the new cycle; the journal persists.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single shrine and its journal requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shrine {
    /// Journal entry ids that must be documented before activation.
    pub required_entries: Vec<String>,
    pub active: bool,
}

/// Result of an activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationResult {
    Activated,
    AlreadyActive,
    /// Which required entries are still undocumented.
    MissingEntries(Vec<String>),
    UnknownShrine,
}

/// Completion tracking for the cycle: shrine activations gated by the
/// journal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShrineLedger {
    shrines: BTreeMap<String, Shrine>,
    journal: BTreeSet<String>,
}

impl ShrineLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shrine with its requirements. Idempotent per id.
    pub fn register_shrine(&mut self, id: impl Into<String>, required: Vec<String>) {
        self.shrines.entry(id.into()).or_insert(Shrine {
            required_entries: required,
            active: false,
        });
    }

    /// Document a journal entry. Returns true if it was new.
    pub fn document(&mut self, entry: impl Into<String>) -> bool {
        self.journal.insert(entry.into())
    }

    pub fn is_documented(&self, entry: &str) -> bool {
        self.journal.contains(entry)
    }

    /// Attempt to activate a shrine against the current journal.
    pub fn try_activate(&mut self, id: &str) -> ActivationResult {
        let Some(shrine) = self.shrines.get_mut(id) else {
            return ActivationResult::UnknownShrine;
        };
        if shrine.active {
            return ActivationResult::AlreadyActive;
        }
        let missing: Vec<String> = shrine
            .required_entries
            .iter()
            .filter(|e| !self.journal.contains(*e))
            .cloned()
            .collect();
        if missing.is_empty() {
            shrine.active = true;
            ActivationResult::Activated
        } else {
            ActivationResult::MissingEntries(missing)
        }
    }

    /// The cycle is stabilized when every registered shrine is active.
    /// An empty ledger never stabilizes.
    pub fn is_stabilized(&self) -> bool {
        !self.shrines.is_empty() && self.shrines.values().all(|s| s.active)
    }

    /// Clear activations for a new cycle; the journal persists.
    pub fn reset_cycle(&mut self) {
        for shrine in self.shrines.values_mut() {
            shrine.active = false;
        }
    }

    pub fn shrine_count(&self) -> usize {
        self.shrines.len()
    }

    pub fn active_count(&self) -> usize {
        self.shrines.values().filter(|s| s.active).count()
    }

    pub fn journal_len(&self) -> usize {
        self.journal.len()
    }
}
