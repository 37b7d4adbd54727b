//! In-memory settings store applying validated partial updates.
//!
//! The store is the canonical consumer of the settings contract: every
//! transition goes through payload validation and the field-wise merge, and
//! every resulting state satisfies the full-state contract. Persistence of
//! the resulting snapshots belongs to the caller.

use std::sync::{PoisonError, RwLock};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::SettingsResult;
use crate::model::{FrontendSettingsPayload, SettingsState};
use crate::validate::{payload_from_value, settings_from_value};

/// Snapshot of the store contents at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    /// Monotonic revision, bumped on every effective change.
    pub revision: u64,
    /// Settings in effect at this revision.
    pub settings: SettingsState,
}

/// Outcome of applying a payload or restoring a saved state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSettings {
    /// Revision recorded after the operation.
    pub revision: u64,
    /// Whether the operation changed any field.
    pub changed: bool,
    /// Settings in effect after the operation.
    pub settings: SettingsState,
}

/// Thread-safe holder of the live [`SettingsState`].
pub struct SettingsStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    revision: u64,
    settings: SettingsState,
}

impl SettingsStore {
    /// Create a store seeded with the given settings at revision zero.
    #[must_use]
    pub const fn new(initial: SettingsState) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                revision: 0,
                settings: initial,
            }),
        }
    }

    /// Current revision and settings.
    #[must_use]
    pub fn snapshot(&self) -> SettingsSnapshot {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        SettingsSnapshot {
            revision: inner.revision,
            settings: inner.settings.clone(),
        }
    }

    /// Merge an already validated payload into the live settings.
    ///
    /// The revision is bumped only when the merge changes at least one field,
    /// so reapplying the same payload is observationally idempotent.
    pub fn apply(&self, payload: &FrontendSettingsPayload) -> AppliedSettings {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let merged = inner.settings.merged(payload);
        let changed = merged != inner.settings;
        if changed {
            inner.revision += 1;
            inner.settings = merged;
            info!(revision = inner.revision, "applied settings update");
        } else {
            debug!("settings update changed nothing");
        }
        AppliedSettings {
            revision: inner.revision,
            changed,
            settings: inner.settings.clone(),
        }
    }

    /// Validate a JSON document as a payload, then merge it.
    ///
    /// # Errors
    ///
    /// Returns the validation error untouched when the document is not a
    /// well-formed payload; the live settings are left unchanged in that
    /// case.
    pub fn apply_value(&self, value: &Value) -> SettingsResult<AppliedSettings> {
        let payload = payload_from_value(value)?;
        Ok(self.apply(&payload))
    }

    /// Validate a JSON document as a complete state and adopt it wholesale.
    ///
    /// This is the load-boundary path for settings restored from storage.
    ///
    /// # Errors
    ///
    /// Returns the validation error untouched when the document does not
    /// satisfy the full-state contract; the live settings are left unchanged
    /// in that case.
    pub fn restore_value(&self, value: &Value) -> SettingsResult<AppliedSettings> {
        let restored = settings_from_value(value)?;
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let changed = restored != inner.settings;
        if changed {
            inner.revision += 1;
            inner.settings = restored;
            info!(revision = inner.revision, "restored settings state");
        }
        Ok(AppliedSettings {
            revision: inner.revision,
            changed,
            settings: inner.settings.clone(),
        })
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SettingsState::default())
    }
}
