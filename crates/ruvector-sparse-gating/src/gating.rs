//! Resolved gating specifications.
//!
//! These are the id-based forms the accounting consumes. They are produced
//! once per configuration by [`crate::config`] (or built directly by a
//! caller that already works in ids), so the hot path never touches a name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DataSpaceId, GatedAction};

/// How one action is gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionGating {
    /// The action never executes at full cost; density is forced to zero.
    FullyGated,
    /// The action executes only where every listed data space is non-zero.
    /// Densities of the listed data spaces are multiplied together.
    ByDataSpaces(Vec<DataSpaceId>),
}

/// Gating of every action touching one data space (or one compute unit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSpaceGating {
    actions: BTreeMap<GatedAction, ActionGating>,
}

/// Compute units are gated with the same shape, keyed by
/// [`GatedAction::Compute`].
pub type ComputeGating = DataSpaceGating;

impl DataSpaceGating {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: gate `action` completely.
    pub fn fully_gated(mut self, action: GatedAction) -> Self {
        self.actions.insert(action, ActionGating::FullyGated);
        self
    }

    /// Builder: gate `action` on the joint density of `ids`.
    pub fn gated_by(mut self, action: GatedAction, ids: impl IntoIterator<Item = DataSpaceId>) -> Self {
        self.actions
            .insert(action, ActionGating::ByDataSpaces(ids.into_iter().collect()));
        self
    }

    pub fn insert(&mut self, action: GatedAction, gating: ActionGating) -> Option<ActionGating> {
        self.actions.insert(action, gating)
    }

    #[inline]
    pub fn get(&self, action: GatedAction) -> Option<&ActionGating> {
        self.actions.get(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GatedAction, &ActionGating)> + '_ {
        self.actions.iter().map(|(a, g)| (*a, g))
    }
}

/// Gating for every data space at one storage level. A data space with no
/// entry is not gated at this level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelGating {
    data_spaces: BTreeMap<DataSpaceId, DataSpaceGating>,
}

impl LevelGating {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: attach `gating` to data space `id`.
    pub fn with(mut self, id: DataSpaceId, gating: DataSpaceGating) -> Self {
        self.data_spaces.insert(id, gating);
        self
    }

    pub fn insert(&mut self, id: DataSpaceId, gating: DataSpaceGating) -> Option<DataSpaceGating> {
        self.data_spaces.insert(id, gating)
    }

    #[inline]
    pub fn for_data_space(&self, id: DataSpaceId) -> Option<&DataSpaceGating> {
        self.data_spaces.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.data_spaces.is_empty()
    }
}
