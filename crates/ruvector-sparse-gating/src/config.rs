//! Name-based gating configuration.
//!
//! Architecture descriptions name data spaces by string and mark full gating
//! with the `"all"` sentinel. These types carry that form through `serde`
//! and resolve it against a [`DataSpaceRegistry`] exactly once, producing the
//! id-based types in [`crate::gating`].
//!
//! ```
//! use ruvector_sparse_gating::config::DataSpaceGatingConfig;
//! use ruvector_sparse_gating::gating::ActionGating;
//! use ruvector_sparse_gating::registry::DataSpaceRegistry;
//! use ruvector_sparse_gating::types::{DataSpaceId, GatedAction};
//!
//! let registry = DataSpaceRegistry::new(["Weights", "Inputs", "Outputs"]);
//! let cfg = DataSpaceGatingConfig::new()
//!     .action(GatedAction::Read, ["Weights", "Inputs"])
//!     .action(GatedAction::Write, ["all"]);
//! let gating = cfg.resolve(&registry).unwrap();
//! assert_eq!(
//!     gating.get(GatedAction::Read),
//!     Some(&ActionGating::ByDataSpaces(vec![DataSpaceId(0), DataSpaceId(1)]))
//! );
//! assert_eq!(gating.get(GatedAction::Write), Some(&ActionGating::FullyGated));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gating::{ActionGating, DataSpaceGating, LevelGating};
use crate::registry::DataSpaceRegistry;
use crate::types::GatedAction;

/// Sentinel entry meaning "gate this action unconditionally".
pub const FULLY_GATED: &str = "all";

/// Gating lists for the actions of one data space, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSpaceGatingConfig {
    actions: BTreeMap<GatedAction, Vec<String>>,
}

/// Compute gating uses the same shape, keyed by `compute`.
pub type ComputeGatingConfig = DataSpaceGatingConfig;

impl DataSpaceGatingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: gate `action` on the named data spaces.
    pub fn action<I, S>(mut self, action: GatedAction, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions
            .insert(action, names.into_iter().map(Into::into).collect());
        self
    }

    /// Resolve every name to an id.
    ///
    /// A list whose first entry is `"all"` becomes [`ActionGating::FullyGated`]
    /// and the remaining entries are not consulted.
    ///
    /// # Errors
    ///
    /// [`GatingError::UnknownDataSpace`](crate::GatingError::UnknownDataSpace)
    /// for the first name the registry does not know.
    pub fn resolve(&self, registry: &DataSpaceRegistry) -> Result<DataSpaceGating> {
        let mut resolved = DataSpaceGating::new();
        for (action, names) in &self.actions {
            resolved.insert(*action, resolve_action(*action, names, registry)?);
        }
        Ok(resolved)
    }
}

fn resolve_action(
    action: GatedAction,
    names: &[String],
    registry: &DataSpaceRegistry,
) -> Result<ActionGating> {
    if names.first().map(String::as_str) == Some(FULLY_GATED) {
        if names.len() > 1 {
            tracing::warn!(%action, extra = names.len() - 1, "entries after \"all\" are ignored");
        }
        return Ok(ActionGating::FullyGated);
    }
    let ids = names
        .iter()
        .map(|n| registry.id_of(n))
        .collect::<Result<Vec<_>>>()?;
    Ok(ActionGating::ByDataSpaces(ids))
}

/// Gating for one storage level, keyed by data-space name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelGatingConfig {
    data_spaces: BTreeMap<String, DataSpaceGatingConfig>,
}

impl LevelGatingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: attach gating to the data space called `name`.
    pub fn data_space(mut self, name: impl Into<String>, gating: DataSpaceGatingConfig) -> Self {
        self.data_spaces.insert(name.into(), gating);
        self
    }

    /// Resolve against `registry`.
    ///
    /// Entries keyed by a data space the problem does not have are skipped
    /// with a warning: the same architecture description is reused across
    /// workloads whose tensor sets differ. Names *inside* a gating list must
    /// all resolve.
    ///
    /// # Errors
    ///
    /// [`GatingError::UnknownDataSpace`](crate::GatingError::UnknownDataSpace)
    /// if a gating list names an unknown data space.
    pub fn resolve(&self, registry: &DataSpaceRegistry) -> Result<LevelGating> {
        let mut level = LevelGating::new();
        for (name, cfg) in &self.data_spaces {
            let Ok(id) = registry.id_of(name) else {
                tracing::warn!(data_space = %name, "gating configured for unknown data space; skipped");
                continue;
            };
            level.insert(id, cfg.resolve(registry)?);
        }
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatingError;
    use crate::types::DataSpaceId;

    fn registry() -> DataSpaceRegistry {
        DataSpaceRegistry::new(["Weights", "Inputs", "Outputs"])
    }

    #[test]
    fn unknown_name_in_list_fails() {
        let cfg = DataSpaceGatingConfig::new().action(GatedAction::Read, ["Weights", "Psums"]);
        assert_eq!(
            cfg.resolve(&registry()).unwrap_err(),
            GatingError::UnknownDataSpace("Psums".into())
        );
    }

    #[test]
    fn all_sentinel_first_wins() {
        let cfg = DataSpaceGatingConfig::new().action(GatedAction::Write, ["all", "Inputs"]);
        let g = cfg.resolve(&registry()).unwrap();
        assert_eq!(g.get(GatedAction::Write), Some(&ActionGating::FullyGated));
    }

    #[test]
    fn empty_list_resolves_to_empty_product() {
        let cfg = DataSpaceGatingConfig::new().action(GatedAction::Read, Vec::<String>::new());
        let g = cfg.resolve(&registry()).unwrap();
        assert_eq!(g.get(GatedAction::Read), Some(&ActionGating::ByDataSpaces(vec![])));
    }

    #[test]
    fn level_skips_unknown_keys() {
        let cfg = LevelGatingConfig::new()
            .data_space("Inputs", DataSpaceGatingConfig::new().action(GatedAction::Read, ["Weights"]))
            .data_space("Scratch", DataSpaceGatingConfig::new().action(GatedAction::Read, ["all"]));
        let level = cfg.resolve(&registry()).unwrap();
        assert!(level.for_data_space(DataSpaceId(1)).is_some());
        assert!(level.for_data_space(DataSpaceId(0)).is_none());
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "Inputs": { "read": ["Weights"], "metadata_read": ["all"] },
            "Outputs": { "write": ["Weights", "Inputs"] }
        }"#;
        let cfg: LevelGatingConfig = serde_json::from_str(json).unwrap();
        let level = cfg.resolve(&registry()).unwrap();

        let inputs = level.for_data_space(DataSpaceId(1)).unwrap();
        assert_eq!(
            inputs.get(GatedAction::Read),
            Some(&ActionGating::ByDataSpaces(vec![DataSpaceId(0)]))
        );
        assert_eq!(inputs.get(GatedAction::MetadataRead), Some(&ActionGating::FullyGated));

        let outputs = level.for_data_space(DataSpaceId(2)).unwrap();
        assert_eq!(
            outputs.get(GatedAction::Write),
            Some(&ActionGating::ByDataSpaces(vec![DataSpaceId(0), DataSpaceId(1)]))
        );
    }

    #[test]
    fn unknown_action_key_rejected_by_serde() {
        let json = r#"{ "Inputs": { "prefetch": ["Weights"] } }"#;
        assert!(serde_json::from_str::<LevelGatingConfig>(json).is_err());
    }
}
