//! Data-space numbering for one evaluation.
//!
//! The registry is the problem shape's view of which tensors exist and in
//! what order. It is passed into every accounting call instead of being
//! looked up from global state.

use std::collections::HashMap;

use crate::error::{GatingError, Result};
use crate::types::DataSpaceId;

/// Ordered set of data-space names with a name -> id index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSpaceRegistry {
    names: Vec<String>,
    ids: HashMap<String, DataSpaceId>,
}

impl DataSpaceRegistry {
    /// Build a registry; ids follow the iteration order of `names`.
    ///
    /// A repeated name keeps its first id.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for name in names {
            let name = name.into();
            if registry.ids.contains_key(&name) {
                tracing::warn!(name = %name, "duplicate data space name ignored");
                continue;
            }
            let id = DataSpaceId(registry.names.len());
            registry.ids.insert(name.clone(), id);
            registry.names.push(name);
        }
        registry
    }

    #[inline]
    pub fn num_data_spaces(&self) -> usize {
        self.names.len()
    }

    /// # Errors
    ///
    /// [`GatingError::UnknownDataSpace`] if `name` is not registered.
    pub fn id_of(&self, name: &str) -> Result<DataSpaceId> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| GatingError::UnknownDataSpace(name.to_string()))
    }

    /// # Errors
    ///
    /// [`GatingError::DataSpaceOutOfRange`] if `id` was not issued by this
    /// registry.
    pub fn name_of(&self, id: DataSpaceId) -> Result<&str> {
        self.names
            .get(id.index())
            .map(String::as_str)
            .ok_or(GatingError::DataSpaceOutOfRange {
                id,
                count: self.names.len(),
            })
    }

    /// Ids in canonical order.
    pub fn ids(&self) -> impl Iterator<Item = DataSpaceId> + '_ {
        (0..self.names.len()).map(DataSpaceId)
    }

    /// `(id, name)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (DataSpaceId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (DataSpaceId(i), n.as_str()))
    }
}
