//! Catalogue of fine-grained operation types per component category.
//!
//! Energy tables are laid out with one column per operation type, so the
//! estimator needs to know how many types a component of each category has
//! before it reads any fine-grained counts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GatingError;

/// Number of operation types assumed when no component category is known.
pub const DEFAULT_NUM_OP_TYPES: usize = 1;

const ARITHMETIC_OP_TYPES: [&str; 2] = ["random_compute", "gated_compute"];

const STORAGE_OP_TYPES: [&str; 10] = [
    "random_read",
    "random_fill",
    "random_update",
    "gated_read",
    "gated_fill",
    "gated_update",
    "metadata_read",
    "metadata_fill",
    "gated_metadata_read",
    "gated_metadata_fill",
];

const NETWORK_OP_TYPES: [&str; 2] = ["random_transfer", "gated_transfer"];

/// Architecture component category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Arithmetic,
    Storage,
    Network,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Arithmetic => "arithmetic",
            ComponentKind::Storage => "storage",
            ComponentKind::Network => "network",
        }
    }

    /// Operation-type labels, in energy-table column order.
    pub fn op_types(self) -> &'static [&'static str] {
        match self {
            ComponentKind::Arithmetic => &ARITHMETIC_OP_TYPES,
            ComponentKind::Storage => &STORAGE_OP_TYPES,
            ComponentKind::Network => &NETWORK_OP_TYPES,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = GatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arithmetic" => Ok(ComponentKind::Arithmetic),
            "storage" => Ok(ComponentKind::Storage),
            "network" => Ok(ComponentKind::Network),
            other => Err(GatingError::UnknownComponentKind(other.to_string())),
        }
    }
}

/// Number of operation types for `kind`.
#[inline]
pub fn num_op_types(kind: ComponentKind) -> usize {
    kind.op_types().len()
}

/// [`num_op_types`] for a category given by name.
///
/// # Errors
///
/// [`GatingError::UnknownComponentKind`] for anything other than
/// `arithmetic`, `storage` or `network`.
pub fn num_op_types_by_name(kind: &str) -> Result<usize, GatingError> {
    kind.parse::<ComponentKind>().map(num_op_types)
}
