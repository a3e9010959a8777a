//! Error types for sparse gating accounting.
//!
//! Every failure here is a misconfiguration of the evaluation pass (an
//! unknown tensor name, a density provider out of range, a record set that
//! does not line up with the registry). None of them are retryable: the
//! accounting is deterministic, so re-running with the same inputs fails the
//! same way.

use crate::types::{AccessKind, DataSpaceId};

/// Primary error type for gating and fine-grained accounting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatingError {
    /// A gating list names a data space the registry does not know.
    #[error("unknown data space: {0:?}")]
    UnknownDataSpace(String),

    /// An operation-type count was requested for an unrecognised component
    /// category.
    #[error("unknown component kind: {0:?} (expected arithmetic, storage or network)")]
    UnknownComponentKind(String),

    /// A data-space id has no movement record at this level.
    #[error("data space id {id} out of range for {count} movement records")]
    DataSpaceOutOfRange {
        /// Offending id.
        id: DataSpaceId,
        /// Number of movement records supplied.
        count: usize,
    },

    /// The movement collection and the registry disagree on the number of
    /// data spaces.
    #[error("registry has {registry} data spaces but {records} movement records were supplied")]
    DataSpaceCountMismatch {
        /// `num_data_spaces()` of the registry.
        registry: usize,
        /// Length of the movement collection.
        records: usize,
    },

    /// A tile density provider returned a value outside `[0, 1]`.
    #[error("density {value} for {context} is outside [0, 1]")]
    DensityOutOfRange {
        /// Where the density came from (data-space name or id).
        context: String,
        /// The offending value.
        value: f64,
    },

    /// `replication_factor * accesses` does not fit in a `u64`.
    #[error("compute count overflow: {replication_factor} x {accesses}")]
    CountOverflow {
        /// Number of replicated compute instances.
        replication_factor: u64,
        /// Per-instance access count.
        accesses: u64,
    },

    /// A populated random/gated pair does not sum to its total.
    #[error("{random} + {gated} != {total} for {random_kind}")]
    PartitionViolation {
        /// The `random_*` label of the pair.
        random_kind: AccessKind,
        /// Recorded random share.
        random: u64,
        /// Recorded gated share.
        gated: u64,
        /// Aggregate total the pair must partition.
        total: u64,
    },
}

/// Result alias for gating operations.
pub type Result<T> = std::result::Result<T, GatingError>;

impl GatingError {
    /// Name or category lookups that failed against a registry or catalogue.
    #[inline]
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            GatingError::UnknownDataSpace(_)
                | GatingError::UnknownComponentKind(_)
                | GatingError::DataSpaceOutOfRange { .. }
        )
    }
}
