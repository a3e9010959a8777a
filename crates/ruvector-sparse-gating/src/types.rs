//! Core types for fine-grained access accounting.
//!
//! Provides the per-level [`DataMovement`] records, the per-unit
//! [`ComputeInfo`] record, the closed label set [`AccessKind`] they are
//! populated with, and the [`DensityModel`] seam through which upstream tile
//! density estimates reach the accounting.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::check_density;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Dense index of a data space (tensor) in `0..num_data_spaces`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSpaceId(pub usize);

impl DataSpaceId {
    /// Index into a [`CompoundDataMovement`].
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DataSpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actions whose execution can be gated by data sparsity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedAction {
    /// Storage read (drives `random_read` / `gated_read`).
    Read,
    /// Storage write (drives `random_fill` / `gated_fill`).
    Write,
    /// Metadata read alongside a storage read.
    MetadataRead,
    /// Metadata write alongside a storage fill.
    MetadataWrite,
    /// Arithmetic operation of a compute unit.
    Compute,
}

impl GatedAction {
    /// Label used by gating descriptions.
    pub fn as_str(self) -> &'static str {
        match self {
            GatedAction::Read => "read",
            GatedAction::Write => "write",
            GatedAction::MetadataRead => "metadata_read",
            GatedAction::MetadataWrite => "metadata_write",
            GatedAction::Compute => "compute",
        }
    }
}

impl fmt::Display for GatedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Fine-grained labels
// ---------------------------------------------------------------------------

/// Fine-grained access label consumed by downstream energy estimators.
///
/// The serde and [`as_str`](Self::as_str) representations are the exact
/// labels (`random_read`, `gated_metadata_fill`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    RandomRead,
    GatedRead,
    RandomFill,
    GatedFill,
    RandomUpdate,
    GatedUpdate,
    MetadataRead,
    GatedMetadataRead,
    MetadataFill,
    GatedMetadataFill,
    RandomCompute,
    GatedCompute,
}

impl AccessKind {
    /// Every label, storage labels first.
    pub const ALL: [AccessKind; 12] = [
        AccessKind::RandomRead,
        AccessKind::GatedRead,
        AccessKind::RandomFill,
        AccessKind::GatedFill,
        AccessKind::RandomUpdate,
        AccessKind::GatedUpdate,
        AccessKind::MetadataRead,
        AccessKind::GatedMetadataRead,
        AccessKind::MetadataFill,
        AccessKind::GatedMetadataFill,
        AccessKind::RandomCompute,
        AccessKind::GatedCompute,
    ];

    /// The `(random, gated)` pairs a storage record is partitioned into.
    pub const STORAGE_PAIRS: [(AccessKind, AccessKind); 5] = [
        (AccessKind::RandomRead, AccessKind::GatedRead),
        (AccessKind::RandomFill, AccessKind::GatedFill),
        (AccessKind::RandomUpdate, AccessKind::GatedUpdate),
        (AccessKind::MetadataRead, AccessKind::GatedMetadataRead),
        (AccessKind::MetadataFill, AccessKind::GatedMetadataFill),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AccessKind::RandomRead => "random_read",
            AccessKind::GatedRead => "gated_read",
            AccessKind::RandomFill => "random_fill",
            AccessKind::GatedFill => "gated_fill",
            AccessKind::RandomUpdate => "random_update",
            AccessKind::GatedUpdate => "gated_update",
            AccessKind::MetadataRead => "metadata_read",
            AccessKind::GatedMetadataRead => "gated_metadata_read",
            AccessKind::MetadataFill => "metadata_fill",
            AccessKind::GatedMetadataFill => "gated_metadata_fill",
            AccessKind::RandomCompute => "random_compute",
            AccessKind::GatedCompute => "gated_compute",
        }
    }

    /// True for labels that carry the skipped share.
    pub fn is_gated(self) -> bool {
        matches!(
            self,
            AccessKind::GatedRead
                | AccessKind::GatedFill
                | AccessKind::GatedUpdate
                | AccessKind::GatedMetadataRead
                | AccessKind::GatedMetadataFill
                | AccessKind::GatedCompute
        )
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label -> count table. Ordered so that dumps are deterministic.
pub type FineGrainedAccesses = BTreeMap<AccessKind, u64>;

// ---------------------------------------------------------------------------
// Tile density seam
// ---------------------------------------------------------------------------

/// Source of a tensor tile's average density (fraction of non-zero
/// elements), computed upstream from the mapping under evaluation.
pub trait DensityModel: Send + Sync {
    /// Average density in `[0, 1]`.
    fn average_density(&self) -> f64;
}

/// A density known ahead of time (uniform random sparsity, or a value
/// measured offline).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixedDensity(f64);

impl FixedDensity {
    /// Fully dense tile.
    pub const DENSE: FixedDensity = FixedDensity(1.0);

    /// # Errors
    ///
    /// [`GatingError::DensityOutOfRange`](crate::GatingError::DensityOutOfRange)
    /// when `density` is non-finite or outside `[0, 1]`.
    pub fn new(density: f64) -> Result<Self> {
        check_density(density, "fixed density")?;
        Ok(Self(density))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl DensityModel for FixedDensity {
    fn average_density(&self) -> f64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Aggregate movement of one data space at one storage level.
#[derive(Clone)]
pub struct DataMovement {
    pub reads: u64,
    pub fills: u64,
    pub updates: u64,
    /// Tile density of this data space under the current mapping.
    pub tile_density: Arc<dyn DensityModel>,
    /// Populated by [`account_storage`](crate::storage::account_storage).
    pub fine_grained_accesses: FineGrainedAccesses,
}

impl DataMovement {
    pub fn new(reads: u64, fills: u64, updates: u64, tile_density: Arc<dyn DensityModel>) -> Self {
        Self {
            reads,
            fills,
            updates,
            tile_density,
            fine_grained_accesses: FineGrainedAccesses::new(),
        }
    }

    /// Record with a fully dense tile.
    pub fn dense(reads: u64, fills: u64, updates: u64) -> Self {
        Self::new(reads, fills, updates, Arc::new(FixedDensity::DENSE))
    }

    #[inline]
    pub fn average_density(&self) -> f64 {
        self.tile_density.average_density()
    }

    /// Aggregate total a storage label partitions. `None` for compute labels.
    pub fn total_for(&self, kind: AccessKind) -> Option<u64> {
        match kind {
            AccessKind::RandomRead
            | AccessKind::GatedRead
            | AccessKind::MetadataRead
            | AccessKind::GatedMetadataRead => Some(self.reads),
            AccessKind::RandomFill
            | AccessKind::GatedFill
            | AccessKind::MetadataFill
            | AccessKind::GatedMetadataFill => Some(self.fills),
            AccessKind::RandomUpdate | AccessKind::GatedUpdate => Some(self.updates),
            AccessKind::RandomCompute | AccessKind::GatedCompute => None,
        }
    }

    /// Populated count for `kind`, zero when absent.
    #[inline]
    pub fn count(&self, kind: AccessKind) -> u64 {
        self.fine_grained_accesses.get(&kind).copied().unwrap_or(0)
    }
}

impl fmt::Debug for DataMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataMovement")
            .field("reads", &self.reads)
            .field("fills", &self.fills)
            .field("updates", &self.updates)
            .field("average_density", &self.average_density())
            .field("fine_grained_accesses", &self.fine_grained_accesses)
            .finish()
    }
}

/// All data spaces at one storage level, indexed by [`DataSpaceId`].
pub type CompoundDataMovement = Vec<DataMovement>;

/// Aggregate activity of one (possibly replicated) compute unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeInfo {
    /// Number of replicated compute instances.
    pub replication_factor: u64,
    /// Per-instance operation count.
    pub accesses: u64,
    /// Populated by [`account_compute`](crate::compute::account_compute).
    #[serde(default)]
    pub fine_grained_accesses: FineGrainedAccesses,
}

impl ComputeInfo {
    pub fn new(replication_factor: u64, accesses: u64) -> Self {
        Self {
            replication_factor,
            accesses,
            fine_grained_accesses: FineGrainedAccesses::new(),
        }
    }

    #[inline]
    pub fn count(&self, kind: AccessKind) -> u64 {
        self.fine_grained_accesses.get(&kind).copied().unwrap_or(0)
    }
}
