//! Sparsity-gated fine-grained access accounting for accelerator models.
//!
//! Given aggregate reads, fills and updates per data space at a storage
//! level (and accesses per compute unit), this crate splits every count into
//! a *random* share that runs at full cost and a *gated* share suppressed by
//! data sparsity. Energy and latency estimators price the two shares
//! differently.
//!
//! # Pipeline
//!
//! | Step | Function | Labels written |
//! |------|----------|----------------|
//! | Storage | [`account_storage`] | `random_/gated_` `read`, `fill`, `update` |
//! | Metadata | [`account_metadata`] | `metadata_read`, `metadata_fill` and gated forms |
//! | Compute | [`account_compute`] | `random_compute`, `gated_compute` |
//!
//! Every step resolves a gating density with [`resolve_density`] and rounds
//! the random share *up*, so costed accesses are never under-counted.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ruvector_sparse_gating::{
//!     account_storage, AccessKind, DataMovement, DataSpaceRegistry, FixedDensity,
//!     GatedAction,
//! };
//! use ruvector_sparse_gating::config::{DataSpaceGatingConfig, LevelGatingConfig};
//!
//! let registry = DataSpaceRegistry::new(["Weights", "Inputs", "Outputs"]);
//! let mut movement = vec![
//!     DataMovement::new(10, 10, 0, Arc::new(FixedDensity::new(0.5).unwrap())),
//!     DataMovement::new(10, 10, 0, Arc::new(FixedDensity::new(0.4).unwrap())),
//!     DataMovement::dense(0, 4, 4),
//! ];
//!
//! // Reads of Inputs happen only where both Weights and Inputs are non-zero.
//! let level = LevelGatingConfig::new()
//!     .data_space(
//!         "Inputs",
//!         DataSpaceGatingConfig::new().action(GatedAction::Read, ["Weights", "Inputs"]),
//!     )
//!     .resolve(&registry)
//!     .unwrap();
//!
//! account_storage(&registry, &mut movement, &level).unwrap();
//! assert_eq!(movement[1].count(AccessKind::RandomRead), 2);
//! assert_eq!(movement[1].count(AccessKind::GatedRead), 8);
//! ```

pub mod compute;
pub mod config;
pub mod density;
pub mod error;
pub mod gating;
pub mod metadata;
pub mod op_types;
pub mod registry;
pub mod storage;
pub mod types;
pub mod validation;

pub use compute::account_compute;
pub use density::{partition, resolve_density};
pub use error::{GatingError, Result};
pub use gating::{ActionGating, ComputeGating, DataSpaceGating, LevelGating};
pub use metadata::account_metadata;
pub use op_types::{num_op_types, ComponentKind};
pub use registry::DataSpaceRegistry;
pub use storage::account_storage;
pub use types::{
    AccessKind, CompoundDataMovement, ComputeInfo, DataMovement, DataSpaceId, DensityModel,
    FineGrainedAccesses, FixedDensity, GatedAction,
};
