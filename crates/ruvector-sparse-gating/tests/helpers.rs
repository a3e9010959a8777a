//! Shared fixtures for the ruvector-sparse-gating integration tests.
//!
//! Builds a small convolution-shaped problem (Weights, Inputs, Outputs) and
//! movement records with fixed tile densities.

#![allow(dead_code)]

use std::sync::Arc;

use ruvector_sparse_gating::{DataMovement, DataSpaceRegistry, FixedDensity};

/// Route `tracing` output through the test harness. Set `RUST_LOG=debug` to
/// see per-data-space partitions.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn conv_registry() -> DataSpaceRegistry {
    DataSpaceRegistry::new(["Weights", "Inputs", "Outputs"])
}

/// Movement record with a fixed tile density.
pub fn movement(reads: u64, fills: u64, updates: u64, density: f64) -> DataMovement {
    DataMovement::new(
        reads,
        fills,
        updates,
        Arc::new(FixedDensity::new(density).expect("test density in range")),
    )
}

/// Weights at 0.5, Inputs at 0.4, Outputs dense.
pub fn conv_level() -> Vec<DataMovement> {
    vec![
        movement(10, 10, 0, 0.5),
        movement(10, 25, 0, 0.4),
        movement(40, 8, 16, 1.0),
    ]
}
