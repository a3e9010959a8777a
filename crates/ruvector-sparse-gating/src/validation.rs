//! Input and output checks for the accounting.
//!
//! [`check_density`] guards values coming in from tile density providers.
//! The partition checks verify a populated record after the fact; the
//! accounting never produces a violating record, so these are meant for
//! callers that assemble or merge fine-grained tables themselves.

use std::fmt;

use crate::error::{GatingError, Result};
use crate::types::{AccessKind, ComputeInfo, DataMovement};

/// Ensure `value` is a finite density in `[0, 1]` and return it.
///
/// # Errors
///
/// [`GatingError::DensityOutOfRange`] otherwise.
pub fn check_density(value: f64, context: impl fmt::Display) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GatingError::DensityOutOfRange {
            context: context.to_string(),
            value,
        })
    }
}

/// Check every populated storage pair of `movement` sums to its total.
///
/// Pairs with neither label present are skipped.
///
/// # Errors
///
/// [`GatingError::PartitionViolation`] for the first pair that does not add
/// up.
pub fn validate_partition(movement: &DataMovement) -> Result<()> {
    for (random_kind, gated_kind) in AccessKind::STORAGE_PAIRS {
        let fg = &movement.fine_grained_accesses;
        if !fg.contains_key(&random_kind) && !fg.contains_key(&gated_kind) {
            continue;
        }
        // STORAGE_PAIRS only holds storage labels.
        let total = movement.total_for(random_kind).unwrap_or_default();
        check_pair(random_kind, movement.count(random_kind), movement.count(gated_kind), total)?;
    }
    Ok(())
}

/// Check `random_compute + gated_compute == replication_factor * accesses`.
///
/// # Errors
///
/// [`GatingError::CountOverflow`] if the total does not fit, or
/// [`GatingError::PartitionViolation`].
pub fn validate_compute_partition(compute: &ComputeInfo) -> Result<()> {
    let total = compute
        .replication_factor
        .checked_mul(compute.accesses)
        .ok_or(GatingError::CountOverflow {
            replication_factor: compute.replication_factor,
            accesses: compute.accesses,
        })?;
    check_pair(
        AccessKind::RandomCompute,
        compute.count(AccessKind::RandomCompute),
        compute.count(AccessKind::GatedCompute),
        total,
    )
}

fn check_pair(random_kind: AccessKind, random: u64, gated: u64, total: u64) -> Result<()> {
    if random.checked_add(gated) == Some(total) {
        Ok(())
    } else {
        Err(GatingError::PartitionViolation {
            random_kind,
            random,
            gated,
            total,
        })
    }
}
