//! Fine-grained accounting for compute units.
//!
//! A compute unit has no tile of its own; its gating names the operand data
//! spaces whose zeros let it skip work, looked up in the movement records of
//! the level feeding it.

use tracing::{debug, instrument};

use crate::density::{partition, resolve_density};
use crate::error::{GatingError, Result};
use crate::gating::ComputeGating;
use crate::types::{AccessKind, ComputeInfo, DataMovement, GatedAction};

/// Populate `random_compute` / `gated_compute` on `compute`.
///
/// The total is `replication_factor * accesses`; the random share is
/// `ceil(density * total)` at the `compute` gating density.
///
/// # Errors
///
/// - [`GatingError::CountOverflow`] if the total does not fit in a `u64`.
/// - Any error from [`resolve_density`].
#[instrument(
    skip_all,
    fields(replication_factor = compute.replication_factor, accesses = compute.accesses)
)]
pub fn account_compute(
    compute: &mut ComputeInfo,
    compute_gating: &ComputeGating,
    movement: &[DataMovement],
) -> Result<()> {
    let density = resolve_density(compute_gating, GatedAction::Compute, movement)?;
    let total = compute
        .replication_factor
        .checked_mul(compute.accesses)
        .ok_or(GatingError::CountOverflow {
            replication_factor: compute.replication_factor,
            accesses: compute.accesses,
        })?;

    let (random, gated) = partition(total, density);
    compute.fine_grained_accesses.insert(AccessKind::RandomCompute, random);
    compute.fine_grained_accesses.insert(AccessKind::GatedCompute, gated);

    debug!(density, total, random, gated, "compute accesses partitioned");
    Ok(())
}
