//! Effective density of the data an action touches.
//!
//! An action gated on several data spaces only does real work where all of
//! them are non-zero, so their tile densities compose multiplicatively.

use crate::error::{GatingError, Result};
use crate::gating::{ActionGating, DataSpaceGating};
use crate::types::{DataMovement, GatedAction};
use crate::validation::check_density;

/// Resolve the density that decides how much of `action` runs at full cost.
///
/// - no entry for `action`: `1.0`
/// - [`ActionGating::FullyGated`]: `0.0`
/// - [`ActionGating::ByDataSpaces`]: product of the listed data spaces'
///   average tile densities (`1.0` for an empty list)
///
/// # Errors
///
/// - [`GatingError::DataSpaceOutOfRange`] if a listed id has no record in
///   `movement`.
/// - [`GatingError::DensityOutOfRange`] if a provider reports a value
///   outside `[0, 1]`.
pub fn resolve_density(
    gating: &DataSpaceGating,
    action: GatedAction,
    movement: &[DataMovement],
) -> Result<f64> {
    let density = match gating.get(action) {
        None => 1.0,
        Some(ActionGating::FullyGated) => 0.0,
        Some(ActionGating::ByDataSpaces(ids)) => {
            let mut density = 1.0;
            for &id in ids {
                let record = movement.get(id.index()).ok_or(GatingError::DataSpaceOutOfRange {
                    id,
                    count: movement.len(),
                })?;
                density *= check_density(record.average_density(), format_args!("data space {id}"))?;
            }
            density
        }
    };
    tracing::trace!(%action, density, "resolved gating density");
    Ok(density)
}

/// Split `total` into `(random, gated)` at `density`.
///
/// The random share is `ceil(density * total)`: costed accesses are never
/// under-counted. It is clamped to `total` because `total as f64` can round
/// up for counts beyond 2^53.
#[inline]
pub fn partition(total: u64, density: f64) -> (u64, u64) {
    let random = ((density * total as f64).ceil() as u64).min(total);
    (random, total - random)
}
