//! Fine-grained accounting for storage-level data movement.
//!
//! Reads are gated by the `read` density, fills by the `write` density.
//! Updates are read-modify-write and always execute, so they are never
//! gated regardless of any `write` gating. Metadata accounting for the same
//! level runs once all data spaces are done.

use tracing::{debug, instrument};

use crate::density::{partition, resolve_density};
use crate::error::{GatingError, Result};
use crate::gating::LevelGating;
use crate::metadata::account_metadata;
use crate::registry::DataSpaceRegistry;
use crate::types::{AccessKind, DataMovement, GatedAction};

/// Populate read/fill/update (and metadata) fine-grained counts for every
/// data space at one storage level.
///
/// Data spaces are visited in registry order. One without an entry in
/// `level_gating` is treated as fully dense. Existing fine-grained entries
/// are overwritten, so re-running on unchanged inputs is a no-op.
///
/// # Errors
///
/// - [`GatingError::DataSpaceCountMismatch`] if `movement` does not have one
///   record per registered data space.
/// - Any error from [`resolve_density`]. The level is left partially
///   populated in that case and should be discarded.
#[instrument(skip_all, fields(data_spaces = registry.num_data_spaces()))]
pub fn account_storage(
    registry: &DataSpaceRegistry,
    movement: &mut [DataMovement],
    level_gating: &LevelGating,
) -> Result<()> {
    check_record_count(registry, movement)?;

    for (id, name) in registry.iter() {
        let (read_density, write_density) = match level_gating.for_data_space(id) {
            Some(gating) => (
                resolve_density(gating, GatedAction::Read, movement)?,
                resolve_density(gating, GatedAction::Write, movement)?,
            ),
            None => (1.0, 1.0),
        };

        let record = &mut movement[id.index()];
        let (random_reads, gated_reads) = partition(record.reads, read_density);
        let (random_fills, gated_fills) = partition(record.fills, write_density);

        let fg = &mut record.fine_grained_accesses;
        fg.insert(AccessKind::RandomRead, random_reads);
        fg.insert(AccessKind::GatedRead, gated_reads);
        fg.insert(AccessKind::RandomFill, random_fills);
        fg.insert(AccessKind::GatedFill, gated_fills);
        fg.insert(AccessKind::RandomUpdate, record.updates);
        fg.insert(AccessKind::GatedUpdate, 0);

        debug!(
            data_space = name,
            read_density,
            write_density,
            random_reads,
            gated_reads,
            random_fills,
            gated_fills,
            "storage accesses partitioned"
        );
    }

    account_metadata(registry, movement, level_gating)
}

pub(crate) fn check_record_count(registry: &DataSpaceRegistry, movement: &[DataMovement]) -> Result<()> {
    if movement.len() == registry.num_data_spaces() {
        Ok(())
    } else {
        Err(GatingError::DataSpaceCountMismatch {
            registry: registry.num_data_spaces(),
            records: movement.len(),
        })
    }
}
