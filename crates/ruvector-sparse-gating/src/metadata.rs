//! Fine-grained accounting for the metadata stream of sparse tensors.
//!
//! Metadata (indices, pointers) moves with the data it describes, so it is
//! partitioned from the same `reads` and `fills` totals as storage, gated by
//! the `metadata_read` / `metadata_write` densities. There is no metadata
//! update.

use tracing::{debug, instrument};

use crate::density::{partition, resolve_density};
use crate::error::Result;
use crate::gating::LevelGating;
use crate::registry::DataSpaceRegistry;
use crate::storage::check_record_count;
use crate::types::{AccessKind, DataMovement, GatedAction};

/// Populate `metadata_read` / `metadata_fill` and their gated counterparts
/// for every data space at one storage level.
///
/// Called by [`account_storage`](crate::storage::account_storage); exposed
/// for callers that only need to refresh metadata counts.
///
/// # Errors
///
/// Same as [`account_storage`](crate::storage::account_storage).
#[instrument(skip_all, fields(data_spaces = registry.num_data_spaces()))]
pub fn account_metadata(
    registry: &DataSpaceRegistry,
    movement: &mut [DataMovement],
    level_gating: &LevelGating,
) -> Result<()> {
    check_record_count(registry, movement)?;

    for (id, name) in registry.iter() {
        let (read_density, write_density) = match level_gating.for_data_space(id) {
            Some(gating) => (
                resolve_density(gating, GatedAction::MetadataRead, movement)?,
                resolve_density(gating, GatedAction::MetadataWrite, movement)?,
            ),
            None => (1.0, 1.0),
        };

        let record = &mut movement[id.index()];
        let (metadata_reads, gated_metadata_reads) = partition(record.reads, read_density);
        let (metadata_fills, gated_metadata_fills) = partition(record.fills, write_density);

        let fg = &mut record.fine_grained_accesses;
        fg.insert(AccessKind::MetadataRead, metadata_reads);
        fg.insert(AccessKind::GatedMetadataRead, gated_metadata_reads);
        fg.insert(AccessKind::MetadataFill, metadata_fills);
        fg.insert(AccessKind::GatedMetadataFill, gated_metadata_fills);

        debug!(
            data_space = name,
            read_density,
            write_density,
            metadata_reads,
            metadata_fills,
            "metadata accesses partitioned"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gating::DataSpaceGating;
    use crate::types::{DataSpaceId, FixedDensity};
    use std::sync::Arc;

    #[test]
    fn metadata_gating_independent_of_data_gating() {
        let registry = DataSpaceRegistry::new(["A", "B"]);
        let mut movement = vec![
            DataMovement::new(8, 4, 3, Arc::new(FixedDensity::new(0.25).unwrap())),
            DataMovement::dense(5, 5, 0),
        ];
        let level = LevelGating::new().with(
            DataSpaceId(0),
            DataSpaceGating::new()
                .fully_gated(GatedAction::Read)
                .gated_by(GatedAction::MetadataRead, [DataSpaceId(0)])
                .fully_gated(GatedAction::MetadataWrite),
        );
        account_metadata(&registry, &mut movement, &level).unwrap();

        let a = &movement[0];
        assert_eq!(a.count(AccessKind::MetadataRead), 2);
        assert_eq!(a.count(AccessKind::GatedMetadataRead), 6);
        assert_eq!(a.count(AccessKind::MetadataFill), 0);
        assert_eq!(a.count(AccessKind::GatedMetadataFill), 4);
        // Only metadata labels are written here.
        assert!(!a.fine_grained_accesses.contains_key(&AccessKind::RandomRead));
        assert!(!a.fine_grained_accesses.contains_key(&AccessKind::RandomUpdate));

        let b = &movement[1];
        assert_eq!(b.count(AccessKind::MetadataRead), 5);
        assert_eq!(b.count(AccessKind::GatedMetadataFill), 0);
    }
}
