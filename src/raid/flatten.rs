use serde::Serialize;
use std::collections::HashSet;

use crate::raid::types::{ControllerId, LogicalDriveId, PhysicalDriveId, Snapshot};

/// One output row. Absent parts render as blank columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlatRow {
    pub controller: Option<ControllerId>,
    pub logical: Option<LogicalDriveId>,
    pub physical: Option<PhysicalDriveId>,
}

/// Physical drives first, then logical drives no physical drive covered,
/// then controllers with neither. Drives are ordered by composite key.
pub fn flatten(snapshot: &Snapshot) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    let mut done_logical: HashSet<LogicalDriveId> = HashSet::new();
    let mut done_controllers: HashSet<ControllerId> = HashSet::new();

    let mut physical: Vec<PhysicalDriveId> = snapshot.physical_drive_ids().collect();
    physical.sort_by_cached_key(|id| snapshot.physical_key(*id));
    for id in physical {
        let pd = snapshot.physical_drive(id);
        rows.push(FlatRow {
            controller: Some(pd.controller),
            logical: pd.logical_drive,
            physical: Some(id),
        });
        if let Some(ld) = pd.logical_drive {
            if !snapshot.logical_drive(ld).number.is_empty() {
                done_logical.insert(ld);
            }
        }
        done_controllers.insert(pd.controller);
    }

    let mut logical: Vec<LogicalDriveId> = snapshot.logical_drive_ids().collect();
    logical.sort_by_cached_key(|id| snapshot.logical_key(*id));
    for id in logical {
        let ld = snapshot.logical_drive(id);
        // Unnumbered drives never made it into the logical index
        if ld.number.is_empty() || done_logical.contains(&id) {
            continue;
        }
        rows.push(FlatRow {
            controller: Some(ld.controller),
            logical: Some(id),
            physical: None,
        });
        done_controllers.insert(ld.controller);
    }

    for id in snapshot.controller_ids() {
        if done_controllers.contains(&id) {
            continue;
        }
        rows.push(FlatRow {
            controller: Some(id),
            logical: None,
            physical: None,
        });
    }

    rows
}
