use tracing::{debug, warn};

use crate::raid::types::{
    composite_key, Controller, ControllerId, LogicalDrive, LogicalDriveId, PhysicalDrive,
    PhysicalDriveId, Snapshot,
};

/// Owns the snapshot while it is being filled in.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    snapshot: Snapshot,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_controller(&mut self, hw_type: &str) -> ControllerId {
        let id = ControllerId::new(self.snapshot.controllers.len());
        self.snapshot.controllers.push(Controller {
            hw_type: hw_type.to_string(),
            ..Controller::default()
        });
        debug!(controller = ?id, hw_type, "recorded controller");
        id
    }

    /// New logical drive for `controller`. It is indexed later, once its
    /// number is known (see `register_logical_drive`).
    pub fn record_logical_drive(&mut self, controller: ControllerId, array: &str) -> LogicalDriveId {
        let id = LogicalDriveId::new(self.snapshot.logical_drives.len());
        self.snapshot
            .logical_drives
            .push(LogicalDrive::new(controller, array));
        self.snapshot.controller_mut(controller).logical_drives.push(id);
        debug!(controller = ?controller, logical_drive = ?id, array, "recorded logical drive");
        id
    }

    /// Index a logical drive under `slot:number`.
    pub fn register_logical_drive(&mut self, id: LogicalDriveId) {
        let key = self.snapshot.logical_key(id);
        if let Some(previous) = self.snapshot.logical_index.insert(key.clone(), id) {
            if previous != id {
                warn!(key = %key, "duplicate logical drive key, keeping the latest");
            }
        }
    }

    /// New physical drive for `controller`, linked to `logical` when one is
    /// active. The drive's key is appended to the logical drive's members.
    pub fn record_physical_drive(
        &mut self,
        controller: ControllerId,
        logical: Option<LogicalDriveId>,
        port: &str,
    ) -> PhysicalDriveId {
        let id = PhysicalDriveId::new(self.snapshot.physical_drives.len());
        let mut drive = PhysicalDrive::new(controller, port);

        let logical = logical.filter(|ld| {
            let owner = self.snapshot.logical_drive(*ld).controller;
            if owner != controller {
                warn!(port, "logical drive belongs to another controller, dropping link");
            }
            owner == controller
        });

        let key = composite_key(&self.snapshot.controller(controller).slot, port);
        if let Some(ld) = logical {
            let ld_entry = self.snapshot.logical_drive_mut(ld);
            drive.logical_drive = Some(ld);
            drive.logical_number = ld_entry.number.clone();
            ld_entry.members.push(';');
            ld_entry.members.push_str(&key);
        }

        self.snapshot.physical_drives.push(drive);
        self.snapshot.controller_mut(controller).physical_drives.push(id);
        if self.snapshot.physical_index.insert(key.clone(), id).is_some() {
            warn!(key = %key, "duplicate physical drive key, keeping the latest");
        }
        debug!(controller = ?controller, physical_drive = ?id, key = %key, "recorded physical drive");
        id
    }

    pub fn controller_mut(&mut self, id: ControllerId) -> &mut Controller {
        self.snapshot.controller_mut(id)
    }

    pub fn logical_drive_mut(&mut self, id: LogicalDriveId) -> &mut LogicalDrive {
        self.snapshot.logical_drive_mut(id)
    }

    pub fn physical_drive_mut(&mut self, id: PhysicalDriveId) -> &mut PhysicalDrive {
        self.snapshot.physical_drive_mut(id)
    }

    pub fn finish(self) -> Snapshot {
        self.snapshot
    }
}
