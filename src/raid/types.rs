use serde::Serialize;
use std::collections::BTreeMap;

/// Index of a controller inside its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ControllerId(usize);

/// Index of a logical drive inside its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LogicalDriveId(usize);

/// Index of a physical drive inside its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PhysicalDriveId(usize);

impl ControllerId {
    pub(super) fn new(index: usize) -> Self {
        ControllerId(index)
    }
}

impl LogicalDriveId {
    pub(super) fn new(index: usize) -> Self {
        LogicalDriveId(index)
    }
}

impl PhysicalDriveId {
    pub(super) fn new(index: usize) -> Self {
        PhysicalDriveId(index)
    }
}

/// `slot:number` key naming a drive within one controller.
pub fn composite_key(slot: &str, number: &str) -> String {
    format!("{}:{}", slot, number)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Controller {
    pub hw_type: String,
    pub slot: String,
    pub serial: String,
    pub status: String,
    pub cache_status: String,
    pub battery_status: String,
    pub logical_drives: Vec<LogicalDriveId>,
    pub physical_drives: Vec<PhysicalDriveId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalDrive {
    pub controller: ControllerId,
    pub array: String,
    /// Member drive keys, each prefixed with `;`
    pub members: String,
    pub number: String,
    pub status: String,
    pub size: String,
    pub fault_tolerance: String,
    pub disk_name: String,
    pub mount_points: String,
}

impl LogicalDrive {
    pub fn new(controller: ControllerId, array: &str) -> Self {
        LogicalDrive {
            controller,
            array: array.to_string(),
            members: String::new(),
            number: String::new(),
            status: String::new(),
            size: String::new(),
            fault_tolerance: String::new(),
            disk_name: String::new(),
            mount_points: String::new(),
        }
    }

    pub fn member_keys(&self) -> impl Iterator<Item = &str> {
        self.members.split(';').filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicalDrive {
    pub controller: ControllerId,
    pub logical_drive: Option<LogicalDriveId>,
    /// Address token from the `physicaldrive` header line
    pub port: String,
    /// Filled from `port` once the drive reports its `Port` label
    pub address: String,
    pub status: String,
    pub logical_number: String,
    pub size: String,
    pub rotational_speed: String,
    pub firmware: String,
    pub serial: String,
    pub model: String,
    pub temperature_c: String,
    pub max_temperature_c: String,
    pub transfer_rate: String,
}

impl PhysicalDrive {
    pub fn new(controller: ControllerId, port: &str) -> Self {
        PhysicalDrive {
            controller,
            logical_drive: None,
            port: port.to_string(),
            address: String::new(),
            status: String::new(),
            logical_number: String::new(),
            size: String::new(),
            rotational_speed: String::new(),
            firmware: String::new(),
            serial: String::new(),
            model: String::new(),
            temperature_c: String::new(),
            max_temperature_c: String::new(),
            transfer_rate: String::new(),
        }
    }
}

/// Everything one `show config detail` run reported.
///
/// Controllers own their drives through the id lists; drives point back
/// with ids only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub controllers: Vec<Controller>,
    pub logical_drives: Vec<LogicalDrive>,
    pub physical_drives: Vec<PhysicalDrive>,
    pub logical_index: BTreeMap<String, LogicalDriveId>,
    pub physical_index: BTreeMap<String, PhysicalDriveId>,
}

impl Snapshot {
    pub fn controller(&self, id: ControllerId) -> &Controller {
        &self.controllers[id.0]
    }

    pub fn logical_drive(&self, id: LogicalDriveId) -> &LogicalDrive {
        &self.logical_drives[id.0]
    }

    pub fn physical_drive(&self, id: PhysicalDriveId) -> &PhysicalDrive {
        &self.physical_drives[id.0]
    }

    pub(super) fn controller_mut(&mut self, id: ControllerId) -> &mut Controller {
        &mut self.controllers[id.0]
    }

    pub(super) fn logical_drive_mut(&mut self, id: LogicalDriveId) -> &mut LogicalDrive {
        &mut self.logical_drives[id.0]
    }

    pub(super) fn physical_drive_mut(&mut self, id: PhysicalDriveId) -> &mut PhysicalDrive {
        &mut self.physical_drives[id.0]
    }

    pub fn controller_ids(&self) -> impl Iterator<Item = ControllerId> {
        (0..self.controllers.len()).map(ControllerId)
    }

    pub fn logical_drive_ids(&self) -> impl Iterator<Item = LogicalDriveId> {
        (0..self.logical_drives.len()).map(LogicalDriveId)
    }

    pub fn physical_drive_ids(&self) -> impl Iterator<Item = PhysicalDriveId> {
        (0..self.physical_drives.len()).map(PhysicalDriveId)
    }

    /// Key of a logical drive, `slot:` while its number is still unknown.
    pub fn logical_key(&self, id: LogicalDriveId) -> String {
        let ld = self.logical_drive(id);
        composite_key(&self.controller(ld.controller).slot, &ld.number)
    }

    pub fn physical_key(&self, id: PhysicalDriveId) -> String {
        let pd = self.physical_drive(id);
        composite_key(&self.controller(pd.controller).slot, &pd.port)
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
