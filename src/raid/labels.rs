use crate::raid::types::{Controller, LogicalDrive, PhysicalDrive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerField {
    Slot,
    Serial,
    Status,
    CacheStatus,
    BatteryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalField {
    Size,
    Number,
    FaultTolerance,
    DiskName,
    MountPoints,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalField {
    Port,
    Status,
    Size,
    Model,
    Serial,
    RotationalSpeed,
    Temperature,
    MaxTemperature,
    Firmware,
    TransferRate,
}

impl ControllerField {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Slot" => Some(Self::Slot),
            "Serial Number" => Some(Self::Serial),
            "Controller Status" => Some(Self::Status),
            "Cache Status" => Some(Self::CacheStatus),
            "Battery/Capacitor Status" => Some(Self::BatteryStatus),
            _ => None,
        }
    }
}

impl LogicalField {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Size" => Some(Self::Size),
            "Logical Drive" => Some(Self::Number),
            "Fault Tolerance" => Some(Self::FaultTolerance),
            "Disk Name" => Some(Self::DiskName),
            "Mount Points" => Some(Self::MountPoints),
            "Status" => Some(Self::Status),
            _ => None,
        }
    }
}

impl PhysicalField {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Port" => Some(Self::Port),
            "Status" => Some(Self::Status),
            "Size" => Some(Self::Size),
            "Model" => Some(Self::Model),
            "Serial Number" => Some(Self::Serial),
            "Rotational Speed" => Some(Self::RotationalSpeed),
            "Current Temperature (C)" => Some(Self::Temperature),
            "Maximum Temperature (C)" => Some(Self::MaxTemperature),
            "Firmware Revision" => Some(Self::Firmware),
            "PHY Transfer Rate" => Some(Self::TransferRate),
            _ => None,
        }
    }
}

impl Controller {
    pub fn apply(&mut self, field: ControllerField, value: &str) {
        let value = value.to_string();
        match field {
            ControllerField::Slot => self.slot = value,
            ControllerField::Serial => self.serial = value,
            ControllerField::Status => self.status = value,
            ControllerField::CacheStatus => self.cache_status = value,
            ControllerField::BatteryStatus => self.battery_status = value,
        }
    }
}

impl LogicalDrive {
    pub fn apply(&mut self, field: LogicalField, value: &str) {
        let value = value.to_string();
        match field {
            LogicalField::Size => self.size = value,
            LogicalField::Number => self.number = value,
            LogicalField::FaultTolerance => self.fault_tolerance = value,
            LogicalField::DiskName => self.disk_name = value,
            LogicalField::MountPoints => self.mount_points = value,
            LogicalField::Status => self.status = value,
        }
    }
}

impl PhysicalDrive {
    pub fn apply(&mut self, field: PhysicalField, value: &str) {
        match field {
            // The port label only says "1I"; the header carries the full address.
            PhysicalField::Port => self.address = self.port.clone(),
            PhysicalField::Status => self.status = value.to_string(),
            PhysicalField::Size => self.size = value.to_string(),
            PhysicalField::Model => self.model = value.to_string(),
            PhysicalField::Serial => self.serial = value.to_string(),
            PhysicalField::RotationalSpeed => self.rotational_speed = value.to_string(),
            PhysicalField::Temperature => self.temperature_c = value.to_string(),
            PhysicalField::MaxTemperature => self.max_temperature_c = value.to_string(),
            PhysicalField::Firmware => self.firmware = value.to_string(),
            PhysicalField::TransferRate => self.transfer_rate = value.replace("  Unknown", ""),
        }
    }
}
