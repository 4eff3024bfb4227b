use crate::raid::flatten::{flatten, FlatRow};
use crate::raid::types::{Controller, LogicalDrive, PhysicalDrive, Snapshot};

const HEADER_PREFIX: &str = "hp.";

pub trait CsvRecord {
    const COLUMNS: &'static [&'static str];

    fn csv_fields(&self) -> Vec<&str>;

    fn csv(&self) -> String {
        self.csv_fields().join(",")
    }

    fn blank_csv() -> String {
        vec![""; Self::COLUMNS.len()].join(",")
    }

    fn header() -> String {
        Self::COLUMNS
            .iter()
            .map(|name| format!("{}{}", HEADER_PREFIX, name))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `Name=value` pairs, for log and terminal output.
    fn name_values(&self) -> String {
        Self::COLUMNS
            .iter()
            .zip(self.csv_fields())
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn csv_or_blank<T: CsvRecord>(record: Option<&T>) -> String {
    match record {
        Some(record) => record.csv(),
        None => T::blank_csv(),
    }
}

impl CsvRecord for Controller {
    const COLUMNS: &'static [&'static str] = &[
        "Type",
        "Slotnum",
        "Ctrlserial",
        "Ctrlstatus",
        "Cachestatus",
        "Batterystatus",
    ];

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            self.hw_type.as_str(),
            self.slot.as_str(),
            self.serial.as_str(),
            self.status.as_str(),
            self.cache_status.as_str(),
            self.battery_status.as_str(),
        ]
    }
}

impl CsvRecord for LogicalDrive {
    const COLUMNS: &'static [&'static str] = &[
        "Pdas", "Ldnum", "Ldstatus", "Ldsize", "Raid", "Lddev", "Mountpts",
    ];

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            self.members.as_str(),
            self.number.as_str(),
            self.status.as_str(),
            self.size.as_str(),
            self.fault_tolerance.as_str(),
            self.disk_name.as_str(),
            self.mount_points.as_str(),
        ]
    }
}

impl CsvRecord for PhysicalDrive {
    const COLUMNS: &'static [&'static str] = &[
        "Pdaddress",
        "Pdstatus",
        "Pdldnum",
        "Pdsize",
        "Pdspeed",
        "Pdfirmware",
        "Pdserial",
        "Pdmodel",
        "PdtempC",
        "PdtempmaxC",
        "Pdrate",
    ];

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            self.address.as_str(),
            self.status.as_str(),
            self.logical_number.as_str(),
            self.size.as_str(),
            self.rotational_speed.as_str(),
            self.firmware.as_str(),
            self.serial.as_str(),
            self.model.as_str(),
            self.temperature_c.as_str(),
            self.max_temperature_c.as_str(),
            self.transfer_rate.as_str(),
        ]
    }
}

/// Column names for a flattened row: controller, logical drive, physical drive.
pub fn header() -> String {
    format!(
        "{},{},{}",
        Controller::header(),
        LogicalDrive::header(),
        PhysicalDrive::header()
    )
}

pub fn render_row(snapshot: &Snapshot, row: &FlatRow) -> String {
    format!(
        "{},{},{}",
        csv_or_blank(row.controller.map(|id| snapshot.controller(id))),
        csv_or_blank(row.logical.map(|id| snapshot.logical_drive(id))),
        csv_or_blank(row.physical.map(|id| snapshot.physical_drive(id))),
    )
}

/// Header line plus one line per flattened row, each prefixed with the
/// host the snapshot came from.
pub fn render_csv(snapshot: &Snapshot, box_name: &str) -> String {
    let mut out = format!("{}box,{}\n", HEADER_PREFIX, header());
    for row in flatten(snapshot) {
        out.push_str(box_name);
        out.push(',');
        out.push_str(&render_row(snapshot, &row));
        out.push('\n');
    }
    out
}
