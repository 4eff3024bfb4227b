use tracing::{debug, trace};

use crate::raid::builder::HierarchyBuilder;
use crate::raid::labels::{ControllerField, LogicalField, PhysicalField};
use crate::raid::mode::{Marker, Mode};
use crate::raid::tokenizer::{clean_lines, field, tokenize};
use crate::raid::types::{ControllerId, LogicalDriveId, PhysicalDriveId, Snapshot};

/// Where the parser is: the mode plus the entities label lines apply to.
#[derive(Debug, Default)]
struct ParseContext {
    mode: Mode,
    controller: Option<ControllerId>,
    logical: Option<LogicalDriveId>,
    physical: Option<PhysicalDriveId>,
}

/// Parse raw tool output into a snapshot. Never fails: lines that make no
/// sense in the current mode are skipped.
pub fn parse(raw: &str) -> Snapshot {
    parse_lines(&clean_lines(raw))
}

/// Parse lines already cleaned to comma-separated words.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Snapshot {
    let mut builder = HierarchyBuilder::new();
    let mut ctx = ParseContext::default();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        trace!(line = index, mode = ?ctx.mode, tokens = %tokens.join("#"), "hpacucli line");

        match Marker::detect(line, &tokens) {
            Some(marker) => ctx.enter(marker, &mut builder),
            None => ctx.apply_label(&tokens, &mut builder),
        }
    }

    builder.finish()
}

impl ParseContext {
    fn enter(&mut self, marker: Marker, builder: &mut HierarchyBuilder) {
        let Some(next) = self.mode.transition(&marker) else {
            trace!(mode = ?self.mode, ?marker, "marker ignored");
            return;
        };

        match marker {
            Marker::ControllerHeader { hw_type } => {
                self.controller = Some(builder.record_controller(&hw_type));
                self.logical = None;
                self.physical = None;
            }
            Marker::End => {
                self.controller = None;
                self.logical = None;
                self.physical = None;
            }
            Marker::ArrayHeader { name } => {
                self.physical = None;
                let Some(controller) = self.controller else {
                    debug!(array = %name, "array outside any controller, skipped");
                    return;
                };
                self.logical = Some(builder.record_logical_drive(controller, &name));
            }
            Marker::Unassigned => {
                self.logical = None;
                self.physical = None;
                if self.controller.is_none() {
                    debug!("unassigned section outside any controller, skipped");
                    return;
                }
            }
            Marker::PhysicalDrive { port } => {
                self.physical = None;
                let Some(controller) = self.controller else {
                    debug!(port = %port, "physical drive outside any controller, skipped");
                    return;
                };
                self.physical = Some(builder.record_physical_drive(controller, self.logical, &port));
            }
        }

        debug!(from = ?self.mode, to = ?next, "mode change");
        self.mode = next;
    }

    fn apply_label(&mut self, tokens: &[String], builder: &mut HierarchyBuilder) {
        if !self.mode.reads_labels() {
            return;
        }
        let label = field(tokens, 0);
        let value = field(tokens, 1);

        match self.mode {
            Mode::Controller | Mode::Unassigned => {
                let Some(field) = ControllerField::from_label(label) else {
                    trace!(label, "unrecognised controller label");
                    return;
                };
                match self.controller {
                    Some(id) => builder.controller_mut(id).apply(field, value),
                    None => debug!(label, "no active controller, skipped"),
                }
            }
            Mode::Logical => {
                self.physical = None;
                let Some(field) = LogicalField::from_label(label) else {
                    trace!(label, "unrecognised logical drive label");
                    return;
                };
                let Some(id) = self.logical else {
                    debug!(label, "no active logical drive, skipped");
                    return;
                };
                builder.logical_drive_mut(id).apply(field, value);
                if field == LogicalField::Number {
                    builder.register_logical_drive(id);
                }
            }
            Mode::Physical => {
                let Some(field) = PhysicalField::from_label(label) else {
                    trace!(label, "unrecognised physical drive label");
                    return;
                };
                match self.physical {
                    Some(id) => builder.physical_drive_mut(id).apply(field, value),
                    None => debug!(label, "no active physical drive, skipped"),
                }
            }
            Mode::NotStarted | Mode::Finished => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raid::flatten::flatten;
    use pretty_assertions::assert_eq;

    const P410_ONE_ARRAY: &str = "
Smart Array P410 in Slot 1
   Bus Interface: PCI
   Slot: 1
   Serial Number: PACCR0M9VZ41S4Q
   Controller Status: OK
   Cache Status: OK
   Battery/Capacitor Status: OK

   Array: A
      Interface Type: SAS
      Unused Space: 0  MB

      Logical Drive: 1
         Size: 136.7 GB
         Fault Tolerance: 1
         Status: OK
         Disk Name: /dev/sda
         Mount Points: /boot 200 MB

      physicaldrive 1I:1:1
         Port: 1I
         Box: 1
         Bay: 1
         Status: OK
         Drive Type: Data Drive
         Size: 146 GB
         Rotational Speed: 10000
         Firmware Revision: HPD8
         Serial Number: PEW6N8HF
         Model: HP      EG0146FAWHU
         Current Temperature (C): 31
         Maximum Temperature (C): 36
         PHY Transfer Rate: 6.0Gbps, Unknown

      physicaldrive 1I:1:2
         Port: 1I
         Status: OK
         Size: 146 GB

   SEP (Vendor ID PMCSIERA, Model  SRC 8x6G) 250
      Device Number: 250
";

    const UNASSIGNED_ONLY: &str = "
Smart Array P420i in Slot 0 (Embedded)
   Slot: 0
   Controller Status: OK

   unassigned

      physicaldrive 2I:1:5
         Port: 2I
         Status: OK
         Size: 300 GB

      physicaldrive 2I:1:6
         Port: 2I
         Size: 300 GB
";

    #[test]
    fn test_single_array_scenario() {
        let snapshot = parse(P410_ONE_ARRAY);

        assert_eq!(snapshot.controllers.len(), 1);
        assert_eq!(snapshot.logical_drives.len(), 1);
        assert_eq!(snapshot.physical_drives.len(), 2);

        let ctrl = &snapshot.controllers[0];
        assert_eq!(ctrl.hw_type, "P410");
        assert_eq!(ctrl.slot, "1");
        assert_eq!(ctrl.serial, "PACCR0M9VZ41S4Q");
        assert_eq!(ctrl.battery_status, "OK");

        let ld = &snapshot.logical_drives[0];
        assert_eq!(ld.array, "A");
        assert_eq!(ld.number, "1");
        assert_eq!(ld.size, "136.7 GB");
        assert_eq!(ld.fault_tolerance, "1");
        assert_eq!(ld.disk_name, "/dev/sda");
        assert_eq!(ld.mount_points, "/boot 200 MB");
        assert_eq!(ld.members, ";1:1I:1:1;1:1I:1:2");
        assert_eq!(ld.member_keys().count(), 2);

        let pd = &snapshot.physical_drives[0];
        assert_eq!(pd.address, "1I:1:1");
        assert_eq!(pd.logical_number, "1");
        assert_eq!(pd.size, "146 GB");
        assert_eq!(pd.rotational_speed, "10000");
        assert_eq!(pd.firmware, "HPD8");
        assert_eq!(pd.serial, "PEW6N8HF");
        assert_eq!(pd.model, "HP EG0146FAWHU");
        assert_eq!(pd.temperature_c, "31");
        assert_eq!(pd.max_temperature_c, "36");
        assert_eq!(pd.transfer_rate, "6.0Gbps");

        assert_eq!(
            snapshot.logical_index.keys().collect::<Vec<_>>(),
            vec!["1:1"]
        );
        assert_eq!(
            snapshot.physical_index.keys().collect::<Vec<_>>(),
            vec!["1:1I:1:1", "1:1I:1:2"]
        );

        let rows = flatten(&snapshot);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.physical.is_some()));
    }

    #[test]
    fn test_unassigned_drives_have_no_logical_drive() {
        let snapshot = parse(UNASSIGNED_ONLY);

        assert_eq!(snapshot.controllers.len(), 1);
        assert!(snapshot.logical_drives.is_empty());
        assert_eq!(snapshot.physical_drives.len(), 2);
        assert!(snapshot
            .physical_drives
            .iter()
            .all(|pd| pd.logical_drive.is_none() && pd.logical_number.is_empty()));

        let rows = flatten(&snapshot);
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert!(row.controller.is_some());
            assert!(row.logical.is_none());
            assert!(row.physical.is_some());
        }
    }

    #[test]
    fn test_drive_fields_do_not_leak_into_next_drive() {
        let snapshot = parse(UNASSIGNED_ONLY);
        assert_eq!(snapshot.physical_drives[0].status, "OK");
        assert_eq!(snapshot.physical_drives[1].status, "");
        assert_eq!(snapshot.physical_drives[1].size, "300 GB");
    }

    #[test]
    fn test_lines_after_sep_are_ignored() {
        let input = format!(
            "{}\n   physicaldrive 1I:1:9\n      Status: Failed\n   Slot: 7\n",
            P410_ONE_ARRAY
        );
        let snapshot = parse(&input);
        assert_eq!(snapshot.physical_drives.len(), 2);
        assert_eq!(snapshot.controllers[0].slot, "1");
    }

    #[test]
    fn test_controllers_after_sep_start_fresh() {
        let input = format!("{}{}", P410_ONE_ARRAY, UNASSIGNED_ONLY);
        let snapshot = parse(&input);

        assert_eq!(snapshot.controllers.len(), 2);
        assert_eq!(snapshot.controllers[1].hw_type, "P420i");
        let second = ControllerId::new(1);
        for pd in snapshot.controller(second).physical_drives.iter() {
            assert_eq!(snapshot.physical_drive(*pd).controller, second);
        }
        assert_eq!(snapshot.controller(second).physical_drives.len(), 2);
    }

    #[test]
    fn test_short_form_drive_lines_are_not_counted() {
        let input = "
Smart Array P410 in Slot 1
   Slot: 1
   Array: A
      Logical Drive: 1
      physicaldrive 1I:1:1 (port 1I:box 1:bay 1, SAS, 146 GB, OK)
      physicaldrive 1I:1:2 (port 1I:box 1:bay 2, SAS, 146 GB, OK)
";
        let snapshot = parse(input);
        assert!(snapshot.physical_drives.is_empty());
        assert_eq!(flatten(&snapshot).len(), 1);
    }

    #[test]
    fn test_logical_label_after_drive_does_not_touch_drive() {
        let input = "
Smart Array P410 in Slot 1
   Slot: 1
   Array: A
      Logical Drive: 1
      physicaldrive 1I:1:1
         Status: OK
   Array: B
      Status: Failed
      Logical Drive: 2
";
        let snapshot = parse(input);
        assert_eq!(snapshot.physical_drives[0].status, "OK");
        assert_eq!(snapshot.logical_drives[1].status, "Failed");
        assert_eq!(snapshot.logical_drives[1].array, "B");
    }

    #[test]
    fn test_labels_without_entities_are_skipped() {
        let input = "
Slot: 3
Array: A
physicaldrive 1I:1:1
   Status: OK
unassigned
";
        let snapshot = parse(input);
        assert!(snapshot.is_empty());
        assert!(flatten(&snapshot).is_empty());
    }

    #[test]
    fn test_controller_fields_survive_noise_lines() {
        let input = "
Smart Array P410 in Slot 1
   Slot: 1
   Serial Number: CTRL1
   Bus Interface: PCI
   RAID 6 (ADG) Status: Enabled
   Cache Board Present: True
   Array: A
      Logical Drive: 1
      Strip Size: 256 KB
      physicaldrive 1I:1:1
         Drive Type: Data Drive
         Interface Type: SAS
         Status: OK
";
        let snapshot = parse(input);
        let pd = &snapshot.physical_drives[0];
        let ctrl = snapshot.controller(pd.controller);
        assert_eq!(ctrl.slot, "1");
        assert_eq!(ctrl.serial, "CTRL1");
        assert_eq!(pd.status, "OK");
    }

    #[test]
    fn test_controller_labels_after_unassigned_update_controller() {
        let input = "
Smart Array P410 in Slot 1
   Slot: 1
   Cache Status: Temporarily Disabled
   unassigned
      physicaldrive 1I:1:4
         Status: OK
   unassigned
   Cache Status: OK
   Battery/Capacitor Status: Failed
";
        let snapshot = parse(input);
        let ctrl = &snapshot.controllers[0];
        assert_eq!(ctrl.cache_status, "OK");
        assert_eq!(ctrl.battery_status, "Failed");
        assert_eq!(snapshot.physical_drives[0].status, "OK");
    }

    /// Synthetic `show config detail` text. Each controller is
    /// (logical drives, drives per logical drive, unassigned drives).
    fn render_layout(layout: &[(usize, usize, usize)]) -> String {
        let mut text = String::new();
        for (slot, (logical, per_logical, unassigned)) in layout.iter().enumerate() {
            text.push_str(&format!("Smart Array P410 in Slot {}\n   Slot: {}\n", slot, slot));
            text.push_str("   Controller Status: OK\n");
            for ld in 0..*logical {
                text.push_str(&format!("   Array: {}\n", (b'A' + ld as u8) as char));
                text.push_str(&format!("      Logical Drive: {}\n      Status: OK\n", ld + 1));
                for bay in 0..*per_logical {
                    text.push_str(&format!("      physicaldrive 1I:{}:{}\n", ld, bay));
                    text.push_str("         Port: 1I\n         Status: OK\n");
                }
            }
            if *unassigned > 0 {
                text.push_str("   unassigned\n");
                for bay in 0..*unassigned {
                    text.push_str(&format!("      physicaldrive 2I:1:{}\n", bay));
                    text.push_str("         Port: 2I\n         Status: OK\n");
                }
            }
            text.push_str("   SEP (Vendor ID PMCSIERA, Model SRC 8x6G) 250\n      Device Number: 250\n");
        }
        text
    }

    #[test]
    fn test_row_count_from_multi_controller_text() {
        let layout = [(2, 2, 1), (0, 0, 0), (1, 0, 3), (3, 0, 0)];
        let snapshot = parse(&render_layout(&layout));

        assert_eq!(snapshot.controllers.len(), 4);
        assert_eq!(snapshot.physical_drives.len(), 2 * 2 + 1 + 3);
        // drives + logical drives without drives + bare controllers
        assert_eq!(flatten(&snapshot).len(), 8 + (1 + 3) + 1);

        for pd in &snapshot.physical_drives {
            let ctrl = snapshot.controller(pd.controller);
            assert!(ctrl.physical_drives.iter().any(|id| snapshot.physical_drive(*id) == pd));
        }
        let ld = snapshot.logical_index["0:2"];
        assert_eq!(snapshot.logical_drive(ld).member_keys().count(), 2);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = format!("{}{}", P410_ONE_ARRAY, UNASSIGNED_ONLY);
        assert_eq!(parse(&input), parse(&input));
    }

    #[test]
    fn test_empty_output_is_empty_snapshot() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn test_parse_lines_accepts_cleaned_input() {
        let lines = vec![
            "Smart,Array,P410,in,Slot,1",
            "Slot:,1",
            "Array:,A",
            "Logical,Drive:,1",
            "Status:,OK",
        ];
        let snapshot = parse_lines(&lines);
        assert_eq!(snapshot.logical_drives[0].status, "OK");
        assert!(snapshot.logical_index.contains_key("1:1"));
    }
}
