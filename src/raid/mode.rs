use crate::raid::tokenizer::field;

/// Which entity the following `label: value` lines describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    NotStarted,
    Controller,
    Logical,
    Physical,
    /// Past the `unassigned` marker; labels still describe the controller
    Unassigned,
    Finished,
}

/// A line that changes structure rather than carrying a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `Smart Array P410 in Slot 1`
    ControllerHeader { hw_type: String },
    /// `SEP (Vendor ID ...)`, the enclosure processor closing a controller
    End,
    /// `Array: A`
    ArrayHeader { name: String },
    /// `unassigned`
    Unassigned,
    /// Long form `physicaldrive 1I:1:1`
    PhysicalDrive { port: String },
}

impl Marker {
    /// Recognise a marker on a cleaned (comma-separated) line. Checked in
    /// priority order; anything else is a label line.
    pub fn detect(line: &str, tokens: &[String]) -> Option<Marker> {
        if line.starts_with("Smart,Array,") {
            let hw_type = line.split(',').nth(2).unwrap_or("").to_string();
            return Some(Marker::ControllerHeader { hw_type });
        }
        if line.starts_with("SEP,") {
            return Some(Marker::End);
        }
        if line.starts_with("Array:,") {
            return Some(Marker::ArrayHeader {
                name: field(tokens, 1).to_string(),
            });
        }
        if line.starts_with("unassigned") {
            return Some(Marker::Unassigned);
        }
        // Short summary lines carry a parenthesised description and would
        // count every drive twice.
        if line.starts_with("physicaldrive,") && !line.contains('(') {
            let port = line.split(',').nth(1).unwrap_or("").to_string();
            return Some(Marker::PhysicalDrive { port });
        }
        None
    }
}

impl Mode {
    /// Mode after `marker`, or `None` when the marker is ignored.
    ///
    /// `Finished` only gives way to a new controller header: multi
    /// controller output closes each controller with its own `SEP` line.
    pub fn transition(self, marker: &Marker) -> Option<Mode> {
        match (self, marker) {
            (_, Marker::ControllerHeader { .. }) => Some(Mode::Controller),
            (Mode::Finished, _) => None,
            (_, Marker::End) => Some(Mode::Finished),
            (_, Marker::ArrayHeader { .. }) => Some(Mode::Logical),
            (_, Marker::Unassigned) => Some(Mode::Unassigned),
            (_, Marker::PhysicalDrive { .. }) => Some(Mode::Physical),
        }
    }

    /// Whether label lines are read in this mode at all.
    pub fn reads_labels(self) -> bool {
        !matches!(self, Mode::NotStarted | Mode::Finished)
    }
}
