use crate::cli::{RaidCommands, SourceArgs};
use crate::output::{output_data, print_info, print_success, print_warning};
use crate::raid::{
    collect_snapshot, get_hostname, post_report, render_csv, CsvRecord, RaidReport, ToolConfig,
};

fn load_report(source: &SourceArgs) -> Result<RaidReport, Box<dyn std::error::Error>> {
    let config = ToolConfig {
        path: source.tool.clone(),
        timeout_secs: source.timeout,
    };
    let snapshot = collect_snapshot(&config, source.input.as_deref())?;
    if snapshot.is_empty() {
        print_warning("no Smart Array controllers found");
    }
    Ok(RaidReport::new(&get_hostname(), snapshot))
}

fn print_pretty(report: &RaidReport) {
    let snapshot = &report.snapshot;
    print_info(&format!(
        "{}: {} controller(s), {} logical drive(s), {} physical drive(s)",
        report.hostname,
        snapshot.controllers.len(),
        snapshot.logical_drives.len(),
        snapshot.physical_drives.len()
    ));
    for row in &report.rows {
        println!();
        if let Some(id) = row.controller {
            println!("  controller: {}", snapshot.controller(id).name_values());
        }
        if let Some(id) = row.logical {
            let ld = snapshot.logical_drive(id);
            println!(
                "  logical:    {} ({} member drive(s))",
                ld.name_values(),
                ld.member_keys().count()
            );
        }
        if let Some(id) = row.physical {
            println!("  physical:   {}", snapshot.physical_drive(id).name_values());
        }
    }
}

pub fn handle_raid_command(cmd: &RaidCommands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        RaidCommands::Show { format, source } => {
            let report = load_report(source)?;
            match format.as_str() {
                "pretty" => print_pretty(&report),
                _ => output_data(&report, format)?,
            }
        }
        RaidCommands::Csv { box_name, source } => {
            let report = load_report(source)?;
            let box_name = box_name.clone().unwrap_or_else(|| report.hostname.clone());
            print!("{}", render_csv(&report.snapshot, &box_name));
        }
        RaidCommands::PostInventory { url, source } => {
            let report = load_report(source)?;

            print_info(&format!("Posting RAID inventory to: {}", url));
            let result = post_report(url, &report)?;
            print_success("RAID inventory posted");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
