use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::raid::flatten::{flatten, FlatRow};
use crate::raid::parser::parse;
use crate::raid::types::Snapshot;

pub const DEFAULT_TOOL: &str = "/usr/sbin/hpacucli";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
const SHOW_CONFIG_ARGS: [&str; 5] = ["ctrl", "all", "show", "config", "detail"];
const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");
const POST_TIMEOUT_SECS: u64 = 30;

/// Exit codes of coreutils `timeout`
const TIMEOUT_EXPIRED: i32 = 124;
const COMMAND_NOT_FOUND: i32 = 127;

/// How to reach the array CLI.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub path: String,
    pub timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            path: DEFAULT_TOOL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Snapshot plus the context a consumer needs to file it.
#[derive(Debug, Serialize)]
pub struct RaidReport {
    pub agent_version: String,
    pub hostname: String,
    pub collected_at: chrono::DateTime<chrono::Utc>,
    pub snapshot: Snapshot,
    pub rows: Vec<FlatRow>,
}

impl RaidReport {
    pub fn new(hostname: &str, snapshot: Snapshot) -> Self {
        let rows = flatten(&snapshot);
        RaidReport {
            agent_version: AGENT_VERSION.to_string(),
            hostname: hostname.to_string(),
            collected_at: chrono::Utc::now(),
            snapshot,
            rows,
        }
    }
}

/// Run `hpacucli ctrl all show config detail` under `timeout` and return
/// its stdout.
pub fn run_show_config(config: &ToolConfig) -> Result<String> {
    if config.path.contains('/') && !Path::new(&config.path).exists() {
        return Err(Error::ToolNotFound {
            path: config.path.clone(),
        });
    }

    debug!(tool = %config.path, timeout = config.timeout_secs, "running array tool");
    let output = Command::new("timeout")
        .arg(config.timeout_secs.to_string())
        .arg(&config.path)
        .args(SHOW_CONFIG_ARGS)
        .output()?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    check_exit(config, output.status.code(), stderr)?;

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Map the exit status of `timeout <tool>` to an error.
fn check_exit(config: &ToolConfig, code: Option<i32>, stderr: String) -> Result<()> {
    match code {
        Some(0) => Ok(()),
        Some(TIMEOUT_EXPIRED) => Err(Error::ToolTimeout {
            path: config.path.clone(),
            seconds: config.timeout_secs,
        }),
        Some(COMMAND_NOT_FOUND) => Err(Error::ToolNotFound {
            path: config.path.clone(),
        }),
        Some(code) => Err(Error::ToolFailed {
            path: config.path.clone(),
            code,
            stderr,
        }),
        // Killed by a signal
        None => Err(Error::ToolFailed {
            path: config.path.clone(),
            code: -1,
            stderr,
        }),
    }
}

/// Read previously captured tool output; `-` reads stdin.
pub fn read_captured(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse either captured output or a fresh tool run.
pub fn collect_snapshot(config: &ToolConfig, input: Option<&Path>) -> Result<Snapshot> {
    let text = match input {
        Some(path) => read_captured(path)?,
        None => run_show_config(config)?,
    };
    let snapshot = parse(&text);
    info!(
        controllers = snapshot.controllers.len(),
        logical_drives = snapshot.logical_drives.len(),
        physical_drives = snapshot.physical_drives.len(),
        "parsed array configuration"
    );
    Ok(snapshot)
}

pub fn get_hostname() -> String {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .unwrap_or_else(|_| "unknown".to_string())
        .trim()
        .to_string()
}

/// POST the report to `{base_url}/api/v1/servers/raid` and return the
/// server's JSON reply.
pub fn post_report(base_url: &str, report: &RaidReport) -> Result<serde_json::Value> {
    let api_url = format!("{}/api/v1/servers/raid", base_url.trim_end_matches('/'));
    info!(url = %api_url, rows = report.rows.len(), "posting raid report");

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(POST_TIMEOUT_SECS))
        .build()?;
    let response = client.post(&api_url).json(report).send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(Error::ApiRejected {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json()?)
}
