// Smart Array controller inventory: hpacucli output to snapshot to CSV rows
pub mod types;
pub mod tokenizer;
pub mod mode;
pub mod labels;
pub mod builder;
pub mod parser;
pub mod flatten;
pub mod csv;
pub mod collector;

// Re-export main entry points
pub use collector::{collect_snapshot, get_hostname, post_report, RaidReport, ToolConfig};
pub use csv::{render_csv, CsvRecord};
