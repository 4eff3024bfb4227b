mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod raid;

use clap::Parser;
use cli::{Cli, Commands};
use commands::handle_raid_command;
use output::print_error;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_json);

    let result = match &cli.command {
        Commands::Raid(cmd) => handle_raid_command(cmd),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
