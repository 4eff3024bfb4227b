pub mod raid;

pub use raid::handle_raid_command;
