mod backup;
mod config_cmd;
mod content;
mod snapshot;
mod sync_cmd;
mod user_cmd;

pub use backup::BackupCommand;
pub use config_cmd::ConfigCommand;
pub use content::{ShowCommand, StatusCommand};
pub use snapshot::{ExportCommand, ImportCommand};
pub use sync_cmd::SyncCommand;
pub use user_cmd::UserCommand;
