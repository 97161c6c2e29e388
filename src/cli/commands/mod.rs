pub mod config;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    entries.extend(transaction::definitions());
    entries.extend(report::definitions());
    entries.extend(config::definitions());
    entries.extend(system::definitions());
    entries
}
