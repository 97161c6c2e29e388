use crate::cli::context::{usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config [<locale|currency|data_dir> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            for (key, value) in context.config.entries() {
                output::plain(format!("  {key:<9}: {value}"));
            }
            output::plain(format!("  file     : {}", context.config_manager.path().display()));
            Ok(())
        }
        [key, value] => {
            let mut updated = context.config.clone();
            updated.set(key, value)?;
            context.config_manager.save(&updated)?;
            let moved_store = updated.data_dir != context.config.data_dir;
            context.config = updated;
            output::success(format!("Set {key} = {value}"));
            if moved_store {
                output::info("The new data directory is used from the next session.");
            }
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}
