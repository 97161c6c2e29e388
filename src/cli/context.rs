use std::{io, path::PathBuf};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    cli::{commands, io as cli_io, output, registry::CommandEntry, registry::CommandRegistry},
    config::{Config, ConfigManager},
    core::{
        clock::{Clock, SystemClock},
        registry::CategoryRegistry,
    },
    currency::FormatSettings,
    errors::{CliError, TrackerError},
    storage::{JsonFileStore, LocalTransactionStore, TransactionStore},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Everything a command handler can touch during one shell session.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LocalTransactionStore<JsonFileStore>,
    pub categories: CategoryRegistry,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub clock: Box<dyn Clock>,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::open(mode, ConfigManager::new()?, Box::new(SystemClock))
    }

    /// Opens a session rooted at `base` instead of the user's data directory.
    pub fn with_base_dir(
        mode: CliMode,
        base: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        Self::open(mode, ConfigManager::with_base_dir(base)?, clock)
    }

    fn open(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store_dir = config.store_dir(config_manager.base());
        debug!(path = %store_dir.display(), "opening store");

        let mut backend = JsonFileStore::new(store_dir)?;
        let categories = CategoryRegistry::load_or_seed(&mut backend)?;
        let store = LocalTransactionStore::open(backend)?;

        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }

        Ok(Self {
            mode,
            registry,
            store,
            categories,
            config,
            config_manager,
            clock,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn format_settings(&self) -> FormatSettings {
        self.config.format_settings()
    }

    pub fn prompt(&self) -> String {
        format!("expense-tracker ({}) > ", self.store.list().len())
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and runs a single shell line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        let control = self.dispatch(&raw.to_lowercase(), raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &lowered), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    /// Script mode never blocks on a prompt and takes the affirmative answer.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{input}` (use YYYY-MM-DD)"))
    })
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::{tempdir, TempDir};

    fn session() -> (TempDir, ShellContext) {
        let dir = tempdir().unwrap();
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap());
        let context =
            ShellContext::with_base_dir(CliMode::Script, dir.path().to_path_buf(), Box::new(clock))
                .unwrap();
        (dir, context)
    }

    #[test]
    fn unknown_commands_keep_the_loop_running() {
        let (_dir, mut context) = session();
        assert_eq!(context.process_line("sumary").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("   ").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn exit_stops_the_session() {
        let (_dir, mut context) = session();
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn add_defaults_to_today_and_persists() {
        let (dir, mut context) = session();
        context
            .process_line(r#"add expense 12.50 "Food & Dining" "Lunch out""#)
            .unwrap();
        let stored = context.store.list();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let reopened = ShellContext::with_base_dir(
            CliMode::Script,
            dir.path().to_path_buf(),
            Box::new(SystemClock),
        )
        .unwrap();
        assert_eq!(reopened.store.list(), stored);
    }

    #[test]
    fn bad_arguments_are_reported_as_invalid() {
        let (_dir, mut context) = session();
        let err = context.process_line("add expense abc Food lunch").unwrap_err();
        assert!(matches!(err, CommandError::Core(TrackerError::InvalidAmount(_))));
        let err = context.process_line("remove").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn date_parsing_requires_iso_format() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("02/29/2024").is_err());
    }
}
