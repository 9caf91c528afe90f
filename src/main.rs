//! Pomodoro Timer - a minimalistic desktop Pomodoro timer
//!
//! Opens a small borderless window counting down work and pause phases:
//! - 25 minutes of focused work
//! - 5 minutes of pause (0 disables the pause phase)
//! - Settings and window position are kept across runs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::error;

use pomodoro_timer::cli::{Cli, Commands, ConfigCommand, Display};
use pomodoro_timer::gui;
use pomodoro_timer::logging::{self, LogConfig};
use pomodoro_timer::settings::SettingsStore;

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli) {
        error!("{:#}", e);
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Executes the CLI command.
fn execute(cli: Cli) -> Result<()> {
    let store = SettingsStore::new(cli.config_path());

    match cli.command {
        None | Some(Commands::Run) => {
            // Held until the window closes so buffered log lines get flushed.
            let _guard = match logging::init(&LogConfig::new(cli.log_path(), cli.verbose)) {
                Ok(guard) => Some(guard),
                Err(e) => {
                    Display::show_error(&format!("{:#}", e));
                    None
                }
            };
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                config = %store.path().display(),
                "Pomodoro Timer starting"
            );

            let settings = store.load();
            gui::run(settings, store)?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommand::Show => {
                let settings = store.load();
                Display::show_settings(store.path(), &settings)?;
            }
            ConfigCommand::Path => Display::show_config_path(store.path()),
        },
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
