//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::default_log_path;
use crate::settings::default_config_path;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - a minimalistic desktop Pomodoro timer
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-timer",
    version,
    about = "Minimalistic desktop Pomodoro timer",
    long_about = "A borderless, always-on-top countdown window with an LED-style display.\n\
                  Keys: s start/pause, r reset, e set duration, c settings, \
                  a always-on-top, arrows move (Shift for 1px steps).",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH", value_parser = validate_path)]
    pub config: Option<PathBuf>,

    /// Log file to append to instead of the default location
    #[arg(long, global = true, value_name = "PATH", value_parser = validate_path)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging and mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Settings file path after applying `--config`.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Log file path after applying `--log-file`.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the timer window
    Run,

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// `config` subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective settings in settings file format
    Show,

    /// Print the settings file location
    Path,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates a path argument.
///
/// - Must not be empty or whitespace
fn validate_path(s: &str) -> Result<PathBuf, String> {
    if s.trim().is_empty() {
        return Err("path must not be empty".to_string());
    }
    Ok(PathBuf::from(s))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_verify_command() {
            Cli::command().debug_assert();
        }

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["pomodoro-timer"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(cli.config.is_none());
            assert!(cli.log_file.is_none());
        }

        #[test]
        fn test_parse_short_verbose_flag() {
            let cli = Cli::parse_from(["pomodoro-timer", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_run_command() {
            let cli = Cli::parse_from(["pomodoro-timer", "run"]);
            assert_eq!(cli.command, Some(Commands::Run));
        }

        #[test]
        fn test_parse_paths() {
            let cli = Cli::parse_from([
                "pomodoro-timer",
                "--config",
                "/tmp/pomodoro.ini",
                "--log-file",
                "/tmp/pomodoro.log",
            ]);
            assert_eq!(cli.config_path(), PathBuf::from("/tmp/pomodoro.ini"));
            assert_eq!(cli.log_path(), PathBuf::from("/tmp/pomodoro.log"));
        }

        #[test]
        fn test_global_args_after_subcommand() {
            let cli = Cli::parse_from(["pomodoro-timer", "run", "--verbose", "--config", "a.ini"]);
            assert!(cli.verbose);
            assert_eq!(cli.config, Some(PathBuf::from("a.ini")));
        }

        #[test]
        fn test_default_paths() {
            let cli = Cli::parse_from(["pomodoro-timer"]);
            assert_eq!(cli.config_path(), default_config_path());
            assert_eq!(cli.log_path(), default_log_path());
        }

        #[test]
        fn test_empty_path_rejected() {
            let result = Cli::try_parse_from(["pomodoro-timer", "--config", ""]);
            assert!(result.is_err());
        }

        #[test]
        fn test_unknown_command_rejected() {
            let result = Cli::try_parse_from(["pomodoro-timer", "start"]);
            assert!(result.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Subcommand Tests
    // ------------------------------------------------------------------------

    mod subcommand_tests {
        use super::*;

        #[test]
        fn test_parse_config_show() {
            let cli = Cli::parse_from(["pomodoro-timer", "config", "show"]);
            assert_eq!(
                cli.command,
                Some(Commands::Config {
                    command: ConfigCommand::Show
                })
            );
        }

        #[test]
        fn test_parse_config_path() {
            let cli = Cli::parse_from(["pomodoro-timer", "config", "path"]);
            assert_eq!(
                cli.command,
                Some(Commands::Config {
                    command: ConfigCommand::Path
                })
            );
        }

        #[test]
        fn test_config_requires_subcommand() {
            assert!(Cli::try_parse_from(["pomodoro-timer", "config"]).is_err());
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["pomodoro-timer", "completions", "zsh"]);
            assert_eq!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Zsh
                })
            );
        }

        #[test]
        fn test_completions_rejects_unknown_shell() {
            assert!(Cli::try_parse_from(["pomodoro-timer", "completions", "tcsh"]).is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Validation Tests
    // ------------------------------------------------------------------------

    mod validation_tests {
        use super::*;

        #[test]
        fn test_validate_path() {
            assert_eq!(validate_path("x.ini"), Ok(PathBuf::from("x.ini")));
            assert!(validate_path("   ").is_err());
        }
    }
}
