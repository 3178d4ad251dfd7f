//! Command-line interface for memdoc.
//!
//! This module provides the CLI structure and command handlers for the
//! `memdoc` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AddCommand, ConfigCommand, DeleteCommand, ListCommand, UpdateCommand};

/// memdoc - Remember facts inside your markdown notes
///
/// Stores small structured memory records in a sentinel-bounded section of a
/// markdown document, and serves them to agent clients over a stdio tool
/// protocol.
#[derive(Debug, Parser)]
#[command(name = "memdoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the memory tools over stdio
    Serve,

    /// Store a new memory
    Add(AddCommand),

    /// Replace an existing memory's content
    Update(UpdateCommand),

    /// Remove a memory
    Delete(DeleteCommand),

    /// List stored memories
    List(ListCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "memdoc");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: Command::Serve,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        for (verbose, expected) in [
            (0, crate::logging::Verbosity::Normal),
            (1, crate::logging::Verbosity::Verbose),
            (2, crate::logging::Verbosity::Trace),
        ] {
            let cli = Cli {
                config: None,
                verbose,
                quiet: false,
                command: Command::Serve,
            };
            assert_eq!(cli.verbosity(), expected);
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["memdoc", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["memdoc", "add", "remember me"]).unwrap();
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.memory, "remember me");
                assert!(!cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update() {
        let cli =
            Cli::try_parse_from(["memdoc", "update", "1234567890123456", "new text"]).unwrap();
        match cli.command {
            Command::Update(cmd) => {
                assert_eq!(cmd.memory_id, "1234567890123456");
                assert_eq!(cmd.memory, "new text");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["memdoc", "delete", "1234567890123456"]).unwrap();
        assert!(matches!(cli.command, Command::Delete(_)));
    }

    #[test]
    fn test_parse_list_json() {
        let cli = Cli::try_parse_from(["memdoc", "list", "--json"]).unwrap();
        match cli.command {
            Command::List(cmd) => assert!(cmd.json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["memdoc", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_with_config_flag() {
        let cli = Cli::try_parse_from(["memdoc", "-c", "/custom/config.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["memdoc", "-vv", "serve"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
