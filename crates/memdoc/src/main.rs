//! `memdoc` - CLI for the embedded memory store
//!
//! This binary drives the memory document directly through subcommands and
//! serves the same operations to agent clients over a stdio tool protocol.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use memdoc::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand, UpdateCommand,
};
use memdoc::{init_logging, Config, MemoryStore, ToolServer};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Serve => handle_serve(&config),
        Command::Add(cmd) => handle_add(&config, &cmd),
        Command::Update(cmd) => handle_update(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

/// Open the store; a failure here is fatal (there is no usable store).
fn open_store(config: &Config) -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::open(config.document_path())
        .context("failed to initialize the memory document")?;
    Ok(store.with_preview_chars(config.list.preview_chars))
}

fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    ToolServer::new(store).run()?;
    Ok(())
}

fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let outcome = store.insert(&cmd.memory)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.message);
        println!("Date:    {}", outcome.date);
        println!("Content: {}", outcome.content);
    }
    Ok(())
}

fn handle_update(config: &Config, cmd: &UpdateCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let outcome = store.update(&cmd.memory_id, &cmd.memory)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.message);
        println!("Old: {}", outcome.old_content);
        println!("New: {}", outcome.new_content);
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let outcome = store.delete(&cmd.memory_id)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.message);
        println!("Deleted: {}", outcome.deleted_content);
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let outcome = store.list()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.total == 0 {
        println!("No memories stored.");
    } else {
        println!("{} stored memories", outcome.total);
        println!("------------------");
        for memory in &outcome.memories {
            println!("{}  {}  {}", memory.memory_id, memory.date, memory.content);
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Document]");
                println!("  Path:          {}", config.document_path().display());
                println!();
                println!("[List]");
                println!("  Preview chars: {}", config.list.preview_chars);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
