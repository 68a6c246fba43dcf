//! Server list command-line front end
//!
//! Argument parsing and command handlers for the `serverlist` binary. The
//! binary only installs logging and calls [`run`]; everything else lives
//! here so it can be driven from tests.
//!
//! # Configuration Sources
//!
//! - CLI arguments (`--game-dir`, `--file`, `--compression`)
//! - Environment variables (`SERVERLIST_GAME_DIR`, `SERVERLIST_FILE`,
//!   `SERVERLIST_COMPRESSION`)
//! - Default values (current directory, `servers.dat`, uncompressed)

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serverlist_formats::nbt::{Compression, decode};
use serverlist_formats::servers::ServerEntry;
use serverlist_store::{ServerListConfig, ServerListEditor};
use std::io::Write;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "serverlist",
    about = "Edit the multiplayer server list of a game installation",
    version
)]
pub struct Cli {
    /// Game directory containing the server list
    #[arg(long, env = "SERVERLIST_GAME_DIR", default_value = ".", global = true)]
    pub game_dir: PathBuf,

    /// Server list file name inside the game directory
    #[arg(long, env = "SERVERLIST_FILE", default_value = "servers.dat", global = true)]
    pub file: String,

    /// Envelope used when writing (none, gzip, zlib)
    #[arg(long, env = "SERVERLIST_COMPRESSION", default_value = "none", global = true)]
    pub compression: Compression,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Server list commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show saved servers in display order
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a server or rename the one with the same address
    Add {
        /// Name shown in the server browser
        name: String,

        /// Host with optional :port
        address: String,

        /// Accept server resource packs (omit to keep the client prompting)
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        accept_resource_pack: Option<bool>,
    },

    /// Remove every server with this address
    Remove {
        /// Exact address to remove
        address: String,
    },

    /// Print the raw decoded tree
    Dump,
}

impl Cli {
    /// Parse arguments from the process command line
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Store configuration for these arguments
    pub fn config(&self) -> ServerListConfig {
        ServerListConfig::new(&self.game_dir)
            .with_file_name(self.file.clone())
            .with_compression(self.compression)
    }

    /// Default log filter directive
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// One row of `list --json`
#[derive(Debug, Serialize)]
struct ListedServer<'a> {
    name: &'a str,
    address: &'a str,
    accept_resource_pack: Option<bool>,
    has_icon: bool,
}

impl<'a> From<&'a ServerEntry> for ListedServer<'a> {
    fn from(entry: &'a ServerEntry) -> Self {
        Self {
            name: &entry.name,
            address: &entry.address,
            accept_resource_pack: entry.accept_resource_pack,
            has_icon: entry.icon.is_some(),
        }
    }
}

const fn resource_pack_label(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "accept",
        Some(false) => "decline",
        None => "prompt",
    }
}

/// Run a parsed command, writing user-facing output to `out`
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let editor = ServerListEditor::new(cli.config());
    let path = editor.path();

    match &cli.command {
        Commands::List { json } => {
            let list = editor
                .list()
                .with_context(|| format!("failed to read {}", path.display()))?;
            if *json {
                let rows: Vec<ListedServer<'_>> = list.iter().map(ListedServer::from).collect();
                serde_json::to_writer_pretty(&mut *out, &rows)?;
                writeln!(out)?;
            } else {
                for entry in &list {
                    writeln!(
                        out,
                        "{}\t{}\t{}",
                        entry.name,
                        entry.address,
                        resource_pack_label(entry.accept_resource_pack)
                    )?;
                }
            }
        }
        Commands::Add {
            name,
            address,
            accept_resource_pack,
        } => {
            let mut entry = ServerEntry::new(name.as_str(), address.as_str());
            entry.accept_resource_pack = *accept_resource_pack;
            let list = editor
                .upsert(entry)
                .with_context(|| format!("failed to update {}", path.display()))?;
            writeln!(out, "Saved {name} ({address}), {} servers", list.len())?;
        }
        Commands::Remove { address } => {
            let removed = editor
                .remove(address)
                .with_context(|| format!("failed to update {}", path.display()))?;
            if removed {
                writeln!(out, "Removed {address}")?;
            } else {
                writeln!(out, "No server with address {address}")?;
            }
        }
        Commands::Dump => {
            let data = editor
                .read_bytes()
                .with_context(|| format!("failed to read {}", path.display()))?
                .with_context(|| format!("{} does not exist", path.display()))?;
            let tree = decode(&data).with_context(|| format!("failed to decode {}", path.display()))?;
            writeln!(out, "{tree}")?;
        }
    }

    Ok(())
}
