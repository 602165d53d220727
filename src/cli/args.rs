//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::ItemKind;

#[derive(Parser)]
#[command(name = "shprof")]
#[command(about = "Shell profiler - manage aliases and functions synced to GitHub gists")]
#[command(version)]
#[command(author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Profile data directory (default: ~/.shell_profiler)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reset local data, store credentials and pick or create a profile
    Init(InitArgs),

    /// Check that the local profile data is intact
    Stat,

    /// List aliases, functions or the profile in use
    #[command(visible_alias = "list")]
    Ls {
        /// What to list: alias|func|profile (a/f)
        target: ListTarget,
    },

    /// Add or update items, switch profile, or set credentials
    Set {
        #[command(subcommand)]
        set_command: SetCommands,
    },

    /// Delete aliases and/or functions by index
    #[command(visible_alias = "rm")]
    Del(DeleteArgs),

    /// Upload the local profile to its gist
    Push,

    /// Write the profile as a sourceable shell script
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
pub struct InitArgs {
    /// GitHub personal access token
    #[arg(long)]
    pub token: Option<String>,
    /// GitHub username
    #[arg(long)]
    pub username: Option<String>,
    /// Path to your bashrc file
    #[arg(long)]
    pub bashrc: Option<String>,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Delete aliases
    #[arg(short, long)]
    pub alias: bool,
    /// Delete functions
    #[arg(short, long)]
    pub func: bool,
    /// Index or comma separated indices; prompts when omitted
    #[arg(short, long)]
    pub select: Option<String>,
}

impl DeleteArgs {
    /// Requested kinds, aliases first
    pub fn kinds(&self) -> Vec<ItemKind> {
        let mut kinds = Vec::new();
        if self.alias {
            kinds.push(ItemKind::Alias);
        }
        if self.func {
            kinds.push(ItemKind::Function);
        }
        kinds
    }
}

#[derive(Subcommand)]
pub enum SetCommands {
    /// Add or update an alias
    #[command(visible_alias = "a")]
    Alias(ItemArgs),
    /// Add or update a function
    #[command(visible_alias = "f")]
    Func(ItemArgs),
    /// Choose the profile to use from your gists
    Profile,
    /// Set the GitHub access token
    Token { value: String },
    /// Set the GitHub username
    Username { value: String },
}

/// Item fields; missing ones are prompted for
#[derive(Args, Default)]
pub struct ItemArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
    #[arg(long)]
    pub body: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListTarget {
    #[value(alias = "a")]
    Alias,
    #[value(aliases = ["f", "function"])]
    Func,
    Profile,
}
