//! Command execution context

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::Cli;
use crate::model::Config;
use crate::registry::ItemRegistry;
use crate::remote::GistClient;
use crate::store::LocalStore;

/// Common context for command execution
pub struct Context {
    pub config: Config,
    pub store: LocalStore,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = crate::config::load_config(cli.config.as_deref())?;
        let store = LocalStore::resolve(cli.data_dir.as_deref(), &config)?;
        Ok(Self { config, store })
    }

    pub fn registry(&self) -> ItemRegistry<'_> {
        ItemRegistry::new(&self.store)
    }

    /// Gist client authenticated with the stored credentials
    pub fn gist_client(&self) -> Result<GistClient> {
        let auth = self.store.auth()?;
        Ok(GistClient::new(&self.config.remote, &auth))
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print aligned `key  value` rows
    pub fn print_key_values(&self, rows: &[(String, String)]) {
        let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        for (key, value) in rows {
            let padded = format!("{:width$}", key, width = width);
            println!("{}  {}", padded.cyan(), value.dimmed());
        }
    }

    /// Hint shown after items change
    pub fn print_restart_hint(&self, what: &str) {
        println!(
            "{} {}",
            "→".cyan(),
            format!(
                "Remember that you have to restart your shell in order to use this {}",
                what
            )
            .dimmed()
        );
    }
}
