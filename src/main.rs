//! shprof - Shell Profiler

use clap::Parser;
use colored::Colorize;

use shprof::cli::{actions, Cli, Commands, Context};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "✗".red(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(&cli)?;
    log::debug!("using profile data at {}", ctx.store.dir().display());

    match cli.command {
        Commands::Init(args) => actions::init::execute(&ctx, args),
        Commands::Stat => actions::stat::execute(&ctx),
        Commands::Ls { target } => actions::list::execute(&ctx, target),
        Commands::Set { set_command } => actions::set::execute(&ctx, set_command),
        Commands::Del(args) => actions::delete::execute(&ctx, args),
        Commands::Push => actions::push::execute(&ctx),
        Commands::Export { output } => actions::export::execute(&ctx, &output),
    }
}
