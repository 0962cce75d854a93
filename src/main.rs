mod cli;
mod commands;
mod config;
mod progress;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use configapi::Environment;
use restkit::{Client, UreqTransport};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub config: config::Config,
}

impl Context {
    /// Connect to the configured environment
    pub fn environment(&self) -> Result<Environment> {
        let url = self.config.url()?;
        let credentials = self.config.credentials()?;
        let client = match self.config.timeout() {
            Some(timeout) => Client::with_transport(
                url,
                credentials,
                Box::new(UreqTransport::with_timeout(timeout)),
            ),
            None => Client::new(url, credentials),
        };
        log::debug!("Using environment {}", client.base_url());
        Ok(Environment::with_client(client))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let config = config::Config::load()?.with_overrides(cli.url, cli.token, |key| {
        std::env::var(key).ok()
    });

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config,
    };
    log::trace!("Verbosity {}", ctx.verbose);

    let result = match cli.command {
        Command::List(args) => commands::entity::list(&ctx, args),
        Command::Get(args) => commands::entity::get(&ctx, args),
        Command::Create(args) => commands::entity::create(&ctx, args.kind, &args.input),
        Command::Update(args) => commands::entity::update(&ctx, args),
        Command::Delete(args) => commands::entity::delete(&ctx, args),
        Command::Schema { kind } => commands::entity::schema(kind),
        Command::Export { kind, id } => commands::entity::export(&ctx, kind, &id),
        Command::Diff(args) => commands::entity::diff(&ctx, args),
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cfgctl", &mut io::stdout());
            Ok(())
        }
        Command::Config(cmd) => commands::config::run(&ctx, cmd),
    };

    if let Err(err) = &result {
        if let Some(api_err) = err.downcast_ref::<configapi::Error>() {
            eprintln!("hint: {}", api_err.category().advice());
        }
    }
    result
}
