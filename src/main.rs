use anyhow::Result;
use clap::Parser;
use petfriends_cli::cli::{Cli, Commands};
use petfriends_cli::commands;
use petfriends_cli::config;
use petfriends_cli::exit_codes;
use petfriends_cli::output::print_error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("Error: {}", e));
            exit_codes::from_error(&e)
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Logs go to stderr so stdout stays parseable in json/yaml mode.
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let mut ctx = config::Context::load()?;
    if let Some(url) = cli.base_url {
        ctx.override_base_url(url);
    }
    if let Some(key) = cli.auth_key {
        ctx.override_auth_key(key);
    }
    if let Some(format) = cli.format {
        ctx.set_format(format);
    }
    tracing::debug!(base_url = %ctx.base_url(), "loaded configuration");

    match cli.command {
        Commands::Key(args) => commands::key::execute(&ctx, args).await,
        Commands::List { filter } => commands::pets::list(&ctx, &filter).await,
        Commands::Add { pet, photo } => commands::pets::add(&ctx, pet, &photo).await,
        Commands::AddSimple { pet } => commands::pets::add_simple(&ctx, pet).await,
        Commands::Photo { pet_id, path } => commands::pets::photo(&ctx, &pet_id, &path).await,
        Commands::Update { pet_id, pet } => commands::pets::update(&ctx, &pet_id, pet).await,
        Commands::Delete { pet_id } => commands::pets::delete(&ctx, &pet_id).await,
        Commands::Config(command) => commands::config::handle(&ctx, command),
    }
}
