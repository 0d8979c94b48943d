use crate::cli::{ConfigCommands, ConfigSetArgs, OutputFormat};
use crate::config::{Config, Context};
use crate::exit_codes;
use crate::output::{print_info, print_json, print_yaml};
use anyhow::Result;
use serde::Serialize;

/// Effective settings as shown to the user. Passwords never leave masked.
#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    base_url: String,
    email: Option<String>,
    password: Option<&'static str>,
    invalid_email: String,
}

pub fn handle(ctx: &Context, command: ConfigCommands) -> Result<i32> {
    match command {
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigCommands::Show => show(ctx)?,
        ConfigCommands::Set(args) => set(args)?,
    }
    Ok(exit_codes::SUCCESS)
}

fn show(ctx: &Context) -> Result<()> {
    let credentials = ctx.credentials().ok();
    let view = ConfigView {
        path: Config::path()?.display().to_string(),
        base_url: ctx.base_url(),
        email: credentials.as_ref().map(|c| c.email.clone()),
        password: credentials.as_ref().map(|_| "********"),
        invalid_email: ctx.invalid_credentials().email,
    };

    match ctx.output_format() {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Yaml => print_yaml(&view),
        OutputFormat::Table => {
            println!("Config file:   {}", view.path);
            println!("Base URL:      {}", view.base_url);
            match &view.email {
                Some(email) => println!("Email:         {}", email),
                None => print_info("No credentials configured"),
            }
            println!("Invalid email: {}", view.invalid_email);
            Ok(())
        }
    }
}

fn set(args: ConfigSetArgs) -> Result<()> {
    let mut config = Config::load()?;
    if !apply(&mut config, args) {
        print_info("Nothing to change");
        return Ok(());
    }
    config.save()?;
    print_info(&format!("Saved {}", Config::path()?.display()));
    Ok(())
}

/// Copy the given values into `config`. Returns whether anything changed.
fn apply(config: &mut Config, args: ConfigSetArgs) -> bool {
    let ConfigSetArgs {
        url,
        email,
        password,
        invalid_email,
        invalid_password,
    } = args;

    let mut changed = false;
    if let Some(url) = url {
        config.base_url = url;
        changed = true;
    }
    changed |= store(&mut config.email, email);
    changed |= store(&mut config.password, password);
    changed |= store(&mut config.invalid_email, invalid_email);
    changed |= store(&mut config.invalid_password, invalid_password);
    changed
}

fn store(slot: &mut Option<String>, value: Option<String>) -> bool {
    match value {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}
