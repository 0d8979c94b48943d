use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "petfriends")]
#[command(author, version, about = "Client for the PetFriends pet catalog API")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Override the service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Use this auth key instead of exchanging the configured credentials
    #[arg(long, global = true, env = "PETFRIENDS_AUTH_KEY")]
    pub auth_key: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, env = "PETFRIENDS_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Verbose output (request/response logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Exchange email and password for an auth key
    Key(KeyArgs),

    /// List pets
    List {
        /// "" for all pets, "my_pets" for your own
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Add a pet with a photo
    Add {
        #[command(flatten)]
        pet: PetArgs,

        /// Path to the photo file
        #[arg(long)]
        photo: PathBuf,
    },

    /// Add a pet without a photo
    AddSimple {
        #[command(flatten)]
        pet: PetArgs,
    },

    /// Upload a photo for an existing pet
    Photo {
        pet_id: String,
        path: PathBuf,
    },

    /// Update a pet's name, type, or age
    Update {
        pet_id: String,

        #[command(flatten)]
        pet: PetArgs,
    },

    /// Delete a pet
    Delete { pet_id: String },

    /// Configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Clone)]
pub struct KeyArgs {
    /// Email (defaults to the configured one)
    #[arg(long)]
    pub email: Option<String>,

    /// Password (defaults to the configured one)
    #[arg(long)]
    pub password: Option<String>,
}

/// Pet fields. Omitted flags are left out of the request.
#[derive(Args, Clone, Debug, Default)]
pub struct PetArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub animal_type: Option<String>,

    /// Sent as text; the service decides whether it is a valid age
    #[arg(long)]
    pub age: Option<String>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration (secrets masked)
    Show,

    /// Store values in the config file
    Set(ConfigSetArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigSetArgs {
    /// Service base URL
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Email the service should refuse
    #[arg(long)]
    pub invalid_email: Option<String>,

    #[arg(long)]
    pub invalid_password: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}
