//! Command handlers for the `petfriends` binary.

pub mod config;
pub mod key;
pub mod pets;

use crate::cli::PetArgs;
use crate::client::PetFriends;
use crate::config::Context;
use crate::types::{AuthKey, PetForm};
use anyhow::Result;
use tracing::debug;

/// Key for authenticated commands: `--auth-key` if given, otherwise the
/// configured credentials are exchanged for one.
pub async fn resolve_auth_key(ctx: &Context, client: &PetFriends) -> Result<AuthKey> {
    if let Some(key) = ctx.auth_key() {
        debug!("using auth key from command line");
        return Ok(key);
    }
    let credentials = ctx.credentials()?;
    debug!("exchanging configured credentials for an auth key");
    Ok(client.obtain_key(&credentials).await?)
}

impl From<PetArgs> for PetForm {
    fn from(args: PetArgs) -> Self {
        Self {
            name: args.name,
            animal_type: args.animal_type,
            age: args.age,
        }
    }
}
