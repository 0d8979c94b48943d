use crate::cli::KeyArgs;
use crate::client::PetFriends;
use crate::config::Context;
use crate::exit_codes;
use crate::output::print_response;
use crate::types::Credentials;
use anyhow::Result;

/// Exchange credentials for an auth key and print the raw response.
///
/// Flags win over configuration; a flag for only one half of the pair is
/// completed from configuration.
pub async fn execute(ctx: &Context, args: KeyArgs) -> Result<i32> {
    let credentials = match (args.email, args.password) {
        (Some(email), Some(password)) => Credentials::new(email, password),
        (email, password) => {
            let configured = ctx.credentials()?;
            Credentials::new(
                email.unwrap_or(configured.email),
                password.unwrap_or(configured.password),
            )
        }
    };

    let client = PetFriends::new(ctx)?;
    let response = client
        .get_api_key(&credentials.email, &credentials.password)
        .await?;

    print_response(ctx.output_format(), &response)?;
    Ok(exit_codes::from_status(response.status))
}
