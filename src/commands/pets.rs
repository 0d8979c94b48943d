use crate::cli::PetArgs;
use crate::client::PetFriends;
use crate::commands::resolve_auth_key;
use crate::config::Context;
use crate::exit_codes;
use crate::output::{print_pet_list, print_response};
use crate::response::ApiResponse;
use crate::types::PetForm;
use anyhow::Result;
use std::path::Path;

pub async fn list(ctx: &Context, filter: &str) -> Result<i32> {
    let client = PetFriends::new(ctx)?;
    let key = resolve_auth_key(ctx, &client).await?;

    let response = client.get_list_of_pets(&key, filter).await?;

    print_pet_list(ctx.output_format(), &response)?;
    Ok(exit_codes::from_status(response.status))
}

pub async fn add(ctx: &Context, pet: PetArgs, photo: &Path) -> Result<i32> {
    let client = PetFriends::new(ctx)?;
    let key = resolve_auth_key(ctx, &client).await?;

    let response = client.add_new_pet(&key, &PetForm::from(pet), photo).await?;
    finish(ctx, &response)
}

pub async fn add_simple(ctx: &Context, pet: PetArgs) -> Result<i32> {
    let client = PetFriends::new(ctx)?;
    let key = resolve_auth_key(ctx, &client).await?;

    let response = client
        .add_new_pet_without_photo(&key, &PetForm::from(pet))
        .await?;
    finish(ctx, &response)
}

pub async fn photo(ctx: &Context, pet_id: &str, path: &Path) -> Result<i32> {
    let client = PetFriends::new(ctx)?;
    let key = resolve_auth_key(ctx, &client).await?;

    let response = client.add_pet_photo(&key, pet_id, path).await?;
    finish(ctx, &response)
}

pub async fn update(ctx: &Context, pet_id: &str, pet: PetArgs) -> Result<i32> {
    let client = PetFriends::new(ctx)?;
    let key = resolve_auth_key(ctx, &client).await?;

    let response = client
        .update_pet_info(&key, pet_id, &PetForm::from(pet))
        .await?;
    finish(ctx, &response)
}

pub async fn delete(ctx: &Context, pet_id: &str) -> Result<i32> {
    let client = PetFriends::new(ctx)?;
    let key = resolve_auth_key(ctx, &client).await?;

    let response = client.delete_pet(&key, pet_id).await?;
    finish(ctx, &response)
}

fn finish(ctx: &Context, response: &ApiResponse) -> Result<i32> {
    print_response(ctx.output_format(), response)?;
    Ok(exit_codes::from_status(response.status))
}
