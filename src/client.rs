use crate::config::Context;
use crate::error::CliError;
use crate::photo::{self, PHOTO_FIELD};
use crate::response::{ApiResponse, Body};
use crate::types::{AuthKey, Credentials, PetForm};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use std::path::Path;
use tracing::debug;

/// Header carrying the key on every authenticated call.
pub const AUTH_HEADER: &str = "auth_key";

/// Client for the PetFriends REST API.
///
/// Every operation returns the raw status and best-effort parsed body. A
/// 403 or 500 from the service is an `Ok` response; only failures that
/// never produced a status (network, unreadable photo) are `Err`.
pub struct PetFriends {
    client: Client,
    base_url: String,
}

impl PetFriends {
    pub fn new(ctx: &Context) -> Result<Self, CliError> {
        Self::with_base_url(&ctx.base_url())
    }

    /// Create a client with an explicit base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Result<Self, CliError> {
        // No request timeout beyond reqwest's defaults.
        let client = Client::builder()
            .user_agent(user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/key` with the credentials in the `email` and `password`
    /// headers. The service answers 200 with `{"key": ...}` or 403.
    pub async fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .get(self.url("/api/key"))
            .header("email", email)
            .header("password", password);

        self.execute(request).await
    }

    /// Exchange credentials for a key, failing unless the service says 200.
    pub async fn obtain_key(&self, credentials: &Credentials) -> Result<AuthKey, CliError> {
        let response = self
            .get_api_key(&credentials.email, &credentials.password)
            .await?;
        if !response.is_success() {
            return Err(CliError::AuthFailed(response.status));
        }
        response.auth_key()
    }

    /// `GET /api/pets?filter=...`. The service understands `""` and
    /// `"my_pets"`; anything else is passed through for it to reject.
    pub async fn get_list_of_pets(
        &self,
        auth_key: &AuthKey,
        filter: &str,
    ) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .get(self.url("/api/pets"))
            .header(AUTH_HEADER, auth_key.key.as_str())
            .query(&[("filter", filter)]);

        self.execute(request).await
    }

    /// `POST /api/pets` as multipart: the form's text fields plus the photo.
    pub async fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        pet: &PetForm,
        photo_path: &Path,
    ) -> Result<ApiResponse, CliError> {
        let photo = photo::load_part(photo_path).await?;
        let form = text_fields(pet).part(PHOTO_FIELD, photo);

        let request = self
            .client
            .post(self.url("/api/pets"))
            .header(AUTH_HEADER, auth_key.key.as_str())
            .multipart(form);

        self.execute(request).await
    }

    /// `POST /api/create_pet_simple` as a urlencoded form. The created pet
    /// has an empty `pet_photo`.
    pub async fn add_new_pet_without_photo(
        &self,
        auth_key: &AuthKey,
        pet: &PetForm,
    ) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .post(self.url("/api/create_pet_simple"))
            .header(AUTH_HEADER, auth_key.key.as_str())
            .form(pet);

        self.execute(request).await
    }

    /// `POST /api/pets/set_photo/{pet_id}` with only the photo part.
    pub async fn add_pet_photo(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse, CliError> {
        let photo = photo::load_part(photo_path).await?;
        let form = Form::new().part(PHOTO_FIELD, photo);

        let request = self
            .client
            .post(self.url(&format!("/api/pets/set_photo/{}", pet_id)))
            .header(AUTH_HEADER, auth_key.key.as_str())
            .multipart(form);

        self.execute(request).await
    }

    /// `PUT /api/pets/{pet_id}` as a urlencoded form.
    pub async fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        pet: &PetForm,
    ) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .put(self.url(&format!("/api/pets/{}", pet_id)))
            .header(AUTH_HEADER, auth_key.key.as_str())
            .form(pet);

        self.execute(request).await
    }

    /// `DELETE /api/pets/{pet_id}`.
    pub async fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse, CliError> {
        let request = self
            .client
            .delete(self.url(&format!("/api/pets/{}", pet_id)))
            .header(AUTH_HEADER, auth_key.key.as_str());

        self.execute(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, CliError> {
        let request = request.build()?;
        debug!(method = %request.method(), path = request.url().path(), "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;
        debug!(status, bytes = raw.len(), "received response");

        Ok(ApiResponse::new(status, Body::from_text(raw)))
    }
}

/// `petfriends-cli/<version> (<os>; <arch>)`
fn user_agent() -> String {
    format!(
        "{}/{} ({}; {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

fn text_fields(pet: &PetForm) -> Form {
    pet.fields()
        .fold(Form::new(), |form, (name, value)| form.text(name, value.to_string()))
}
