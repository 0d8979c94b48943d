//! Photo file loading for multipart uploads.

use crate::error::CliError;
use reqwest::multipart::Part;
use std::path::Path;

/// Form field the service reads the photo from.
pub const PHOTO_FIELD: &str = "pet_photo";

/// MIME type for a photo, inferred from its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Read `path` into a multipart part carrying its file name and MIME type.
pub async fn load_part(path: &Path) -> Result<Part, CliError> {
    let data = tokio::fs::read(path).await.map_err(|source| CliError::PhotoRead {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    let part = Part::bytes(data)
        .file_name(file_name)
        .mime_str(mime_for_path(path))?;
    Ok(part)
}
