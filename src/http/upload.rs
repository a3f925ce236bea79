//! Image upload endpoint.

use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use futures_util::TryStreamExt;
use serde_json::json;

use crate::config::Settings;
use crate::error::ApiError;
use crate::session::AdminUser;
use crate::upload;

/// POST /api/upload: stores the `file` part and returns the stored name.
///
/// Composing the `image_path` and attaching it to a game is a separate
/// update call made by the client; the two steps are not a transaction.
#[post("/upload")]
pub async fn upload_image(
    _admin: AdminUser,
    mut payload: Multipart,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, ApiError> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != "file" {
            continue;
        }

        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_owned);
        let filename = match filename {
            Some(f) if !f.is_empty() => f,
            _ => return Err(ApiError::Validation("empty filename".into())),
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
        }

        let stored = upload::store_file(&settings.upload_dir, &filename, &data).await?;
        log::info!("stored upload {stored} ({} bytes)", data.len());
        return Ok(HttpResponse::Ok().json(json!({ "filename": stored })));
    }

    Err(ApiError::Validation("no file".into()))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_image);
}
