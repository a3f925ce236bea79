//! Catalog CRUD endpoints. Reads are anonymous; writes are admin-gated.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::{json, Map, Value};
use sqlx::PgPool;

use crate::db::game_repo;
use crate::error::ApiError;
use crate::session::AdminUser;

#[get("/games")]
pub async fn list_games(db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let games = game_repo::list(&db).await?;
    Ok(HttpResponse::Ok().json(games))
}

#[get("/games/{id}")]
pub async fn get_game(path: web::Path<i32>, db: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let game = game_repo::get(&db, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(game))
}

#[post("/games")]
pub async fn create_game(
    _admin: AdminUser,
    body: web::Json<Value>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let empty = Map::new();
    let data = body.as_object().unwrap_or(&empty);
    let fields = game_repo::fields_from_payload(data, false);

    let name = game_repo::text_field(&fields, "name");
    let description = game_repo::text_field(&fields, "description");
    let year = game_repo::int_field(&fields, "year");
    let (name, description, year) = match (name, description, year) {
        (Some(n), Some(d), Some(y)) if !n.is_empty() && !d.is_empty() && y != 0 => (n, d, y),
        _ => return Err(ApiError::Validation("fill all fields".into())),
    };

    let url = game_repo::text_field(&fields, "url");
    let image_path =
        game_repo::text_field(&fields, "image_path").unwrap_or(game_repo::DEFAULT_IMAGE_PATH);

    let game = game_repo::create(&db, name, description, year, url, image_path).await?;
    Ok(HttpResponse::Created().json(game))
}

/// Sparse patch: only keys present in the body are written.
#[put("/games/{id}")]
pub async fn update_game(
    _admin: AdminUser,
    path: web::Path<i32>,
    body: web::Json<Value>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let empty = Map::new();
    let data = body.as_object().unwrap_or(&empty);
    let fields = game_repo::fields_from_payload(data, true);
    if fields.is_empty() {
        return Err(ApiError::Validation("no changes".into()));
    }

    let game = game_repo::update(&db, path.into_inner(), fields)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(game))
}

#[delete("/games/{id}")]
pub async fn delete_game(
    _admin: AdminUser,
    path: web::Path<i32>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let id = game_repo::delete(&db, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": id })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_games)
        .service(get_game)
        .service(create_game)
        .service(update_game)
        .service(delete_game);
}
