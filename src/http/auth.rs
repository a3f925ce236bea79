//! Session login / logout / introspection.

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::config::Settings;
use crate::db::user_repo;
use crate::error::ApiError;
use crate::session::{self, Session};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
///
/// The 401 is identical whether the username is unknown or the password is
/// wrong. A fresh cookie replaces any prior session.
#[post("/auth/login")]
pub async fn login(
    info: web::Json<LoginRequest>,
    db: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, ApiError> {
    let user = match user_repo::find_by_username(&db, &info.username).await? {
        Some(u) if user_repo::verify_password(&u.password_hash, &info.password) => u,
        _ => return Err(ApiError::AuthenticationFailed),
    };

    let token = session::issue_token(
        &settings.secret_key,
        settings.session_ttl_hours,
        user.id,
        user.is_admin,
    )?;
    let cookie = session::session_cookie(token, settings.session_ttl_hours);

    log::info!("user {} logged in", user.username);
    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "message": "logged in",
        "user": { "username": user.username, "is_admin": user.is_admin }
    })))
}

/// POST /api/auth/logout. Idempotent; clearing an absent session is fine.
#[post("/auth/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::Ok()
        .cookie(session::removal_cookie())
        .json(json!({ "message": "see you next time" }))
}

/// GET /api/auth/me
#[get("/auth/me")]
pub async fn me(session: Session) -> impl Responder {
    match session.0 {
        Some(user) => HttpResponse::Ok().json(json!({
            "authenticated": true,
            "is_admin": user.is_admin
        })),
        None => HttpResponse::Ok().json(json!({ "authenticated": false })),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(logout).service(me);
}
