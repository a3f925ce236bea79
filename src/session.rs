//! Signed-cookie sessions.
//!
//! The session is a client-side HMAC token carrying `{user_id, is_admin}`;
//! nothing is stored server-side. Expiry is enforced by the token itself.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::Payload,
    web, FromRequest, HttpRequest,
};
use chrono::{Duration, Utc};
use futures_util::future::{ready, Ready};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    adm: bool,
    exp: usize,
}

/// Principal decoded from a valid session cookie.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i32,
    pub is_admin: bool,
}

pub fn issue_token(
    secret: &str,
    ttl_hours: i64,
    user_id: i32,
    is_admin: bool,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        adm: is_admin,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Invalid, expired or tampered tokens all come back as `None`.
pub fn decode_token(secret: &str, token: &str) -> Option<SessionUser> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    let user_id = data.claims.sub.parse().ok()?;
    Some(SessionUser {
        user_id,
        is_admin: data.claims.adm,
    })
}

/// Cross-site cookie: the frontend lives on another origin, so the cookie
/// must be `SameSite=None; Secure`.
pub fn session_cookie(token: String, ttl_hours: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::None)
        .max_age(CookieDuration::hours(ttl_hours))
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::None)
        .max_age(CookieDuration::ZERO)
        .finish()
}

fn session_from_request(req: &HttpRequest) -> Option<SessionUser> {
    let settings = req.app_data::<web::Data<Settings>>()?;
    let cookie = req.cookie(SESSION_COOKIE)?;
    decode_token(&settings.secret_key, cookie.value())
}

/// Best-effort session lookup; never rejects the request.
pub struct Session(pub Option<SessionUser>);

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
        ready(Ok(Session(session_from_request(req))))
    }
}

/// Guard for mutating endpoints: anything short of an admin session is
/// rejected with 403 `admin_required`. Listed first in handler signatures
/// so the guard runs before any payload handling.
pub struct AdminUser(pub SessionUser);

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
        let res = match session_from_request(req) {
            Some(user) if user.is_admin => Ok(AdminUser(user)),
            _ => Err(ApiError::AdminRequired.into()),
        };
        ready(res)
    }
}
