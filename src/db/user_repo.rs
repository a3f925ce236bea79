//! User lookup and credential handling.

use argon2::{
    password_hash::{PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;
use sqlx::PgPool;

use crate::db::models::User;

pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, is_admin, created_at
           FROM users
          WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &PgPool,
    username: &str,
    password_hash: &str,
    is_admin: bool,
) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO users (username, password_hash, is_admin) VALUES ($1, $2, $3)")
        .bind(username)
        .bind(password_hash)
        .bind(is_admin)
        .execute(db)
        .await?;
    Ok(())
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow::anyhow!("hashing password: {e}"))
}

/// A stored hash that fails to parse just fails verification.
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|hash| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}
