//! CRUD queries for the games catalog.

use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::models::Game;

/// Fallback image substituted when a game is created without one.
pub const DEFAULT_IMAGE_PATH: &str = "/static/uploads/defecto.jpg";

/// Columns a client is allowed to touch. Payload keys outside this list are
/// ignored; column names are never taken from the payload itself.
const COLUMNS: [&str; 4] = ["name", "description", "year", "url"];

/// A value bound into a statement placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Text(Option<String>),
    Int(Option<i32>),
}

/// Translates a JSON object into `(column, bind)` pairs.
///
/// Create mode (`partial == false`) fills every column and substitutes
/// [`DEFAULT_IMAGE_PATH`] for an absent or empty `image_path`. Partial mode
/// touches only keys present in the payload, including `image_path`, which
/// is written verbatim with no default substitution.
pub fn fields_from_payload(data: &Map<String, Value>, partial: bool) -> Vec<(&'static str, Bind)> {
    let mut fields = Vec::new();

    for col in COLUMNS {
        if !partial || data.contains_key(col) {
            let bind = match col {
                "year" => Bind::Int(int_value(data.get(col))),
                _ => Bind::Text(text_value(data.get(col))),
            };
            fields.push((col, bind));
        }
    }

    if partial {
        if data.contains_key("image_path") {
            fields.push(("image_path", Bind::Text(text_value(data.get("image_path")))));
        }
    } else {
        let image = text_value(data.get("image_path"))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_PATH.to_owned());
        fields.push(("image_path", Bind::Text(Some(image))));
    }

    fields
}

fn text_value(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_str).map(str::to_owned)
}

fn int_value(v: Option<&Value>) -> Option<i32> {
    v.and_then(Value::as_i64).map(|n| n as i32)
}

pub fn text_field<'a>(fields: &'a [(&'static str, Bind)], col: &str) -> Option<&'a str> {
    fields.iter().find(|(c, _)| *c == col).and_then(|(_, b)| match b {
        Bind::Text(v) => v.as_deref(),
        Bind::Int(_) => None,
    })
}

pub fn int_field(fields: &[(&'static str, Bind)], col: &str) -> Option<i32> {
    fields.iter().find(|(c, _)| *c == col).and_then(|(_, b)| match b {
        Bind::Int(v) => *v,
        Bind::Text(_) => None,
    })
}

pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Game>> {
    sqlx::query_as::<_, Game>("SELECT * FROM games ORDER BY id ASC")
        .fetch_all(db)
        .await
}

pub async fn get(db: &PgPool, id: i32) -> sqlx::Result<Option<Game>> {
    sqlx::query_as::<_, Game>("SELECT * FROM games WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn create(
    db: &PgPool,
    name: &str,
    description: &str,
    year: i32,
    url: Option<&str>,
    image_path: &str,
) -> sqlx::Result<Game> {
    sqlx::query_as::<_, Game>(
        "INSERT INTO games (name, description, year, url, image_path)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(year)
    .bind(url)
    .bind(image_path)
    .fetch_one(db)
    .await
}

/// Sparse patch: writes exactly the given fields plus `updated_at = NOW()`.
/// `None` when no row matched the id.
pub async fn update(
    db: &PgPool,
    id: i32,
    fields: Vec<(&'static str, Bind)>,
) -> sqlx::Result<Option<Game>> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE games SET ");

    let mut sets = qb.separated(", ");
    for (col, bind) in fields {
        sets.push(col);
        sets.push_unseparated(" = ");
        match bind {
            Bind::Text(v) => sets.push_bind_unseparated(v),
            Bind::Int(v) => sets.push_bind_unseparated(v),
        };
    }
    sets.push("updated_at = NOW()");

    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb.push(" RETURNING *");

    qb.build_query_as::<Game>().fetch_optional(db).await
}

pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<Option<i32>> {
    sqlx::query_scalar::<_, i32>("DELETE FROM games WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(db)
        .await
}
