//! Database bootstrap: connect-or-create, schema, seed data.
//!
//! `connect` + `prepare` run once before the server accepts traffic. Every
//! step is idempotent, so restarting against an existing database is a
//! no-op apart from the normalization passes re-checking their predicates.

use anyhow::Context;
use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::{Connection, Executor, PgPool};
use url::Url;

use crate::db::game_repo::DEFAULT_IMAGE_PATH;
use crate::db::user_repo;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

const CREATE_USERS: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL,
        is_admin BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

const CREATE_GAMES: &str = "
    CREATE TABLE IF NOT EXISTS games (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        year INT NOT NULL,
        url TEXT,
        image_path TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

/// Starter catalog inserted when the games table is empty.
const SEED_GAMES: &[(&str, &str, i32, Option<&str>)] = &[
    (
        "Among Us",
        "Social deduction in space: report bodies and call meetings to vote the impostor out.",
        2020,
        Some("https://buy.among.us/"),
    ),
    (
        "League of Legends",
        "Riot Games' competitive MOBA where two teams fight to destroy the enemy nexus.",
        2009,
        None,
    ),
    (
        "DOTA 2",
        "Valve's MOBA pitting two teams of five against each other in intense strategic battles.",
        2013,
        Some("https://www.dota2.com/"),
    ),
    (
        "King of Glory",
        "Tencent's mobile MOBA, hugely popular in China.",
        2015,
        Some("https://pvp.qq.com/"),
    ),
    (
        "Fortnite",
        "Epic Games' battle royale where 100 players fight to be the last one standing.",
        2017,
        Some("https://www.fortnite.com/"),
    ),
    (
        "PUBG: Battlegrounds",
        "The pioneering battle royale: compete across a shrinking map to survive.",
        2017,
        Some("https://pubg.com/"),
    ),
    (
        "Counter-Strike 2",
        "Valve's tactical shooter, successor to CS:GO, terrorists versus counter-terrorists.",
        2023,
        Some("https://www.counter-strike.net/cs2"),
    ),
    (
        "Valorant",
        "Riot Games' 5v5 tactical shooter with agents and unique abilities.",
        2020,
        Some("https://playvalorant.com/"),
    ),
    (
        "Call of Duty: Warzone 2.0",
        "Activision's battle royale with frantic action on enormous maps.",
        2022,
        Some("https://www.callofduty.com/warzone"),
    ),
    (
        "EA Sports FC 24",
        "EA's football simulator, successor to FIFA, with official licences and varied modes.",
        2023,
        Some("https://www.ea.com/games/ea-sports-fc/fc-24"),
    ),
    (
        "Minecraft",
        "Open-world building and adventure: create and explore without limits.",
        2011,
        Some("https://www.minecraft.net/"),
    ),
    (
        "Tres en raya",
        "Browser version of the classic tic-tac-toe for two local players.",
        2025,
        Some("/tictactoe.html"),
    ),
];

/// Connects to the target database, creating it first if it does not exist.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    match pool(database_url).await {
        Ok(p) => Ok(p),
        Err(e) if database_missing(&e) => {
            log::warn!("target database missing, creating it");
            create_database(database_url).await?;
            pool(database_url)
                .await
                .context("reconnecting after CREATE DATABASE")
        }
        Err(e) => Err(e).context("connecting to Postgres"),
    }
}

/// One shared connection reused across all requests; every statement is its
/// own transaction.
async fn pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
}

fn database_missing(err: &sqlx::Error) -> bool {
    // 3D000 = invalid_catalog_name
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("3D000"))
}

async fn create_database(database_url: &str) -> anyhow::Result<()> {
    let target = Url::parse(database_url).context("parsing DATABASE_URL")?;
    let dbname = target.path().trim_start_matches('/').to_owned();
    anyhow::ensure!(!dbname.is_empty(), "DATABASE_URL has no database name");

    let mut maintenance_url = target.clone();
    maintenance_url.set_path("/postgres");

    let mut conn = PgConnection::connect(maintenance_url.as_str())
        .await
        .context("connecting to maintenance database")?;

    let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(&dbname)
        .fetch_optional(&mut conn)
        .await?;

    if exists.is_none() {
        // dbname comes from our own configuration, not from a request
        conn.execute(format!(r#"CREATE DATABASE "{dbname}""#).as_str())
            .await?;
        log::info!("created database {dbname}");
    }

    conn.close().await.ok();
    Ok(())
}

/// Idempotent migration + seed step, run once before serving traffic.
pub async fn prepare(db: &PgPool) -> anyhow::Result<()> {
    init_schema(db).await.context("creating schema")?;
    ensure_admin(db).await.context("seeding admin user")?;
    seed_games_if_empty(db).await.context("seeding games")?;
    normalize_image_paths(db)
        .await
        .context("normalizing image paths")?;
    Ok(())
}

async fn init_schema(db: &PgPool) -> sqlx::Result<()> {
    sqlx::query(CREATE_USERS).execute(db).await?;
    sqlx::query(CREATE_GAMES).execute(db).await?;
    Ok(())
}

async fn ensure_admin(db: &PgPool) -> anyhow::Result<()> {
    if user_repo::find_by_username(db, ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(());
    }
    let hash = user_repo::hash_password(ADMIN_PASSWORD)?;
    user_repo::insert(db, ADMIN_USERNAME, &hash, true).await?;
    log::info!("seeded default admin user");
    Ok(())
}

async fn seed_games_if_empty(db: &PgPool) -> sqlx::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM games")
        .fetch_one(db)
        .await?;
    if count > 0 {
        return Ok(());
    }

    log::info!("games table empty, inserting starter catalog");
    for &(name, description, year, url) in SEED_GAMES {
        sqlx::query(
            "INSERT INTO games (name, description, year, url, image_path)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(name)
        .bind(description)
        .bind(year)
        .bind(url)
        .bind(DEFAULT_IMAGE_PATH)
        .execute(db)
        .await?;
    }
    Ok(())
}

/// One-time cleanup of legacy image paths into `/static/uploads/...` form.
async fn normalize_image_paths(db: &PgPool) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE games SET image_path = '/static/' || image_path
          WHERE image_path LIKE 'uploads/%'",
    )
    .execute(db)
    .await?;

    sqlx::query(
        "UPDATE games SET image_path = '/' || image_path
          WHERE image_path IS NOT NULL
            AND image_path <> ''
            AND image_path NOT LIKE '/%'",
    )
    .execute(db)
    .await?;

    sqlx::query("UPDATE games SET image_path = $1 WHERE image_path IS NULL OR image_path = ''")
        .bind(DEFAULT_IMAGE_PATH)
        .execute(db)
        .await?;

    Ok(())
}
