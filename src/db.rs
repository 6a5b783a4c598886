use crate::config::DbConfig;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn connect(config: &DbConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await?;
    Ok(pool)
}

/// Create the tables if they are missing. Safe to run on every start.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id           BIGSERIAL PRIMARY KEY,
            login        TEXT NOT NULL UNIQUE,
            secret       TEXT NOT NULL,
            display_name TEXT NOT NULL,
            role         TEXT NOT NULL CHECK (role IN ('RT', 'RA', 'Agent'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS devices (
            device_id      TEXT PRIMARY KEY,
            fill_level     INTEGER NOT NULL,
            battery_level  INTEGER NOT NULL,
            room           TEXT NOT NULL DEFAULT 'unknown',
            assigned_agent BIGINT REFERENCES users (id) ON DELETE SET NULL,
            last_update    TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
