use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

pub type Db = sqlx::PgPool;

pub async fn connect() -> anyhow::Result<Db> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .with_context(|| "failed to connect to database; check DATABASE_URL")?;
    Ok(pool)
}

/// Schema bootstrap, safe to run on every startup.
pub async fn migrate(db: &Db) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            subtitle TEXT,
            description TEXT,
            price BIGINT NOT NULL,
            guru_info TEXT,
            type TEXT NOT NULL,
            related_stock TEXT,
            expected_return TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            deleted_at TIMESTAMPTZ
        )",
    )
    .execute(db)
    .await
    .context("failed to create products table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            experience TEXT NOT NULL,
            type TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            birthday TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            deleted_at TIMESTAMPTZ
        )",
    )
    .execute(db)
    .await
    .context("failed to create users table")?;

    // Uniqueness only among live rows, so a re-registered email does not
    // collide with a soft-deleted account.
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key
         ON users (email) WHERE deleted_at IS NULL",
    )
    .execute(db)
    .await
    .context("failed to create unique email index")?;

    Ok(())
}
