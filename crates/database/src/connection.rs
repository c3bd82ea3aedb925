use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates the process-wide PostgreSQL connection pool.
///
/// The pool connects lazily: no connection is opened until the first query,
/// so the server can start while the database is still coming up. Clones of
/// the returned pool share the same connections.
pub fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    if settings.url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "database url must be set".to_string(),
        ));
    }

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect_lazy(&settings.url)?;

    tracing::debug!(
        max_connections = settings.max_connections,
        "Database pool configured."
    );
    Ok(pool)
}

/// Applies the embedded migrations so the `countries` and `country_year`
/// tables exist.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
