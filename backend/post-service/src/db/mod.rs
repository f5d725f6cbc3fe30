/// Database access layer
///
/// Repository functions over sqlx. Read paths take a `PgPool`; write paths
/// take a `PgConnection` so callers can run them inside one transaction.
pub mod member_repo;
pub mod post_repo;
pub mod post_tag_repo;
pub mod tag_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create the connection pool used by the whole service.
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Run embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
