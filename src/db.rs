use anyhow::{anyhow, Context, Result};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Sets a busy timeout on every pooled connection so concurrent writers wait
/// instead of failing with `database is locked`.
#[derive(Debug)]
struct BusyTimeout;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for BusyTimeout {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn init_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(BusyTimeout))
        .build(manager)
        .with_context(|| format!("Failed to create pool for {}", database_url))
}

/// Runs all pending embedded migrations
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("Failed to run migrations: {}", e))?;
    info!("Applied {} pending migrations", applied.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::sql_types::Text;
    use diesel::{QueryableByName, RunQueryDsl};

    #[derive(QueryableByName, Debug)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[test]
    fn test_migrations_create_admin_tables() {
        let url = format!("file:db_test_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
        let pool = init_pool(&url).unwrap();
        let mut conn = pool.get().unwrap();
        run_migrations(&mut conn).unwrap();

        let tables: Vec<TableName> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .load(&mut conn)
        .unwrap();
        let names: Vec<String> = tables.into_iter().map(|t| t.name).collect();

        assert!(names.contains(&"mint_settings".to_string()));
        assert!(names.contains(&"whitelist".to_string()));
        assert!(names.contains(&"mints".to_string()));
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let url = format!("file:db_test_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
        let pool = init_pool(&url).unwrap();
        let mut conn = pool.get().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();
    }
}
