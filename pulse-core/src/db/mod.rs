pub mod models;
pub mod operations;
pub mod schema;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

use crate::error::{StorageError, StorageResult};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const DEFAULT_DATABASE_URL: &str = "pulse.db";

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

fn is_memory_url(url: &str) -> bool {
    url == ":memory:" || url.contains("mode=memory")
}

/// Applies per-connection pragmas. SQLite only enforces foreign keys when
/// asked to, on every connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    wal: bool,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let mut pragmas = String::from("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;");
        if self.wal {
            pragmas.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Default pool size: one connection per CPU, never fewer than two.
pub fn default_pool_size() -> u32 {
    std::cmp::max(num_cpus::get(), 2) as u32
}

/// Builds a connection pool. In-memory databases are private to a single
/// connection, so their pool is capped at one.
pub fn establish_pool(database_url: &str, max_size: u32) -> StorageResult<DbPool> {
    let memory = is_memory_url(database_url);
    let max_size = if memory { 1 } else { max_size.max(1) };
    debug!(
        "Opening database {} with pool size {}",
        database_url, max_size
    );

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let mut builder = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas { wal: !memory }));
    if memory {
        // dropping the only connection would drop the database with it
        builder = builder.idle_timeout(None).max_lifetime(None);
    }
    let pool = builder.build(manager)?;
    Ok(pool)
}

/// Applies every embedded migration that has not run yet and returns the
/// names of those it applied.
pub fn run_migrations(conn: &mut SqliteConnection) -> StorageResult<Vec<String>> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(StorageError::migration)?;

    if applied.is_empty() {
        debug!("No pending migrations");
    }
    let names: Vec<String> = applied.iter().map(|v| v.to_string()).collect();
    for name in &names {
        info!("Applied migration: {}", name);
    }
    Ok(names)
}

/// Opens a pool and brings the schema up to date.
pub fn init_database(database_url: &str, max_size: u32) -> StorageResult<DbPool> {
    let pool = establish_pool(database_url, max_size)?;
    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;
    Ok(pool)
}

/// Deletes every row, children before parents.
pub fn clear_all_tables(conn: &mut SqliteConnection) -> StorageResult<()> {
    conn.batch_execute(
        "DELETE FROM nutrition_logs;
         DELETE FROM user_workouts;
         DELETE FROM workout_exercises;
         DELETE FROM workout_plans;
         DELETE FROM exercises;
         DELETE FROM equipment_types;
         DELETE FROM exercise_categories;
         DELETE FROM sessions;
         DELETE FROM users;",
    )?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    init_database(":memory:", 1).expect("in-memory database")
}
