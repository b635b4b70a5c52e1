use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::DomainError;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Run a query on a pooled connection off the async workers.
///
/// Checking a connection out of the pool may wait, so it happens inside the
/// blocking task together with the query itself.
pub(crate) async fn run_blocking<T, F>(pool: &SqlitePool, query: F) -> Result<T, DomainError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;
        query(&mut conn).map_err(|e| DomainError::RepositoryError(e.to_string()))
    })
    .await
    .map_err(|e| DomainError::RepositoryError(e.to_string()))?
}

/// Applied to every pooled connection so concurrent writers wait instead of failing.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the SQLite database and make sure the tables exist.
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        Self::with_max_connections(database_path, DEFAULT_MAX_CONNECTIONS)
    }

    pub fn with_max_connections(
        database_path: &str,
        max_connections: u32,
    ) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .max_size(max_connections)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .map_err(|e| {
                DomainError::RepositoryError(format!(
                    "Failed to create SQLite connection pool: {}",
                    e
                ))
            })?;

        let database = Database { pool };
        database.initialize_schema()?;
        info!(database_path, "database ready");

        Ok(database)
    }

    fn initialize_schema(&self) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        conn.batch_execute(CREATE_TABLES)
            .map_err(|e| DomainError::RepositoryError(e.to_string()))
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
