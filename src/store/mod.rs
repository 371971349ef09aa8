//! Read-only access to the climate observation database
//!
//! The database is provisioned externally. Each query opens its own
//! read-only connection on a blocking thread and drops it before returning.

mod error;
pub mod models;
mod queries;

#[cfg(test)]
pub mod fixtures;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

pub use error::{StoreError, StoreResult};
pub use models::{DailyNormal, PrecipitationByDate, Station, TobsReading};

/// Handle to the observation database file
#[derive(Debug, Clone)]
pub struct ClimateStore {
    path: PathBuf,
}

impl ClimateStore {
    /// Open the database at `path`, checking that both tables are present
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(StoreError::DatabaseNotFound { path });
        }

        let store = Self { path };
        let conn = store.connect()?;
        queries::verify_schema(&conn, &store.path)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> StoreResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Ok(Connection::open_with_flags(&self.path, flags)?)
    }

    /// Run `query` against a fresh connection on the blocking pool
    async fn run<T, F>(&self, query: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = store.connect()?;
            query(&conn)
        })
        .await?
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.run(queries::ping).await
    }

    pub async fn precipitation(&self) -> StoreResult<PrecipitationByDate> {
        self.run(queries::precipitation).await
    }

    pub async fn stations(&self) -> StoreResult<Vec<Station>> {
        self.run(queries::stations).await
    }

    pub async fn most_active_tobs(&self) -> StoreResult<Vec<TobsReading>> {
        self.run(queries::most_active_tobs).await
    }

    /// Daily normals from `start`, bounded by `end` when given.
    /// Both bounds must already be canonical `YYYY-MM-DD` strings.
    pub async fn daily_normals(
        &self,
        start: String,
        end: Option<String>,
    ) -> StoreResult<Vec<DailyNormal>> {
        self.run(move |conn| queries::daily_normals(conn, &start, end.as_deref()))
            .await
    }
}
