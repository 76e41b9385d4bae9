//! Session and transaction management.
//!
//! A [`Session`] is the data-access handle for one logical operation.
//! Repositories always ask the session to run their queries and never know
//! whether it wraps an open transaction or the shared pool, which keeps
//! repository code transaction-agnostic. [`TxManager::run`] groups several
//! repository calls into one atomic unit of work.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use sqlx::any::{AnyArguments, AnyQueryResult, AnyRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{Any, AnyPool, FromRow, Transaction};
use tokio::sync::Mutex;

use crate::types::errors::DbError;

#[derive(Clone)]
enum Handle {
    Pool(AnyPool),
    Tx(Arc<Mutex<Transaction<'static, Any>>>),
}

/// Data-access handle threaded explicitly into repositories.
#[derive(Clone)]
pub struct Session {
    handle: Handle,
}

impl Session {
    /// A session backed by the shared connection pool.
    pub fn from_pool(pool: AnyPool) -> Self {
        Self {
            handle: Handle::Pool(pool),
        }
    }

    fn from_tx(tx: Arc<Mutex<Transaction<'static, Any>>>) -> Self {
        Self {
            handle: Handle::Tx(tx),
        }
    }

    /// Run a statement against the current handle.
    pub async fn execute<'q>(
        &self,
        query: Query<'q, Any, AnyArguments<'q>>,
    ) -> Result<AnyQueryResult, sqlx::Error> {
        match &self.handle {
            Handle::Pool(pool) => query.execute(pool).await,
            Handle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.execute(&mut **guard).await
            }
        }
    }

    /// Fetch exactly one row; `sqlx::Error::RowNotFound` otherwise.
    pub async fn fetch_one<'q, T>(
        &self,
        query: QueryAs<'q, Any, T, AnyArguments<'q>>,
    ) -> Result<T, sqlx::Error>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        match &self.handle {
            Handle::Pool(pool) => query.fetch_one(pool).await,
            Handle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.fetch_one(&mut **guard).await
            }
        }
    }

    /// Fetch at most one row.
    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Any, T, AnyArguments<'q>>,
    ) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        match &self.handle {
            Handle::Pool(pool) => query.fetch_optional(pool).await,
            Handle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.fetch_optional(&mut **guard).await
            }
        }
    }

    /// Fetch all matching rows.
    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Any, T, AnyArguments<'q>>,
    ) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        match &self.handle {
            Handle::Pool(pool) => query.fetch_all(pool).await,
            Handle::Tx(tx) => {
                let mut guard = tx.lock().await;
                query.fetch_all(&mut **guard).await
            }
        }
    }
}

/// Groups repository calls into one atomic unit of work.
///
/// Transactions at the usecase layer are business knowledge: callers wrap
/// one logical operation, not one SQL statement. Independent `run`
/// invocations always get independent transactions; only a session cloned
/// inside the unit of work shares one.
#[derive(Clone)]
pub struct TxManager {
    pool: AnyPool,
}

impl TxManager {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// A pool-backed session for operations outside any transaction.
    pub fn session(&self) -> Session {
        Session::from_pool(self.pool.clone())
    }

    /// Run `op` inside a freshly begun transaction.
    ///
    /// Commits when `op` returns `Ok`; a commit failure is returned. Rolls
    /// back when `op` returns `Err`, ignoring the rollback's own outcome,
    /// and propagates the original error unchanged. If `op` panics, or
    /// keeps a clone of its session alive past its return, the transaction
    /// guard is dropped un-committed and rolls back on drop. Exactly one
    /// of commit/rollback is attempted per invocation.
    pub async fn run<T, E, F>(&self, op: F) -> Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(Session) -> BoxFuture<'static, Result<T, E>>,
    {
        let tx = self.pool.begin().await.map_err(DbError::from)?;
        let shared = Arc::new(Mutex::new(tx));

        let result = op(Session::from_tx(Arc::clone(&shared))).await;

        // Regain exclusive ownership before finishing the transaction. A
        // surviving clone means the unit of work leaked its session; the
        // guard then rolls back when that clone drops.
        let Ok(mutex) = Arc::try_unwrap(shared) else {
            return Err(DbError::SessionLeaked.into());
        };
        let tx = mutex.into_inner();

        match result {
            Ok(value) => {
                tx.commit().await.map_err(DbError::from)?;
                Ok(value)
            }
            Err(err) => {
                let _ = tx.rollback().await;
                Err(err)
            }
        }
    }
}
