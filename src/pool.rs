//! Shared `PostgreSQL` connection pool and blocking helpers.
//!
//! Diesel is synchronous, so every adapter offloads its queries to
//! [`tokio::task::spawn_blocking`] through [`run_blocking`].

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}

/// Repository error types that can wrap an infrastructure failure.
pub(crate) trait PersistenceFailure: Sized {
    /// Wraps `err` as a persistence failure.
    fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Runs `f` with a pooled connection on the blocking thread pool.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure + Send + 'static,
{
    let pool_handle = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool_handle.get().map_err(E::wrap)?;
        f(&mut connection)
    })
    .await
    .map_err(E::wrap)?
}

macro_rules! impl_persistence_failure {
    ($($error:ty),+ $(,)?) => {
        $(
            impl PersistenceFailure for $error {
                fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
                    Self::persistence(err)
                }
            }
        )+
    };
}

impl_persistence_failure!(
    crate::task::ports::TaskRepositoryError,
    crate::task::ports::CatalogRepositoryError,
    crate::review::ports::ReviewLogRepositoryError,
    crate::review::ports::SettingsRepositoryError,
);
