//! Pool lifecycle for the relational backend.
//!
//! The [`ConnectionManager`] owns the only live pool handle. It connects with
//! a bounded, fixed-delay retry, hands out clones of the handle to requests,
//! and heals itself in the background: a heartbeat pings the store on a fixed
//! interval and any connection-level failure re-runs the retry procedure.
//! Requests never wait for a reconnection; while no pool is installed they
//! fail fast with [`DBError::Unavailable`]. Health is tracked apart from the
//! pool: a failed heartbeat or a connection-level error marks the manager
//! unhealthy until a reconnection succeeds.

use crate::configuration::{DatabaseSettings, ResilienceSettings};
use crate::db::errors::DBError;
use crate::db::relational::schema::ensure_schema;
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaOrmDB, DatabaseConnection, DbErr};
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub type ConnectFuture<'a> =
    Pin<Box<dyn Future<Output = Result<DatabaseConnection, DbErr>> + Send + 'a>>;

/// Produces a fresh pool. Implementations must be cheap to call repeatedly.
pub trait Connector: Send + Sync + Debug {
    fn connect(&self) -> ConnectFuture<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub heartbeat_interval: Duration,
}

impl From<&ResilienceSettings> for RetryPolicy {
    fn from(settings: &ResilienceSettings) -> Self {
        Self {
            max_retries: settings.max_retries.max(1),
            retry_delay: Duration::from_secs(settings.retry_delay_secs),
            heartbeat_interval: Duration::from_secs(settings.heartbeat_interval_secs.max(1)),
        }
    }
}

/// Connects to Postgres and makes sure both tables exist.
#[derive(Debug)]
pub struct PostgresConnector {
    options: ConnectOptions,
    schema_ready: AtomicBool,
}

impl PostgresConnector {
    pub fn new(url: String, settings: &DatabaseSettings) -> Self {
        let mut options = ConnectOptions::new(url);
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(settings.connect_timeout())
            .acquire_timeout(settings.acquire_timeout())
            .idle_timeout(settings.idle_timeout())
            .sqlx_logging(false);
        Self {
            options,
            schema_ready: AtomicBool::new(false),
        }
    }
}

impl Connector for PostgresConnector {
    fn connect(&self) -> ConnectFuture<'_> {
        Box::pin(async move {
            let connection = SeaOrmDB::connect(self.options.clone()).await?;
            if !self.schema_ready.load(Ordering::Acquire) {
                ensure_schema(&connection).await?;
                self.schema_ready.store(true, Ordering::Release);
            }
            Ok(connection)
        })
    }
}

#[derive(Debug)]
pub struct ConnectionManager {
    connector: Box<dyn Connector>,
    policy: RetryPolicy,
    pool: RwLock<Option<Arc<DatabaseConnection>>>,
    healthy: AtomicBool,
    reconnecting: AtomicBool,
}

impl ConnectionManager {
    pub fn new(connector: Box<dyn Connector>, policy: RetryPolicy) -> Arc<Self> {
        Arc::new(Self {
            connector,
            policy,
            pool: RwLock::new(None),
            healthy: AtomicBool::new(false),
            reconnecting: AtomicBool::new(false),
        })
    }

    /// Connects with up to `max_retries` attempts spaced by `retry_delay`.
    pub async fn init(&self) -> Result<(), DBError> {
        let connection = self.connect_with_retry().await?;
        self.install(connection).await;
        info!("database pool is ready");
        Ok(())
    }

    async fn connect_with_retry(&self) -> Result<DatabaseConnection, DBError> {
        let attempts = self.policy.max_retries;
        for attempt in 1..=attempts {
            match self.connector.connect().await {
                Ok(connection) => {
                    debug!("connected on attempt {attempt}/{attempts}");
                    return Ok(connection);
                }
                Err(e) => {
                    warn!("connection attempt {attempt}/{attempts} failed: {e}");
                    if attempt < attempts {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                }
            }
        }
        error!("giving up after {attempts} connection attempts");
        Err(DBError::RetriesExhausted { attempts })
    }

    async fn install(&self, connection: DatabaseConnection) {
        *self.pool.write().await = Some(Arc::new(connection));
        self.healthy.store(true, Ordering::Release);
    }

    /// Returns a handle to the pool. The lock is released before the caller
    /// runs any statement.
    pub async fn acquire(&self) -> Result<Arc<DatabaseConnection>, DBError> {
        self.pool.read().await.clone().ok_or(DBError::Unavailable)
    }

    /// True while a pool is installed and nothing has reported it broken.
    pub async fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Acquire) && self.pool.read().await.is_some()
    }

    fn mark_unhealthy(&self) {
        if self.healthy.swap(false, Ordering::AcqRel) {
            warn!("database marked unhealthy");
        }
    }

    /// Re-runs the retry procedure in the background. Concurrent calls while a
    /// reconnection is already running are ignored.
    pub fn on_fatal_error(self: &Arc<Self>) {
        self.mark_unhealthy();
        if self.reconnecting.swap(true, Ordering::AcqRel) {
            debug!("reconnection already in progress");
            return;
        }
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            manager.reconnect().await;
        });
    }

    async fn reconnect(&self) {
        self.reconnecting.store(true, Ordering::Release);
        match self.connect_with_retry().await {
            Ok(connection) => {
                self.install(connection).await;
                info!("database connection restored");
            }
            Err(e) => error!("reconnection failed, service stays degraded: {e}"),
        }
        self.reconnecting.store(false, Ordering::Release);
    }

    /// Feeds a statement result back to the manager: connection-level errors
    /// schedule a reconnection, every other outcome passes through untouched.
    pub fn observe<T>(self: &Arc<Self>, result: Result<T, DbErr>) -> Result<T, DbErr> {
        if let Err(e) = &result {
            if crate::db::errors::is_connection_failure(e) {
                warn!("connection-level failure: {e}");
                self.on_fatal_error();
            }
        }
        result
    }

    async fn ping(&self) -> Result<(), DBError> {
        let connection = self.acquire().await?;
        connection.execute_unprepared("SELECT 1").await?;
        Ok(())
    }

    /// Starts the keep-alive loop. It runs independently of any request.
    pub fn spawn_heartbeat(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(manager.policy.heartbeat_interval);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if manager.reconnecting.load(Ordering::Acquire) {
                    continue;
                }
                match manager.ping().await {
                    Ok(()) => debug!("heartbeat ok"),
                    Err(e) => {
                        warn!("heartbeat failed: {e}");
                        manager.mark_unhealthy();
                        if !manager.reconnecting.swap(true, Ordering::AcqRel) {
                            manager.reconnect().await;
                        }
                    }
                }
            }
        })
    }
}
