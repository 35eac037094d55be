use crate::configuration::{DatabaseSettings, DatabaseType, ResilienceSettings};
use crate::data_models::{Category, CategoryPayload, Product, ProductPayload};
use crate::db::connection::{ConnectionManager, PostgresConnector};
use crate::db::in_memory::InMemoryDB;
use crate::db::relational::RelationalDB;
use crate::errors::AppErrors;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub mod connection;
mod errors;
pub mod in_memory;
mod relational;

pub use errors::DBError as DatabaseError;
use errors::DBError;

#[derive(Debug)]
pub enum Database {
    InMemory(Box<InMemoryDB>),
    Relational(RelationalDB),
}

impl Database {
    /// Builds the configured backend. A relational backend that cannot reach
    /// the store within its retry budget is still returned: the service keeps
    /// running unhealthy and the heartbeat keeps trying.
    pub async fn try_from(
        settings: &DatabaseSettings,
        resilience: &ResilienceSettings,
    ) -> Result<Self, AppErrors> {
        settings.is_valid()?;
        match settings.db_type {
            DatabaseType::InMemory => {
                info!("using in-memory storage");
                Ok(Self::InMemory(Box::new(InMemoryDB::init())))
            }
            DatabaseType::Relational => {
                let connection_settings = settings.relational_connection()?;
                let connector = PostgresConnector::new(connection_settings, settings);
                let manager = ConnectionManager::new(Box::new(connector), resilience.into());
                if let Err(e) = manager.init().await {
                    error!("starting without a database connection: {e}");
                }
                Ok(Self::Relational(RelationalDB::init(manager)))
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::InMemory(Box::new(InMemoryDB::init()))
    }

    /// Starts the keep-alive loop for backends that hold a pool.
    pub fn spawn_heartbeat(&self) -> Option<JoinHandle<()>> {
        match self {
            Database::InMemory(_) => None,
            Database::Relational(db) => Some(db.manager.spawn_heartbeat()),
        }
    }

    pub async fn is_healthy(&self) -> bool {
        match self {
            Database::InMemory(_) => true,
            Database::Relational(db) => db.is_healthy().await,
        }
    }

    pub async fn all_products(&self) -> Result<Vec<Product>, DBError> {
        match self {
            Database::InMemory(db) => db.all_products(),
            Database::Relational(db) => db.all_products().await,
        }
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, DBError> {
        match self {
            Database::InMemory(db) => db.create_product(payload),
            Database::Relational(db) => db.create_product(payload).await,
        }
    }

    pub async fn replace_product(
        &self,
        id: i32,
        payload: ProductPayload,
    ) -> Result<Product, DBError> {
        match self {
            Database::InMemory(db) => db.replace_product(id, payload),
            Database::Relational(db) => db.replace_product(id, payload).await,
        }
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), DBError> {
        match self {
            Database::InMemory(db) => db.delete_product(id),
            Database::Relational(db) => db.delete_product(id).await,
        }
    }

    pub async fn all_categories(&self) -> Result<Vec<Category>, DBError> {
        match self {
            Database::InMemory(db) => db.all_categories(),
            Database::Relational(db) => db.all_categories().await,
        }
    }

    pub async fn create_category(&self, payload: CategoryPayload) -> Result<Category, DBError> {
        match self {
            Database::InMemory(db) => db.create_category(payload),
            Database::Relational(db) => db.create_category(payload).await,
        }
    }

    pub async fn delete_category(&self, id: i32) -> Result<(), DBError> {
        match self {
            Database::InMemory(db) => db.delete_category(id),
            Database::Relational(db) => db.delete_category(id).await,
        }
    }
}
