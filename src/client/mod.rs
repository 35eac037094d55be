//! Inventory client.
//!
//! Talks to the service over HTTP and keeps a local projection of the product
//! and category lists. Mutations are merged into the projection by id instead
//! of re-fetching; everything derived from the lists (low stock, category
//! distribution, exports) reads only that projection.

pub mod api;
pub mod errors;
pub mod export;
pub mod form;
pub mod inventory;
pub mod notifications;
pub mod session;
pub mod stock;
pub mod store;

pub use api::InventoryApi;
pub use errors::ClientError;
pub use inventory::Inventory;
