#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod cost;
mod error;
mod memory;
mod postgrest;
mod store;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use vocalis_config::StoreConfig;

pub use cost::FlatCost;
pub use error::LedgerError;
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use store::{CreditStore, DynCreditStore};
pub use types::{GrantOutcome, NewPurchase, NewUsageEntry, PurchaseOutcome, PurchaseRecord, UsageEntry};

/// Build the configured credit store
///
/// # Errors
///
/// Returns an error if the data service client cannot be built
pub fn build_store(config: &StoreConfig) -> anyhow::Result<DynCreditStore> {
    match config {
        StoreConfig::Memory => {
            tracing::warn!("using in-memory credit store; balances are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreConfig::Postgrest {
            url,
            service_key,
            timeout_secs,
        } => Ok(Arc::new(PostgrestStore::new(
            url.clone(),
            service_key.clone(),
            Duration::from_secs(*timeout_secs),
        )?)),
    }
}
