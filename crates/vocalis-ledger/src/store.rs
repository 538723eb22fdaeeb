use std::sync::Arc;

use crate::LedgerError;
use crate::types::{GrantOutcome, NewPurchase, NewUsageEntry, PurchaseOutcome, PurchaseRecord, UsageEntry};

/// Storage for balances, purchases and usage history
///
/// Every balance mutation is a single atomic operation at the store. Callers
/// never read a balance and write it back.
#[async_trait::async_trait]
pub trait CreditStore: Send + Sync {
    /// Current balance, zero when the user has no row yet
    async fn balance(&self, user_id: &str) -> Result<i64, LedgerError>;

    /// Decrement the balance by `amount` only if it stays non-negative
    ///
    /// Returns the new balance, or [`LedgerError::InsufficientCredits`]
    /// without touching the balance.
    async fn try_debit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError>;

    /// Credit `amount` back after a failed conversion
    async fn refund(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError>;

    /// Insert the purchase record and increment the balance in one step,
    /// keyed by checkout session id
    async fn apply_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseOutcome, LedgerError>;

    /// Read-side lookup of the purchase credited for a checkout session
    async fn purchase_by_session(&self, session_id: &str) -> Result<Option<PurchaseRecord>, LedgerError>;

    /// Look up a user id by account email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<String>, LedgerError>;

    async fn append_usage(&self, entry: &NewUsageEntry) -> Result<UsageEntry, LedgerError>;

    /// Usage entries for a user, newest first
    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<UsageEntry>, LedgerError>;

    /// Credit `amount` once per user
    async fn grant_welcome(&self, user_id: &str, amount: i64) -> Result<GrantOutcome, LedgerError>;
}

pub type DynCreditStore = Arc<dyn CreditStore>;
