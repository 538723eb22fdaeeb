use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use jiff::Timestamp;

use crate::types::{GrantOutcome, NewPurchase, NewUsageEntry, PurchaseOutcome, PurchaseRecord, UsageEntry};
use crate::{CreditStore, LedgerError};

/// Process-local credit store
///
/// All mutations happen under one lock, which gives the same atomicity the
/// data service provides through its SQL functions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    balances: HashMap<String, i64>,
    purchases: HashMap<String, PurchaseRecord>,
    users_by_email: HashMap<String, String>,
    usage: Vec<UsageEntry>,
    welcomed: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a user's balance
    pub fn set_balance(&self, user_id: &str, balance: i64) {
        self.lock().balances.insert(user_id.to_owned(), balance);
    }

    /// Make a user discoverable by email for webhook recipient resolution
    pub fn register_user(&self, user_id: &str, email: &str) {
        self.lock()
            .users_by_email
            .insert(email.to_ascii_lowercase(), user_id.to_owned());
    }

    /// Number of purchase records
    pub fn purchase_count(&self) -> usize {
        self.lock().purchases.len()
    }

    /// Number of usage entries for a user
    pub fn usage_count(&self, user_id: &str) -> usize {
        self.lock().usage.iter().filter(|e| e.user_id == user_id).count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl State {
    fn credit(&mut self, user_id: &str, amount: i64) -> i64 {
        let balance = self.balances.entry(user_id.to_owned()).or_insert(0);
        *balance += amount;
        *balance
    }
}

#[async_trait::async_trait]
impl CreditStore for MemoryStore {
    async fn balance(&self, user_id: &str) -> Result<i64, LedgerError> {
        Ok(self.lock().balances.get(user_id).copied().unwrap_or(0))
    }

    async fn try_debit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        let mut state = self.lock();
        let current = state.balances.get(user_id).copied().unwrap_or(0);

        if current < amount {
            return Err(LedgerError::InsufficientCredits { required: amount });
        }

        let balance = current - amount;
        state.balances.insert(user_id.to_owned(), balance);
        Ok(balance)
    }

    async fn refund(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        Ok(self.lock().credit(user_id, amount))
    }

    async fn apply_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseOutcome, LedgerError> {
        let mut state = self.lock();

        if state.purchases.contains_key(&purchase.stripe_session_id) {
            return Ok(PurchaseOutcome::Duplicate);
        }

        state.purchases.insert(
            purchase.stripe_session_id.clone(),
            PurchaseRecord {
                user_id: purchase.user_id.clone(),
                credits: purchase.credits,
                amount: purchase.amount,
                stripe_session_id: purchase.stripe_session_id.clone(),
                status: "completed".to_string(),
                created_at: Timestamp::now(),
            },
        );

        let balance = state.credit(&purchase.user_id, purchase.credits);
        Ok(PurchaseOutcome::Applied { balance })
    }

    async fn purchase_by_session(&self, session_id: &str) -> Result<Option<PurchaseRecord>, LedgerError> {
        Ok(self.lock().purchases.get(session_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<String>, LedgerError> {
        Ok(self
            .lock()
            .users_by_email
            .get(&email.to_ascii_lowercase())
            .cloned())
    }

    async fn append_usage(&self, entry: &NewUsageEntry) -> Result<UsageEntry, LedgerError> {
        let entry = UsageEntry {
            user_id: entry.user_id.clone(),
            text: entry.text.clone(),
            voice_id: entry.voice_id.clone(),
            chars_used: entry.chars_used,
            created_at: Timestamp::now(),
        };

        self.lock().usage.push(entry.clone());
        Ok(entry)
    }

    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<UsageEntry>, LedgerError> {
        // Insertion order is chronological, so walking backwards yields newest first
        Ok(self
            .lock()
            .usage
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn grant_welcome(&self, user_id: &str, amount: i64) -> Result<GrantOutcome, LedgerError> {
        let mut state = self.lock();

        if !state.welcomed.insert(user_id.to_owned()) {
            let balance = state.balances.get(user_id).copied().unwrap_or(0);
            return Ok(GrantOutcome::AlreadyGranted { balance });
        }

        let balance = state.credit(user_id, amount);
        Ok(GrantOutcome::Granted { balance })
    }
}
