use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A purchase credited to a user, at most one per checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub user_id: String,
    pub credits: i64,
    /// Amount paid, in cents
    pub amount: i64,
    pub stripe_session_id: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// Purchase to apply for a completed checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub user_id: String,
    pub credits: i64,
    pub amount: i64,
    pub stripe_session_id: String,
}

/// Result of applying a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// First delivery; the balance was incremented
    Applied { balance: i64 },
    /// A record for this checkout session already existed; nothing changed
    Duplicate,
}

/// One successful synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub user_id: String,
    pub text: String,
    pub voice_id: String,
    pub chars_used: i64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUsageEntry {
    pub user_id: String,
    pub text: String,
    pub voice_id: String,
    pub chars_used: i64,
}

impl NewUsageEntry {
    /// Build an entry, counting characters as Unicode scalar values
    pub fn new(user_id: impl Into<String>, text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        let text = text.into();
        let chars_used = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);

        Self {
            user_id: user_id.into(),
            text,
            voice_id: voice_id.into(),
            chars_used,
        }
    }
}

/// Result of a welcome grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    Granted { balance: i64 },
    AlreadyGranted { balance: i64 },
}

impl GrantOutcome {
    pub const fn balance(self) -> i64 {
        match self {
            Self::Granted { balance } | Self::AlreadyGranted { balance } => balance,
        }
    }

    pub const fn granted(self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}
