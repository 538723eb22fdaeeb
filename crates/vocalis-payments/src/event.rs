use std::collections::HashMap;

use serde::Deserialize;

/// Event type that credits a purchase
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// Envelope of a payment processor webhook event
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

/// The fields of a checkout session the reconciler reads
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, Option<String>>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

impl CheckoutSession {
    /// Non-empty metadata value
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Option::as_deref)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// The session completed but its payment has not settled yet
    pub fn awaiting_payment(&self) -> bool {
        self.payment_status.as_deref() == Some("unpaid")
    }

    /// Candidate emails in lookup order: customer details, customer email, then metadata
    pub fn candidate_emails(&self) -> impl Iterator<Item = &str> {
        let details = self.customer_details.as_ref().and_then(|d| d.email.as_deref());

        [details, self.customer_email.as_deref(), self.metadata_value("userEmail")]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}
