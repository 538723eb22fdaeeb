#![allow(dead_code)]

pub mod config;
pub mod mock_upstream;
pub mod server;

/// Webhook secret shared by [`config::ConfigBuilder`] and [`sign`]
pub const WEBHOOK_SECRET: &str = "whsec_integration";

/// Sign a webhook body the way the payment processor does
pub fn sign(body: &[u8]) -> String {
    vocalis_payments::signature::signature_header(body, WEBHOOK_SECRET.as_bytes(), jiff::Timestamp::now().as_second())
}

/// A `checkout.session.completed` event body
pub fn checkout_completed(session: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "id": "evt_integration",
        "type": "checkout.session.completed",
        "data": { "object": session }
    }))
    .expect("event serializes")
}

/// Bearer token the mock auth service accepts for `user_id`
pub fn token_for(user_id: &str) -> String {
    format!("tok_{user_id}")
}
