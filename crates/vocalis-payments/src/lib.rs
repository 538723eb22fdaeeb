#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod checkout;
mod error;
pub mod event;
mod reconcile;
pub mod signature;

pub use checkout::CheckoutClient;
pub use error::PaymentError;
pub use reconcile::{Reconciler, WebhookOutcome};
pub use signature::SignatureError;

/// Credits added for one completed checkout
pub const CREDITS_PER_PURCHASE: i64 = 500;

/// Price of one credit pack, in cents
pub const PRICE_CENTS: i64 = 500;

/// Line item label shown on the hosted checkout page
pub const PRODUCT_NAME: &str = "500 Credits";
