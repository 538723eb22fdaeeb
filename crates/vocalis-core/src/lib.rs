#![allow(clippy::must_use_candidate)]

mod error;
mod identity;

pub use error::{ErrorBody, ErrorDetails, HttpError};
pub use identity::UserIdentity;
