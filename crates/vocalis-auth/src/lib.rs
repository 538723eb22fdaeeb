mod bearer;
mod error;
mod resolver;

pub use bearer::extract_bearer;
pub use error::AuthError;
pub use resolver::IdentityResolver;
