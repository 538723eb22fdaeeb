use serde::{Deserialize, Serialize};

/// A user resolved from a bearer credential by the identity gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Opaque user id issued by the auth service
    pub id: String,
    /// Primary email, if the auth service exposes one
    #[serde(default)]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self { id: id.into(), email }
    }
}
