use std::net::SocketAddr;

use serde::Deserialize;
use url::Url;

use crate::{cors::CorsConfig, health::HealthConfig};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Origin the browser app is served from, used for checkout redirects
    #[serde(default = "default_public_origin")]
    pub public_origin: Url,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            public_origin: default_public_origin(),
            health: HealthConfig::default(),
            cors: None,
        }
    }
}

fn default_public_origin() -> Url {
    Url::parse("http://localhost:3000").expect("static origin is valid")
}
