use serde::Deserialize;
use url::Url;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// Receives `{ "email": ... }` after a first welcome grant
    #[serde(default)]
    pub webhook_url: Option<Url>,
}
