mod anomaly;
mod asset;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use super::config::ExternalConfig;

pub use anomaly::{HttpAnomalyService, LoggingAnomalyService};
pub use asset::{HttpAssetLookupService, PermissiveAssetLookupService};

pub fn build_http_client(config: &ExternalConfig) -> anyhow::Result<Arc<Client>> {
    Ok(Arc::new(
        Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?,
    ))
}

/// Joins the base url and a path without doubling the slash.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
