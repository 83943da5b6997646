use std::time::Duration;

use crate::config::ProviderConfig;

/// Builds the pooled HTTP client shared by every provider session.
///
/// - Timeouts come from `provider.request_timeout` / `provider.connect_timeout`
/// - TLS through rustls, no OpenSSL dependency
pub fn build_http_client(config: &ProviderConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(user_agent())
        .build()
}

fn user_agent() -> String {
    format!("notify-gateway/{}", crate::pkg_version())
}
