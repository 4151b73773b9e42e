use std::net::SocketAddr;

use clap::Args;

// Default upstream endpoints. The catalog API rejects requests that lack the
// Referer and User-Agent below.
pub const ALLANIME_API: &str = "https://api.allanime.to";
pub const ALLANIME_BASE: &str = "https://allanime.to";
pub const ALLANIME_REFR: &str = "https://allanime.to";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Relay configuration, built once at startup and shared read-only.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "ANIRELAY_BIND", default_value = "0.0.0.0:8787")]
    pub bind: SocketAddr,

    /// Catalog API origin that `/api` queries are forwarded to
    #[arg(long, env = "ANIRELAY_API_BASE", default_value = ALLANIME_API)]
    pub api_base: String,

    /// Origin that relative provider URLs are resolved against
    #[arg(long, env = "ANIRELAY_PROVIDER_BASE", default_value = ALLANIME_BASE)]
    pub provider_base: String,

    /// Referer sent on every outbound request
    #[arg(long, env = "ANIRELAY_REFERER", default_value = ALLANIME_REFR)]
    pub referer: String,

    /// User-Agent sent on every outbound request
    #[arg(long, env = "ANIRELAY_USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8787)),
            api_base: ALLANIME_API.to_string(),
            provider_base: ALLANIME_BASE.to_string(),
            referer: ALLANIME_REFR.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Upstream URL for a relayed catalog query. `query` excludes the `?`.
    pub fn api_url(&self, query: Option<&str>) -> String {
        let base = self.api_base.trim_end_matches('/');
        match query {
            Some(q) if !q.is_empty() => format!("{}/api?{}", base, q),
            _ => format!("{}/api", base),
        }
    }

    /// Absolute page URL for a provider fragment.
    pub fn provider_url(&self, fragment: &str) -> String {
        if fragment.starts_with("http://") || fragment.starts_with("https://") {
            return fragment.to_string();
        }

        let base = self.provider_base.trim_end_matches('/');
        if fragment.starts_with('/') {
            format!("{}{}", base, fragment)
        } else {
            format!("{}/{}", base, fragment)
        }
    }
}
