use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Upstream `host:port`. When absent the built-in stub resolver answers.
    #[serde(default)]
    pub upstream: Option<String>,

    /// Read deadline for each upstream round trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Address returned by the stub resolver for every question.
    #[serde(default = "default_internal_address")]
    pub internal_address: Ipv4Addr,

    #[serde(default = "default_internal_ttl")]
    pub internal_ttl: u32,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream: None,
            timeout_secs: default_timeout_secs(),
            internal_address: default_internal_address(),
            internal_ttl: default_internal_ttl(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_internal_address() -> Ipv4Addr {
    Ipv4Addr::new(8, 8, 8, 8)
}

fn default_internal_ttl() -> u32 {
    60
}
