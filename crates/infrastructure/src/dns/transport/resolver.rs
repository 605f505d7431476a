use minidns_domain::DomainError;
use std::net::SocketAddr;

/// Resolves an upstream `host:port` string to its first socket address.
///
/// Literal addresses never touch the system resolver.
pub async fn resolve_upstream(target: &str) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let mut addrs = tokio::net::lookup_host(target).await.map_err(|e| {
        DomainError::InvalidUpstreamAddress(format!("{}: {}", target, e))
    })?;

    addrs.next().ok_or_else(|| {
        DomainError::InvalidUpstreamAddress(format!("No addresses found for {}", target))
    })
}
