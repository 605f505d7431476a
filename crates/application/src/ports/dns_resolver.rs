use async_trait::async_trait;
use minidns_domain::Message;

/// Produces the response for an already-decoded request.
///
/// Implementations never fail: upstream and internal errors are reported to
/// the client through the RCODE of the returned message (ServerFailure,
/// NotImplemented), never as an `Err`.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, request: &Message) -> Message;

    /// Short identifier used in logs ("internal", "forwarding").
    fn name(&self) -> &'static str;
}
