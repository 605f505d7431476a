use super::reject_unsupported_opcode;
use crate::dns::transport::UdpTransport;
use async_trait::async_trait;
use minidns_application::ports::DnsResolver;
use minidns_domain::{DomainError, Message, Question, ResourceRecord, ResponseCode};
use std::time::Duration;
use tracing::{debug, error, info};

/// Forwards each question to one upstream resolver over UDP.
///
/// Questions are sent one at a time, each as its own single-question query
/// with a fresh transaction ID. The first failure turns the whole response
/// into ServerFailure; answers already collected are dropped.
pub struct ForwardingResolver {
    transport: UdpTransport,
    timeout: Duration,
}

impl ForwardingResolver {
    pub async fn connect(upstream: &str, timeout: Duration) -> Result<Self, DomainError> {
        let transport = UdpTransport::connect(upstream).await?;

        info!(
            upstream = %transport.server_addr(),
            timeout_ms = timeout.as_millis() as u64,
            "Forwarding resolver ready"
        );

        Ok(Self { transport, timeout })
    }

    pub fn upstream(&self) -> std::net::SocketAddr {
        self.transport.server_addr()
    }

    async fn forward_question(
        &self,
        question: &Question,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let query = Message::query(fastrand::u16(..), question.clone());
        let query_bytes = query.encode()?;

        debug!(
            id = query.header.id,
            domain = %question.name,
            record_type = %question.qtype,
            "Forwarding question upstream"
        );

        let reply = self.transport.exchange(&query_bytes, self.timeout).await?;
        let response =
            Message::decode(&reply).map_err(|source| DomainError::UpstreamMalformedResponse {
                server: self.upstream().to_string(),
                source,
            })?;

        debug!(
            id = response.header.id,
            rcode = %response.rcode(),
            answers = response.answers.len(),
            "Upstream answered"
        );

        Ok(response.answers)
    }
}

#[async_trait]
impl DnsResolver for ForwardingResolver {
    async fn resolve(&self, request: &Message) -> Message {
        if let Some(rejected) = reject_unsupported_opcode(request) {
            return rejected;
        }

        let mut answers = Vec::new();
        for question in &request.questions {
            match self.forward_question(question).await {
                Ok(mut records) => answers.append(&mut records),
                Err(e) => {
                    let kind = match &e {
                        DomainError::UpstreamTimeout { .. } => "timeout",
                        DomainError::UpstreamMalformedResponse { .. } => "malformed",
                        DomainError::Wire(_) => "encode",
                        _ => "io",
                    };
                    error!(
                        error = %e,
                        kind,
                        id = request.header.id,
                        domain = %question.name,
                        "Upstream query failed"
                    );
                    return Message::error_response(request, ResponseCode::ServerFailure);
                }
            }
        }

        Message::response_for(request, ResponseCode::NoError, answers)
    }

    fn name(&self) -> &'static str {
        "forwarding"
    }
}
