use crate::ports::DnsResolver;
use minidns_domain::{Message, ResponseCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Turns one inbound datagram into the datagram to send back.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    /// Returns `None` when nothing should be sent back.
    ///
    /// Undecodable packets get a FormatError reply without reaching the
    /// resolver. Packets that are themselves responses are dropped.
    pub async fn execute(&self, packet: &[u8]) -> Option<Vec<u8>> {
        let start = Instant::now();

        let request = match Message::decode(packet) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, bytes = packet.len(), "Malformed DNS query");
                return encode_or_log(&Message::format_error(packet));
            }
        };

        if request.is_response() {
            warn!(id = request.header.id, "Ignoring DNS response sent to the server");
            return None;
        }

        if let Some(question) = request.questions.first() {
            debug!(
                id = request.header.id,
                domain = %question.name,
                record_type = %question.qtype,
                questions = request.questions.len(),
                resolver = self.resolver.name(),
                "DNS query received"
            );
        }

        let response = self.resolver.resolve(&request).await;

        let wire = match response.encode() {
            Ok(wire) => wire,
            Err(e) => {
                error!(error = %e, id = request.header.id, "Failed to encode DNS response");
                let fallback = Message::error_response(&request, ResponseCode::ServerFailure);
                encode_or_log(&fallback)?
            }
        };

        debug!(
            id = response.header.id,
            rcode = %response.rcode(),
            answers = response.answers.len(),
            bytes = wire.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "DNS response ready"
        );

        Some(wire)
    }
}

fn encode_or_log(message: &Message) -> Option<Vec<u8>> {
    match message.encode() {
        Ok(wire) => Some(wire),
        Err(e) => {
            error!(error = %e, id = message.header.id, "Failed to encode error response");
            None
        }
    }
}
