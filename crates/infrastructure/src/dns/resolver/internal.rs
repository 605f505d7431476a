use super::reject_unsupported_opcode;
use async_trait::async_trait;
use minidns_application::ports::DnsResolver;
use minidns_domain::config::ResolverConfig;
use minidns_domain::{Message, ResourceRecord, ResponseCode};
use std::net::Ipv4Addr;
use tracing::debug;

/// Stub resolver that answers every question with one fixed A record.
pub struct InternalResolver {
    address: Ipv4Addr,
    ttl: u32,
}

impl InternalResolver {
    pub fn new(address: Ipv4Addr, ttl: u32) -> Self {
        Self { address, ttl }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.internal_address, config.internal_ttl)
    }
}

impl Default for InternalResolver {
    fn default() -> Self {
        Self::new(Ipv4Addr::new(8, 8, 8, 8), 60)
    }
}

#[async_trait]
impl DnsResolver for InternalResolver {
    async fn resolve(&self, request: &Message) -> Message {
        if let Some(rejected) = reject_unsupported_opcode(request) {
            return rejected;
        }

        let answers = request
            .questions
            .iter()
            .map(|q| ResourceRecord::a(q.name.clone(), self.address, self.ttl))
            .collect::<Vec<_>>();

        debug!(
            id = request.header.id,
            answers = answers.len(),
            address = %self.address,
            "Internal resolver answered"
        );

        Message::response_for(request, ResponseCode::NoError, answers)
    }

    fn name(&self) -> &'static str {
        "internal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minidns_domain::{Opcode, Question, RecordClass, RecordType};

    fn request(names: &[&str]) -> Message {
        let mut message = Message::query(
            0x0101,
            Question::new(names[0].parse().unwrap(), RecordType::A, RecordClass::IN),
        );
        for name in &names[1..] {
            message.questions.push(Question::new(
                name.parse().unwrap(),
                RecordType::A,
                RecordClass::IN,
            ));
        }
        message.header.qd_count = names.len() as u16;
        message
    }

    #[tokio::test]
    async fn test_one_answer_per_question() {
        let resolver = InternalResolver::new(Ipv4Addr::new(10, 0, 0, 1), 30);
        let response = resolver.resolve(&request(&["a.test", "b.test"])).await;

        assert_eq!(response.answers.len(), 2);
        assert_eq!(response.header.an_count, 2);
        assert_eq!(response.answers[1].name.to_string(), "b.test");
        assert!(response
            .answers
            .iter()
            .all(|a| a.ttl == 30 && a.ipv4() == Some(Ipv4Addr::new(10, 0, 0, 1))));
    }

    #[tokio::test]
    async fn test_default_answers_google_dns() {
        let response = InternalResolver::default()
            .resolve(&request(&["example.com"]))
            .await;

        assert_eq!(response.answers[0].ipv4(), Some(Ipv4Addr::new(8, 8, 8, 8)));
        assert_eq!(response.answers[0].ttl, 60);
    }

    #[tokio::test]
    async fn test_inverse_query_not_implemented() {
        let mut req = request(&["example.com"]);
        req.header.flags.opcode = Opcode::InverseQuery;

        let response = InternalResolver::default().resolve(&req).await;

        assert_eq!(response.rcode(), ResponseCode::NotImplemented);
        assert!(response.answers.is_empty());
        assert_eq!(response.questions, req.questions);
    }

    #[test]
    fn test_from_config_uses_internal_settings() {
        let config = ResolverConfig {
            internal_address: Ipv4Addr::new(192, 0, 2, 7),
            internal_ttl: 5,
            ..ResolverConfig::default()
        };
        let resolver = InternalResolver::from_config(&config);
        assert_eq!(resolver.address, Ipv4Addr::new(192, 0, 2, 7));
        assert_eq!(resolver.ttl, 5);
    }
}
