#![allow(dead_code)]
use async_trait::async_trait;
use minidns_application::ports::DnsResolver;
use minidns_domain::{Message, ResourceRecord, ResponseCode};
use std::sync::{Arc, Mutex};

/// Resolver double that records every request and replies with a canned
/// answer set.
pub struct MockDnsResolver {
    answers: Arc<Mutex<Vec<ResourceRecord>>>,
    requests: Arc<Mutex<Vec<Message>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_answers(&self, answers: Vec<ResourceRecord>) {
        *self.answers.lock().unwrap() = answers;
    }

    pub fn requests(&self) -> Vec<Message> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, request: &Message) -> Message {
        self.requests.lock().unwrap().push(request.clone());
        let answers = self.answers.lock().unwrap().clone();
        Message::response_for(request, ResponseCode::NoError, answers)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
