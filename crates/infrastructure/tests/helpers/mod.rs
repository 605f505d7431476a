mod builders;
mod dns_server_mock;

pub use builders::{multi_question_request, request};
pub use dns_server_mock::{MockDnsServer, MockMode};
