pub mod resolver;
pub mod transport;

pub use resolver::{ForwardingResolver, InternalResolver};
pub use transport::UdpTransport;
