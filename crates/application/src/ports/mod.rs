mod dns_resolver;

pub use dns_resolver::DnsResolver;

// Re-export for convenience
pub use minidns_domain::Message;
