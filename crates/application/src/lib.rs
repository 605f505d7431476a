//! minidns application layer: the resolver port and the packet handling use case.
pub mod ports;
pub mod use_cases;
