//! minidns domain layer: DNS message model, wire codec, errors and configuration.
pub mod config;
pub mod errors;
pub mod message;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::{DomainError, WireError};
pub use message::{
    DomainName, Flags, Header, Label, Message, Opcode, Question, RecordClass, RecordType,
    ResourceRecord, ResponseCode,
};
