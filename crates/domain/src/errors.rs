use thiserror::Error;

/// Failures while encoding or decoding RFC 1035 wire data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Truncated message: needed {needed} byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("Label of {len} octets exceeds the 63 octet limit")]
    LabelTooLong { len: usize },

    #[error("Empty label inside a domain name")]
    EmptyLabel,

    #[error("Invalid length octet {octet:#04x} at offset {offset}")]
    InvalidLengthOctet { offset: usize, octet: u8 },

    #[error("Compression pointer at offset {offset} targets {target}, past the end of the message")]
    PointerOutOfRange { offset: usize, target: usize },

    #[error("Compression pointer at offset {offset} targets {target}, which does not point backward")]
    PointerCycle { offset: usize, target: usize },

    #[error("{section} section declares {declared} entries but only {decoded} fit in the message")]
    CountMismatch {
        section: &'static str,
        declared: u16,
        decoded: u16,
    },

    #[error("{section} section holds {len} entries, more than a 16-bit count allows")]
    SectionTooLarge { section: &'static str, len: usize },

    #[error("RDATA of {len} octets does not fit a 16-bit RDLENGTH")]
    RdataTooLong { len: usize },
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid upstream address: {0}")]
    InvalidUpstreamAddress(String),

    #[error("Upstream I/O error with {server}: {message}")]
    UpstreamIo { server: String, message: String },

    #[error("Upstream timeout waiting for {server}")]
    UpstreamTimeout { server: String },

    #[error("Malformed response from {server}: {source}")]
    UpstreamMalformedResponse {
        server: String,
        #[source]
        source: WireError,
    },

    #[error("Transaction ID mismatch from {server}: expected {expected:#06x}, got {received:#06x}")]
    UpstreamIdMismatch {
        server: String,
        expected: u16,
        received: u16,
    },

    #[error("Wire format error: {0}")]
    Wire(#[from] WireError),
}

impl DomainError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DomainError::UpstreamTimeout { .. })
    }
}
