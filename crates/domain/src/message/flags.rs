use super::bits::{bit, set_bit};
use std::fmt;

/// Kind of query carried in the header (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    #[default]
    Query,
    InverseQuery,
    Status,
    /// 3-15, reserved for future use.
    ///
    /// Build it with `Opcode::from`. A hand-made `Reserved(0..=2)` encodes
    /// as the named opcode and decodes back as that variant instead.
    Reserved(u8),
}

impl Opcode {
    pub fn to_u8(self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::InverseQuery => 1,
            Opcode::Status => 2,
            Opcode::Reserved(code) => code & 0x0F,
        }
    }

    pub fn is_query(self) -> bool {
        self == Opcode::Query
    }
}

impl From<u8> for Opcode {
    fn from(code: u8) -> Self {
        match code & 0x0F {
            0 => Opcode::Query,
            1 => Opcode::InverseQuery,
            2 => Opcode::Status,
            other => Opcode::Reserved(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    /// 6-15, reserved for future use.
    ///
    /// Build it with `ResponseCode::from`. A hand-made `Reserved(0..=5)`
    /// encodes as the named code and decodes back as that variant instead.
    Reserved(u8),
}

impl ResponseCode {
    pub fn to_u8(self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Reserved(code) => code & 0x0F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormatError => "FORMERR",
            ResponseCode::ServerFailure => "SERVFAIL",
            ResponseCode::NameError => "NXDOMAIN",
            ResponseCode::NotImplemented => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Reserved(_) => "RESERVED",
        }
    }
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            other => ResponseCode::Reserved(other),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Reserved(code) => write!(f, "RESERVED{}", code),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Second 16-bit word of the header.
///
/// ```text
///   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
/// +--+-----------+--+--+--+--+--------+-----------+
/// |QR|  Opcode   |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+-----------+--+--+--+--+--------+-----------+
/// ```
///
/// `z` holds all three reserved bits so that whatever a peer sent is echoed
/// back unchanged when the header is re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags {
    pub qr: bool,
    pub opcode: Opcode,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: ResponseCode,
}

impl Flags {
    pub fn to_u16(&self) -> u16 {
        set_bit(self.qr, 15)
            | (u16::from(self.opcode.to_u8()) << 11)
            | set_bit(self.aa, 10)
            | set_bit(self.tc, 9)
            | set_bit(self.rd, 8)
            | set_bit(self.ra, 7)
            | (u16::from(self.z & 0x07) << 4)
            | u16::from(self.rcode.to_u8())
    }

    pub fn from_u16(value: u16) -> Self {
        Self {
            qr: bit(value, 15),
            opcode: Opcode::from(((value >> 11) & 0x0F) as u8),
            aa: bit(value, 10),
            tc: bit(value, 9),
            rd: bit(value, 8),
            ra: bit(value, 7),
            z: ((value >> 4) & 0x07) as u8,
            rcode: ResponseCode::from((value & 0x0F) as u8),
        }
    }
}
