use super::bits::read_u16;
use super::flags::Flags;
use crate::errors::WireError;
use bytes::BufMut;

pub const HEADER_LEN: usize = 12;

/// Fixed 12-byte message header (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_u16(self.id);
        buf.put_u16(self.flags.to_u16());
        buf.put_u16(self.qd_count);
        buf.put_u16(self.an_count);
        buf.put_u16(self.ns_count);
        buf.put_u16(self.ar_count);
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        self.encode_into(&mut &mut bytes[..]);
        bytes
    }

    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < HEADER_LEN {
            return Err(WireError::Truncated {
                offset: buf.len(),
                needed: HEADER_LEN - buf.len(),
            });
        }

        Ok(Self {
            id: read_u16(buf, 0)?,
            flags: Flags::from_u16(read_u16(buf, 2)?),
            qd_count: read_u16(buf, 4)?,
            an_count: read_u16(buf, 6)?,
            ns_count: read_u16(buf, 8)?,
            ar_count: read_u16(buf, 10)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Opcode, ResponseCode};

    #[test]
    fn test_header_wire_layout() {
        let header = Header {
            id: 0x04D2,
            flags: Flags {
                qr: true,
                rcode: ResponseCode::NoError,
                ..Flags::default()
            },
            qd_count: 1,
            an_count: 2,
            ns_count: 3,
            ar_count: 4,
        };

        assert_eq!(
            header.to_bytes(),
            [0x04, 0xD2, 0x80, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]
        );
    }

    #[test]
    fn test_header_round_trip() {
        let header = Header {
            id: 0xBEEF,
            flags: Flags {
                qr: false,
                opcode: Opcode::InverseQuery,
                rd: true,
                z: 0b101,
                ..Flags::default()
            },
            qd_count: 7,
            an_count: 0,
            ns_count: 0,
            ar_count: 65535,
        };

        assert_eq!(Header::decode(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn test_short_header_is_truncated() {
        for len in 0..HEADER_LEN {
            let buf = vec![0u8; len];
            assert!(matches!(
                Header::decode(&buf),
                Err(WireError::Truncated { .. })
            ));
        }
    }
}
