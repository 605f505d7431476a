use super::bits::{read_slice, read_u16, read_u32};
use super::decode_section;
use super::name::DomainName;
use super::record_type::{RecordClass, RecordType};
use crate::errors::WireError;
use bytes::BufMut;
use std::net::Ipv4Addr;

/// A resource record with opaque RDATA. RDLENGTH is not stored; it is
/// always recomputed from `rdata` when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub rtype: RecordType,
    pub class: RecordClass,
    /// Seconds the record may be cached; 0 means "do not cache".
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    pub fn new(
        name: DomainName,
        rtype: RecordType,
        class: RecordClass,
        ttl: u32,
        rdata: Vec<u8>,
    ) -> Self {
        Self {
            name,
            rtype,
            class,
            ttl,
            rdata,
        }
    }

    pub fn a(name: DomainName, address: Ipv4Addr, ttl: u32) -> Self {
        Self::new(
            name,
            RecordType::A,
            RecordClass::IN,
            ttl,
            address.octets().to_vec(),
        )
    }

    /// IPv4 address carried by an A/IN record.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.rtype != RecordType::A || self.class != RecordClass::IN {
            return None;
        }
        let octets: [u8; 4] = self.rdata.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }

    pub fn encode_into<B: BufMut>(&self, buf: &mut B) -> Result<(), WireError> {
        let rdlength = u16::try_from(self.rdata.len()).map_err(|_| WireError::RdataTooLong {
            len: self.rdata.len(),
        })?;

        self.name.encode_into(buf)?;
        buf.put_u16(self.rtype.to_u16());
        buf.put_u16(self.class.to_u16());
        buf.put_u32(self.ttl);
        buf.put_u16(rdlength);
        buf.put_slice(&self.rdata);
        Ok(())
    }

    /// Returns the bytes consumed at `offset` and the decoded record.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(usize, Self), WireError> {
        let (name_len, name) = DomainName::decode(buf, offset)?;
        let pos = offset + name_len;

        let rtype = RecordType::from(read_u16(buf, pos)?);
        let class = RecordClass::from(read_u16(buf, pos + 2)?);
        let ttl = read_u32(buf, pos + 4)?;
        let rdlength = usize::from(read_u16(buf, pos + 8)?);
        let rdata = read_slice(buf, pos + 10, rdlength)?.to_vec();

        Ok((
            name_len + 10 + rdlength,
            Self::new(name, rtype, class, ttl, rdata),
        ))
    }
}

/// Decodes exactly `count` resource records starting at `offset`. Returns the
/// offset just past the last one.
pub fn decode_answers(
    buf: &[u8],
    offset: usize,
    count: u16,
) -> Result<(usize, Vec<ResourceRecord>), WireError> {
    decode_section(buf, offset, count, "answer", ResourceRecord::decode)
}
