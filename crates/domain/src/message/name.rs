use super::bits::{read_slice, read_u8};
use crate::errors::WireError;
use bytes::BufMut;
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0xC0;

/// One segment of a domain name. Octets are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Vec<u8>);

impl Label {
    pub fn new(octets: impl Into<Vec<u8>>) -> Self {
        Self(octets.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Label {
    fn from(octets: &[u8]) -> Self {
        Self(octets.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomainName {
    labels: Vec<Label>,
}

impl DomainName {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Writes the uncompressed `<len><octets>...0` form. Compression is
    /// never emitted.
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) -> Result<(), WireError> {
        for label in &self.labels {
            if label.len() > MAX_LABEL_LEN {
                return Err(WireError::LabelTooLong { len: label.len() });
            }
            if label.is_empty() {
                return Err(WireError::EmptyLabel);
            }
            buf.put_u8(label.len() as u8);
            buf.put_slice(label.as_bytes());
        }
        buf.put_u8(0);
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Decodes the name starting at `offset` of the whole message `buf`.
    ///
    /// Returns the number of bytes the name occupies at `offset` (a
    /// compression pointer counts as 2, wherever it leads) and the name.
    ///
    /// Pointers are followed iteratively. Each pointer must land strictly
    /// before the start of the label run it was read from, so the sequence of
    /// jump targets is strictly decreasing and decoding always terminates;
    /// anything else is reported as `PointerCycle`.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(usize, Self), WireError> {
        let mut labels = Vec::new();
        let mut pos = offset;
        let mut run_start = offset;
        let mut consumed: Option<usize> = None;

        loop {
            let octet = read_u8(buf, pos)?;

            match octet & POINTER_MASK {
                0x00 => {
                    pos += 1;
                    if octet == 0 {
                        break;
                    }
                    let len = octet as usize;
                    labels.push(Label::from(read_slice(buf, pos, len)?));
                    pos += len;
                }
                POINTER_MASK => {
                    let low = read_u8(buf, pos + 1)?;
                    let target = (usize::from(octet & !POINTER_MASK) << 8) | usize::from(low);

                    if consumed.is_none() {
                        consumed = Some(pos + 2 - offset);
                    }
                    if target >= buf.len() {
                        return Err(WireError::PointerOutOfRange {
                            offset: pos,
                            target,
                        });
                    }
                    if target >= run_start {
                        return Err(WireError::PointerCycle {
                            offset: pos,
                            target,
                        });
                    }

                    run_start = target;
                    pos = target;
                }
                _ => {
                    return Err(WireError::InvalidLengthOctet { offset: pos, octet });
                }
            }
        }

        let consumed = consumed.unwrap_or(pos - offset);
        Ok((consumed, Self { labels }))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&String::from_utf8_lossy(label.as_bytes()))?;
        }
        Ok(())
    }
}

impl FromStr for DomainName {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let labels = trimmed
            .split('.')
            .map(|part| match part.len() {
                0 => Err(WireError::EmptyLabel),
                len if len > MAX_LABEL_LEN => Err(WireError::LabelTooLong { len }),
                _ => Ok(Label::from(part)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { labels })
    }
}

impl<'a> FromIterator<&'a str> for DomainName {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Label::from).collect())
    }
}
