use super::bits::read_u16;
use super::name::DomainName;
use super::record_type::{RecordClass, RecordType};
use super::decode_section;
use crate::errors::WireError;
use bytes::BufMut;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: DomainName,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

impl Question {
    pub fn new(name: DomainName, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            name,
            qtype,
            qclass,
        }
    }

    pub fn encode_into<B: BufMut>(&self, buf: &mut B) -> Result<(), WireError> {
        self.name.encode_into(buf)?;
        buf.put_u16(self.qtype.to_u16());
        buf.put_u16(self.qclass.to_u16());
        Ok(())
    }

    /// Returns the bytes consumed at `offset` and the decoded question.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(usize, Self), WireError> {
        let (name_len, name) = DomainName::decode(buf, offset)?;
        let pos = offset + name_len;
        let qtype = RecordType::from(read_u16(buf, pos)?);
        let qclass = RecordClass::from(read_u16(buf, pos + 2)?);

        Ok((name_len + 4, Self::new(name, qtype, qclass)))
    }
}

/// Decodes exactly `count` questions starting at `offset`. Returns the offset
/// just past the last one.
pub fn decode_questions(
    buf: &[u8],
    offset: usize,
    count: u16,
) -> Result<(usize, Vec<Question>), WireError> {
    decode_section(buf, offset, count, "question", Question::decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_format() {
        let question = Question::new(
            "codecrafters.io".parse().unwrap(),
            RecordType::A,
            RecordClass::IN,
        );
        let mut buf = Vec::new();
        question.encode_into(&mut buf).unwrap();

        assert_eq!(buf, b"\x0ccodecrafters\x02io\x00\x00\x01\x00\x01".to_vec());

        let (consumed, decoded) = Question::decode(&buf, 0).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded, question);
    }

    #[test]
    fn test_missing_type_is_truncated() {
        let buf = b"\x02io\x00\x00";
        assert!(matches!(
            Question::decode(buf, 0),
            Err(WireError::Truncated { .. })
        ));
    }

    #[test]
    fn test_count_beyond_buffer_is_count_mismatch() {
        let mut buf = Vec::new();
        Question::new("a.b".parse().unwrap(), RecordType::A, RecordClass::IN)
            .encode_into(&mut buf)
            .unwrap();

        assert_eq!(
            decode_questions(&buf, 0, 2),
            Err(WireError::CountMismatch {
                section: "question",
                declared: 2,
                decoded: 1,
            })
        );
    }
}
