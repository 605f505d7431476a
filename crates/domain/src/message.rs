//! RFC 1035 §4 message codec.
//!
//! Only the header, question and answer sections are modelled. Authority and
//! additional sections are never parsed: their counts are kept on a decoded
//! header, any bytes after the answers are ignored, and `encode` always writes
//! them as empty.

pub mod bits;
mod flags;
mod header;
mod name;
mod question;
mod record;
mod record_type;

pub use flags::{Flags, Opcode, ResponseCode};
pub use header::{Header, HEADER_LEN};
pub use name::{DomainName, Label, MAX_LABEL_LEN};
pub use question::{decode_questions, Question};
pub use record::{decode_answers, ResourceRecord};
pub use record_type::{RecordClass, RecordType};

use crate::errors::WireError;

/// Classic DNS-over-UDP payload limit without EDNS(0).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
}

impl Message {
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let header = Header::decode(buf)?;
        let (offset, questions) = decode_questions(buf, HEADER_LEN, header.qd_count)?;
        let (_, answers) = decode_answers(buf, offset, header.an_count)?;

        Ok(Self {
            header,
            questions,
            answers,
        })
    }

    /// Serializes header, questions and answers. QDCOUNT and ANCOUNT are
    /// taken from the sections actually written; NSCOUNT and ARCOUNT are 0.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let header = Header {
            qd_count: section_count("question", self.questions.len())?,
            an_count: section_count("answer", self.answers.len())?,
            ns_count: 0,
            ar_count: 0,
            ..self.header
        };

        let mut buf = Vec::with_capacity(MAX_UDP_MESSAGE_SIZE);
        header.encode_into(&mut buf);
        for question in &self.questions {
            question.encode_into(&mut buf)?;
        }
        for answer in &self.answers {
            answer.encode_into(&mut buf)?;
        }
        Ok(buf)
    }

    /// A standard recursive query for a single question.
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            header: Header {
                id,
                flags: Flags {
                    rd: true,
                    ..Flags::default()
                },
                qd_count: 1,
                ..Header::default()
            },
            questions: vec![question],
            answers: Vec::new(),
        }
    }

    /// Builds the reply to `request`: ID, OPCODE, RD and the full question
    /// list are echoed, QR is set and the counts match the sections.
    pub fn response_for(
        request: &Message,
        rcode: ResponseCode,
        answers: Vec<ResourceRecord>,
    ) -> Self {
        Self {
            header: Header {
                id: request.header.id,
                flags: Flags {
                    qr: true,
                    opcode: request.header.flags.opcode,
                    aa: false,
                    tc: false,
                    rd: request.header.flags.rd,
                    ra: false,
                    z: 0,
                    rcode,
                },
                qd_count: saturating_count(request.questions.len()),
                an_count: saturating_count(answers.len()),
                ns_count: 0,
                ar_count: 0,
            },
            questions: request.questions.clone(),
            answers,
        }
    }

    pub fn error_response(request: &Message, rcode: ResponseCode) -> Self {
        Self::response_for(request, rcode, Vec::new())
    }

    /// FormatError reply for a datagram that could not be decoded. ID, OPCODE
    /// and RD are salvaged from whatever header bytes are present.
    pub fn format_error(raw: &[u8]) -> Self {
        let id = match raw {
            [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
            _ => 0,
        };
        let (opcode, rd) = raw
            .get(2)
            .map(|b| (Opcode::from((b >> 3) & 0x0F), b & 0x01 == 1))
            .unwrap_or_default();

        Self {
            header: Header {
                id,
                flags: Flags {
                    qr: true,
                    opcode,
                    rd,
                    rcode: ResponseCode::FormatError,
                    ..Flags::default()
                },
                ..Header::default()
            },
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    pub fn is_response(&self) -> bool {
        self.header.flags.qr
    }

    pub fn rcode(&self) -> ResponseCode {
        self.header.flags.rcode
    }
}

fn section_count(section: &'static str, len: usize) -> Result<u16, WireError> {
    u16::try_from(len).map_err(|_| WireError::SectionTooLarge { section, len })
}

fn saturating_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

/// Decodes `count` consecutive entries with `decode_one`, which returns the
/// bytes it consumed. Running out of input at an entry boundary is a
/// `CountMismatch`; running out inside an entry is whatever `decode_one`
/// reports.
pub(crate) fn decode_section<T>(
    buf: &[u8],
    offset: usize,
    count: u16,
    section: &'static str,
    decode_one: impl Fn(&[u8], usize) -> Result<(usize, T), WireError>,
) -> Result<(usize, Vec<T>), WireError> {
    let mut entries = Vec::with_capacity(usize::from(count.min(64)));
    let mut offset = offset;

    for decoded in 0..count {
        if offset >= buf.len() {
            return Err(WireError::CountMismatch {
                section,
                declared: count,
                decoded,
            });
        }
        let (consumed, entry) = decode_one(buf, offset)?;
        offset += consumed;
        entries.push(entry);
    }

    Ok((offset, entries))
}
