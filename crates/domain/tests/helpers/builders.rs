#![allow(dead_code)]
use minidns_domain::{
    DomainName, Flags, Header, Message, Opcode, Question, RecordClass, RecordType,
    ResourceRecord, ResponseCode,
};
use std::net::Ipv4Addr;

pub struct MessageBuilder {
    id: u16,
    flags: Flags,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self {
            id: 1234,
            flags: Flags {
                rd: true,
                ..Flags::default()
            },
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn opcode(mut self, opcode: Opcode) -> Self {
        self.flags.opcode = opcode;
        self
    }

    pub fn response(mut self, rcode: ResponseCode) -> Self {
        self.flags.qr = true;
        self.flags.rcode = rcode;
        self
    }

    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn question(mut self, name: &str, qtype: RecordType) -> Self {
        self.questions
            .push(Question::new(domain(name), qtype, RecordClass::IN));
        self
    }

    pub fn a_answer(mut self, name: &str, address: Ipv4Addr, ttl: u32) -> Self {
        self.answers
            .push(ResourceRecord::a(domain(name), address, ttl));
        self
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.answers.push(record);
        self
    }

    pub fn build(self) -> Message {
        Message {
            header: Header {
                id: self.id,
                flags: self.flags,
                qd_count: self.questions.len() as u16,
                an_count: self.answers.len() as u16,
                ns_count: 0,
                ar_count: 0,
            },
            questions: self.questions,
            answers: self.answers,
        }
    }
}

pub fn domain(name: &str) -> DomainName {
    name.parse().expect("valid domain name")
}
