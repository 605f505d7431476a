#![allow(dead_code)]
use minidns_domain::{Message, Question, RecordClass, RecordType};

pub fn request(id: u16, name: &str) -> Message {
    multi_question_request(id, &[name])
}

pub fn multi_question_request(id: u16, names: &[&str]) -> Message {
    let questions: Vec<Question> = names
        .iter()
        .map(|name| Question::new(name.parse().unwrap(), RecordType::A, RecordClass::IN))
        .collect();

    let mut message = Message::query(id, questions[0].clone());
    message.questions = questions;
    message.header.qd_count = names.len() as u16;
    message
}
