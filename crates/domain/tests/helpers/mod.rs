mod builders;

pub use builders::{domain, MessageBuilder};
