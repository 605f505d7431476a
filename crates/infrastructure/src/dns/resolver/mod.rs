mod forwarding;
mod internal;

pub use forwarding::ForwardingResolver;
pub use internal::InternalResolver;

use minidns_domain::{Message, ResponseCode};

/// NotImplemented reply for any request whose OPCODE is not QUERY.
pub(crate) fn reject_unsupported_opcode(request: &Message) -> Option<Message> {
    if request.header.flags.opcode.is_query() {
        return None;
    }
    Some(Message::error_response(
        request,
        ResponseCode::NotImplemented,
    ))
}
