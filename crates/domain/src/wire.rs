//! RFC 1035 message codec: header, labels with compression pointers,
//! questions and resource records.

mod header;
pub mod integer;
mod label;
mod packet;
mod question;
mod resolver;
mod resource;

pub use header::{HeaderFlags, Opcode, ResponseCode, HEADER_LEN};
pub use integer::{decode_uint, encode_uint, WireInt};
pub use label::{Label, MAX_PART_LEN, POINTER_FLAGS};
pub use packet::Packet;
pub use question::Question;
pub use resolver::resolve_domain_name;
pub use resource::Resource;
