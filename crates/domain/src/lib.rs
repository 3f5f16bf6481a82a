//! dnsbridge domain layer: DNS wire codec, record enumerations, errors and configuration.
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config};
pub use dns_record::{RecordClass, RecordType};
pub use errors::{AsyncError, WireError};
pub use wire::{
    resolve_domain_name, HeaderFlags, Label, Opcode, Packet, Question, Resource, ResponseCode,
};
