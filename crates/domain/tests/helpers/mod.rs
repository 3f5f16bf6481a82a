pub mod builders;

#[allow(unused_imports)]
pub use builders::{response_flags, PacketBuilder, WireBuilder};
