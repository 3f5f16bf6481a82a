pub mod datagram_handler;

pub use datagram_handler::{DatagramHandler, DatagramStats};
