use dnsbridge_domain::Packet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatagramStats {
    pub received: u64,
    pub dropped: u64,
    pub replied: u64,
}

/// Turns one inbound datagram into an optional reply.
///
/// Malformed input is logged and dropped. A well-formed packet is echoed back
/// re-encoded, and nothing is sent if encoding fails.
#[derive(Default)]
pub struct DatagramHandler {
    received: AtomicU64,
    dropped: AtomicU64,
    replied: AtomicU64,
}

impl DatagramHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        self.received.fetch_add(1, Ordering::Relaxed);

        let packet = match Packet::parse(datagram) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(error = %e, len = datagram.len(), "Dropping malformed datagram");
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        match packet.query_name(datagram) {
            Some(Ok(name)) => info!(id = packet.id, "looking up {}", name),
            Some(Err(e)) => warn!(id = packet.id, error = %e, "Query name could not be resolved"),
            None => info!(id = packet.id, "query without a resolvable name"),
        }

        match packet.serialize() {
            Ok(reply) => {
                debug!(id = packet.id, len = reply.len(), "Sending reply");
                self.replied.fetch_add(1, Ordering::Relaxed);
                Some(reply)
            }
            Err(e) => {
                warn!(id = packet.id, error = %e, "Failed to encode reply");
                self.dropped.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn stats(&self) -> DatagramStats {
        DatagramStats {
            received: self.received.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            replied: self.replied.load(Ordering::Relaxed),
        }
    }
}
