#![allow(dead_code)]
use dnsbridge_domain::{
    HeaderFlags, Label, Opcode, Packet, Question, RecordClass, RecordType, Resource, ResponseCode,
};

/// Assembles raw wire bytes by hand, independent of the codec under test.
pub struct WireBuilder {
    buf: Vec<u8>,
}

impl WireBuilder {
    pub fn header(id: u16, flags: [u8; 2], counts: [u16; 4]) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&flags);
        for count in counts {
            buf.extend_from_slice(&count.to_be_bytes());
        }
        Self { buf }
    }

    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn name(mut self, name: &str) -> Self {
        for part in name.split('.').filter(|p| !p.is_empty()) {
            self.buf.push(part.len() as u8);
            self.buf.extend_from_slice(part.as_bytes());
        }
        self.buf.push(0x00);
        self
    }

    pub fn pointer(mut self, address: u16) -> Self {
        self.buf.extend_from_slice(&(0xC000 | address).to_be_bytes());
        self
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

pub struct PacketBuilder {
    packet: Packet,
}

impl PacketBuilder {
    pub fn new(id: u16) -> Self {
        Self {
            packet: Packet {
                id,
                ..Packet::default()
            },
        }
    }

    pub fn flags(mut self, flags: HeaderFlags) -> Self {
        self.packet.flags = flags;
        self
    }

    pub fn question(mut self, name: &str, qtype: RecordType) -> Self {
        self.packet
            .questions
            .push(Question::new(name, qtype, RecordClass::Internet));
        self
    }

    pub fn answer(mut self, label: Label, rtype: RecordType, ttl: u32, data: &[u8]) -> Self {
        self.packet.answers.push(resource(label, rtype, ttl, data));
        self
    }

    pub fn authority(mut self, label: Label, rtype: RecordType, ttl: u32, data: &[u8]) -> Self {
        self.packet
            .authorities
            .push(resource(label, rtype, ttl, data));
        self
    }

    pub fn additional(mut self, label: Label, rtype: RecordType, ttl: u32, data: &[u8]) -> Self {
        self.packet
            .additional_records
            .push(resource(label, rtype, ttl, data));
        self
    }

    pub fn build(self) -> Packet {
        self.packet
    }
}

fn resource(label: Label, rtype: RecordType, ttl: u32, data: &[u8]) -> Resource {
    Resource::new(label, rtype, RecordClass::Internet, ttl, data.to_vec()).unwrap()
}

pub fn response_flags() -> HeaderFlags {
    HeaderFlags {
        is_response: true,
        opcode: Opcode::StandardQuery,
        authoritative: true,
        recursion_desired: true,
        recursion_available: true,
        response_code: ResponseCode::NoError,
        ..HeaderFlags::default()
    }
}
