use super::integer::{decode_uint, encode_uint};
use super::label::Label;
use crate::dns_record::{RecordClass, RecordType};
use crate::errors::WireError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub label: Label,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

impl Question {
    pub fn new(label: impl Into<Label>, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            label: label.into(),
            qtype,
            qclass,
        }
    }

    pub fn parse(buf: &[u8], offset: usize) -> Result<(Question, usize), WireError> {
        let (label, pos) = Label::parse(buf, offset)?;
        let qtype = RecordType::from_u16(decode_uint(buf, pos)?);
        let qclass = RecordClass::from_u16(decode_uint(buf, pos + 2)?);

        Ok((
            Question {
                label,
                qtype,
                qclass,
            },
            pos + 4,
        ))
    }

    pub fn serialize(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        self.label.serialize(out)?;
        encode_uint(out, self.qtype.to_u16());
        encode_uint(out, self.qclass.to_u16());
        Ok(())
    }
}
