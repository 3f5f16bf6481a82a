use super::integer::{decode_uint, encode_uint, take};
use super::label::Label;
use crate::dns_record::{RecordClass, RecordType};
use crate::errors::WireError;

/// A resource record. The payload is carried opaquely; `length` must
/// always equal `data.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub label: Label,
    pub rtype: RecordType,
    pub rclass: RecordClass,
    pub ttl: u32,
    pub length: u16,
    pub data: Vec<u8>,
}

impl Resource {
    /// Builds a record whose declared length is taken from `data`.
    pub fn new(
        label: impl Into<Label>,
        rtype: RecordType,
        rclass: RecordClass,
        ttl: u32,
        data: Vec<u8>,
    ) -> Result<Self, WireError> {
        let length = u16::try_from(data.len())
            .map_err(|_| WireError::RdataTooLong { len: data.len() })?;
        Ok(Self {
            label: label.into(),
            rtype,
            rclass,
            ttl,
            length,
            data,
        })
    }

    pub fn parse(buf: &[u8], offset: usize) -> Result<(Resource, usize), WireError> {
        let (label, pos) = Label::parse(buf, offset)?;
        let rtype = RecordType::from_u16(decode_uint(buf, pos)?);
        let rclass = RecordClass::from_u16(decode_uint(buf, pos + 2)?);
        let ttl: u32 = decode_uint(buf, pos + 4)?;
        let length: u16 = decode_uint(buf, pos + 8)?;
        let data = take(buf, pos + 10, length as usize)?.to_vec();

        Ok((
            Resource {
                label,
                rtype,
                rclass,
                ttl,
                length,
                data,
            },
            pos + 10 + length as usize,
        ))
    }

    pub fn serialize(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        if self.length as usize != self.data.len() {
            return Err(WireError::RdataLengthMismatch {
                declared: self.length,
                actual: self.data.len(),
            });
        }

        self.label.serialize(out)?;
        encode_uint(out, self.rtype.to_u16());
        encode_uint(out, self.rclass.to_u16());
        encode_uint(out, self.ttl);
        encode_uint(out, self.length);
        out.extend_from_slice(&self.data);
        Ok(())
    }
}
