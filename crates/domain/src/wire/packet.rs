use super::header::{HeaderFlags, HEADER_LEN};
use super::integer::{decode_uint, encode_uint};
use super::question::Question;
use super::resolver::resolve_domain_name;
use super::resource::Resource;
use crate::errors::WireError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// One DNS message. Built fresh for every datagram; holds no state
/// beyond its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packet {
    pub id: u16,
    pub flags: HeaderFlags,
    pub questions: Vec<Question>,
    pub answers: Vec<Resource>,
    pub authorities: Vec<Resource>,
    pub additional_records: Vec<Resource>,
}

/// Parses `count` consecutive entries starting at `offset`, returning the end offset.
fn collect_section<T>(
    buf: &[u8],
    offset: usize,
    count: u16,
    parser: fn(&[u8], usize) -> Result<(T, usize), WireError>,
    receiver: &mut Vec<T>,
) -> Result<usize, WireError> {
    let mut pos = offset;
    for _ in 0..count {
        let (entry, next) = parser(buf, pos)?;
        receiver.push(entry);
        pos = next;
    }
    Ok(pos)
}

fn section_count(len: usize) -> Result<u16, WireError> {
    u16::try_from(len).map_err(|_| WireError::SectionOverflow { count: len })
}

impl Packet {
    pub fn parse(buf: &[u8]) -> Result<Packet, WireError> {
        if buf.len() < HEADER_LEN {
            return Err(WireError::TooShort { len: buf.len() });
        }

        let mut packet = Packet {
            id: decode_uint(buf, 0)?,
            flags: HeaderFlags::from_bytes([buf[2], buf[3]]),
            ..Packet::default()
        };

        let question_count: u16 = decode_uint(buf, 4)?;
        let answer_count: u16 = decode_uint(buf, 6)?;
        let authority_count: u16 = decode_uint(buf, 8)?;
        let additional_count: u16 = decode_uint(buf, 10)?;

        let pos = collect_section(
            buf,
            HEADER_LEN,
            question_count,
            Question::parse,
            &mut packet.questions,
        )?;
        let pos = collect_section(buf, pos, answer_count, Resource::parse, &mut packet.answers)?;
        let pos = collect_section(
            buf,
            pos,
            authority_count,
            Resource::parse,
            &mut packet.authorities,
        )?;
        // Anything after the additional section is ignored.
        collect_section(
            buf,
            pos,
            additional_count,
            Resource::parse,
            &mut packet.additional_records,
        )?;

        Ok(packet)
    }

    /// Encodes the packet. Section counts always come from the section
    /// lengths; nothing is written to the caller unless every entry encodes.
    pub fn serialize(&self) -> Result<Vec<u8>, WireError> {
        let mut out = Vec::with_capacity(512);

        encode_uint(&mut out, self.id);
        out.extend_from_slice(&self.flags.to_bytes());
        encode_uint(&mut out, section_count(self.questions.len())?);
        encode_uint(&mut out, section_count(self.answers.len())?);
        encode_uint(&mut out, section_count(self.authorities.len())?);
        encode_uint(&mut out, section_count(self.additional_records.len())?);

        for question in &self.questions {
            question.serialize(&mut out)?;
        }
        for resource in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additional_records)
        {
            resource.serialize(&mut out)?;
        }

        Ok(out)
    }

    pub fn to_base64(&self) -> Result<String, WireError> {
        self.serialize().map(|bytes| STANDARD.encode(bytes))
    }

    /// Resolved name of the first question, following compression pointers in `buf`.
    pub fn query_name(&self, buf: &[u8]) -> Option<Result<String, WireError>> {
        self.questions
            .first()
            .map(|question| resolve_domain_name(buf, &question.label))
    }

    pub fn is_response(&self) -> bool {
        self.flags.is_response
    }
}
