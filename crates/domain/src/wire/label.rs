use super::integer::{decode_uint, encode_uint, take};
use crate::errors::WireError;

/// Top two bits of a length byte that mark a compression pointer.
pub const POINTER_FLAGS: u8 = 0xC0;

const POINTER_MASK: u16 = 0x3FFF;

pub const MAX_PART_LEN: usize = 63;

/// A domain name as it appears on the wire: either spelled out or a
/// backward reference into the enclosing message.
///
/// A name is one or the other, never both. Suffix compression, where name
/// parts end in a pointer instead of the root label (`3www 0xC00C`), has no
/// representation here: parsing it fails with
/// [`WireError::UnsupportedLabel`], and so does parsing the packet that
/// carries it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// 14-bit offset of a previously written name.
    Pointer(u16),
    /// Dotted name, parts stored without their length prefixes.
    Name(String),
}

impl Label {
    pub fn name(name: impl Into<String>) -> Self {
        Label::Name(name.into())
    }

    pub fn pointer(address: u16) -> Self {
        Label::Pointer(address & POINTER_MASK)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Label::Pointer(_))
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Label::Name(name) => Some(name),
            Label::Pointer(_) => None,
        }
    }

    /// Parses a label starting at `offset`, returning it with the offset just past it.
    pub fn parse(buf: &[u8], offset: usize) -> Result<(Label, usize), WireError> {
        let first = take(buf, offset, 1)?[0];

        if first & POINTER_FLAGS == POINTER_FLAGS {
            let raw: u16 = decode_uint(buf, offset)?;
            return Ok((Label::Pointer(raw & POINTER_MASK), offset + 2));
        }

        let mut name = String::new();
        let mut pos = offset;

        loop {
            let len = take(buf, pos, 1)?[0];
            if len == 0 {
                pos += 1;
                break;
            }
            // Extended label types and a pointer following name parts have no
            // representation in `Label`.
            if len & POINTER_FLAGS != 0 {
                return Err(WireError::UnsupportedLabel {
                    offset: pos,
                    byte: len,
                });
            }

            let part = take(buf, pos + 1, len as usize)?;
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(&String::from_utf8_lossy(part));
            pos += 1 + len as usize;
        }

        Ok((Label::Name(name), pos))
    }

    pub fn serialize(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        match self {
            Label::Pointer(address) => {
                encode_uint(out, (address & POINTER_MASK) | ((POINTER_FLAGS as u16) << 8));
            }
            Label::Name(name) => {
                let name = name.strip_suffix('.').unwrap_or(name);
                if !name.is_empty() {
                    // Validate every part before writing so a bad name leaves `out` untouched.
                    if let Some(bad) = name
                        .split('.')
                        .find(|part| part.is_empty() || part.len() > MAX_PART_LEN)
                    {
                        return Err(WireError::InvalidLabelLength { len: bad.len() });
                    }
                    for part in name.split('.') {
                        out.push(part.len() as u8);
                        out.extend_from_slice(part.as_bytes());
                    }
                }
                out.push(0);
            }
        }
        Ok(())
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::name(name)
    }
}
