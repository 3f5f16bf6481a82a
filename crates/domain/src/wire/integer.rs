use crate::errors::WireError;

/// Fixed-width unsigned integer stored big-endian on the wire.
pub trait WireInt: Copy {
    const WIDTH: usize;

    fn from_be_slice(bytes: &[u8]) -> Self;

    fn push_be(self, out: &mut Vec<u8>);
}

impl WireInt for u16 {
    const WIDTH: usize = 2;

    fn from_be_slice(bytes: &[u8]) -> Self {
        u16::from_be_bytes([bytes[0], bytes[1]])
    }

    fn push_be(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl WireInt for u32 {
    const WIDTH: usize = 4;

    fn from_be_slice(bytes: &[u8]) -> Self {
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn push_be(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

/// Returns `buf[offset..offset + needed]`, or `TruncatedField` when the buffer is too short.
pub fn take(buf: &[u8], offset: usize, needed: usize) -> Result<&[u8], WireError> {
    offset
        .checked_add(needed)
        .filter(|&end| end <= buf.len())
        .map(|end| &buf[offset..end])
        .ok_or(WireError::TruncatedField {
            offset,
            needed,
            len: buf.len(),
        })
}

pub fn decode_uint<T: WireInt>(buf: &[u8], offset: usize) -> Result<T, WireError> {
    take(buf, offset, T::WIDTH).map(T::from_be_slice)
}

pub fn encode_uint<T: WireInt>(out: &mut Vec<u8>, value: T) {
    value.push_be(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_u16_at_offset() {
        let buf = [0xff, 0x12, 0x34];
        assert_eq!(decode_uint::<u16>(&buf, 1), Ok(0x1234));
    }

    #[test]
    fn test_decode_u32() {
        let buf = [0x00, 0x01, 0x51, 0x80];
        assert_eq!(decode_uint::<u32>(&buf, 0), Ok(86_400));
    }

    #[test]
    fn test_decode_short_buffer_fails() {
        let buf = [0x00, 0x01, 0x02];
        assert_eq!(
            decode_uint::<u32>(&buf, 0),
            Err(WireError::TruncatedField {
                offset: 0,
                needed: 4,
                len: 3
            })
        );
        assert!(decode_uint::<u16>(&buf, 2).is_err());
        assert!(decode_uint::<u16>(&buf, usize::MAX).is_err());
    }

    #[test]
    fn test_encode_appends_big_endian() {
        let mut out = vec![0xaa];
        encode_uint(&mut out, 0x0102u16);
        encode_uint(&mut out, 0x0304_0506u32);
        assert_eq!(out, vec![0xaa, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    }
}
