use super::label::Label;
use crate::errors::WireError;

/// Follows compression pointers in `buf` until a spelled-out name is found.
///
/// The walk is bounded by the buffer length: a chain longer than that must
/// revisit an offset, so it is reported as a loop instead of spinning.
pub fn resolve_domain_name(buf: &[u8], label: &Label) -> Result<String, WireError> {
    let mut address = match label {
        Label::Name(name) => return Ok(name.clone()),
        Label::Pointer(address) => *address,
    };

    let max_hops = buf.len();
    let mut hops = 0;

    loop {
        if address as usize >= buf.len() {
            return Err(WireError::PointerOutOfRange {
                address,
                len: buf.len(),
            });
        }

        hops += 1;
        if hops > max_hops {
            return Err(WireError::CompressionLoop { hops: max_hops });
        }

        match Label::parse(buf, address as usize)?.0 {
            Label::Name(name) => return Ok(name),
            Label::Pointer(next) => address = next,
        }
    }
}
