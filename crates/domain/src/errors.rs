use thiserror::Error;

/// Failures raised while decoding or encoding DNS wire data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Packet is {len} bytes, less than the size of a header")]
    TooShort { len: usize },

    #[error("Field of {needed} bytes at offset {offset} runs past the end of a {len}-byte buffer")]
    TruncatedField {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Label part length {len} is outside 1..=63")]
    InvalidLabelLength { len: usize },

    #[error("Unsupported label byte {byte:#04x} at offset {offset}")]
    UnsupportedLabel { offset: usize, byte: u8 },

    #[error("Compression pointer chain exceeded {hops} hops")]
    CompressionLoop { hops: usize },

    #[error("Compression pointer {address} is outside a {len}-byte message")]
    PointerOutOfRange { address: u16, len: usize },

    #[error("Resource declares {declared} data bytes but carries {actual}")]
    RdataLengthMismatch { declared: u16, actual: usize },

    #[error("Resource data of {len} bytes does not fit a 16-bit length field")]
    RdataTooLong { len: usize },

    #[error("Section holds {count} entries, more than a header can count")]
    SectionOverflow { count: usize },
}

/// Failure of an asynchronous native operation, delivered to scripts as a rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsyncError {
    #[error("no such file {0}")]
    FileNotFound(String),

    #[error("something went wrong reading {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("operation ended without producing a result")]
    Abandoned,

    #[error("{0}")]
    Failed(String),
}
