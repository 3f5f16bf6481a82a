use std::fmt;

pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    #[default]
    StandardQuery,
    InverseQuery,
    ServerStatus,
    Notify,
    Update,
    StatefulOperations,
    /// Any other 4-bit opcode, preserved as received. Only holds codes with
    /// no named variant; build it through [`Opcode::from_u8`] or
    /// [`Opcode::normalize`] so it survives a wire round trip unchanged.
    Unassigned(u8),
}

impl Opcode {
    pub fn to_u8(&self) -> u8 {
        match self {
            Opcode::StandardQuery => 0,
            Opcode::InverseQuery => 1,
            Opcode::ServerStatus => 2,
            Opcode::Notify => 4,
            Opcode::Update => 5,
            Opcode::StatefulOperations => 6,
            Opcode::Unassigned(code) => *code & 0x0F,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => Opcode::StandardQuery,
            1 => Opcode::InverseQuery,
            2 => Opcode::ServerStatus,
            4 => Opcode::Notify,
            5 => Opcode::Update,
            6 => Opcode::StatefulOperations,
            other => Opcode::Unassigned(other),
        }
    }

    /// Canonical form: the value [`Opcode::from_u8`] yields for this code.
    pub fn normalize(self) -> Self {
        Self::from_u8(self.to_u8())
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    YXDomain,
    YXRRSet,
    NXRRSet,
    NotAuth,
    NotZone,
    DSOTYPENI,
    /// Nibble values 12-15, preserved as received. Any other code belongs to
    /// a named variant; see [`ResponseCode::normalize`].
    Unknown(u8),
}

impl ResponseCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::YXDomain => 6,
            ResponseCode::YXRRSet => 7,
            ResponseCode::NXRRSet => 8,
            ResponseCode::NotAuth => 9,
            ResponseCode::NotZone => 10,
            ResponseCode::DSOTYPENI => 11,
            ResponseCode::Unknown(code) => *code & 0x0F,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            6 => ResponseCode::YXDomain,
            7 => ResponseCode::YXRRSet,
            8 => ResponseCode::NXRRSet,
            9 => ResponseCode::NotAuth,
            10 => ResponseCode::NotZone,
            11 => ResponseCode::DSOTYPENI,
            other => ResponseCode::Unknown(other),
        }
    }

    /// Canonical form: the value [`ResponseCode::from_u8`] yields for this code.
    pub fn normalize(self) -> Self {
        Self::from_u8(self.to_u8())
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Unknown(code) => write!(f, "RCODE{}", code),
            known => write!(f, "{:?}", known),
        }
    }
}

/// The two flag bytes of the header (bytes 2 and 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeaderFlags {
    pub is_response: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// Reserved "Z" bit.
    pub z: bool,
    pub authentic_data: bool,
    pub checking_disabled: bool,
    pub response_code: ResponseCode,
}

fn flag(byte: u8, bit: u8) -> bool {
    byte & (1 << bit) != 0
}

fn set_flag(byte: &mut u8, bit: u8, value: bool) {
    if value {
        *byte |= 1 << bit;
    } else {
        *byte &= !(1 << bit);
    }
}

impl HeaderFlags {
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let [high, low] = bytes;
        Self {
            is_response: flag(high, 7),
            opcode: Opcode::from_u8((high & 0x78) >> 3),
            authoritative: flag(high, 2),
            truncated: flag(high, 1),
            recursion_desired: flag(high, 0),
            recursion_available: flag(low, 7),
            z: flag(low, 6),
            authentic_data: flag(low, 5),
            checking_disabled: flag(low, 4),
            response_code: ResponseCode::from_u8(low & 0x0F),
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        let mut high = self.opcode.to_u8() << 3;
        set_flag(&mut high, 7, self.is_response);
        set_flag(&mut high, 2, self.authoritative);
        set_flag(&mut high, 1, self.truncated);
        set_flag(&mut high, 0, self.recursion_desired);

        let mut low = self.response_code.to_u8();
        set_flag(&mut low, 7, self.recursion_available);
        set_flag(&mut low, 6, self.z);
        set_flag(&mut low, 5, self.authentic_data);
        set_flag(&mut low, 4, self.checking_disabled);

        [high, low]
    }
}
