use std::fmt;
use std::str::FromStr;

macro_rules! record_types {
    ($($name:ident = $code:literal,)+) => {
        /// Resource record types. Values outside the assigned set are kept
        /// verbatim in `Unknown` so they survive a decode/encode cycle.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RecordType {
            $($name,)+
            Unknown(u16),
        }

        impl RecordType {
            pub fn to_u16(&self) -> u16 {
                match self {
                    $(RecordType::$name => $code,)+
                    RecordType::Unknown(code) => *code,
                }
            }

            pub fn from_u16(code: u16) -> Self {
                match code {
                    $($code => RecordType::$name,)+
                    other => RecordType::Unknown(other),
                }
            }

            /// Mnemonic for assigned types, `None` for `Unknown`.
            pub fn mnemonic(&self) -> Option<&'static str> {
                match self {
                    $(RecordType::$name => Some(stringify!($name)),)+
                    RecordType::Unknown(_) => None,
                }
            }

            fn from_mnemonic(s: &str) -> Option<Self> {
                match s {
                    $(stringify!($name) => Some(RecordType::$name),)+
                    _ => None,
                }
            }
        }
    };
}

record_types! {
    A = 1,
    NS = 2,
    MD = 3,
    MF = 4,
    CNAME = 5,
    SOA = 6,
    MB = 7,
    MG = 8,
    MR = 9,
    NULL = 10,
    WKS = 11,
    PTR = 12,
    HINFO = 13,
    MINFO = 14,
    MX = 15,
    TXT = 16,
    RP = 17,
    AFSDB = 18,
    X25 = 19,
    ISDN = 20,
    RT = 21,
    NSAP = 22,
    NSAPPTR = 23,
    SIG = 24,
    KEY = 25,
    PX = 26,
    GPOS = 27,
    AAAA = 28,
    LOC = 29,
    NXT = 30,
    EID = 31,
    NIMLOC = 32,
    SRV = 33,
    ATMA = 34,
    NAPTR = 35,
    KX = 36,
    CERT = 37,
    A6 = 38,
    DNAME = 39,
    SINK = 40,
    OPT = 41,
    APL = 42,
    DS = 43,
    SSHFP = 44,
    IPSECKEY = 45,
    RRSIG = 46,
    NSEC = 47,
    DNSKEY = 48,
    DHCID = 49,
    NSEC3 = 50,
    NSEC3PARAM = 51,
    TLSA = 52,
    SMIMEA = 53,
    HIP = 55,
    NINFO = 56,
    RKEY = 57,
    TALINK = 58,
    CDS = 59,
    CDNSKEY = 60,
    OPENPGPKEY = 61,
    CSYNC = 62,
    SPF = 99,
    UINFO = 100,
    UID = 101,
    GID = 102,
    UNSPEC = 103,
    NID = 104,
    L32 = 105,
    L64 = 106,
    LP = 107,
    EUI48 = 108,
    EUI64 = 109,
    TKEY = 249,
    TSIG = 250,
    IXFR = 251,
    AXFR = 252,
    MAILB = 253,
    MAILA = 254,
    ANY = 255,
    URI = 256,
    CAA = 257,
    AVC = 258,
    DOA = 259,
    TA = 32768,
    DLV = 32769,
}

impl RecordType {
    pub fn is_unknown(&self) -> bool {
        matches!(self, RecordType::Unknown(_))
    }

    /// Types that only appear in questions (RFC 1035 §3.2.3).
    pub fn is_query_only(&self) -> bool {
        matches!(
            self,
            RecordType::IXFR
                | RecordType::AXFR
                | RecordType::MAILB
                | RecordType::MAILA
                | RecordType::ANY
        )
    }
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        RecordType::from_u16(code)
    }
}

impl From<RecordType> for u16 {
    fn from(record_type: RecordType) -> Self {
        record_type.to_u16()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => f.write_str(name),
            None => write!(f, "TYPE{}", self.to_u16()),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        if let Some(record_type) = RecordType::from_mnemonic(&upper) {
            return Ok(record_type);
        }
        upper
            .strip_prefix("TYPE")
            .and_then(|code| code.parse::<u16>().ok())
            .map(RecordType::from_u16)
            .ok_or_else(|| format!("Unknown record type: {}", s))
    }
}
