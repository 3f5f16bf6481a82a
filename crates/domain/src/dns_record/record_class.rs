use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    Internet,
    Chaos,
    Hesiod,
    QclassNone,
    QclassAny,
    Unknown(u16),
}

impl RecordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordClass::Internet => "IN",
            RecordClass::Chaos => "CH",
            RecordClass::Hesiod => "HS",
            RecordClass::QclassNone => "NONE",
            RecordClass::QclassAny => "ANY",
            RecordClass::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordClass::Internet => 1,
            RecordClass::Chaos => 3,
            RecordClass::Hesiod => 4,
            RecordClass::QclassNone => 254,
            RecordClass::QclassAny => 255,
            RecordClass::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordClass::Internet,
            3 => RecordClass::Chaos,
            4 => RecordClass::Hesiod,
            254 => RecordClass::QclassNone,
            255 => RecordClass::QclassAny,
            other => RecordClass::Unknown(other),
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordClass::Unknown(code) => write!(f, "CLASS{}", code),
            known => f.write_str(known.as_str()),
        }
    }
}

impl FromStr for RecordClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        match upper.as_str() {
            "IN" => Ok(RecordClass::Internet),
            "CH" => Ok(RecordClass::Chaos),
            "HS" => Ok(RecordClass::Hesiod),
            "NONE" => Ok(RecordClass::QclassNone),
            "ANY" => Ok(RecordClass::QclassAny),
            _ => upper
                .strip_prefix("CLASS")
                .and_then(|code| code.parse::<u16>().ok())
                .map(RecordClass::from_u16)
                .ok_or_else(|| format!("Unknown record class: {}", s)),
        }
    }
}
