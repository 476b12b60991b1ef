use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Entity category code
///
/// The fourteen known codes carry a human-readable display name. Any other
/// code reported by a recognizer is kept verbatim in `Other` and displays as
/// its raw code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    Date,
    Time,
    Money,
    Norp,
    Fac,
    Product,
    Event,
    WorkOfArt,
    Law,
    Language,
    Other(String),
}

impl EntityLabel {
    /// All known labels, in table order
    pub const KNOWN: [EntityLabel; 14] = [
        Self::Person,
        Self::Org,
        Self::Gpe,
        Self::Loc,
        Self::Date,
        Self::Time,
        Self::Money,
        Self::Norp,
        Self::Fac,
        Self::Product,
        Self::Event,
        Self::WorkOfArt,
        Self::Law,
        Self::Language,
    ];

    /// Parse a category code. Codes are case sensitive, like the recognizers emit them.
    pub fn from_code(code: &str) -> Self {
        match code {
            "PERSON" => Self::Person,
            "ORG" => Self::Org,
            "GPE" => Self::Gpe,
            "LOC" => Self::Loc,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "MONEY" => Self::Money,
            "NORP" => Self::Norp,
            "FAC" => Self::Fac,
            "PRODUCT" => Self::Product,
            "EVENT" => Self::Event,
            "WORK_OF_ART" => Self::WorkOfArt,
            "LAW" => Self::Law,
            "LANGUAGE" => Self::Language,
            other => Self::Other(other.to_string()),
        }
    }

    /// Raw category code
    pub fn code(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Loc => "LOC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Money => "MONEY",
            Self::Norp => "NORP",
            Self::Fac => "FAC",
            Self::Product => "PRODUCT",
            Self::Event => "EVENT",
            Self::WorkOfArt => "WORK_OF_ART",
            Self::Law => "LAW",
            Self::Language => "LANGUAGE",
            Self::Other(code) => code,
        }
    }

    /// Human-readable name; unknown codes fall back to the raw code
    pub fn display_name(&self) -> &str {
        match self {
            Self::Person => "Person",
            Self::Org => "Organization",
            Self::Gpe => "Location (GPE)",
            Self::Loc => "Location",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Money => "Monetary Value",
            Self::Norp => "Group/Nationality",
            Self::Fac => "Facility",
            Self::Product => "Product",
            Self::Event => "Event",
            Self::WorkOfArt => "Work of Art",
            Self::Law => "Law",
            Self::Language => "Language",
            Self::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&str> for EntityLabel {
    fn from(code: &str) -> Self {
        Self::from_code(code)
    }
}

impl Serialize for EntityLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for EntityLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}
