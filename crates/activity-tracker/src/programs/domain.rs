use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Academic grouping a program belongs to.
///
/// Each variant carries a stable internal key (`ENGINEERING`) and the human-readable display
/// value (`Engineering & Technology`). Persisted records and JSON payloads always carry the
/// display value; deserialization additionally accepts the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProgramCategory {
    Engineering,
    ComputerApplications,
    Science,
    Management,
    Arts,
    Pharmacy,
    Law,
    Design,
    Doctoral,
}

impl ProgramCategory {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Engineering,
            Self::ComputerApplications,
            Self::Science,
            Self::Management,
            Self::Arts,
            Self::Pharmacy,
            Self::Law,
            Self::Design,
            Self::Doctoral,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Engineering => "ENGINEERING",
            Self::ComputerApplications => "COMPUTER_APPLICATIONS",
            Self::Science => "SCIENCE",
            Self::Management => "MANAGEMENT",
            Self::Arts => "ARTS",
            Self::Pharmacy => "PHARMACY",
            Self::Law => "LAW",
            Self::Design => "DESIGN",
            Self::Doctoral => "PHD",
        }
    }

    pub const fn display_value(self) -> &'static str {
        match self {
            Self::Engineering => "Engineering & Technology",
            Self::ComputerApplications => "Computer Applications",
            Self::Science => "Science",
            Self::Management => "Management & Commerce",
            Self::Arts => "Arts & Humanities",
            Self::Pharmacy => "Pharmacy",
            Self::Law => "Law",
            Self::Design => "Design & Architecture",
            Self::Doctoral => "Ph.D. Programs",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == key)
    }

    pub fn from_display_value(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.display_value() == value)
    }

    /// Accepts either form. Display values are checked first so a value that happens to equal
    /// some key is never reinterpreted.
    pub fn resolve(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::from_display_value(input).or_else(|| Self::from_key(input))
    }
}

impl fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_value())
    }
}

impl Serialize for ProgramCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_value())
    }
}

impl<'de> Deserialize<'de> for ProgramCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::resolve(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown program category '{raw}'"))
        })
    }
}

/// (key, display value) pair exposed to dropdowns and API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub key: &'static str,
    pub value: &'static str,
}

impl From<ProgramCategory> for CategoryEntry {
    fn from(category: ProgramCategory) -> Self {
        Self {
            key: category.key(),
            value: category.display_value(),
        }
    }
}

/// Degree program offered under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub degree_code: &'static str,
    pub name: &'static str,
    pub duration_years: u8,
    pub lateral_entry: bool,
    pub specializations: Vec<&'static str>,
}

impl Program {
    pub fn offers(&self, specialization: &str) -> bool {
        self.specializations
            .iter()
            .any(|offered| *offered == specialization)
    }

    pub fn has_specializations(&self) -> bool {
        !self.specializations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_and_values_are_bijective() {
        let keys: HashSet<_> = ProgramCategory::ordered()
            .iter()
            .map(|category| category.key())
            .collect();
        let values: HashSet<_> = ProgramCategory::ordered()
            .iter()
            .map(|category| category.display_value())
            .collect();
        assert_eq!(keys.len(), ProgramCategory::ordered().len());
        assert_eq!(values.len(), ProgramCategory::ordered().len());

        for category in ProgramCategory::ordered() {
            assert_eq!(ProgramCategory::from_key(category.key()), Some(category));
            assert_eq!(
                ProgramCategory::from_display_value(category.display_value()),
                Some(category)
            );
        }
    }

    #[test]
    fn serializes_display_value_and_accepts_key() {
        let json = serde_json::to_string(&ProgramCategory::Engineering).expect("serialize");
        assert_eq!(json, "\"Engineering & Technology\"");

        let from_key: ProgramCategory =
            serde_json::from_str("\"PHD\"").expect("key deserializes");
        assert_eq!(from_key, ProgramCategory::Doctoral);

        let err = serde_json::from_str::<ProgramCategory>("\"Astrology\"");
        assert!(err.is_err());
    }
}
