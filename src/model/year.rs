use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Selects the records of one calendar year, or of every year.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

impl YearFilter {
    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(y) => *y == year,
        }
    }
}

impl From<i32> for YearFilter {
    fn from(value: i32) -> Self {
        YearFilter::Year(value)
    }
}

impl Display for YearFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YearFilter::All => f.write_str("all"),
            YearFilter::Year(y) => write!(f, "{y}"),
        }
    }
}

impl FromStr for YearFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(YearFilter::All);
        }
        s.parse::<i32>()
            .map(YearFilter::Year)
            .map_err(|_| format!("Expected a year or 'all', got '{s}'"))
    }
}

impl Serialize for YearFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            YearFilter::All => serializer.serialize_str("all"),
            YearFilter::Year(y) => serializer.serialize_i32(*y),
        }
    }
}

impl<'de> Deserialize<'de> for YearFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Year(i32),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Year(y) => Ok(YearFilter::Year(y)),
            Raw::Text(s) => YearFilter::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(YearFilter::from_str("all").unwrap(), YearFilter::All);
        assert_eq!(YearFilter::from_str("ALL").unwrap(), YearFilter::All);
        assert_eq!(YearFilter::from_str("2025").unwrap(), YearFilter::Year(2025));
        assert!(YearFilter::from_str("last year").is_err());
    }

    #[test]
    fn test_matches() {
        assert!(YearFilter::All.matches(1999));
        assert!(YearFilter::Year(2024).matches(2024));
        assert!(!YearFilter::Year(2024).matches(2025));
    }

    #[test]
    fn test_json() {
        assert_eq!(serde_json::to_string(&YearFilter::All).unwrap(), "\"all\"");
        let y: YearFilter = serde_json::from_str("2023").unwrap();
        assert_eq!(y, YearFilter::Year(2023));
        let y: YearFilter = serde_json::from_str("\"2023\"").unwrap();
        assert_eq!(y, YearFilter::Year(2023));
    }
}
