//! Decimal version numbers ("1.0", "1.1", ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A document version number with one decimal place.
///
/// Stored as a count of tenths so that repeated `+0.1` increments never
/// drift. Any non-negative decimal string parses; values with more than
/// one decimal place are rounded to the nearest tenth, so `"1.25"` reads
/// as `1.3` and its successor is `1.4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionNumber {
    tenths: u32,
}

impl VersionNumber {
    /// The number given to a document's first upload.
    pub const INITIAL: VersionNumber = VersionNumber { tenths: 10 };

    /// Build a version number from a count of tenths (`12` is `1.2`).
    pub fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    /// Return the count of tenths.
    pub fn tenths(&self) -> u32 {
        self.tenths
    }

    /// The number that follows this one (`+0.1`).
    pub fn next(&self) -> Self {
        Self {
            tenths: self.tenths.saturating_add(1),
        }
    }
}

impl Default for VersionNumber {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl FromStr for VersionNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let valid = !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
            && trimmed.matches('.').count() <= 1
            && trimmed != ".";
        if !valid {
            return Err(format!("Invalid version number '{s}'"));
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| format!("Invalid version number '{s}'"))?;
        let tenths = (value * 10.0).round();
        if tenths > f64::from(u32::MAX) {
            return Err(format!("Version number '{s}' is too large"));
        }

        Ok(Self {
            tenths: tenths as u32,
        })
    }
}

impl Serialize for VersionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
