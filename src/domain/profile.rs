//! Personalization profile: lucky/unlucky digit roots and lucky weekdays.
//!
//! The profile travels as JSON with the wire field names `luckyRoots`,
//! `unluckyRoots`, and `luckyDays` (weekdays as full English names). All
//! deserialization paths validate root ranges and weekday names.

use chrono::Weekday;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};

/// The fixed weekday calendar, Sunday-first as the wire format orders it.
pub const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("Sunday", Weekday::Sun),
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
];

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES
        .iter()
        .find(|(_, d)| *d == day)
        .map(|(name, _)| *name)
        .unwrap_or("Sunday")
}

/// Case-insensitive lookup of a weekday by its full English name.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, d)| *d)
}

/// Field-level profile validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileFieldError {
    #[error("empty token in list")]
    EmptyToken,

    #[error("duplicate entry: {0}")]
    Duplicate(String),

    #[error("not a digit root: {0}")]
    InvalidRoot(String),

    #[error("digit root {0} out of range 1-9")]
    RootOutOfRange(u32),

    #[error("unknown weekday name: {0}")]
    UnknownWeekday(String),
}

/// Personalization input biasing the evaluator.
///
/// `lucky_roots` and `unlucky_roots` need not be disjoint; a date root that
/// appears in both sets reads as lucky (lucky is checked first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub lucky_roots: BTreeSet<u8>,
    pub unlucky_roots: BTreeSet<u8>,
    pub lucky_days: HashSet<Weekday>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            lucky_roots: BTreeSet::from([1, 3, 5]),
            unlucky_roots: BTreeSet::from([4, 8, 9]),
            lucky_days: HashSet::from([Weekday::Mon, Weekday::Wed, Weekday::Fri]),
        }
    }
}

impl Profile {
    /// Builds a validated profile from raw wire values. Duplicates collapse
    /// silently; out-of-range roots and unknown weekday names are rejected.
    pub fn from_parts(
        lucky_roots: &[u32],
        unlucky_roots: &[u32],
        lucky_days: &[String],
    ) -> Result<Self, ProfileFieldError> {
        let lucky_roots = validate_roots(lucky_roots)?;
        let unlucky_roots = validate_roots(unlucky_roots)?;
        let mut days = HashSet::new();
        for name in lucky_days {
            let day = weekday_from_name(name)
                .ok_or_else(|| ProfileFieldError::UnknownWeekday(name.clone()))?;
            days.insert(day);
        }
        Ok(Self {
            lucky_roots,
            unlucky_roots,
            lucky_days: days,
        })
    }

    /// Lucky days in calendar order, as display names.
    pub fn lucky_day_names(&self) -> Vec<&'static str> {
        WEEKDAY_NAMES
            .iter()
            .filter(|(_, d)| self.lucky_days.contains(d))
            .map(|(name, _)| *name)
            .collect()
    }
}

fn validate_roots(roots: &[u32]) -> Result<BTreeSet<u8>, ProfileFieldError> {
    let mut set = BTreeSet::new();
    for &root in roots {
        if !(1..=9).contains(&root) {
            return Err(ProfileFieldError::RootOutOfRange(root));
        }
        set.insert(root as u8);
    }
    Ok(set)
}

/// Parses a comma-separated list of digit roots, e.g. `"1,3,5"`.
///
/// Unlike [`Profile::from_parts`], repeated tokens are an error: a human
/// typed the list and a duplicate is most likely a typo.
pub fn parse_roots(input: &str) -> Result<BTreeSet<u8>, ProfileFieldError> {
    let mut roots = BTreeSet::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ProfileFieldError::EmptyToken);
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|_| ProfileFieldError::InvalidRoot(trimmed.to_string()))?;
        if !(1..=9).contains(&value) {
            return Err(ProfileFieldError::RootOutOfRange(value));
        }
        if !roots.insert(value as u8) {
            return Err(ProfileFieldError::Duplicate(trimmed.to_string()));
        }
    }
    Ok(roots)
}

/// Parses a comma-separated list of weekday names, e.g.
/// `"Monday,Wednesday,Friday"` (case-insensitive).
pub fn parse_days(input: &str) -> Result<HashSet<Weekday>, ProfileFieldError> {
    let mut days = HashSet::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ProfileFieldError::EmptyToken);
        }
        let day = weekday_from_name(trimmed)
            .ok_or_else(|| ProfileFieldError::UnknownWeekday(trimmed.to_string()))?;
        if !days.insert(day) {
            return Err(ProfileFieldError::Duplicate(trimmed.to_string()));
        }
    }
    Ok(days)
}

/// Birth details forwarded verbatim to the profile-generation API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthDetails {
    pub name: String,
    pub dob: String,
    pub birth_time: String,
    pub location: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRepr {
    lucky_roots: Vec<u32>,
    unlucky_roots: Vec<u32>,
    lucky_days: Vec<String>,
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = ProfileRepr {
            lucky_roots: self.lucky_roots.iter().map(|&r| r as u32).collect(),
            unlucky_roots: self.unlucky_roots.iter().map(|&r| r as u32).collect(),
            lucky_days: self
                .lucky_day_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Profile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ProfileRepr::deserialize(deserializer)?;
        Profile::from_parts(&repr.lucky_roots, &repr.unlucky_roots, &repr.lucky_days)
            .map_err(D::Error::custom)
    }
}
