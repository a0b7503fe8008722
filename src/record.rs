// src/record.rs
use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One song with its lyrics, from a CSV row or an API response.
/// Built once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub language_code: String,
    pub lyrics_text: String,
    pub release_year: Option<i32>,
}

impl LyricRecord {
    pub fn year_key(&self) -> YearKey {
        self.release_year.map_or(YearKey::Unknown, YearKey::Year)
    }

    pub fn has_lyrics(&self) -> bool {
        !self.lyrics_text.trim().is_empty()
    }
}

/// Bucket a record is tallied under. Known years sort numerically;
/// `Unknown` sorts after every year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearKey {
    Year(i32),
    Unknown,
}

impl YearKey {
    pub fn year(self) -> Option<i32> {
        match self {
            YearKey::Year(y) => Some(y),
            YearKey::Unknown => None,
        }
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Year(y) => write!(f, "{y}"),
            YearKey::Unknown => f.write_str("unknown"),
        }
    }
}

impl FromStr for YearKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("unknown") {
            return Ok(YearKey::Unknown);
        }
        t.parse::<i32>().map(YearKey::Year).map_err(|_| format!("not a year: {s:?}"))
    }
}

// As a string so it works as a JSON object key.
impl Serialize for YearKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Lenient year parsing for CSV cells: "2020", " 2020 ", "2020.0", "2020-05-01".
/// Anything else (including blank) is unknown.
pub fn parse_year(cell: &str) -> Option<i32> {
    let t = cell.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(y) = t.parse::<i32>() {
        return Some(y);
    }
    if let Ok(f) = t.parse::<f64>() {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i32::MAX as f64 {
            return Some(f as i32);
        }
        return None;
    }
    // Date-like: leading four digits followed by a separator
    let head: String = t.chars().take(4).collect();
    let sep = t.chars().nth(4);
    if head.len() == 4 && head.chars().all(|c| c.is_ascii_digit()) && matches!(sep, Some('-' | '/' | '.')) {
        return head.parse().ok();
    }
    None
}
