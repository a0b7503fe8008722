// src/keywords.rs
//! Keyword filtering, per-year counting and ranking.
//!
//! A token is a keyword when it is at least `min_len` characters long and
//! every character is alphabetic. That rule drops numbers, mixed tokens
//! like `2pac`, contractions like `i'm`, and every single-character Chinese
//! word. This is the behaviour reports have always been built on, so it is
//! kept as is.

use std::collections::{BTreeMap, HashMap};

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::config::UnknownYearPolicy;
use crate::record::{LyricRecord, YearKey};
use crate::segment::Segmenter;

pub fn is_keyword(token: &str, min_len: usize) -> bool {
    let mut n = 0usize;
    for c in token.chars() {
        if !c.is_alphabetic() { return false; }
        n += 1;
    }
    n >= min_len
}

pub fn filter_tokens<I, S>(tokens: I, min_len: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String> + AsRef<str>,
{
    tokens
        .into_iter()
        .filter(|t| is_keyword(t.as_ref(), min_len))
        .map(Into::into)
        .collect()
}

/* ---------------- KeywordCount ---------------- */

/// Token → count for one year. Iterates in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordCount {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl KeywordCount {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, token: &str) {
        self.add_n(token, 1);
    }

    pub fn add_n(&mut self, token: &str, n: u64) {
        match self.index.get(token) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(s!(token), self.entries.len());
                self.entries.push((s!(token), n));
            }
        }
    }

    pub fn get(&self, token: &str) -> u64 {
        self.index.get(token).map_or(0, |&i| self.entries[i].1)
    }

    /// Distinct tokens.
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Count descending, ties in first-seen order, at most `top_n` entries.
    pub fn ranking(&self, top_n: usize) -> Vec<RankedKeyword> {
        let mut order: Vec<&(String, u64)> = self.entries.iter().collect();
        order.sort_by(|a, b| b.1.cmp(&a.1)); // stable
        order
            .into_iter()
            .take(top_n)
            .map(|(word, frequency)| RankedKeyword { word: word.clone(), frequency: *frequency })
            .collect()
    }
}

impl Serialize for KeywordCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (t, c) in &self.entries {
            map.serialize_entry(t, c)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub word: String,
    pub frequency: u64,
}

/// One year's top-N.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct YearlyRanking {
    pub year: YearKey,
    pub entries: Vec<RankedKeyword>,
}

/* ---------------- Tally ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    /// Records offered to the tally.
    pub songs_seen: usize,
    /// Records that contributed at least one keyword.
    pub songs_tokenized: usize,
    /// Records with no lyrics, no surviving keyword, or dropped for unknown year.
    pub songs_skipped: usize,
    pub token_occurrences: u64,
    /// Distinct tokens summed over years.
    pub unique_tokens: usize,
    pub years_covered: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

/// What happened to one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tallied {
    Counted(usize),
    NoLyrics,
    NoKeywords,
    UnknownYearDropped,
}

/// Per-year keyword counts built up record by record, plus the series of
/// any tracked keywords.
#[derive(Clone, Debug)]
pub struct KeywordTally {
    min_len: usize,
    unknown_year: UnknownYearPolicy,
    by_year: BTreeMap<YearKey, KeywordCount>,
    // (as given, lower-cased), in the order given
    tracked: Vec<(String, String)>,
    tracked_counts: Vec<BTreeMap<YearKey, u64>>,
    songs_seen: usize,
    songs_tokenized: usize,
    songs_skipped: usize,
}

impl KeywordTally {
    pub fn new(min_len: usize, unknown_year: UnknownYearPolicy, tracked: &[String]) -> Self {
        let mut uniq: Vec<(String, String)> = Vec::new();
        for k in tracked {
            let k = k.trim();
            if k.is_empty() || uniq.iter().any(|(orig, _)| orig == k) { continue; }
            if !is_keyword(k, min_len) {
                logw!("Tracked keyword {k:?} is shorter than {min_len} letters or not alphabetic; it can never match");
            }
            uniq.push((s!(k), k.to_lowercase()));
        }
        let n = uniq.len();
        Self {
            min_len,
            unknown_year,
            by_year: BTreeMap::new(),
            tracked: uniq,
            tracked_counts: vec![BTreeMap::new(); n],
            songs_seen: 0,
            songs_tokenized: 0,
            songs_skipped: 0,
        }
    }

    /// Tokenize one record and count what survives the keyword rule.
    pub fn add_record(&mut self, record: &LyricRecord, segmenter: &Segmenter) -> Tallied {
        self.songs_seen += 1;
        if !record.has_lyrics() {
            self.songs_skipped += 1;
            return Tallied::NoLyrics;
        }
        let year = record.year_key();
        if year == YearKey::Unknown && self.unknown_year == UnknownYearPolicy::Drop {
            self.songs_skipped += 1;
            return Tallied::UnknownYearDropped;
        }
        let tokens = segmenter.tokenize(&record.lyrics_text);
        self.count(year, &tokens)
    }

    /// Count already-segmented tokens as one song of `year`.
    /// The keyword rule and the unknown-year policy still apply.
    pub fn add_tokens<S: AsRef<str>>(&mut self, year: YearKey, tokens: &[S]) -> Tallied {
        self.songs_seen += 1;
        if year == YearKey::Unknown && self.unknown_year == UnknownYearPolicy::Drop {
            self.songs_skipped += 1;
            return Tallied::UnknownYearDropped;
        }
        self.count(year, tokens)
    }

    fn count<S: AsRef<str>>(&mut self, year: YearKey, tokens: &[S]) -> Tallied {
        let kept: Vec<&str> = tokens
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| is_keyword(t, self.min_len))
            .collect();
        if kept.is_empty() {
            self.songs_skipped += 1;
            return Tallied::NoKeywords;
        }

        let counts = self.by_year.entry(year).or_default();
        for t in &kept {
            counts.add(t);
        }
        for (i, (_, needle)) in self.tracked.iter().enumerate() {
            let hits = kept.iter().filter(|t| t.to_lowercase() == *needle).count() as u64;
            if hits > 0 {
                *self.tracked_counts[i].entry(year).or_insert(0) += hits;
            }
        }
        self.songs_tokenized += 1;
        Tallied::Counted(kept.len())
    }

    pub fn counts(&self) -> &BTreeMap<YearKey, KeywordCount> {
        &self.by_year
    }

    pub fn count_for(&self, year: YearKey) -> Option<&KeywordCount> {
        self.by_year.get(&year)
    }

    /// Every year's ranking, years ascending, `Unknown` last.
    pub fn rankings(&self, top_n: usize) -> Vec<YearlyRanking> {
        self.by_year
            .iter()
            .map(|(&year, counts)| YearlyRanking { year, entries: counts.ranking(top_n) })
            .collect()
    }

    pub fn tracked_series(&self) -> TrackedSeries {
        TrackedSeries(
            self.tracked
                .iter()
                .zip(&self.tracked_counts)
                .map(|((orig, _), per_year)| {
                    (orig.clone(), per_year.iter().map(|(&y, &c)| (y, c)).collect())
                })
                .collect(),
        )
    }

    pub fn stats(&self) -> AnalysisStats {
        let known: Vec<i32> = self.by_year.keys().filter_map(|k| k.year()).collect();
        AnalysisStats {
            songs_seen: self.songs_seen,
            songs_tokenized: self.songs_tokenized,
            songs_skipped: self.songs_skipped,
            token_occurrences: self.by_year.values().map(KeywordCount::total).sum(),
            unique_tokens: self.by_year.values().map(KeywordCount::len).sum(),
            years_covered: self.by_year.len(),
            first_year: known.first().copied(),
            last_year: known.last().copied(),
        }
    }
}

/// Tracked keyword → `(year, count)` pairs, years ascending.
/// Keywords keep the order they were given in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackedSeries(pub Vec<(String, Vec<(YearKey, u64)>)>);

impl TrackedSeries {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(YearKey, u64)])> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn get(&self, keyword: &str) -> Option<&[(YearKey, u64)]> {
        self.0.iter().find(|(k, _)| k == keyword).map(|(_, v)| v.as_slice())
    }
}

impl Serialize for TrackedSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, series) in &self.0 {
            map.serialize_entry(k, series)?;
        }
        map.end()
    }
}
