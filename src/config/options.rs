// src/config/options.rs
use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::ConfigError;

/// Everything both binaries can be configured with. Loaded from an optional
/// TOML file; command-line flags are applied on top by `cli`. Each pipeline
/// validates only its own section, so one file can serve both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub filter: FilterOptions,
    pub analysis: AnalysisOptions,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/* ---------------- Filter ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub language_column: String,
    /// Exact match, no normalization.
    pub language: String,
    /// Inclusive `[start, end]` on the year column.
    pub year_range: Option<(i32, i32)>,
    /// Minimum lyrics length, in characters.
    pub min_lyrics_len: Option<usize>,
    pub lyrics_contains: Option<String>,
    pub artist_contains: Option<String>,
    /// Case-insensitive regex on the tag column.
    pub tag_pattern: Option<String>,
    /// How many values the distribution tables show.
    pub top_values: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_CSV),
            output: PathBuf::from(DEFAULT_FILTERED_CSV),
            language_column: s!(LANGUAGE_COLUMN),
            language: s!(TARGET_LANGUAGE),
            year_range: None,
            min_lyrics_len: None,
            lyrics_contains: None,
            artist_contains: None,
            tag_pattern: None,
            top_values: TOP_VALUES,
        }
    }
}

impl FilterOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((a, b)) = self.year_range {
            if a > b {
                return Err(ConfigError::Invalid(format!("year range {a}-{b} is reversed")));
            }
        }
        if self.language_column.trim().is_empty() {
            return Err(ConfigError::Invalid(s!("language column name is empty")));
        }
        Ok(())
    }
}

/* ---------------- Analysis ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnknownYearPolicy {
    /// Count under an explicit "unknown" year.
    #[default]
    Bucket,
    /// Leave the record out of the yearly tallies.
    Drop,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Netease,
    Csv,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    pub kind: SourceKind,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub pause_ms: u64,
    /// Songs requested per search keyword.
    pub search_limit: usize,
    /// Local dataset for `SourceKind::Csv`.
    pub dataset: PathBuf,
    /// Language code stamped on records whose source has none.
    pub language: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            kind: SourceKind::Netease,
            base_url: s!(API_BASE),
            user_agent: s!(USER_AGENT),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            pause_ms: REQUEST_PAUSE_MS,
            search_limit: SEARCH_LIMIT,
            dataset: PathBuf::from(DEFAULT_DATASET_CSV),
            language: s!(TARGET_LANGUAGE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub source: SourceOptions,
    pub search_keywords: Vec<String>,
    pub tracked_keywords: Vec<String>,
    pub top_n: usize,
    /// Rows shown per year in the console report; the snapshot keeps `top_n`.
    pub display_top_n: usize,
    pub min_token_len: usize,
    pub unknown_year: UnknownYearPolicy,
    /// Extra segmentation words, `word [freq] [tag]` per line.
    pub user_dict: Option<PathBuf>,
    pub output: PathBuf,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            source: SourceOptions::default(),
            search_keywords: strings![..DEFAULT_SEARCH_KEYWORDS],
            tracked_keywords: strings![..DEFAULT_TRACKED_KEYWORDS],
            top_n: TOP_N,
            display_top_n: TOP_N,
            min_token_len: MIN_TOKEN_LEN,
            unknown_year: UnknownYearPolicy::Bucket,
            user_dict: None,
            output: PathBuf::from(DEFAULT_SNAPSHOT_JSON),
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid(s!("top_n must be at least 1")));
        }
        if self.min_token_len == 0 {
            return Err(ConfigError::Invalid(s!("min_token_len must be at least 1")));
        }
        if self.source.kind == SourceKind::Netease && self.search_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid(s!("the network source needs at least one search keyword")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hardcoded_paths() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.filter.input, PathBuf::from("dataset/song_lyrics.csv"));
        assert_eq!(cfg.filter.output, PathBuf::from("chinese_songs.csv"));
        assert_eq!(cfg.filter.language, "zh");
        assert_eq!(cfg.analysis.top_n, 10);
        assert_eq!(cfg.analysis.min_token_len, 2);
        assert!(cfg.filter.validate().is_ok());
        assert!(cfg.analysis.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [filter]
            language = "en"

            [analysis]
            top_n = 5
            unknown_year = "drop"

            [analysis.source]
            kind = "csv"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.filter.language, "en");
        assert_eq!(cfg.filter.language_column, "language");
        assert_eq!(cfg.analysis.top_n, 5);
        assert_eq!(cfg.analysis.unknown_year, UnknownYearPolicy::Drop);
        assert_eq!(cfg.analysis.source.kind, SourceKind::Csv);
        assert_eq!(cfg.analysis.source.search_limit, SEARCH_LIMIT);
    }

    #[test]
    fn load_leaves_validation_to_each_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.toml");
        fs::write(&path, "[filter]\nlanguage = \"zh\"\n\n[analysis]\nsearch_keywords = []\n").unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert!(cfg.filter.validate().is_ok());
        assert!(cfg.analysis.validate().is_err());
    }

    #[test]
    fn reversed_year_range_is_rejected() {
        let mut f = FilterOptions::default();
        f.year_range = Some((2020, 2010));
        assert!(f.validate().is_err());
    }
}
