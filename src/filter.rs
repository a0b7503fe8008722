// src/filter.rs
//! CSV language filter plus the optional narrowing criteria.

use std::path::{Path, PathBuf};

use regex::RegexBuilder;
use serde::Serialize;

use crate::config::consts::{ARTIST_COLUMN, LYRICS_COLUMN, TAG_COLUMN, YEAR_COLUMN};
use crate::config::FilterOptions;
use crate::error::FilterError;
use crate::file::write_dataset;
use crate::record::parse_year;
use crate::store::DataSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub total_rows: usize,
    pub matched_rows: usize,
    pub language: String,
    /// Language column over the whole input, most frequent first.
    pub language_distribution: Vec<(String, usize)>,
    /// Matched rows per year, years ascending. Empty without a year column.
    pub year_distribution: Vec<(String, usize)>,
    /// Most frequent artists among matched rows.
    pub top_artists: Vec<(String, usize)>,
    pub columns: Vec<String>,
    pub output: PathBuf,
    pub bytes_written: u64,
}

/// Rows of `ds` that pass every configured criterion, headers unchanged.
/// `path` only labels errors.
pub fn filter_dataset(ds: &DataSet, opts: &FilterOptions, path: &Path) -> Result<DataSet, FilterError> {
    let lang_col = ds.require_column(&opts.language_column, path)?;
    let mut out = ds.retain_rows(|row| ds.cell(row, lang_col) == opts.language);
    logf!("Language {:?}: {} of {} rows", opts.language, out.len(), ds.len());

    if let Some((start, end)) = opts.year_range {
        narrow(&mut out, YEAR_COLUMN, "year range", |v| {
            parse_year(v).is_some_and(|y| (start..=end).contains(&y))
        });
    }
    if let Some(min) = opts.min_lyrics_len {
        narrow(&mut out, LYRICS_COLUMN, "lyrics length", |v| v.chars().count() >= min);
    }
    if let Some(needle) = nonblank(&opts.lyrics_contains) {
        let needle = needle.to_lowercase();
        narrow(&mut out, LYRICS_COLUMN, "lyrics keyword", |v| v.to_lowercase().contains(&needle));
    }
    if let Some(needle) = nonblank(&opts.artist_contains) {
        let needle = needle.to_lowercase();
        narrow(&mut out, ARTIST_COLUMN, "artist", |v| v.to_lowercase().contains(&needle));
    }
    if let Some(pattern) = nonblank(&opts.tag_pattern) {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        narrow(&mut out, TAG_COLUMN, "tag pattern", |v| re.is_match(v));
    }
    Ok(out)
}

fn nonblank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Apply one criterion on `column`. An absent column skips the criterion.
fn narrow<F>(ds: &mut DataSet, column: &str, label: &str, keep: F)
where
    F: Fn(&str) -> bool,
{
    let Some(col) = ds.column(column) else {
        logw!("No '{column}' column; skipping {label} filter");
        return;
    };
    let before = ds.len();
    *ds = ds.retain_rows(|row| keep(ds.cell(row, col)));
    logf!("After {label} filter: {} of {before} rows", ds.len());
}

/// Load `opts.input`, filter, write `opts.output`, and summarize.
pub fn run_filter(opts: &FilterOptions) -> Result<FilterSummary, FilterError> {
    opts.validate()?;
    logf!("Loading {}", opts.input.display());
    let ds = DataSet::load_csv(&opts.input)?;
    let filtered = filter_dataset(&ds, opts, &opts.input)?;
    let bytes_written = write_dataset(&opts.output, &filtered)?;
    logf!("Wrote {} rows to {} ({bytes_written} bytes)", filtered.len(), opts.output.display());

    Ok(summarize(&ds, &filtered, opts, bytes_written))
}

fn summarize(ds: &DataSet, filtered: &DataSet, opts: &FilterOptions, bytes_written: u64) -> FilterSummary {
    let top = opts.top_values;
    let language_distribution: Vec<(String, usize)> = ds
        .column(&opts.language_column)
        .map(|c| ds.value_counts(c).into_iter().take(top).collect())
        .unwrap_or_default();

    let year_distribution = filtered
        .column(YEAR_COLUMN)
        .map(|c| {
            let mut years = filtered.value_counts(c);
            years.sort_by_key(|(y, _)| (parse_year(y).is_none(), parse_year(y), y.clone()));
            years
        })
        .unwrap_or_default();

    let top_artists: Vec<(String, usize)> = filtered
        .column(ARTIST_COLUMN)
        .map(|c| filtered.value_counts(c).into_iter().take(top).collect())
        .unwrap_or_default();

    FilterSummary {
        total_rows: ds.len(),
        matched_rows: filtered.len(),
        language: opts.language.clone(),
        language_distribution,
        year_distribution,
        top_artists,
        columns: filtered.headers.clone(),
        output: opts.output.clone(),
        bytes_written,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds() -> DataSet {
        DataSet::new(
            strings!["title", "artist", "year", "tag", "lyrics", "language"],
            vec![
                strings!["a", "MC Jin", "2015", "Hip-Hop", "money flow", "zh"],
                strings!["b", "GAI", "2018", "说唱", "江湖", "zh"],
                strings!["c", "x", "2018", "pop", "love", "en"],
                strings!["d", "GAI", "unknown", "rock", "长长的歌词", "zh"],
            ],
        )
    }

    #[test]
    fn language_is_exact_match() {
        let mut data = ds();
        data.rows[0][5] = s!("ZH");
        let out = filter_dataset(&data, &FilterOptions::default(), Path::new("t.csv")).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn year_range_drops_unparsable_years() {
        let opts = FilterOptions { year_range: Some((2016, 2020)), ..Default::default() };
        let out = filter_dataset(&ds(), &opts, Path::new("t.csv")).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0][0], "b");
    }

    #[test]
    fn rap_preset_matches_tags() {
        let opts = FilterOptions {
            tag_pattern: Some(s!(crate::config::consts::RAP_TAG_PATTERN)),
            ..Default::default()
        };
        let out = filter_dataset(&ds(), &opts, Path::new("t.csv")).unwrap();
        let titles: Vec<&str> = out.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn artist_and_length_criteria_stack() {
        let opts = FilterOptions {
            artist_contains: Some(s!("gai")),
            min_lyrics_len: Some(3),
            ..Default::default()
        };
        let out = filter_dataset(&ds(), &opts, Path::new("t.csv")).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0][0], "d");
    }

    #[test]
    fn absent_criterion_column_is_skipped() {
        let data = DataSet::new(strings!["language"], vec![strings!["zh"], strings!["en"]]);
        let opts = FilterOptions { tag_pattern: Some(s!("rap")), ..Default::default() };
        assert_eq!(filter_dataset(&data, &opts, Path::new("t.csv")).unwrap().len(), 1);
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let opts = FilterOptions { tag_pattern: Some(s!("(")), ..Default::default() };
        let err = filter_dataset(&ds(), &opts, Path::new("t.csv")).unwrap_err();
        assert!(matches!(err, FilterError::Pattern(_)));
    }
}
