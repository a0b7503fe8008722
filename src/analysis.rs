// src/analysis.rs
//! Analysis pipeline: collect songs, tally keywords per year, snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{AnalysisOptions, UnknownYearPolicy};
use crate::error::AnalysisError;
use crate::file::write_json_atomic;
use crate::keywords::{AnalysisStats, KeywordCount, KeywordTally, RankedKeyword, TrackedSeries};
use crate::progress::Progress;
use crate::record::{LyricRecord, YearKey};
use crate::scrape::collect_records;
use crate::segment::Segmenter;
use crate::source::SongSource;

/// Tally every record, in order.
pub fn analyze(records: &[LyricRecord], segmenter: &Segmenter, opts: &AnalysisOptions) -> KeywordTally {
    let mut tally = KeywordTally::new(opts.min_token_len, opts.unknown_year, &opts.tracked_keywords);
    for rec in records {
        let outcome = tally.add_record(rec, segmenter);
        logd!("Song {} ({}): {outcome:?}", rec.id, rec.year_key());
    }
    tally
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalysisInfo {
    #[serde(flatten)]
    pub stats: AnalysisStats,
    pub source: String,
    pub search_keywords: Vec<String>,
    pub songs_failed: usize,
    pub top_n: usize,
    pub min_token_len: usize,
    pub unknown_year: UnknownYearPolicy,
}

/// One complete analysis run.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisSnapshot {
    pub generated_at: DateTime<Utc>,
    pub analysis_info: AnalysisInfo,
    pub songs: Vec<LyricRecord>,
    pub keyword_counts: BTreeMap<YearKey, KeywordCount>,
    pub yearly_rankings: BTreeMap<YearKey, Vec<RankedKeyword>>,
    pub tracked_keywords: TrackedSeries,
}

pub fn build_snapshot(
    records: Vec<LyricRecord>,
    tally: &KeywordTally,
    opts: &AnalysisOptions,
    source: &str,
    songs_failed: usize,
    generated_at: DateTime<Utc>,
) -> AnalysisSnapshot {
    let yearly_rankings = tally
        .rankings(opts.top_n)
        .into_iter()
        .map(|r| (r.year, r.entries))
        .collect();

    AnalysisSnapshot {
        generated_at,
        analysis_info: AnalysisInfo {
            stats: tally.stats(),
            source: s!(source),
            search_keywords: opts.search_keywords.clone(),
            songs_failed,
            top_n: opts.top_n,
            min_token_len: opts.min_token_len,
            unknown_year: opts.unknown_year,
        },
        songs: records,
        keyword_counts: tally.counts().clone(),
        yearly_rankings,
        tracked_keywords: tally.tracked_series(),
    }
}

/// Collect from `source`, tally, and write the snapshot to `opts.output`.
/// Individual retrieval failures only shrink the data set.
pub fn run_analysis(
    opts: &AnalysisOptions,
    source: &mut dyn SongSource,
    progress: Option<&mut dyn Progress>,
) -> Result<AnalysisSnapshot, AnalysisError> {
    opts.validate()?;
    let segmenter = Segmenter::with_user_dict(opts.user_dict.as_deref())?;

    let keywords = if opts.search_keywords.is_empty() { strings![""] } else { opts.search_keywords.clone() };
    let collected = collect_records(source, &keywords, opts.source.search_limit, progress);

    let tally = analyze(&collected.records, &segmenter, opts);
    let stats = tally.stats();
    logf!(
        "Tokenized {} of {} songs; {} keyword occurrences over {} years",
        stats.songs_tokenized, stats.songs_seen, stats.token_occurrences, stats.years_covered
    );

    let snapshot = build_snapshot(
        collected.records,
        &tally,
        opts,
        source.name(),
        collected.failures.len(),
        Utc::now(),
    );
    let bytes = write_json_atomic(&opts.output, &snapshot)?;
    logf!("Snapshot written to {} ({bytes} bytes)", opts.output.display());
    Ok(snapshot)
}
