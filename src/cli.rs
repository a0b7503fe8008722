// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::{AppConfig, SourceKind, UnknownYearPolicy};
use crate::config::consts::RAP_TAG_PATTERN;
use crate::progress::Progress;
use crate::{analysis, filter, report, source};

#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// TOML file with defaults; flags override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Keep the rows of a lyrics CSV whose language matches, and report on them.
#[derive(Parser, Debug)]
#[command(name = "song-filter", version)]
pub struct FilterArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "NAME")]
    pub language_column: Option<String>,

    /// Language code to keep (exact match).
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Inclusive year range, e.g. 2010-2020.
    #[arg(long, value_name = "START-END", value_parser = parse_year_range)]
    pub years: Option<(i32, i32)>,

    #[arg(long, value_name = "CHARS")]
    pub min_lyrics_len: Option<usize>,

    #[arg(long, value_name = "TEXT")]
    pub lyrics_contains: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub artist: Option<String>,

    /// Case-insensitive regex on the tag column.
    #[arg(long, value_name = "REGEX", conflicts_with = "rap")]
    pub tag_pattern: Option<String>,

    /// Keep rap / hip-hop tagged rows only.
    #[arg(long)]
    pub rap: bool,

    #[arg(long, value_name = "N")]
    pub top_values: Option<usize>,
}

/// Rank lyric keywords per release year.
#[derive(Parser, Debug)]
#[command(name = "keyword-rank", version)]
pub struct RankArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Lyrics CSV for `--source csv`.
    #[arg(long, value_name = "CSV")]
    pub dataset: Option<PathBuf>,

    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Search keyword; repeat for several.
    #[arg(short, long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// Every song in the dataset (implies `--source csv`).
    #[arg(long, conflicts_with = "keywords")]
    pub all: bool,

    /// Keyword to report a per-year series for; repeat for several.
    #[arg(short, long = "track", value_name = "WORD")]
    pub tracked: Vec<String>,

    /// Songs per search keyword (0 = no limit for the CSV source).
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    #[arg(short = 'n', long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Rows printed per year; the snapshot keeps top-n.
    #[arg(long, value_name = "N")]
    pub display_top_n: Option<usize>,

    #[arg(long, value_name = "CHARS")]
    pub min_len: Option<usize>,

    #[arg(long, value_enum)]
    pub unknown_year: Option<UnknownYearPolicy>,

    /// Extra segmentation words, one per line.
    #[arg(long, value_name = "FILE")]
    pub user_dict: Option<PathBuf>,

    #[arg(short, long, value_name = "JSON")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "MS")]
    pub pause_ms: Option<u64>,

    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

fn parse_year_range(s: &str) -> Result<(i32, i32), String> {
    let (a, b) = s.split_once('-').ok_or_else(|| format!("expected START-END, got {s:?}"))?;
    let a: i32 = a.trim().parse().map_err(|_| format!("bad start year {a:?}"))?;
    let b: i32 = b.trim().parse().map_err(|_| format!("bad end year {b:?}"))?;
    if a > b {
        return Err(format!("invalid range: {s}"));
    }
    Ok((a, b))
}

fn setup(common: &CommonArgs) -> Result<AppConfig> {
    crate::log::init(common.log_file.as_deref()).wrap_err("could not open log file")?;
    match &common.config {
        Some(path) => {
            logd!("Config: {}", path.display());
            Ok(AppConfig::load(path)?)
        }
        None => Ok(AppConfig::default()),
    }
}

/* ---------------- song-filter ---------------- */

pub fn filter_main() -> Result<()> {
    run_filter_args(FilterArgs::parse())
}

pub fn run_filter_args(args: FilterArgs) -> Result<()> {
    let cfg = setup(&args.common)?;
    let mut opts = cfg.filter;

    if let Some(v) = args.input { opts.input = v; }
    if let Some(v) = args.output { opts.output = v; }
    if let Some(v) = args.language_column { opts.language_column = v; }
    if let Some(v) = args.language { opts.language = v; }
    if let Some(v) = args.years { opts.year_range = Some(v); }
    if let Some(v) = args.min_lyrics_len { opts.min_lyrics_len = Some(v); }
    if let Some(v) = args.lyrics_contains { opts.lyrics_contains = Some(v); }
    if let Some(v) = args.artist { opts.artist_contains = Some(v); }
    if let Some(v) = args.tag_pattern { opts.tag_pattern = Some(v); }
    if args.rap { opts.tag_pattern = Some(s!(RAP_TAG_PATTERN)); }
    if let Some(v) = args.top_values { opts.top_values = v; }

    println!("Reading CSV file: {}", opts.input.display());
    let summary = filter::run_filter(&opts)?;
    print!("{}", report::format_filter_summary(&summary));
    Ok(())
}

/* ---------------- keyword-rank ---------------- */

pub fn rank_main() -> Result<()> {
    run_rank_args(RankArgs::parse())
}

pub fn run_rank_args(args: RankArgs) -> Result<()> {
    let cfg = setup(&args.common)?;
    let mut opts = cfg.analysis;

    if let Some(v) = args.source { opts.source.kind = v; }
    if let Some(v) = args.dataset { opts.source.dataset = v; }
    if let Some(v) = args.base_url { opts.source.base_url = v; }
    if !args.keywords.is_empty() { opts.search_keywords = args.keywords; }
    if args.all {
        opts.source.kind = SourceKind::Csv;
        opts.search_keywords = Vec::new();
        opts.source.search_limit = 0;
    }
    if !args.tracked.is_empty() { opts.tracked_keywords = args.tracked; }
    if let Some(v) = args.limit { opts.source.search_limit = v; }
    if let Some(v) = args.top_n { opts.top_n = v; }
    if let Some(v) = args.display_top_n { opts.display_top_n = v; }
    if let Some(v) = args.min_len { opts.min_token_len = v; }
    if let Some(v) = args.unknown_year { opts.unknown_year = v; }
    if let Some(v) = args.user_dict { opts.user_dict = Some(v); }
    if let Some(v) = args.output { opts.output = v; }
    if let Some(v) = args.pause_ms { opts.source.pause_ms = v; }
    if let Some(v) = args.timeout_secs { opts.source.timeout_secs = v; }

    opts.validate()?;
    let mut src = source::open_source(&opts.source)?;
    let mut progress = ConsoleProgress::default();
    let snapshot = analysis::run_analysis(&opts, src.as_mut(), Some(&mut progress))?;

    if snapshot.songs.is_empty() {
        logw!("No songs were collected from {}", src.name());
    }
    print!("{}", report::render_analysis(&snapshot, opts.display_top_n));
    println!("\nResults saved to: {}", opts.output.display());
    Ok(())
}

/// Prints one line per song to stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, id: &str, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {id} {label}", self.done, self.total);
    }

    fn item_failed(&mut self, id: &str, reason: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {id} skipped: {reason}", self.done, self.total);
    }
}
