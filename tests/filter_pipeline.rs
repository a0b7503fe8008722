// tests/filter_pipeline.rs
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use lyric_scrape::cli::{run_filter_args, FilterArgs};
use lyric_scrape::config::FilterOptions;
use lyric_scrape::error::{DataLoadError, FilterError};
use lyric_scrape::filter::run_filter;
use lyric_scrape::report::format_filter_summary;
use lyric_scrape::store::DataSet;

const FIVE_ROWS: &str = "\
title,artist,year,tag,lyrics,language
Song A,GAI,2018,说唱,\"江湖, 兄弟\",zh
Song B,Drake,2016,hip hop,started from the bottom,en
Song C,Jay Chou,2003,pop,\"line one
line two\",zh
Song D,IU,2017,ballad,좋은 날,ko
Song E,Adele,2015,pop,hello,en
";

fn opts(dir: &Path, input: &str) -> FilterOptions {
    let input_path = dir.join("song_lyrics.csv");
    fs::write(&input_path, input).unwrap();
    FilterOptions {
        input: input_path,
        output: dir.join("out/chinese_songs.csv"),
        ..Default::default()
    }
}

fn read(p: &PathBuf) -> String {
    fs::read_to_string(p).unwrap()
}

#[test]
fn five_rows_two_chinese() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), FIVE_ROWS);

    let summary = run_filter(&o).unwrap();
    assert_eq!(summary.total_rows, 5);
    assert_eq!(summary.matched_rows, 2);
    assert!(format_filter_summary(&summary).contains("Total: 5, Chinese: 2"));

    let out = DataSet::load_csv(&o.output).unwrap();
    assert_eq!(out.headers, DataSet::load_csv(&o.input).unwrap().headers);
    assert_eq!(out.len(), 2);
    assert_eq!(out.rows[1][4], "line one\nline two");
    assert_eq!(summary.bytes_written, read(&o.output).len() as u64);
    assert_eq!(summary.language_distribution[0], ("zh".to_string(), 2));
}

#[test]
fn filtering_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let first = opts(dir.path(), FIVE_ROWS);
    run_filter(&first).unwrap();

    let second = FilterOptions {
        input: first.output.clone(),
        output: dir.path().join("again.csv"),
        ..Default::default()
    };
    run_filter(&second).unwrap();
    assert_eq!(read(&first.output), read(&second.output));
}

#[test]
fn headers_only_input_gives_headers_only_output() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), "title,language\n");
    let summary = run_filter(&o).unwrap();
    assert_eq!(summary.total_rows, 0);
    assert_eq!(read(&o.output), "title,language\n");
}

#[test]
fn absent_language_is_zero_rows_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(dir.path(), FIVE_ROWS);
    o.language = "fr".into();
    let summary = run_filter(&o).unwrap();
    assert_eq!(summary.matched_rows, 0);
    assert_eq!(read(&o.output), "title,artist,year,tag,lyrics,language\n");
    assert!(format_filter_summary(&summary).contains("Total: 5, French: 0"));
}

#[test]
fn missing_input_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let o = FilterOptions {
        input: dir.path().join("nope.csv"),
        output: dir.path().join("out.csv"),
        ..Default::default()
    };
    let err = run_filter(&o).unwrap_err();
    assert!(matches!(err, FilterError::Load(DataLoadError::NotFound(_))));
    assert!(!o.output.exists());
}

#[test]
fn missing_language_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), "title,lang\na,zh\n");
    let err = run_filter(&o).unwrap_err();
    assert!(matches!(err, FilterError::Load(DataLoadError::MissingColumn { .. })));
    assert!(err.to_string().contains("title, lang"));
    assert!(!o.output.exists());
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), FIVE_ROWS);
    fs::create_dir_all(o.output.parent().unwrap()).unwrap();
    fs::write(&o.output, "stale content that is much longer than anything we will write ".repeat(20)).unwrap();
    run_filter(&o).unwrap();
    assert!(!read(&o.output).contains("stale"));
}

#[test]
fn year_range_and_rap_tag() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(dir.path(), FIVE_ROWS);
    o.year_range = Some((2010, 2020));
    o.tag_pattern = Some(lyric_scrape::config::consts::RAP_TAG_PATTERN.into());
    let summary = run_filter(&o).unwrap();
    assert_eq!(summary.matched_rows, 1);
    assert_eq!(summary.year_distribution, vec![("2018".to_string(), 1)]);
    assert_eq!(summary.top_artists, vec![("GAI".to_string(), 1)]);
}

#[test]
fn stray_quotes_do_not_merge_rows() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), "title,language\nDon\"t Stop,zh\nB,zh\nC,en\nRock 'n\" Roll,zh\nE,zh\n");
    let summary = run_filter(&o).unwrap();
    assert_eq!((summary.total_rows, summary.matched_rows), (5, 4));

    let out = DataSet::load_csv(&o.output).unwrap();
    let titles: Vec<&str> = out.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(titles, vec!["Don\"t Stop", "B", "Rock 'n\" Roll", "E"]);
}

#[test]
fn single_stray_quote_is_not_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), "title,language\nDon\"t Stop,zh\nB,en\n");
    let summary = run_filter(&o).unwrap();
    assert_eq!((summary.total_rows, summary.matched_rows), (2, 1));
}

fn cli_args(extra: &[&str]) -> FilterArgs {
    let mut argv = vec!["song-filter"];
    argv.extend_from_slice(extra);
    FilterArgs::try_parse_from(argv).unwrap()
}

#[test]
fn cli_missing_input_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.csv");
    let output = dir.path().join("out.csv");
    let args = cli_args(&["-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);

    let err = run_filter_args(args).unwrap_err();
    assert!(format!("{err}").contains("not found"), "{err}");
    assert!(!output.exists());
}

#[test]
fn cli_ignores_invalid_analysis_section_in_shared_config() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path(), FIVE_ROWS);
    let config = dir.path().join("shared.toml");
    fs::write(&config, "[analysis]\nsearch_keywords = []\n").unwrap();

    let args = cli_args(&[
        "--config", config.to_str().unwrap(),
        "-i", o.input.to_str().unwrap(),
        "-o", o.output.to_str().unwrap(),
    ]);
    run_filter_args(args).unwrap();
    assert_eq!(DataSet::load_csv(&o.output).unwrap().len(), 2);
}
