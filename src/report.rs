// src/report.rs
// Console text for both pipelines. Pure formatting; callers print.

use std::fmt::Write;

use crate::analysis::AnalysisSnapshot;
use crate::filter::FilterSummary;
use crate::keywords::is_keyword;

const RULE: &str = "============================================================";
const THIN: &str = "----------------------------------------";

/// Display name for a language code; unknown codes print as themselves.
pub fn language_label(code: &str) -> &str {
    match code {
        "zh" => "Chinese",
        "en" => "English",
        "ja" => "Japanese",
        "ko" => "Korean",
        "es" => "Spanish",
        "fr" => "French",
        other => other,
    }
}

fn table(out: &mut String, title: &str, rows: &[(String, usize)]) {
    if rows.is_empty() { return; }
    let _ = writeln!(out, "\n{title}:");
    let shown = |v: &str| (if v.is_empty() { "(blank)" } else { v }).to_string();
    let width = rows.iter().map(|(v, _)| shown(v).chars().count()).max().unwrap_or(0);
    for (value, n) in rows {
        let cell = shown(value);
        let pad = width.saturating_sub(cell.chars().count());
        let _ = writeln!(out, "  {cell}{:pad$}  {n}", "");
    }
}

pub fn format_filter_summary(s: &FilterSummary) -> String {
    let mut out = String::new();
    let label = language_label(&s.language);
    let _ = writeln!(out, "Total: {}, {label}: {}", s.total_rows, s.matched_rows);
    let _ = writeln!(out, "Columns: {}", s.columns.join(", "));

    table(&mut out, "Language distribution", &s.language_distribution);
    table(&mut out, "Year distribution (matched)", &s.year_distribution);
    table(&mut out, "Top artists (matched)", &s.top_artists);

    if s.matched_rows == 0 {
        let _ = writeln!(out, "\nNo {label} songs found in the dataset");
    }
    let _ = writeln!(
        out,
        "\nSaved {} rows to {} ({} bytes)",
        s.matched_rows,
        s.output.display(),
        s.bytes_written
    );
    out
}

pub fn render_analysis(snap: &AnalysisSnapshot, display_top_n: usize) -> String {
    let mut out = String::new();
    let info = &snap.analysis_info;
    let stats = &info.stats;

    let _ = writeln!(out, "{RULE}\nRap Vocabulary Analysis Summary\n{RULE}");
    let _ = writeln!(out, "Source: {}", info.source);
    let _ = writeln!(out, "Search keywords: {}", info.search_keywords.join(", "));
    let _ = writeln!(out, "Songs collected: {} ({} failed)", snap.songs.len(), info.songs_failed);
    let _ = writeln!(
        out,
        "Songs tokenized: {} (skipped {})",
        stats.songs_tokenized, stats.songs_skipped
    );
    let _ = writeln!(out, "Keyword occurrences: {}", stats.token_occurrences);
    let _ = writeln!(out, "Years analyzed: {}", stats.years_covered);
    if let (Some(a), Some(b)) = (stats.first_year, stats.last_year) {
        let _ = writeln!(out, "Year range: {a} - {b}");
    }

    for (year, ranking) in &snap.yearly_rankings {
        let _ = writeln!(out, "\n{year} - Top {display_top_n} keywords:\n{THIN}");
        for (i, k) in ranking.iter().take(display_top_n).enumerate() {
            let _ = writeln!(out, "{:2}. {} (frequency: {})", i + 1, k.word, k.frequency);
        }
    }

    if !snap.tracked_keywords.0.is_empty() {
        let _ = writeln!(out, "\n{RULE}\nTracked keywords\n{RULE}");
        for (keyword, series) in snap.tracked_keywords.iter() {
            if !is_keyword(keyword, info.min_token_len) {
                let _ = writeln!(
                    out,
                    "\n{keyword} - Never counted (keywords need at least {} letters)",
                    info.min_token_len
                );
                continue;
            }
            if series.is_empty() {
                let _ = writeln!(out, "\n{keyword} - No occurrences found");
                continue;
            }
            let _ = writeln!(out, "\n{keyword} - Frequency by year:\n{THIN}");
            for (year, n) in series {
                let _ = writeln!(out, "  {year}: {n} occurrences");
            }
            let total: u64 = series.iter().map(|(_, n)| n).sum();
            let _ = writeln!(out, "  Total: {total} occurrences");
        }
    }
    out
}
