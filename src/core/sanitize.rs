// src/core/sanitize.rs

use std::sync::LazyLock;

use regex::Regex;

/// Credit lines that lyric services prepend ("作词 : 某人", "Producer: X").
static CREDIT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(作词|作曲|编曲|词|曲|制作人|制作|混音|母带|录音|和声|监制|出品|吉他|贝斯|鼓|lyrics?|music|composer|producer|arranger|mix(ed)?|master(ed)?)\s*(by)?\s*[:：]",
    )
    .expect("credit line pattern is valid")
});

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove `[ ... ]` and `【 ... 】` spans: LRC timestamps (`[00:12.34]`),
/// LRC metadata (`[ar:...]`) and section markers (`[Hook]`). No nesting.
pub fn strip_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth_open: Option<char> = None;
    for ch in s.chars() {
        match (depth_open, ch) {
            (None, '[') => depth_open = Some(']'),
            (None, '【') => depth_open = Some('】'),
            (Some(close), c) if c == close => depth_open = None,
            (None, c) => out.push(c),
            _ => {}
        }
    }
    out
}

/// Lyrics text ready for segmentation: entities decoded, bracket tags
/// removed, credit lines dropped, whitespace collapsed per line.
pub fn clean_lyrics(raw: &str) -> String {
    let decoded = normalize_entities(raw);
    let mut out = String::with_capacity(decoded.len());
    for line in decoded.lines() {
        let line = normalize_ws(&strip_brackets(line));
        if line.is_empty() || CREDIT_LINE.is_match(&line) {
            continue;
        }
        if !out.is_empty() { out.push('\n'); }
        out.push_str(&line);
    }
    out
}
