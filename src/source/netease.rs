// src/source/netease.rs
//! NetEase-style music API: keyword search, song detail, lyrics.
//!
//! Response parsing is kept in free functions over the response body so it
//! can be tested without a network.

use chrono::{DateTime, Datelike};
use serde::Deserialize;

use super::SongSource;
use crate::config::SourceOptions;
use crate::core::net::HttpClient;
use crate::error::SourceError;
use crate::record::LyricRecord;

const SEARCH_PATH: &str = "/api/search/get/web";
const DETAIL_PATH: &str = "/api/song/detail/";
const LYRIC_PATH: &str = "/api/song/lyric";

/* ---------------- Wire types ---------------- */

#[derive(Debug, Deserialize)]
struct SearchResponse {
    code: i64,
    #[serde(default)]
    result: Option<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    songs: Vec<SongRef>,
}

#[derive(Debug, Deserialize)]
struct SongRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    code: i64,
    #[serde(default)]
    songs: Vec<WireSong>,
}

#[derive(Debug, Deserialize)]
struct WireSong {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<WireArtist>,
    #[serde(default)]
    album: Option<WireAlbum>,
}

#[derive(Debug, Deserialize)]
struct WireArtist {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireAlbum {
    #[serde(default, rename = "publishTime")]
    publish_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct LyricResponse {
    code: i64,
    #[serde(default)]
    lrc: Option<LrcBody>,
    #[serde(default)]
    nolyric: bool,
    #[serde(default)]
    uncollected: bool,
}

#[derive(Debug, Deserialize)]
struct LrcBody {
    #[serde(default)]
    lyric: Option<String>,
}

/// Song metadata from the detail endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongDetail {
    pub id: String,
    pub title: String,
    /// Artist names joined with " / ".
    pub artist: String,
    pub release_year: Option<i32>,
}

/* ---------------- Parsing ---------------- */

fn decode<'a, T: Deserialize<'a>>(body: &'a str, what: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(format!("{what}: {e}")))
}

fn check_code(code: i64, what: &str) -> Result<(), SourceError> {
    if code == 200 {
        return Ok(());
    }
    let status = u16::try_from(code).unwrap_or(0);
    Err(SourceError::Status(status, format!("{what} returned code {code}")))
}

/// Publish time in epoch milliseconds → UTC year. Zero or negative means
/// the service does not know.
pub fn year_from_millis(ms: i64) -> Option<i32> {
    if ms <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(ms).map(|dt| dt.year())
}

pub fn parse_search(body: &str) -> Result<Vec<String>, SourceError> {
    let resp: SearchResponse = decode(body, "search")?;
    check_code(resp.code, "search")?;
    Ok(resp
        .result
        .unwrap_or_default()
        .songs
        .into_iter()
        .map(|s| s.id.to_string())
        .collect())
}

pub fn parse_detail(body: &str, id: &str) -> Result<SongDetail, SourceError> {
    let resp: DetailResponse = decode(body, "detail")?;
    check_code(resp.code, "detail")?;
    let song = resp
        .songs
        .into_iter()
        .find(|s| s.id.to_string() == id)
        .ok_or_else(|| SourceError::NotFound(format!("song {id}")))?;

    let artist = song
        .artists
        .iter()
        .map(|a| a.name.trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(" / ");
    let release_year = song.album.and_then(|a| a.publish_time).and_then(year_from_millis);

    Ok(SongDetail { id: s!(id), title: song.name, artist, release_year })
}

/// Raw LRC text. Songs without lyrics (instrumentals, never collected)
/// are `NotFound`.
pub fn parse_lyric(body: &str, id: &str) -> Result<String, SourceError> {
    let resp: LyricResponse = decode(body, "lyric")?;
    check_code(resp.code, "lyric")?;
    if resp.nolyric || resp.uncollected {
        return Err(SourceError::NotFound(format!("lyrics for song {id}")));
    }
    match resp.lrc.and_then(|l| l.lyric) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(SourceError::NotFound(format!("lyrics for song {id}"))),
    }
}

/* ---------------- Source ---------------- */

pub struct NeteaseSource {
    http: HttpClient,
    base_url: String,
    language: String,
}

impl NeteaseSource {
    pub fn new(opts: &SourceOptions) -> Result<Self, SourceError> {
        let http = HttpClient::new(&opts.user_agent, opts.timeout_secs, opts.pause_ms)?;
        Ok(Self {
            http,
            base_url: s!(opts.base_url.trim_end_matches('/')),
            language: opts.language.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn detail(&mut self, id: &str) -> Result<SongDetail, SourceError> {
        let ids = format!("[{id}]");
        let url = self.url(DETAIL_PATH);
        let body = self.http.get_text(&url, &[("id", id), ("ids", ids.as_str())])?;
        parse_detail(&body, id)
    }

    pub fn lyric(&mut self, id: &str) -> Result<String, SourceError> {
        let url = self.url(LYRIC_PATH);
        let body = self.http.get_text(&url, &[("id", id), ("lv", "1"), ("kv", "1"), ("tv", "-1")])?;
        parse_lyric(&body, id)
    }
}

impl SongSource for NeteaseSource {
    fn name(&self) -> &str {
        "netease"
    }

    fn search(&mut self, keyword: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        let url = self.url(SEARCH_PATH);
        let limit = limit.to_string();
        let body = self.http.get_text(&url, &[("s", keyword), ("type", "1"), ("limit", limit.as_str())])?;
        let ids = parse_search(&body)?;
        logd!("Search {keyword:?}: {} ids", ids.len());
        Ok(ids)
    }

    fn fetch(&mut self, id: &str) -> Result<LyricRecord, SourceError> {
        let detail = self.detail(id)?;
        let lyrics_text = self.lyric(id)?;
        Ok(LyricRecord {
            id: detail.id,
            title: detail.title,
            artist: detail.artist,
            language_code: self.language.clone(),
            lyrics_text,
            release_year: detail.release_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_ids_in_order() {
        let body = r#"{"result":{"songs":[{"id":186016,"name":"a"},{"id":42,"name":"b"}],"songCount":2},"code":200}"#;
        assert_eq!(parse_search(body).unwrap(), strings!["186016", "42"]);
    }

    #[test]
    fn search_without_result_is_empty() {
        assert!(parse_search(r#"{"code":200}"#).unwrap().is_empty());
    }

    #[test]
    fn error_code_becomes_status() {
        let err = parse_search(r#"{"code":-460,"message":"Cheating"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Status(0, _)));
        let err = parse_search(r#"{"code":405}"#).unwrap_err();
        assert!(matches!(err, SourceError::Status(405, _)));
    }

    #[test]
    fn detail_year_from_publish_time() {
        // 2019-06-01T00:00:00Z
        let body = r#"{"songs":[{"id":7,"name":"梦想","artists":[{"name":"甲"},{"name":"乙"}],
            "album":{"name":"x","publishTime":1559347200000}}],"code":200}"#;
        let d = parse_detail(body, "7").unwrap();
        assert_eq!(d.title, "梦想");
        assert_eq!(d.artist, "甲 / 乙");
        assert_eq!(d.release_year, Some(2019));
    }

    #[test]
    fn zero_publish_time_is_unknown() {
        let body = r#"{"songs":[{"id":7,"name":"x","artists":[],"album":{"publishTime":0}}],"code":200}"#;
        assert_eq!(parse_detail(body, "7").unwrap().release_year, None);
    }

    #[test]
    fn detail_missing_song_is_not_found() {
        let err = parse_detail(r#"{"songs":[],"code":200}"#, "7").unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn lyric_variants() {
        let ok = r#"{"lrc":{"version":3,"lyric":"[00:01.00]青春\n"},"code":200}"#;
        assert_eq!(parse_lyric(ok, "1").unwrap(), "[00:01.00]青春\n");

        let none = r#"{"nolyric":true,"code":200}"#;
        assert!(matches!(parse_lyric(none, "1"), Err(SourceError::NotFound(_))));

        let blank = r#"{"lrc":{"lyric":"  "},"code":200}"#;
        assert!(matches!(parse_lyric(blank, "1"), Err(SourceError::NotFound(_))));

        assert!(matches!(parse_lyric("<html>", "1"), Err(SourceError::Parse(_))));
    }
}
