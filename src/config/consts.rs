// src/config/consts.rs

// Filter pipeline
pub const DEFAULT_INPUT_CSV: &str = "dataset/song_lyrics.csv";
pub const DEFAULT_FILTERED_CSV: &str = "chinese_songs.csv";
pub const LANGUAGE_COLUMN: &str = "language";
pub const TARGET_LANGUAGE: &str = "zh";
pub const TOP_VALUES: usize = 10;

// Column names shared by the filter criteria and the CSV song source
pub const ID_COLUMN: &str = "id";
pub const TITLE_COLUMN: &str = "title";
pub const ARTIST_COLUMN: &str = "artist";
pub const YEAR_COLUMN: &str = "year";
pub const LYRICS_COLUMN: &str = "lyrics";
pub const TAG_COLUMN: &str = "tag";

/// Tag detector for rap / hip-hop rows (case-insensitive).
pub const RAP_TAG_PATTERN: &str = r"(rap|hip.?hop|hiphop|嘻哈|说唱|饶舌)";

// Analysis pipeline
pub const DEFAULT_SNAPSHOT_JSON: &str = "rap_vocabulary_analysis.json";
pub const DEFAULT_DATASET_CSV: &str = "chinese_raphiphop.csv";
pub const TOP_N: usize = 10;
pub const MIN_TOKEN_LEN: usize = 2;
pub const DEFAULT_SEARCH_KEYWORDS: &[&str] = &["说唱", "嘻哈"];
/// Must pass the keyword rule themselves (two letters or more) to ever match.
pub const DEFAULT_TRACKED_KEYWORDS: &[&str] = &[
    "爱情", "青春", "梦想", "工作", "生活", "未来", "朋友", "音乐", "生病", "外部",
];

// Net config
pub const API_BASE: &str = "https://music.163.com";
pub const USER_AGENT: &str = concat!("lyric_scrape/", env!("CARGO_PKG_VERSION"));
pub const SEARCH_LIMIT: usize = 30;
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
pub const REQUEST_PAUSE_MS: u64 = 300; // be polite

// Logging
pub const DEFAULT_LOG_FILTER: &str = "info";
