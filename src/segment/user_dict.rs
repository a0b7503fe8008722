// src/segment/user_dict.rs
use std::{fs, io, path::Path};

use crate::error::DataLoadError;

/// One user dictionary entry: the word and an optional frequency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserWord {
    pub word: String,
    pub freq: Option<usize>,
}

/// Read a jieba-style dictionary: `word [freq] [tag]` per line.
/// Blank lines and `#` comments are skipped; a non-numeric second column
/// is treated as a tag.
pub fn read_user_dict(path: &Path) -> Result<Vec<UserWord>, DataLoadError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::NotFound(path.to_path_buf()),
        io::ErrorKind::InvalidData => DataLoadError::Encoding(path.to_path_buf()),
        _ => DataLoadError::Io { path: path.to_path_buf(), source: e },
    })?;
    Ok(parse_user_dict(&text))
}

fn parse_user_dict(text: &str) -> Vec<UserWord> {
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let mut cols = line.split_whitespace();
        if let Some(word) = cols.next() {
            let freq = cols.next().and_then(|f| f.parse().ok());
            out.push(UserWord { word: s!(word), freq });
        }
    }
    out
}
