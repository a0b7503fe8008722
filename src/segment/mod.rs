// src/segment/mod.rs
//! # Lyric tokenizer
//!
//! Chinese lyrics do not mark word boundaries with spaces, so text is cut
//! into runs by script:
//!
//! - **CJK runs** go through jieba (bundled dictionary plus HMM for words
//!   the dictionary does not know). A user dictionary can add words.
//! - **Everything else** is split at Unicode word boundaries (UAX #29) and
//!   lower-cased. Punctuation and whitespace never become tokens.
//!
//! No filtering happens here; length and alphabetic checks belong to
//! `keywords`.

mod user_dict;

pub use user_dict::{read_user_dict, UserWord};

use std::path::Path;

use jieba_rs::Jieba;
use unicode_segmentation::UnicodeSegmentation;

use crate::core::sanitize::clean_lyrics;
use crate::error::DataLoadError;

/// CJK Unified Ideographs plus Extension A.
#[inline]
pub fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}')
}

pub struct Segmenter {
    jieba: Jieba,
    user_words: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self { jieba: Jieba::new(), user_words: 0 }
    }
}

impl Segmenter {
    /// Bundled dictionary plus the words from `path`, if given.
    pub fn with_user_dict(path: Option<&Path>) -> Result<Self, DataLoadError> {
        let mut seg = Self::default();
        if let Some(p) = path {
            for w in read_user_dict(p)? {
                seg.add_word(&w.word, w.freq);
            }
            logf!("Loaded {} user dictionary words from {}", seg.user_words, p.display());
        }
        Ok(seg)
    }

    /// Without a frequency, jieba picks one high enough to keep the word whole.
    pub fn add_word(&mut self, word: &str, freq: Option<usize>) {
        let word = word.trim();
        if word.is_empty() { return; }
        self.jieba.add_word(word, freq, None);
        self.user_words += 1;
    }

    pub fn user_words(&self) -> usize {
        self.user_words
    }

    /// Raw lyrics (LRC tags, credits, entities and all) → tokens.
    pub fn tokenize(&self, lyrics: &str) -> Vec<String> {
        self.segment(&clean_lyrics(lyrics))
    }

    /// Already-clean text → tokens, in text order.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut rest = text;

        while let Some(first) = rest.chars().next() {
            let cjk = is_cjk(first);
            let end = rest
                .char_indices()
                .find(|&(_, c)| is_cjk(c) != cjk)
                .map_or(rest.len(), |(i, _)| i);
            let (run, tail) = rest.split_at(end);

            if cjk {
                out.extend(self.jieba.cut(run, true).into_iter().map(|w| s!(w)));
            } else {
                out.extend(run.unicode_words().map(|w| w.to_lowercase()));
            }
            rest = tail;
        }
        out
    }
}
