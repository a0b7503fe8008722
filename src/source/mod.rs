// src/source/mod.rs
//! Where songs come from. Both pipelines past the filter only ever see
//! `LyricRecord`s; a `SongSource` turns a search keyword into ids and an
//! id into a record.

mod csv_source;
mod netease;

pub use csv_source::CsvSource;
pub use netease::{parse_detail, parse_lyric, parse_search, NeteaseSource, SongDetail};

use crate::config::{SourceKind, SourceOptions};
use crate::error::{AnalysisError, SourceError};
use crate::record::LyricRecord;

pub trait SongSource {
    /// Short label for logs and the snapshot.
    fn name(&self) -> &str;

    /// Ids of songs matching `keyword`, best match first, at most `limit`.
    fn search(&mut self, keyword: &str, limit: usize) -> Result<Vec<String>, SourceError>;

    /// Detail and lyrics for one id.
    fn fetch(&mut self, id: &str) -> Result<LyricRecord, SourceError>;
}

/// Build the configured source. The CSV source loads its dataset here, so a
/// missing file fails before any work starts.
pub fn open_source(opts: &SourceOptions) -> Result<Box<dyn SongSource>, AnalysisError> {
    Ok(match opts.kind {
        SourceKind::Netease => Box::new(NeteaseSource::new(opts)?),
        SourceKind::Csv => Box::new(CsvSource::open(&opts.dataset, &opts.language)?),
    })
}
