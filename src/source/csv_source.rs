// src/source/csv_source.rs
use std::{collections::HashMap, path::Path};

use super::SongSource;
use crate::config::consts::{
    ARTIST_COLUMN, ID_COLUMN, LANGUAGE_COLUMN, LYRICS_COLUMN, TAG_COLUMN, TITLE_COLUMN, YEAR_COLUMN,
};
use crate::error::{DataLoadError, SourceError};
use crate::record::{parse_year, LyricRecord};
use crate::store::DataSet;

/// Songs from a local lyrics CSV. Only the `lyrics` column is required;
/// without an `id` column the 1-based row number is the id.
pub struct CsvSource {
    label: String,
    records: Vec<LyricRecord>,
    // lower-cased title/artist/tag/lyrics, parallel to `records`
    haystacks: Vec<String>,
    index: HashMap<String, usize>,
}

impl CsvSource {
    pub fn open(path: &Path, language: &str) -> Result<Self, DataLoadError> {
        let ds = DataSet::load_csv(path)?;
        let lyrics_col = ds.require_column(LYRICS_COLUMN, path)?;
        let label = format!("csv:{}", path.display());
        Ok(Self::from_dataset(&ds, lyrics_col, language, label))
    }

    fn from_dataset(ds: &DataSet, lyrics_col: usize, language: &str, label: String) -> Self {
        let id_col = ds.column(ID_COLUMN);
        let title_col = ds.column(TITLE_COLUMN);
        let artist_col = ds.column(ARTIST_COLUMN);
        let year_col = ds.column(YEAR_COLUMN);
        let lang_col = ds.column(LANGUAGE_COLUMN);
        let tag_col = ds.column(TAG_COLUMN);

        let mut out = Self { label, records: Vec::new(), haystacks: Vec::new(), index: HashMap::new() };
        for (i, row) in ds.rows.iter().enumerate() {
            let row = row.as_slice();
            let id = match opt(ds, row, id_col).trim() {
                "" => (i + 1).to_string(),
                v => s!(v),
            };
            if out.index.contains_key(&id) {
                logw!("Duplicate song id {id} in {}; keeping the first", out.label);
                continue;
            }
            let lang = opt(ds, row, lang_col).trim();
            let rec = LyricRecord {
                id: id.clone(),
                title: s!(opt(ds, row, title_col)),
                artist: s!(opt(ds, row, artist_col)),
                language_code: s!(if lang.is_empty() { language } else { lang }),
                lyrics_text: s!(ds.cell(row, lyrics_col)),
                release_year: parse_year(opt(ds, row, year_col)),
            };
            let hay = format!("{}\n{}\n{}\n{}", rec.title, rec.artist, opt(ds, row, tag_col), rec.lyrics_text)
                .to_lowercase();
            out.index.insert(id, out.records.len());
            out.records.push(rec);
            out.haystacks.push(hay);
        }
        logf!("{}: {} songs", out.label, out.records.len());
        out
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

fn opt<'a>(ds: &DataSet, row: &'a [String], col: Option<usize>) -> &'a str {
    col.map_or("", |c| ds.cell(row, c))
}

impl SongSource for CsvSource {
    fn name(&self) -> &str {
        &self.label
    }

    /// Case-insensitive substring match. An empty keyword matches every
    /// song; a `limit` of 0 means no limit.
    fn search(&mut self, keyword: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        let needle = keyword.trim().to_lowercase();
        let cap = if limit == 0 { usize::MAX } else { limit };
        Ok(self
            .records
            .iter()
            .zip(&self.haystacks)
            .filter(|(_, hay)| needle.is_empty() || hay.contains(&needle))
            .map(|(r, _)| r.id.clone())
            .take(cap)
            .collect())
    }

    fn fetch(&mut self, id: &str) -> Result<LyricRecord, SourceError> {
        self.index
            .get(id)
            .map(|&i| self.records[i].clone())
            .ok_or_else(|| SourceError::NotFound(format!("song {id} in {}", self.label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> CsvSource {
        let ds = DataSet::new(
            strings!["title", "artist", "year", "tag", "lyrics"],
            vec![
                strings!["青春", "甲", "2019", "Hip-Hop", "我的青春"],
                strings!["Money", "乙", "", "pop", "钱 钱"],
                strings!["梦", "丙", "2020.0", "说唱", "梦想"],
            ],
        );
        CsvSource::from_dataset(&ds, 4, "zh", s!("test"))
    }

    #[test]
    fn row_numbers_are_ids() {
        let mut src = source();
        let rec = src.fetch("3").unwrap();
        assert_eq!(rec.title, "梦");
        assert_eq!(rec.release_year, Some(2020));
        assert_eq!(rec.language_code, "zh");
        assert_eq!(src.fetch("2").unwrap().release_year, None);
        assert!(matches!(src.fetch("9"), Err(SourceError::NotFound(_))));
    }

    #[test]
    fn search_matches_tag_case_insensitively() {
        let mut src = source();
        assert_eq!(src.search("HIP-hop", 10).unwrap(), strings!["1"]);
        assert_eq!(src.search("说唱", 10).unwrap(), strings!["3"]);
    }

    #[test]
    fn empty_keyword_and_zero_limit_return_everything() {
        let mut src = source();
        assert_eq!(src.search("", 0).unwrap().len(), 3);
        assert_eq!(src.search("", 2).unwrap(), strings!["1", "2"]);
    }

    #[test]
    fn open_requires_lyrics_column() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("d.csv");
        std::fs::write(&p, "title,year\na,2020\n").unwrap();
        let err = CsvSource::open(&p, "zh").err().unwrap();
        assert!(matches!(err, DataLoadError::MissingColumn { .. }));
    }
}
