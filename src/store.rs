// src/store.rs
use std::{collections::HashMap, fs, io, path::Path};

use crate::csv::parse_rows;
use crate::error::DataLoadError;

/// A loaded CSV table: header row + data rows, column order as on disk.
/// Rows may be ragged; `cell` reads missing cells as "".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read and parse a CSV file. The first row is the header.
    pub fn load_csv(path: &Path) -> Result<Self, DataLoadError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataLoadError::NotFound(path.to_path_buf()),
            _ => DataLoadError::Io { path: path.to_path_buf(), source: e },
        })?;
        let text = String::from_utf8(bytes).map_err(|_| DataLoadError::Encoding(path.to_path_buf()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let mut rows = parse_rows(text, ',').map_err(|e| DataLoadError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if rows.is_empty() {
            return Err(DataLoadError::Empty(path.to_path_buf()));
        }
        let headers = rows.remove(0);
        logd!("Loaded {} rows x {} columns from {}", rows.len(), headers.len(), path.display());
        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Index of the first header equal to `name` (surrounding whitespace ignored).
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Like `column`, but a missing column is a load error naming what is there.
    pub fn require_column(&self, name: &str, path: &Path) -> Result<usize, DataLoadError> {
        self.column(name).ok_or_else(|| DataLoadError::MissingColumn {
            column: s!(name),
            path: path.to_path_buf(),
            available: self.headers.join(", "),
        })
    }

    #[inline]
    pub fn cell<'a>(&self, row: &'a [String], col: usize) -> &'a str {
        row.get(col).map(|s| s.as_str()).unwrap_or("")
    }

    /// New dataset with the same headers and only the rows `keep` accepts.
    pub fn retain_rows<F>(&self, mut keep: F) -> DataSet
    where
        F: FnMut(&[String]) -> bool,
    {
        let rows = self.rows.iter().filter(|r| keep(r.as_slice())).cloned().collect();
        DataSet { headers: self.headers.clone(), rows }
    }

    /// Frequency of each distinct value in `col`, count descending,
    /// ties in first-seen order.
    pub fn value_counts(&self, col: usize) -> Vec<(String, usize)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in &self.rows {
            let v = self.cell(row, col);
            match index.get(v) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(v, counts.len());
                    counts.push((s!(v), 1));
                }
            }
        }
        // stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
