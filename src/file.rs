// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::csv::write_row;
use crate::error::ExportError;
use crate::store::DataSet;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io { path: path.to_path_buf(), source }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir).map_err(io_err(dir))?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Create/truncate `path` and write headers + rows. Existing files are
/// overwritten without asking. Returns bytes written.
pub fn write_dataset(path: &Path, ds: &DataSet) -> Result<u64, ExportError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(io_err(path))?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    write_row(&mut out, &ds.headers, ',').map_err(io_err(path))?;
    for row in &ds.rows {
        write_row(&mut out, row, ',').map_err(io_err(path))?;
    }
    out.flush().map_err(io_err(path))?;
    drop(out);
    Ok(fs::metadata(path).map(|m| m.len()).unwrap_or(0))
}

/// Pretty JSON written to a sibling temp file, then renamed over `path`,
/// so readers never see a half-written snapshot. Returns bytes written.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<u64, ExportError> {
    ensure_parent(path)?;
    let body = serde_json::to_vec_pretty(value)?;

    let tmp = tmp_sibling(path);
    {
        let mut f = File::create(&tmp).map_err(io_err(&tmp))?;
        f.write_all(&body).map_err(io_err(&tmp))?;
        f.write_all(b"\n").map_err(io_err(&tmp))?;
        f.sync_all().map_err(io_err(&tmp))?;
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ExportError::Io { path: path.to_path_buf(), source: e });
    }
    Ok(body.len() as u64 + 1)
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
