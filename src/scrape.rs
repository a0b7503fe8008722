// src/scrape.rs
use std::collections::HashSet;

use crate::{progress::Progress, record::LyricRecord, source::SongSource};

/// A song or keyword that could not be retrieved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// Song id, or `search:<keyword>` for a failed search.
    pub target: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Successful records, in retrieval order.
    pub records: Vec<LyricRecord>,
    pub failures: Vec<Failure>,
}

/// Search each keyword in order and fetch every new id. An id found by an
/// earlier keyword is not fetched again. Failed searches and failed fetches
/// are logged and skipped; the run always completes.
pub fn collect_records(
    source: &mut dyn SongSource,
    keywords: &[String],
    limit: usize,
    mut progress: Option<&mut dyn Progress>,
) -> CollectOutcome {
    let mut out = CollectOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for keyword in keywords {
        let keyword = keyword.trim();
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Searching {} for {keyword:?}...", source.name()));
        }
        let ids = match source.search(keyword, limit) {
            Ok(ids) => ids,
            Err(e) => {
                logw!("Search for {keyword:?} failed: {e}");
                out.failures.push(Failure { target: format!("search:{keyword}"), reason: e.to_string() });
                continue;
            }
        };

        let fresh: Vec<String> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        logf!("{keyword:?}: {} new songs", fresh.len());
        if let Some(p) = progress.as_deref_mut() {
            p.begin(fresh.len());
        }

        for id in fresh {
            match source.fetch(&id) {
                Ok(rec) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&id, &format!("{} - {}", rec.artist, rec.title));
                    }
                    out.records.push(rec);
                }
                Err(e) => {
                    logw!("Skipping song {id}: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&id, &e.to_string());
                    }
                    out.failures.push(Failure { target: id, reason: e.to_string() });
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!("Collected {} songs ({} failures)", out.records.len(), out.failures.len());
    out
}
