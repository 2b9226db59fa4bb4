use std::collections::HashSet;

use crate::api::response::ChartPage;
use crate::Error;

/// One row of the final table. Counts are integers by the time a record
/// exists; `tags` stays `None` until enrichment, and remains `None` for
/// artists whose tag lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    pub name: String,
    pub playcount: u64,
    pub listeners: u64,
    pub mbid: String,
    pub url: String,
    pub streamable: String,
    pub tags: Option<String>,
}

/// The assembled chart table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    rows: Vec<ArtistRecord>,
}

impl Dataset {
    /// Flatten fetched pages into one clean table.
    ///
    /// In order: concatenate pages as fetched, drop exact duplicate rows
    /// keeping the first occurrence, coerce the count columns to integers,
    /// and sort by listeners descending. The sort is stable, so ties keep
    /// their fetch order. A non-numeric count is fatal; partially fetched
    /// charts must still be numerically trustworthy.
    pub fn assemble(pages: Vec<ChartPage>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for raw in pages.into_iter().flat_map(|page| page.artist) {
            let key = (
                raw.name.clone(),
                raw.playcount.clone(),
                raw.listeners.clone(),
                raw.mbid.clone(),
                raw.url.clone(),
                raw.streamable.clone(),
            );
            if !seen.insert(key) {
                continue;
            }

            rows.push(ArtistRecord {
                playcount: coerce_count("playcount", &raw.playcount)?,
                listeners: coerce_count("listeners", &raw.listeners)?,
                name: raw.name,
                mbid: raw.mbid,
                url: raw.url,
                streamable: raw.streamable,
                tags: None,
            });
        }

        rows.sort_by(|a, b| b.listeners.cmp(&a.listeners));
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ArtistRecord] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [ArtistRecord] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn coerce_count(field: &'static str, value: &str) -> Result<u64, Error> {
    value.trim().parse().map_err(|_| Error::TypeCoercion {
        field,
        value: value.to_string(),
    })
}
