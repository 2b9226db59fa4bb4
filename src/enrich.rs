use crate::api::response::TopTags;
use crate::api::{Gateway, LastfmRequest};
use crate::dataset::Dataset;
use crate::parse_json;

/// At most this many tag names end up in the summary string.
pub static MAX_TAGS: usize = 3;

/// Cosmetic progress reporting for the per-row enrichment pass. Must not
/// influence results; the CLI logs, tests use [`NoProgress`].
pub trait Progress {
    fn start(&mut self, total: usize);
    fn step(&mut self, name: &str);
    fn finish(&mut self);
}

pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _total: usize) {}
    fn step(&mut self, _name: &str) {}
    fn finish(&mut self) {}
}

/// Reports enrichment progress through the log.
#[derive(Default)]
pub struct LogProgress {
    done: usize,
    total: usize,
}

impl Progress for LogProgress {
    fn start(&mut self, total: usize) {
        self.total = total;
        log::info!("looking up tags for {total} artists");
    }

    fn step(&mut self, name: &str) {
        self.done += 1;
        log::info!("[{}/{}] {name}", self.done, self.total);
    }

    fn finish(&mut self) {
        log::info!("tag lookup finished");
    }
}

/// Fetch the top tags for one artist and summarize them.
///
/// Returns up to [`MAX_TAGS`] tag names joined with `", "` (an empty string
/// when the artist has no tags at all). Any provider failure means "no tag
/// data for this artist" — `None` — and never an error to the caller.
pub async fn lookup_tags<G: Gateway>(gateway: &G, artist: &str) -> Option<String> {
    let request = LastfmRequest::new("artist.getTopTags").param("artist", artist);

    let response = match gateway.get(request).await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("no tags for {artist}: {e}");
            return None;
        }
    };

    let parsed = match parse_json!(TopTags: &response.body) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("no tags for {artist}: {e}");
            return None;
        }
    };

    Some(
        parsed
            .toptags
            .tag
            .iter()
            .take(MAX_TAGS)
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Populate the `tags` column for every row, in table order. Row count and
/// ordering are untouched; each distinct artist is looked up exactly once
/// since the assembler has already collapsed duplicates.
pub async fn enrich<G: Gateway, P: Progress>(gateway: &G, dataset: &mut Dataset, progress: &mut P) {
    progress.start(dataset.len());
    for row in dataset.rows_mut() {
        row.tags = lookup_tags(gateway, &row.name).await;
        progress.step(&row.name);
    }
    progress.finish();
}
