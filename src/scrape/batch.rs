// src/scrape/batch.rs

use std::thread;

use crate::config::options::ScrapeOptions;
use crate::core::net::Fetch;
use crate::progress::Progress;
use crate::store::{StorageError, Store};

use super::scrape_game;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrapeSummary {
    pub links: usize,
    pub scraped: usize,
    /// `(link, error)` for every link that was skipped.
    pub failed: Vec<(String, String)>,
    pub inserted: usize,
    pub updated: usize,
    /// Reviews ignored for a `tbd`/invalid score, across all games.
    pub skipped_reviews: usize,
}

/// Scrape `links` one after another and upsert each game as soon as it is parsed.
/// A failing link is logged, reported and skipped; a storage failure ends the batch.
pub fn update_store<F: Fetch + ?Sized>(
    store: &Store,
    fetcher: &F,
    links: &[String],
    opts: &ScrapeOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<ScrapeSummary, StorageError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(links.len());
    }
    let result = run(store, fetcher, links, opts, progress.as_deref_mut());
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

fn run<F: Fetch + ?Sized>(
    store: &Store,
    fetcher: &F,
    links: &[String],
    opts: &ScrapeOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<ScrapeSummary, StorageError> {
    let total = links.len();
    let mut summary = ScrapeSummary { links: total, ..Default::default() };
    logf!("Scrape: batch of {total} link(s) into {}", store.path().display());

    for (i, link) in links.iter().enumerate() {
        if i > 0 && !opts.delay.is_zero() {
            thread::sleep(opts.delay);
        }
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("[{}/{}] {link}", i + 1, total));
        }

        let game = match scrape_game(fetcher, link) {
            Ok(game) => game,
            Err(e) => {
                loge!("Scrape: {link} skipped: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(i, link, &e.to_string());
                }
                summary.failed.push((link.clone(), e.to_string()));
                continue;
            }
        };

        let upserted = store.upsert(&game.records)?;
        logf!(
            "Scrape: {} stored ({} new, {} updated, {} skipped)",
            game.game_id, upserted.inserted, upserted.updated, game.skipped
        );

        summary.scraped += 1;
        summary.inserted += upserted.inserted;
        summary.updated += upserted.updated;
        summary.skipped_reviews += game.skipped;

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(i, link, upserted.total());
        }
    }

    logf!(
        "Scrape: done, {}/{} link(s), {} inserted, {} updated",
        summary.scraped, total, summary.inserted, summary.updated
    );
    Ok(summary)
}
