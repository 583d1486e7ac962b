// src/scrape/mod.rs
//
// Scrape orchestration: links file → per-game fetch + parse → store upsert.
// Page parsing lives in `specs`, HTTP and retries in `core::net`.

mod batch;
mod game;
mod links;

use thiserror::Error;

use crate::core::net::NetError;
use crate::model::ValidationError;

pub use batch::{ScrapeSummary, update_store};
pub use game::{ScrapedGame, scrape_game};
pub use links::read_links;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error("no reviews and no published scores on {link}")]
    EmptyPage { link: String },

    #[error("invalid data for {outlet} on {link}: {source}")]
    Invalid {
        link: String,
        outlet: String,
        #[source]
        source: ValidationError,
    },
}
