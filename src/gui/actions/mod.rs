// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy,reload,scrape}.

mod copy;    // src/gui/actions/copy.rs
mod scrape;  // src/gui/actions/scrape.rs

pub use copy::copy;
pub use scrape::scrape;

use crate::gui::app::App;

pub fn reload(app: &mut App) {
    logf!("Store: Reload requested");
    app.reload();
}
