// src/gui/actions/scrape.rs
//
// Runs the scrape batch on one worker thread. The store is shared through
// `Arc<Store>`; the result comes back over a channel polled by `App::update`.

use std::{path::PathBuf, sync::{Arc, mpsc}, thread};

use eframe::egui;

use crate::{
    core::net::HttpFetcher,
    gui::{app::App, progress::GuiProgress},
    scrape,
};

pub fn scrape(app: &mut App, ui_ctx: &egui::Context) {
    if app.running {
        return;
    }
    let Some(store) = app.store.clone() else {
        app.status("Store not open; fix the error and Reload");
        return;
    };

    let links_path = PathBuf::from(app.state.gui.links_text.trim());
    let mut opts = app.state.options.scrape.clone();
    opts.links_file = Some(links_path.clone());

    logf!("Scrape: Begin links={}", links_path.display());

    let (tx, rx) = mpsc::channel();
    let status = Arc::clone(&app.status);
    let ctx = ui_ctx.clone();

    thread::spawn(move || {
        let result = (|| {
            let links = scrape::read_links(&links_path)
                .map_err(|e| format!("{}: {e}", links_path.display()))?;
            let fetcher = HttpFetcher::new(opts.retries, opts.retry_delay).map_err(|e| e.to_string())?;
            let mut progress = GuiProgress::new(status, ctx.clone());
            scrape::update_store(&store, &fetcher, &links, &opts, Some(&mut progress))
                .map_err(|e| e.to_string())
        })();

        if let Err(e) = &result {
            loge!("Scrape: Error: {e}");
        }
        let _ = tx.send(result);
        ctx.request_repaint();
    });

    app.worker = Some(rx);
    app.running = true;
    app.status("Scraping…");
}
