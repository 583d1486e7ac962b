// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, mpsc},
    time::Duration,
};

use eframe::egui;
use parking_lot::Mutex;

use crate::{
    analysis::{OutletBiasStat, compute_outlet_stats},
    config::state::AppState,
    model::ReviewRecord,
    scrape::ScrapeSummary,
    store::{StorageError, Store},
};

use super::{
    components,
    pages::{Page, View},
    router,
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let state = AppState::default();
    if let Err(e) = crate::log::init(&state.options.store.dir()) {
        eprintln!("Warning: file logging disabled: {e}");
    }
    let app = App::new(state);
    eframe::run_native(
        "Metacritic Bias Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}

/// Outcome of a background scrape, sent back to the UI thread.
pub type WorkerResult = Result<ScrapeSummary, String>;

pub struct App {
    pub state: AppState,

    // None when the store file could not be opened; Reload retries.
    pub store: Option<Arc<Store>>,

    // canonical data + derived stats
    pub records: Vec<ReviewRecord>,
    pub stats: Vec<OutletBiasStat>,

    // rendered table for the CURRENT page
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub worker: Option<mpsc::Receiver<WorkerResult>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let mut app = Self {
            state,
            store: None,
            records: Vec::new(),
            stats: Vec::new(),
            headers: Vec::new(),
            rows: Vec::new(),
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: false,
            worker: None,
        };
        app.reload();
        logf!("Init: records={}, outlets={}", app.records.len(), app.stats.len());
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_index(&self) -> usize { self.state.gui.current_page_index }

    #[inline]
    pub fn set_current_index(&mut self, idx: usize) { self.state.gui.current_page_index = idx; }

    #[inline]
    pub fn current_page(&self) -> &'static dyn Page {
        let pages = router::all_pages();
        pages[self.current_index().min(pages.len() - 1)]
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock() = msg.into();
    }

    /// Re-read the store (opening it first if needed) and recompute everything.
    pub fn reload(&mut self) {
        match self.load_records() {
            Ok(records) => {
                self.records = records;
                self.recompute();
                self.status(format!(
                    "Loaded {} record(s), {} outlet(s)",
                    self.records.len(),
                    self.stats.len()
                ));
            }
            Err(e) => {
                loge!("Store: {e}");
                self.records.clear();
                self.recompute();
                self.status(format!("Store error: {e}"));
            }
        }
    }

    fn load_records(&mut self) -> Result<Vec<ReviewRecord>, StorageError> {
        if let Some(store) = &self.store {
            return store.load_all();
        }
        let store = Store::open(&self.state.options.store.path)?;
        let records = store.records();
        self.store = Some(Arc::new(store));
        Ok(records)
    }

    pub fn recompute(&mut self) {
        self.stats = compute_outlet_stats(&self.records);
        self.rebuild_view();
    }

    /// Re-render the current page's table from records/stats/options.
    pub fn rebuild_view(&mut self) {
        let page = self.current_page();
        let view = View {
            records: &self.records,
            stats: &self.stats,
            analysis: &self.state.options.analysis,
        };
        self.headers = page.headers(&view);
        self.rows = page.rows(&view);
        logd!("View: {} rows={}", page.title(), self.rows.len());
    }

    /// Pick up a finished scrape worker, if any.
    fn poll_worker(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.worker else { return };
        let outcome = match rx.try_recv() {
            Ok(res) => res,
            Err(mpsc::TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(150));
                return;
            }
            Err(mpsc::TryRecvError::Disconnected) => Err(s!("scrape worker stopped unexpectedly")),
        };

        self.worker = None;
        self.running = false;
        match outcome {
            Ok(sum) => {
                self.reload();
                self.status(format!(
                    "Scraped {}/{} game(s): {} new, {} updated, {} failed",
                    sum.scraped, sum.links, sum.inserted, sum.updated, sum.failed.len()
                ));
            }
            Err(e) => self.status(format!("Scrape error: {e}")),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);

        egui::SidePanel::left("controls")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| {
                components::control_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::tabs::draw(ui, self);

            ui.separator();

            components::data_table::draw(ui, self);
        });
    }
}
