// src/gui/progress.rs
use std::sync::Arc;

use eframe::egui;
use parking_lot::Mutex;

use crate::progress::Progress;

pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    ctx: egui::Context,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>, ctx: egui::Context) -> Self {
        Self { status, ctx, done: 0, failed: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        *self.status.lock() = msg.into();
        self.ctx.request_repaint();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.set_status(format!("Scraping {total} game(s)…"));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn item_done(&mut self, _index: usize, link: &str, stored: usize) {
        self.done += 1;
        self.set_status(format!("Stored {stored} record(s) from {link} ({}/{})", self.done + self.failed, self.total));
    }
    fn item_failed(&mut self, _index: usize, link: &str, error: &str) {
        self.failed += 1;
        self.set_status(format!("Skipped {link}: {error} ({}/{})", self.done + self.failed, self.total));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(s!("Scrape complete")); // no counts if we never began
        } else {
            self.set_status(format!("Scrape complete ({} ok, {} failed)", self.done, self.failed));
        }
    }
}
