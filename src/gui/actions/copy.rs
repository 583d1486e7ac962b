// src/gui/actions/copy.rs
use eframe::egui;

use crate::{analysis::render_report, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    if app.stats.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there are no outlet stats");
        return;
    }

    let txt = render_report(&app.stats, &app.state.options.analysis);
    logf!("Copy: report for {} outlet(s), {} bytes", app.stats.len(), txt.len());

    ui_ctx.copy_text(txt);
    app.status("Report copied to clipboard");
}
