// src/gui/components/control_panel.rs
//
// Left panel: scrape controls, analysis options, report/clipboard and status.
// Option changes re-render the current table immediately.

use eframe::egui;

use crate::config::options::Reference;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Scrape");
    ui.label("Links file (one URL per line):");
    ui.add_enabled(
        !app.running,
        egui::TextEdit::singleline(&mut app.state.gui.links_text).desired_width(f32::INFINITY),
    );

    ui.horizontal(|ui| {
        if ui.add_enabled(!app.running, egui::Button::new("Scrape")).clicked() {
            actions::scrape(app, ui.ctx());
        }
        if ui.add_enabled(!app.running, egui::Button::new("Reload")).clicked() {
            actions::reload(app);
        }
        if app.running {
            ui.spinner();
        }
    });

    ui.separator();
    ui.heading("Analysis");

    let a = &mut app.state.options.analysis;
    let mut changed = false;

    changed |= ui
        .add(egui::Slider::new(&mut a.keep_fraction, 0.05..=1.0).text("keep by volume"))
        .on_hover_text("Share of outlets kept, busiest first")
        .changed();

    ui.horizontal(|ui| {
        ui.label("Top N:");
        changed |= ui.add(egui::DragValue::new(&mut a.top_n).range(1..=200)).changed();
    });

    ui.horizontal(|ui| {
        ui.label("Reference:");
        for r in Reference::ALL {
            changed |= ui.radio_value(&mut a.reference, r, r.label()).changed();
        }
    });

    if changed {
        app.rebuild_view();
    }

    ui.add_space(4.0);
    if ui.button("Copy report").clicked() {
        actions::copy(app, ui.ctx());
    }

    ui.separator();

    let status = app.status.lock().clone();
    ui.label(format!("Status: {status}"));

    ui.add_space(4.0);
    ui.small(format!(
        "Store: {}\n{} record(s), {} outlet(s)",
        app.state.options.store.path.display(),
        app.records.len(),
        app.stats.len()
    ));
}
