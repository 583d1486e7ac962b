// src/gui/components/data_table.rs
//
// Draws the current page's table. Purely a view over `app.headers/rows`.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::gui::app::App;

const DEFAULT_WIDTH: f32 = 90.0;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    let page = app.current_page();

    if app.rows.is_empty() {
        ui.add_space(12.0);
        ui.label(RichText::new(page.empty_hint()).italics());
        return;
    }

    let cols = app.headers.len();
    let widths = page.preferred_column_widths().unwrap_or(&[]);
    let text_cols = page.text_columns();
    let is_text = |ci: usize| text_cols.contains(&ci);

    // Ensure scroll bars allocate space (not floating over content)
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        // One table state per page so widths don't leak between tabs.
        .id_salt(("table_state", page.title()));
    for ci in 0..cols {
        let w = widths.get(ci).copied().unwrap_or(DEFAULT_WIDTH);
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    let align = |ci: usize| if is_text(ci) { Layout::left_to_right(Align::Center) } else { Layout::right_to_left(Align::Center) };

    table
        .header(24.0, |mut header| {
            for (ci, h) in app.headers.iter().enumerate() {
                header.col(|ui| {
                    ui.with_layout(align(ci), |ui| {
                        ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                    });
                });
            }
        })
        .body(|body| {
            body.rows(20.0, app.rows.len(), |mut row| {
                let Some(data) = app.rows.get(row.index()) else { return };
                for (ci, cell) in data.iter().enumerate() {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        ui.with_layout(align(ci), |ui| {
                            ui.label(bias_colored(cell));
                        });
                    });
                }
            });
        });
}

/// Signed values (`+1.23` / `-4.56`) get a green/red tint.
fn bias_colored(cell: &str) -> RichText {
    let rt = RichText::new(cell);
    let is_num = |rest: &str| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit() || c == '.');
    if cell.strip_prefix('+').is_some_and(is_num) {
        rt.color(egui::Color32::from_rgb(0x6A, 0xBE, 0x6A))
    } else if cell.strip_prefix('-').is_some_and(is_num) {
        rt.color(egui::Color32::from_rgb(0xDC, 0x61, 0x49))
    } else {
        rt
    }
}
