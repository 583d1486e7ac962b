// src/gui/pages/volatile.rs
use crate::analysis::{rank_by_volume_filtered, top_n_volatile};

use super::{Page, RANKING_WIDTHS, View, ranking_headers, ranking_rows};

pub struct VolatilePage;
pub static PAGE: VolatilePage = VolatilePage;

impl Page for VolatilePage {
    fn title(&self) -> &'static str { "Most volatile" }

    fn headers(&self, view: &View) -> Vec<String> {
        ranking_headers(view.analysis.reference)
    }

    fn rows(&self, view: &View) -> Vec<Vec<String>> {
        let a = view.analysis;
        let kept = rank_by_volume_filtered(view.stats, a.keep_fraction);
        ranking_rows(&top_n_volatile(kept, a.top_n, a.reference), a.reference)
    }

    fn text_columns(&self) -> &'static [usize] { &[1] }

    fn preferred_column_widths(&self) -> Option<&'static [f32]> { Some(RANKING_WIDTHS) }
}
