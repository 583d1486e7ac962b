// src/gui/pages/extreme.rs
use crate::analysis::{rank_by_volume_filtered, top_n_extreme};

use super::{Page, RANKING_WIDTHS, View, ranking_headers, ranking_rows};

pub struct ExtremePage;
pub static PAGE: ExtremePage = ExtremePage;

impl Page for ExtremePage {
    fn title(&self) -> &'static str { "Most extreme" }

    fn headers(&self, view: &View) -> Vec<String> {
        ranking_headers(view.analysis.reference)
    }

    fn rows(&self, view: &View) -> Vec<Vec<String>> {
        let a = view.analysis;
        let kept = rank_by_volume_filtered(view.stats, a.keep_fraction);
        ranking_rows(&top_n_extreme(kept, a.top_n, a.reference), a.reference)
    }

    fn text_columns(&self) -> &'static [usize] { &[1] }

    fn preferred_column_widths(&self) -> Option<&'static [f32]> { Some(RANKING_WIDTHS) }
}
