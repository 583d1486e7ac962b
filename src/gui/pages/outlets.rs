// src/gui/pages/outlets.rs
use crate::analysis::{
    rank_by_volume_filtered,
    report::signed,
};
use crate::config::options::Reference::{self, *};

use super::{Page, View};

pub struct OutletsPage;
pub static PAGE: OutletsPage = OutletsPage;

impl Page for OutletsPage {
    fn title(&self) -> &'static str { "Outlets" }

    fn headers(&self, _view: &View) -> Vec<String> {
        let mut h = vec![s!("Outlet"), s!("Reviews")];
        for r in Reference::ALL {
            let l = r.label();
            h.push(format!("Games {l}"));
            h.push(format!("Mean vs {l}"));
            h.push(format!("Median vs {l}"));
        }
        h
    }

    /// Volume-filtered outlets, busiest first.
    fn rows(&self, view: &View) -> Vec<Vec<String>> {
        rank_by_volume_filtered(view.stats, view.analysis.keep_fraction)
            .into_iter()
            .map(|s| {
                let games = |r| s.against(r).map(|d| d.games.to_string()).unwrap_or_else(|| s!("0"));
                vec![
                    s.outlet_name.clone(),
                    s.review_count.to_string(),
                    games(Pro),
                    signed(s.bias(Pro)),
                    signed(s.median_bias(Pro)),
                    games(Players),
                    signed(s.bias(Players)),
                    signed(s.median_bias(Players)),
                ]
            })
            .collect()
    }

    fn preferred_column_widths(&self) -> Option<&'static [f32]> {
        Some(&[220.0, 70.0, 80.0, 100.0, 110.0, 100.0, 120.0, 130.0])
    }
}
