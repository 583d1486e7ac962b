// src/gui/pages/mod.rs
//
// One page per tab. A page turns the loaded records and derived stats into
// a plain string table; `components::data_table` draws whatever it returns.

use crate::{
    analysis::{OutletBiasStat, report::{plain, signed}},
    config::options::{AnalysisOptions, Reference},
    model::ReviewRecord,
};

pub mod extreme;
pub mod outlets;
pub mod reviews;
pub mod volatile;

/// Read-only inputs a page renders from.
pub struct View<'a> {
    pub records: &'a [ReviewRecord],
    pub stats: &'a [OutletBiasStat],
    pub analysis: &'a AnalysisOptions,
}

pub trait Page: Send + Sync + 'static {
    fn title(&self) -> &'static str;

    fn headers(&self, view: &View) -> Vec<String>;

    fn rows(&self, view: &View) -> Vec<Vec<String>>;

    /// Columns drawn left-aligned; everything else is numeric and right-aligned.
    fn text_columns(&self) -> &'static [usize] { &[0] }

    /// Optional: per-page column widths (px)
    fn preferred_column_widths(&self) -> Option<&'static [f32]> { None }

    /// Shown instead of an empty table.
    fn empty_hint(&self) -> &'static str {
        "No outlet statistics yet. Scrape a links file first."
    }
}

/// Columns shared by the two ranking pages.
pub(super) fn ranking_headers(reference: Reference) -> Vec<String> {
    let r = reference.label();
    vec![
        s!("#"),
        s!("Outlet"),
        s!("Reviews"),
        s!("Games"),
        format!("Bias vs {r}"),
        s!("Abs avg"),
        s!("Abs median"),
        s!("Abs stddev"),
    ]
}

pub(super) fn ranking_rows(ranked: &[&OutletBiasStat], reference: Reference) -> Vec<Vec<String>> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, s)| {
            vec![
                (i + 1).to_string(),
                s.outlet_name.clone(),
                s.review_count.to_string(),
                s.against(reference).map(|d| d.games.to_string()).unwrap_or_default(),
                signed(s.bias(reference)),
                plain(s.abs_bias_avg(reference)),
                plain(s.abs_bias_median(reference)),
                plain(s.abs_bias_stddev(reference)),
            ]
        })
        .collect()
}

pub(super) const RANKING_WIDTHS: &[f32] = &[30.0, 220.0, 70.0, 60.0, 110.0, 80.0, 90.0, 90.0];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_outlet_stats;
    use crate::gui::router;

    fn sample() -> Vec<ReviewRecord> {
        vec![
            ReviewRecord::critic("g1", "IGN", 90.0).unwrap(),
            ReviewRecord::critic("g1", "Edge", 70.0).unwrap(),
            ReviewRecord::metascore("g1", 80.0).unwrap(),
            ReviewRecord::user_score("g1", 75.0).unwrap(),
            ReviewRecord::critic("g2", "IGN", 60.0).unwrap(),
            ReviewRecord::metascore("g2", 65.0).unwrap(),
        ]
    }

    #[test]
    fn every_page_renders_rectangular_tables() {
        let records = sample();
        let stats = compute_outlet_stats(&records);
        let analysis = AnalysisOptions { keep_fraction: 1.0, ..Default::default() };
        let view = View { records: &records, stats: &stats, analysis: &analysis };

        for page in router::all_pages() {
            let headers = page.headers(&view);
            let rows = page.rows(&view);
            assert!(!rows.is_empty(), "{} has no rows", page.title());
            assert!(rows.iter().all(|r| r.len() == headers.len()), "{}", page.title());
            if let Some(ws) = page.preferred_column_widths() {
                assert_eq!(ws.len(), headers.len(), "{}", page.title());
            }
        }
    }

    #[test]
    fn ranking_rows_number_from_one() {
        let records = sample();
        let stats = compute_outlet_stats(&records);
        let refs: Vec<&OutletBiasStat> = stats.iter().collect();
        let rows = ranking_rows(&refs, Reference::Players);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[1][0], "2");
        // Edge: 70 vs 75
        assert_eq!(rows[0][1], "Edge");
        assert_eq!(rows[0][4], "-5.00");
    }
}
