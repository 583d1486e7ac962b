// src/gui/pages/reviews.rs
//
// Raw store contents, in file order.

use super::{Page, View};

pub struct ReviewsPage;
pub static PAGE: ReviewsPage = ReviewsPage;

impl Page for ReviewsPage {
    fn title(&self) -> &'static str { "Reviews" }

    fn headers(&self, _view: &View) -> Vec<String> {
        ["Game", "Outlet", "Type", "Score", "Date"].iter().map(|h| s!(*h)).collect()
    }

    fn rows(&self, view: &View) -> Vec<Vec<String>> {
        view.records
            .iter()
            .map(|r| {
                vec![
                    short_game(&r.game_id),
                    r.outlet_name.clone(),
                    s!(r.reviewer_type.as_str()),
                    format!("{:.1}", r.score),
                    r.review_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect()
    }

    fn text_columns(&self) -> &'static [usize] { &[0, 1, 2, 4] }

    fn preferred_column_widths(&self) -> Option<&'static [f32]> {
        Some(&[220.0, 200.0, 60.0, 60.0, 90.0])
    }

    fn empty_hint(&self) -> &'static str { "The store is empty." }
}

/// `https://www.metacritic.com/game/elden-ring` → `elden-ring`.
fn short_game(game_id: &str) -> String {
    s!(game_id.rsplit('/').find(|p| !p.is_empty()).unwrap_or(game_id))
}
