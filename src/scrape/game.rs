// src/scrape/game.rs

use crate::config::consts::CRITIC_REVIEWS_SUFFIX;
use crate::core::net::Fetch;
use crate::core::sanitize::clean_link;
use crate::model::{METASCORE_OUTLET, ReviewRecord, USER_SCORE_OUTLET, ValidationError};
use crate::specs::critic_reviews;
use crate::specs::game_page::{self, GameSummary};

use super::ScrapeError;

/// Everything one game contributes to the store.
#[derive(Debug)]
pub struct ScrapedGame {
    pub game_id: String,
    pub summary: GameSummary,
    /// Critic reviews first, then the `[metascore]` / `[user score]` sentinels.
    pub records: Vec<ReviewRecord>,
    /// Reviews dropped for a `tbd` or unparsable score.
    pub skipped: usize,
}

/// Fetch the main page and the critic-reviews page of `link` and turn them
/// into validated records keyed by the canonical game URL.
pub fn scrape_game<F: Fetch + ?Sized>(fetcher: &F, link: &str) -> Result<ScrapedGame, ScrapeError> {
    let game_id = clean_link(link);

    let summary = game_page::parse(&fetcher.fetch(&game_id)?);
    logf!(
        "Scrape: {game_id} metascore={:?} user={:?} counts={:?}/{:?}",
        summary.metascore, summary.user_score, summary.critic_count, summary.user_count
    );

    let reviews_url = join!(&game_id, CRITIC_REVIEWS_SUFFIX);
    let page = critic_reviews::parse(&fetcher.fetch(&reviews_url)?);
    for (outlet, raw) in &page.skipped {
        logd!("Scrape: {outlet} score '{raw}' skipped");
    }

    if page.reviews.is_empty() && !summary.has_scores() {
        return Err(ScrapeError::EmptyPage { link: game_id });
    }

    let invalid = |outlet: &str, source: ValidationError| ScrapeError::Invalid {
        link: game_id.clone(),
        outlet: s!(outlet),
        source,
    };

    let mut records = Vec::with_capacity(page.reviews.len() + 2);
    for r in &page.reviews {
        let rec = ReviewRecord::critic(game_id.as_str(), r.outlet_name.as_str(), r.score)
            .map_err(|e| invalid(&r.outlet_name, e))?
            .with_date(r.date);
        records.push(rec);
    }
    if let Some(score) = summary.metascore {
        records.push(
            ReviewRecord::metascore(game_id.as_str(), score)
                .map_err(|e| invalid(METASCORE_OUTLET, e))?,
        );
    }
    if let Some(score) = summary.user_score {
        records.push(
            ReviewRecord::user_score(game_id.as_str(), score)
                .map_err(|e| invalid(USER_SCORE_OUTLET, e))?,
        );
    }

    Ok(ScrapedGame { game_id, summary, records, skipped: page.skipped.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewerType;
    use crate::scrape::testing::{FakeFetcher, critic_page, main_page};

    const LINK: &str = "https://www.metacritic.com/game/hades/critic-reviews/?platform=pc";
    const GAME: &str = "https://www.metacritic.com/game/hades";

    fn reviews_url() -> String {
        join!(GAME, CRITIC_REVIEWS_SUFFIX)
    }

    #[test]
    fn builds_reviews_and_sentinels() {
        let fetcher = FakeFetcher::default()
            .page(GAME, main_page("93", "8.7"))
            .page(&reviews_url(), critic_page(&[("IGN", "90"), ("Polygon", "tbd"), ("Edge", "80")]));

        let game = scrape_game(&fetcher, LINK).unwrap();
        assert_eq!(game.game_id, GAME);
        assert_eq!(game.skipped, 1);

        let outlets: Vec<&str> = game.records.iter().map(|r| r.outlet_name.as_str()).collect();
        assert_eq!(outlets, vec!["IGN", "Edge", METASCORE_OUTLET, USER_SCORE_OUTLET]);

        let user = &game.records[3];
        assert_eq!(user.reviewer_type, ReviewerType::User);
        assert_eq!(user.score, 87.0);
        assert!(game.records.iter().all(|r| r.game_id == GAME));
    }

    #[test]
    fn empty_page_is_an_error() {
        let fetcher = FakeFetcher::default()
            .page(GAME, main_page("tbd", "tbd"))
            .page(&reviews_url(), critic_page(&[]));
        assert!(matches!(scrape_game(&fetcher, LINK), Err(ScrapeError::EmptyPage { .. })));
    }

    #[test]
    fn scores_without_reviews_still_count() {
        let fetcher = FakeFetcher::default()
            .page(GAME, main_page("75", "tbd"))
            .page(&reviews_url(), critic_page(&[]));
        let game = scrape_game(&fetcher, GAME).unwrap();
        assert_eq!(game.records.len(), 1);
        assert!(game.records[0].is_aggregate());
    }

    #[test]
    fn out_of_range_review_rejects_the_game() {
        let fetcher = FakeFetcher::default()
            .page(GAME, main_page("80", "8.0"))
            .page(&reviews_url(), critic_page(&[("Broken", "250")]));
        let err = scrape_game(&fetcher, GAME).unwrap_err();
        assert!(matches!(err, ScrapeError::Invalid { ref outlet, .. } if outlet == "Broken"), "{err}");
    }

    #[test]
    fn network_failure_propagates() {
        let fetcher = FakeFetcher::default();
        assert!(matches!(scrape_game(&fetcher, GAME), Err(ScrapeError::Net(_))));
    }
}
