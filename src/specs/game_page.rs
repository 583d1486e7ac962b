// src/specs/game_page.rs
//
// Main game page: the two score blocks sit in `div.c-productScoreInfo_scoreContent`
// containers, each identified by its review-count link:
//
//   <div class="c-productScoreInfo_scoreContent">
//     <a data-testid="critic-path">Based on 102 Critic Reviews</a>
//     <div class="c-productScoreInfo_scoreNumber"><div ...><span>96</span></div></div>
//   </div>
//
// The user block has `data-testid="user-path"` and the score inside
// `div.c-siteReviewScore_user`, on the 0–10 scale.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{ancestor_with_class, sel, text_of};
use crate::core::sanitize::{first_count, is_tbd};
use crate::model::rescale_user;

static CRITIC_PATH: LazyLock<Selector> = LazyLock::new(|| sel(r#"a[data-testid="critic-path"]"#));
static USER_PATH: LazyLock<Selector> = LazyLock::new(|| sel(r#"a[data-testid="user-path"]"#));
static METASCORE_SPAN: LazyLock<Selector> =
    LazyLock::new(|| sel("div.c-productScoreInfo_scoreNumber span"));
static USER_SCORE_SPAN: LazyLock<Selector> =
    LazyLock::new(|| sel("div.c-productScoreInfo_scoreNumber div.c-siteReviewScore_user span"));

const SCORE_CONTENT: &str = "c-productScoreInfo_scoreContent";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSummary {
    /// Published Metascore, 0–100.
    pub metascore: Option<f64>,
    /// Published user score, already rescaled to 0–100.
    pub user_score: Option<f64>,
    pub critic_count: Option<u32>,
    pub user_count: Option<u32>,
}

impl GameSummary {
    pub fn has_scores(&self) -> bool {
        self.metascore.is_some() || self.user_score.is_some()
    }
}

pub fn parse(html: &str) -> GameSummary {
    let doc = Html::parse_document(html);
    let mut out = GameSummary::default();

    if let Some(link) = doc.select(&CRITIC_PATH).next() {
        out.critic_count = first_count(&text_of(link));
        out.metascore = score_in_block(link, &METASCORE_SPAN);
    }

    if let Some(link) = doc.select(&USER_PATH).next() {
        out.user_count = first_count(&text_of(link));
        out.user_score = score_in_block(link, &USER_SCORE_SPAN).map(rescale_user);
    }

    out
}

/// First score span inside the score container enclosing `link`.
/// `tbd` and unparsable text both yield `None`.
fn score_in_block(link: ElementRef<'_>, span: &Selector) -> Option<f64> {
    let block = ancestor_with_class(link, SCORE_CONTENT)?;
    let text = text_of(block.select(span).next()?);
    if is_tbd(&text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(metascore: &str, user: &str) -> String {
        format!(
            r#"<html><body>
            <div class="c-productScoreInfo u-flexbox">
              <div class="c-productScoreInfo_scoreContent u-flexbox">
                <div class="c-productScoreInfo_text">
                  <a data-testid="critic-path" href="/game/elden-ring/critic-reviews/">
                    <span>Based on 102 Critic Reviews</span>
                  </a>
                </div>
                <div class="c-productScoreInfo_scoreNumber u-float-right">
                  <div class="c-siteReviewScore c-siteReviewScore_background-critic_medium">
                    <span data-v-e408cafe="">{metascore}</span>
                  </div>
                </div>
              </div>
              <div class="c-productScoreInfo_scoreContent u-flexbox">
                <div class="c-productScoreInfo_text">
                  <a data-testid="user-path" href="/game/elden-ring/user-reviews/">
                    <span>Based on 14,521 User Ratings</span>
                  </a>
                </div>
                <div class="c-productScoreInfo_scoreNumber u-float-right">
                  <div class="c-siteReviewScore c-siteReviewScore_user">
                    <span data-v-e408cafe="">{user}</span>
                  </div>
                </div>
              </div>
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn parses_both_score_blocks() {
        let s = parse(&page("96", "7.9"));
        assert_eq!(s.metascore, Some(96.0));
        assert_eq!(s.user_score, Some(79.0));
        assert_eq!(s.critic_count, Some(102));
        assert_eq!(s.user_count, Some(14521));
        assert!(s.has_scores());
    }

    #[test]
    fn tbd_scores_are_absent() {
        let s = parse(&page("tbd", "tbd"));
        assert_eq!(s.metascore, None);
        assert_eq!(s.user_score, None);
        assert_eq!(s.critic_count, Some(102));
        assert!(!s.has_scores());
    }

    #[test]
    fn unparsable_score_is_absent() {
        let s = parse(&page("n/a", "8.1"));
        assert_eq!(s.metascore, None);
        assert_eq!(s.user_score, Some(81.0));
    }

    #[test]
    fn page_without_score_blocks() {
        assert_eq!(parse("<html><body><p>Not found</p></body></html>"), GameSummary::default());
    }
}
