// src/specs/critic_reviews.rs
//
// `/critic-reviews/` listing. One `div[data-testid="product-review"]` per
// outlet:
//
//   <div data-testid="product-review" class="c-siteReview">
//     <div class="c-siteReviewHeader">
//       <div class="c-siteReviewScore ..."><span>100</span></div>
//       <a class="c-siteReviewHeader_publicationName" href="/publication/ign/">IGN</a>
//       <div class="c-siteReviewHeader_reviewDate">Feb 23, 2022</div>
//     </div>
//   </div>
//
// Reviews without an outlet link or score block are not reviews (ads,
// placeholders) and are dropped silently. A present but `tbd`/non-numeric
// score is counted in `CriticPage::skipped`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use super::{sel, text_of};
use crate::core::sanitize::is_tbd;

static REVIEW: LazyLock<Selector> = LazyLock::new(|| sel(r#"div[data-testid="product-review"]"#));
static PUBLICATION: LazyLock<Selector> =
    LazyLock::new(|| sel("a.c-siteReviewHeader_publicationName"));
static SCORE_SPAN: LazyLock<Selector> = LazyLock::new(|| sel("div.c-siteReviewScore span"));
static DATE: LazyLock<Selector> = LazyLock::new(|| sel("div.c-siteReviewHeader_reviewDate"));

const DATE_FORMAT: &str = "%b %d, %Y";

#[derive(Clone, Debug, PartialEq)]
pub struct CriticReview {
    pub outlet_name: String,
    /// Slug from `/publication/<id>`, when the link carries one.
    pub outlet_id: Option<String>,
    pub score: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CriticPage {
    pub reviews: Vec<CriticReview>,
    /// `(outlet, raw score text)` for reviews whose score was `tbd` or invalid.
    pub skipped: Vec<(String, String)>,
}

pub fn parse(html: &str) -> CriticPage {
    let doc = Html::parse_document(html);
    let mut page = CriticPage::default();

    for block in doc.select(&REVIEW) {
        let Some(link) = block.select(&PUBLICATION).next() else { continue };
        let outlet_name = text_of(link);
        if outlet_name.is_empty() {
            continue;
        }
        let Some(span) = block.select(&SCORE_SPAN).next() else { continue };
        let score_text = text_of(span);

        let score = match parse_score(&score_text) {
            Some(v) => v,
            None => {
                page.skipped.push((outlet_name, score_text));
                continue;
            }
        };

        page.reviews.push(CriticReview {
            outlet_id: publication_id(link),
            outlet_name,
            score,
            date: review_date(block),
        });
    }
    page
}

fn parse_score(text: &str) -> Option<f64> {
    if is_tbd(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn publication_id(link: ElementRef<'_>) -> Option<String> {
    let href = link.value().attr("href")?;
    let (_, tail) = href.split_once("/publication/")?;
    let id = tail.trim_matches('/');
    (!id.is_empty()).then(|| id.to_string())
}

fn review_date(block: ElementRef<'_>) -> Option<NaiveDate> {
    let text = text_of(block.select(&DATE).next()?);
    NaiveDate::parse_from_str(&text, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(outlet: &str, href: &str, score: &str, date: &str) -> String {
        format!(
            r#"<div data-testid="product-review" class="c-siteReview g-bg-gray10">
                 <div class="c-siteReviewHeader u-flexbox">
                   <div class="c-siteReviewScore c-siteReviewScore_background-critic_high">
                     <span data-v-e408cafe="">{score}</span>
                   </div>
                   <a href="{href}" class="c-siteReviewHeader_publicationName">
                     {outlet}
                   </a>
                   <div class="c-siteReviewHeader_reviewDate g-color-gray80">{date}</div>
                 </div>
                 <div class="c-siteReview_quote"><span>Quote text.</span></div>
               </div>"#
        )
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body><section>{}</section></body></html>", blocks.concat())
    }

    #[test]
    fn extracts_outlets_scores_and_dates() {
        let html = page(&[
            review("IGN", "/publication/ign/", "100", "Feb 23, 2022"),
            review("Game Informer", "/publication/game-informer/", "95", "Feb 23, 2022"),
            review("Edge Magazine", "/publication/edge-magazine/", "70", ""),
        ]);
        let p = parse(&html);

        assert_eq!(p.reviews.len(), 3);
        assert!(p.skipped.is_empty());

        let ign = &p.reviews[0];
        assert_eq!(ign.outlet_name, "IGN");
        assert_eq!(ign.outlet_id.as_deref(), Some("ign"));
        assert_eq!(ign.score, 100.0);
        assert_eq!(ign.date, NaiveDate::from_ymd_opt(2022, 2, 23));

        assert_eq!(p.reviews[1].outlet_name, "Game Informer");
        assert_eq!(p.reviews[2].date, None);
    }

    #[test]
    fn tbd_and_invalid_scores_are_skipped() {
        let html = page(&[
            review("IGN", "/publication/ign/", "tbd", "Feb 23, 2022"),
            review("GameSpot", "/publication/gamespot/", "ten", "Feb 23, 2022"),
            review("PC Gamer", "/publication/pc-gamer/", "84", "Mar 1, 2022"),
        ]);
        let p = parse(&html);

        assert_eq!(p.reviews.len(), 1);
        assert_eq!(p.reviews[0].outlet_name, "PC Gamer");
        assert_eq!(p.reviews[0].date, NaiveDate::from_ymd_opt(2022, 3, 1));
        assert_eq!(
            p.skipped,
            vec![(s!("IGN"), s!("tbd")), (s!("GameSpot"), s!("ten"))]
        );
    }

    #[test]
    fn blocks_without_outlet_or_score_are_ignored() {
        let html = r#"<html><body>
            <div data-testid="product-review"><span>advert</span></div>
            <div data-testid="product-review">
              <a class="c-siteReviewHeader_publicationName" href="/publication/x/">X</a>
            </div>
        </body></html>"#;
        assert_eq!(parse(html), CriticPage::default());
    }

    #[test]
    fn publication_link_without_id() {
        let html = page(&[review("Indie Blog", "https://indie.example/review", "60", "")]);
        let p = parse(&html);
        assert_eq!(p.reviews[0].outlet_id, None);
    }
}
