// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific extraction rules. Each spec owns one page of the site and
//! knows where the data lives in its markup; nothing here fetches, stores or
//! logs to the user.
//!
//! - `game_page`: the game's main page (`/game/<slug>`), published Metascore,
//!   user score and review counts.
//! - `critic_reviews`: the `/critic-reviews/` listing, one entry per outlet.
//!
//! Specs are pure `&str -> struct` functions so they can be tested offline
//! against saved HTML. Score text of `tbd` means "not published yet" and maps
//! to `None` (or a skipped review), never to zero.

use scraper::{ElementRef, Selector};

pub mod critic_reviews;
pub mod game_page;

/// Parse a selector literal. Used to seed the `LazyLock` statics in each spec.
pub(crate) fn sel(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

/// Concatenated, whitespace-normalized text of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    crate::core::sanitize::normalize_ws(&el.text().collect::<String>())
}

pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Closest ancestor element carrying `class`.
pub(crate) fn ancestor_with_class<'a>(el: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| has_class(*a, class))
}
