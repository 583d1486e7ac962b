// src/gui/router.rs
use super::pages::{self, Page};

pub static PAGES: &[&'static dyn Page] = &[
    &pages::outlets::PAGE,
    &pages::extreme::PAGE,
    &pages::volatile::PAGE,
    &pages::reviews::PAGE,
];

pub fn all_pages() -> &'static [&'static dyn Page] {
    PAGES
}
