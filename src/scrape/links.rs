// src/scrape/links.rs

use std::{fs, io, path::Path};

use crate::config::consts::SITE_ROOT;

/// One link per line. Blank lines and repeats are skipped (logged), order is kept.
pub fn read_links(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_links(&text))
}

pub(crate) fn parse_links(text: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let link = line.trim();
        if link.is_empty() {
            logd!("Links: line {} blank, skipped", n + 1);
            continue;
        }
        if links.iter().any(|l| l == link) {
            logf!("Links: line {} duplicates {link}, skipped", n + 1);
            continue;
        }
        if !link.starts_with(SITE_ROOT) {
            logf!("Links: line {} is not a {SITE_ROOT} link, kept anyway", n + 1);
        }
        links.push(s!(link));
    }
    links
}
