// src/core/sanitize.rs

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Reduce a game link to its canonical page:
/// `https://www.metacritic.com/game/<slug>`.
/// Drops the query string, a trailing slash and any sub-page
/// (`/critic-reviews/`, `/user-reviews/`, ...).
pub fn clean_link(url: &str) -> String {
    let base = url.split(['?', '#']).next().unwrap_or("").trim();
    let base = base.trim_end_matches('/');

    // scheme, "", host, "game", slug
    let parts: Vec<&str> = base.split('/').collect();
    if parts.len() >= 5 {
        parts[..5].join("/")
    } else {
        s!(base)
    }
}

/// First run of digits in `text`, ignoring thousands separators
/// ("Based on 1,234 User Ratings" → 1234).
pub fn first_count(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// "tbd" (any case) or blank means the site has no score yet.
pub fn is_tbd(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t.eq_ignore_ascii_case("tbd")
}
