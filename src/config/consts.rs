// src/config/consts.rs

// Net config
pub const SITE_ROOT: &str = "https://www.metacritic.com";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY_MS: u64 = 3_000;

// Scrape
pub const SCRAPE_DELAY_MS: u64 = 3_000; // be polite
pub const CRITIC_REVIEWS_SUFFIX: &str = "/critic-reviews/";

// Local store
pub const STORE_DIR: &str = ".store";
pub const DEFAULT_DB_FILE: &str = "metacritic_db.csv";
pub const LOG_FILE: &str = "debug.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Analysis
pub const DEFAULT_KEEP_FRACTION: f64 = 0.8;
pub const DEFAULT_TOP_N: usize = 10;
