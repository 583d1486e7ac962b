// src/cli.rs
//
// Command-line front-end. Subcommands for scripting, and the numbered menu
// of the interactive tool when started without one.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::analysis::{compute_outlet_stats, render_report};
use crate::config::options::{AppOptions, OptionsError};
use crate::core::net::{HttpFetcher, NetError};
use crate::progress::Progress;
use crate::scrape::{self, ScrapeSummary};
use crate::specs::{critic_reviews, game_page};
use crate::store::{StorageError, Store};

#[derive(Debug, Parser)]
#[command(name = "cli", version, about = "Scrape Metacritic reviews and measure outlet bias")]
pub struct Cli {
    /// CSV store of scraped reviews.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape every game listed in a links file into the store.
    Scrape {
        /// Text file with one Metacritic game URL per line.
        links: PathBuf,
        /// Pause between two games, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Attempts per page before a game is skipped.
        #[arg(long)]
        retries: Option<u32>,
    },
    /// Print per-outlet bias statistics.
    Stats {
        /// Share of outlets kept by review volume, in (0, 1].
        #[arg(long)]
        keep: Option<f64>,
        /// Rows in the "most extreme" / "most volatile" tables.
        #[arg(long)]
        top: Option<usize>,
    },
    /// Parse a saved HTML page offline and show what would be extracted.
    Parse { html: PathBuf },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Net(#[from] NetError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error("{0}")]
    Invalid(String),
}

impl Cli {
    pub fn options(&self) -> Result<AppOptions, CliError> {
        let mut opts = AppOptions::default();
        if let Some(db) = &self.db {
            opts.store.path = db.clone();
        }
        match &self.command {
            Some(Command::Scrape { links, delay_ms, retries }) => {
                opts.scrape.links_file = Some(links.clone());
                if let Some(ms) = delay_ms {
                    opts.scrape.delay = Duration::from_millis(*ms);
                }
                if let Some(n) = retries {
                    opts.scrape.retries = *n;
                }
            }
            Some(Command::Stats { keep, top }) => {
                if let Some(k) = keep {
                    opts.analysis.keep_fraction = *k;
                }
                if let Some(n) = top {
                    opts.analysis.top_n = *n;
                }
                opts.analysis.validate()?;
            }
            Some(Command::Parse { .. }) | None => {}
        }
        Ok(opts)
    }
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let opts = cli.options()?;
    if let Err(e) = crate::log::init(&opts.store.dir()) {
        eprintln!("Warning: file logging disabled: {e}");
    }
    logf!("CLI: start, store {}", opts.store.path.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Some(Command::Scrape { links, .. }) => run_scrape(&opts, links, &mut out),
        Some(Command::Stats { .. }) => run_stats(&opts, &mut out),
        Some(Command::Parse { html }) => run_parse(html, &mut out),
        None => menu(&opts, &mut io::stdin().lock(), &mut out),
    }
}

/// Stderr progress lines, so stdout stays the report.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        eprintln!("{total} link(s) to process.");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, _index: usize, _link: &str, stored: usize) {
        eprintln!("  ok, {stored} record(s) stored");
    }
    fn item_failed(&mut self, _index: usize, _link: &str, error: &str) {
        eprintln!("  skipped: {error}");
    }
}

fn run_scrape(opts: &AppOptions, links_path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let links = scrape::read_links(links_path)
        .map_err(|source| CliError::Io { path: links_path.to_path_buf(), source })?;
    let store = Store::open(&opts.store.path)?;
    let fetcher = HttpFetcher::new(opts.scrape.retries, opts.scrape.retry_delay)?;

    let mut progress = ConsoleProgress;
    let summary = scrape::update_store(&store, &fetcher, &links, &opts.scrape, Some(&mut progress))?;
    write_summary(out, &summary).map_err(stdout_err)
}

fn write_summary(out: &mut impl Write, s: &ScrapeSummary) -> io::Result<()> {
    writeln!(
        out,
        "Done: {}/{} game(s) scraped, {} record(s) added, {} updated, {} review(s) without score.",
        s.scraped, s.links, s.inserted, s.updated, s.skipped_reviews
    )?;
    for (link, err) in &s.failed {
        writeln!(out, "  failed: {link}: {err}")?;
    }
    Ok(())
}

fn run_stats(opts: &AppOptions, out: &mut impl Write) -> Result<(), CliError> {
    let store = Store::open(&opts.store.path)?;
    let stats = compute_outlet_stats(&store.records());
    logf!("CLI: stats over {} record(s), {} outlet(s)", store.len(), stats.len());
    out.write_all(render_report(&stats, &opts.analysis).as_bytes())
        .map_err(stdout_err)
}

fn run_parse(path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let html = fs::read_to_string(path)
        .map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    write_parse(&html, out).map_err(stdout_err)
}

fn write_parse(html: &str, out: &mut impl Write) -> io::Result<()> {
    let summary = game_page::parse(html);
    let page = critic_reviews::parse(html);

    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "HTML PARSING CHECK")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(
        out,
        "Metascore: {} | User score: {} | Counts: {} critics / {} users",
        opt(summary.metascore), opt(summary.user_score),
        opt(summary.critic_count), opt(summary.user_count)
    )?;
    writeln!(out, "{} review(s) found, {} skipped (tbd/invalid)", page.reviews.len(), page.skipped.len())?;
    for (i, r) in page.reviews.iter().take(5).enumerate() {
        writeln!(
            out,
            "  {}. {} (id: {}) score {} {}",
            i + 1,
            r.outlet_name,
            r.outlet_id.as_deref().unwrap_or("-"),
            r.score,
            r.date.map(|d| d.to_string()).unwrap_or_default()
        )?;
    }
    Ok(())
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| s!("N/A"))
}

fn stdout_err(source: io::Error) -> CliError {
    CliError::Io { path: PathBuf::from("<stdout>"), source }
}

/// Numbered menu on `input`: 1 scrape, 2 stats, 3 parse, 4 quit.
/// Errors of one action are printed and the menu continues.
pub fn menu(opts: &AppOptions, input: &mut impl BufRead, out: &mut impl Write) -> Result<(), CliError> {
    loop {
        write_menu(out).map_err(stdout_err)?;
        let Some(choice) = prompt(input, out, "\nChoice: ")? else { return Ok(()) };

        let result = match choice.as_str() {
            "1" => match prompt(input, out, "Links file: ")? {
                Some(p) => run_scrape(opts, Path::new(&p), out),
                None => return Ok(()),
            },
            "2" => run_stats(opts, out),
            "3" => match prompt(input, out, "HTML file: ")? {
                Some(p) => run_parse(Path::new(&p), out),
                None => return Ok(()),
            },
            "4" | "q" => {
                writeln!(out, "Bye.").map_err(stdout_err)?;
                return Ok(());
            }
            other => Err(CliError::Invalid(format!("invalid choice: {other}"))),
        };

        if let Err(e) = result {
            loge!("CLI: menu action failed: {e}");
            writeln!(out, "Error: {e}").map_err(stdout_err)?;
        }
    }
}

fn write_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(out, "    METACRITIC BIAS ANALYZER")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "1 = Load links file / scrape / update store")?;
    writeln!(out, "2 = Show per-outlet statistics")?;
    writeln!(out, "3 = Check parsing on a local HTML file")?;
    writeln!(out, "4 = Quit")
}

/// `None` on end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>, CliError> {
    write!(out, "{label}").and_then(|_| out.flush()).map_err(stdout_err)?;
    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .map_err(|source| CliError::Io { path: PathBuf::from("<stdin>"), source })?;
    Ok((n > 0).then(|| s!(line.trim())))
}
