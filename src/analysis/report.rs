// src/analysis/report.rs
//
// Ranking, volume filtering and the plain-text report shared by the CLI
// (stdout) and the GUI (clipboard).

use std::fmt::Write as _;

use crate::config::options::{AnalysisOptions, Reference};

use super::bias::OutletBiasStat;
use super::stats::{mean, percentile_nearest_rank, sample_stddev};

const WIDTH: usize = 100;
const NAME_WIDTH: usize = 30;

/// Outlets sorted by review volume (desc, then name), keeping those at or
/// above the `(1 - keep_fraction)` nearest-rank percentile of review counts.
/// Ties at the cutoff are all kept.
pub fn rank_by_volume_filtered(stats: &[OutletBiasStat], keep_fraction: f64) -> Vec<&OutletBiasStat> {
    let Some(cutoff) = volume_cutoff(stats, keep_fraction) else {
        return Vec::new();
    };

    let mut kept: Vec<&OutletBiasStat> = stats.iter().filter(|s| s.review_count >= cutoff).collect();
    kept.sort_by(|a, b| {
        b.review_count
            .cmp(&a.review_count)
            .then_with(|| a.outlet_name.cmp(&b.outlet_name))
    });
    kept
}

/// Review count an outlet needs to survive `rank_by_volume_filtered`.
pub fn volume_cutoff(stats: &[OutletBiasStat], keep_fraction: f64) -> Option<usize> {
    let counts: Vec<usize> = stats.iter().map(|s| s.review_count).collect();
    percentile_nearest_rank(&counts, 1.0 - keep_fraction.clamp(0.0, 1.0))
}

/// Outlets with the largest average absolute deviation from `reference`.
pub fn top_n_extreme<'a>(
    stats: impl IntoIterator<Item = &'a OutletBiasStat>,
    n: usize,
    reference: Reference,
) -> Vec<&'a OutletBiasStat> {
    top_n_by(stats, n, |s| s.abs_bias_avg(reference))
}

/// Outlets whose absolute deviation from `reference` varies the most.
pub fn top_n_volatile<'a>(
    stats: impl IntoIterator<Item = &'a OutletBiasStat>,
    n: usize,
    reference: Reference,
) -> Vec<&'a OutletBiasStat> {
    top_n_by(stats, n, |s| s.abs_bias_stddev(reference))
}

fn top_n_by<'a>(
    stats: impl IntoIterator<Item = &'a OutletBiasStat>,
    n: usize,
    key: impl Fn(&OutletBiasStat) -> Option<f64>,
) -> Vec<&'a OutletBiasStat> {
    let mut keyed: Vec<(f64, &OutletBiasStat)> = stats
        .into_iter()
        .filter_map(|s| key(s).map(|k| (k, s)))
        .collect();
    keyed.sort_by(|(ka, a), (kb, b)| {
        kb.total_cmp(ka).then_with(|| a.outlet_name.cmp(&b.outlet_name))
    });
    keyed.into_iter().take(n).map(|(_, s)| s).collect()
}

/// Spread of the outlets' signed biases against one reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiasSpread {
    pub outlets: usize,
    pub mean: f64,
    /// Sample standard deviation; `0.0` with a single outlet.
    pub stddev: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalStats {
    pub outlets: usize,
    pub reviews: usize,
    pub vs_pro: Option<BiasSpread>,
    pub vs_players: Option<BiasSpread>,
}

impl GlobalStats {
    pub fn compute(stats: &[OutletBiasStat]) -> Self {
        let spread = |reference: Reference| {
            let biases: Vec<f64> = stats.iter().filter_map(|s| s.bias(reference)).collect();
            Some(BiasSpread {
                outlets: biases.len(),
                mean: mean(&biases)?,
                stddev: sample_stddev(&biases),
            })
        };
        Self {
            outlets: stats.len(),
            reviews: stats.iter().map(|s| s.review_count).sum(),
            vs_pro: spread(Reference::Pro),
            vs_players: spread(Reference::Players),
        }
    }

    pub fn get(&self, reference: Reference) -> Option<&BiasSpread> {
        match reference {
            Reference::Pro => self.vs_pro.as_ref(),
            Reference::Players => self.vs_players.as_ref(),
        }
    }
}

/// `+1.23` / `-0.50`, or `N/A`.
pub fn signed(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{x:+.2}"),
        None => s!("N/A"),
    }
}

/// `1.23`, or `N/A`.
pub fn plain(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{x:.2}"),
        None => s!("N/A"),
    }
}

fn clip(name: &str) -> String {
    name.chars().take(NAME_WIDTH - 1).collect()
}

pub fn render_report(stats: &[OutletBiasStat], opts: &AnalysisOptions) -> String {
    let mut out = String::new();
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);

    if stats.is_empty() {
        out.push_str("No outlet reviews in the store.\n");
        return out;
    }

    // Global
    let global = GlobalStats::compute(stats);
    let _ = writeln!(out, "{rule}\n{:^WIDTH$}\n{thin}", "GLOBAL STATISTICS");
    for reference in Reference::ALL {
        if let Some(g) = global.get(reference) {
            let _ = writeln!(
                out,
                "Mean outlet bias vs {:<8}: {:+.2} (stddev {:.2}, {} outlets)",
                reference.label(), g.mean, g.stddev, g.outlets
            );
        }
    }
    let _ = writeln!(out, "\nTotal outlets: {} | Total reviews: {}", global.outlets, global.reviews);

    // Per outlet
    let kept = rank_by_volume_filtered(stats, opts.keep_fraction);
    let cutoff = volume_cutoff(stats, opts.keep_fraction).unwrap_or(0);
    let _ = writeln!(out, "\n{rule}\n{:^WIDTH$}\n{rule}", "OUTLET BIAS STATISTICS");
    let _ = writeln!(
        out,
        "Showing {} of {} outlets (top {:.0}% by review volume, at least {cutoff} reviews)",
        kept.len(), stats.len(), opts.keep_fraction.clamp(0.0, 1.0) * 100.0
    );
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} | {:>4} | {:^21} | {:^21} |",
        "Outlet", "Rev", "Bias vs PRO", "Bias vs PLAYERS"
    );
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} | {:>4} | {:>9} | {:>9} | {:>9} | {:>9} |",
        "", "", "Mean", "Median", "Mean", "Median"
    );
    let _ = writeln!(out, "{thin}");
    for s in &kept {
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$} | {:>4} | {:>9} | {:>9} | {:>9} | {:>9} |",
            clip(&s.outlet_name),
            s.review_count,
            signed(s.bias(Reference::Pro)),
            signed(s.median_bias(Reference::Pro)),
            signed(s.bias(Reference::Players)),
            signed(s.median_bias(Reference::Players)),
        );
    }

    // Rankings
    for reference in Reference::ALL {
        let _ = writeln!(out, "\n{thin}\nMOST EXTREME vs {} (average absolute deviation)\n{thin}", reference.label());
        ranking_rows(&mut out, &top_n_extreme(kept.iter().copied(), opts.top_n, reference), reference);

        let _ = writeln!(out, "\n{thin}\nMOST VOLATILE vs {} (stddev of absolute deviation)\n{thin}", reference.label());
        ranking_rows(&mut out, &top_n_volatile(kept.iter().copied(), opts.top_n, reference), reference);
    }

    let _ = writeln!(
        out,
        "\nLegend: positive bias = outlet scores higher than the reference | negative = lower\n{rule}"
    );
    out
}

fn ranking_rows(out: &mut String, rows: &[&OutletBiasStat], reference: Reference) {
    if rows.is_empty() {
        out.push_str("(no outlet has this reference)\n");
        return;
    }
    let _ = writeln!(
        out,
        "{:>3}  {:<NAME_WIDTH$} | {:>4} | {:>9} | {:>9} | {:>9} | {:>9} |",
        "#", "Outlet", "Rev", "Bias", "Abs avg", "Abs med", "Abs sd"
    );
    for (i, s) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<NAME_WIDTH$} | {:>4} | {:>9} | {:>9} | {:>9} | {:>9} |",
            i + 1,
            clip(&s.outlet_name),
            s.review_count,
            signed(s.bias(reference)),
            plain(s.abs_bias_avg(reference)),
            plain(s.abs_bias_median(reference)),
            plain(s.abs_bias_stddev(reference)),
        );
    }
}
