// src/analysis/bias.rs
//! Per-outlet deviation from the two reference scores.
//!
//! For every game a [`GameReference`] is derived (published aggregate first,
//! mean of the individual reviews otherwise). Each outlet's CRITIC score is
//! compared to it, one deviation per game, and the deviations are then
//! summarized across games into an [`OutletBiasStat`].

use std::collections::BTreeMap;

use crate::config::options::Reference;
use crate::model::{METASCORE_OUTLET, ReviewRecord, ReviewerType, USER_SCORE_OUTLET};

use super::stats::{mean, median, population_stddev};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameReference {
    pub metascore: Option<f64>,
    pub user_score: Option<f64>,
}

impl GameReference {
    pub fn get(&self, reference: Reference) -> Option<f64> {
        match reference {
            Reference::Pro => self.metascore,
            Reference::Players => self.user_score,
        }
    }
}

#[derive(Default)]
struct GameScores {
    metascore: Option<f64>,
    user_score: Option<f64>,
    critics: Vec<f64>,
    users: Vec<f64>,
}

/// Reference scores of every game in `records`, keyed by `game_id`.
pub fn game_references(records: &[ReviewRecord]) -> BTreeMap<String, GameReference> {
    let mut games: BTreeMap<&str, GameScores> = BTreeMap::new();
    for r in records {
        let g = games.entry(r.game_id.as_str()).or_default();
        match (r.reviewer_type, r.outlet_name.as_str()) {
            (ReviewerType::Critic, METASCORE_OUTLET) => g.metascore = Some(r.score),
            (ReviewerType::User, USER_SCORE_OUTLET) => g.user_score = Some(r.score),
            // Sentinel name under the other reviewer type: not a real outlet either.
            (_, METASCORE_OUTLET | USER_SCORE_OUTLET) => {}
            (ReviewerType::Critic, _) => g.critics.push(r.score),
            (ReviewerType::User, _) => g.users.push(r.score),
        }
    }

    games
        .into_iter()
        .map(|(id, g)| {
            let reference = GameReference {
                metascore: g.metascore.or_else(|| mean(&g.critics)),
                user_score: g.user_score.or_else(|| mean(&g.users)),
            };
            (s!(id), reference)
        })
        .collect()
}

/// Summary of one outlet's deviations against one reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviationStats {
    /// Games where both the outlet's score and the reference exist.
    pub games: usize,
    pub mean: f64,
    pub median: f64,
    pub abs_mean: f64,
    pub abs_median: f64,
    /// Population standard deviation of the absolute deviations.
    pub abs_stddev: f64,
}

impl DeviationStats {
    /// `None` when there is nothing to summarize.
    pub fn from_deviations(deviations: &[f64]) -> Option<Self> {
        let abs: Vec<f64> = deviations.iter().map(|d| d.abs()).collect();
        Some(Self {
            games: deviations.len(),
            mean: mean(deviations)?,
            median: median(deviations)?,
            abs_mean: mean(&abs)?,
            abs_median: median(&abs)?,
            abs_stddev: population_stddev(&abs)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutletBiasStat {
    pub outlet_name: String,
    /// CRITIC records of this outlet across all games.
    pub review_count: usize,
    pub vs_pro: Option<DeviationStats>,
    pub vs_players: Option<DeviationStats>,
}

impl OutletBiasStat {
    pub fn against(&self, reference: Reference) -> Option<&DeviationStats> {
        match reference {
            Reference::Pro => self.vs_pro.as_ref(),
            Reference::Players => self.vs_players.as_ref(),
        }
    }

    pub fn bias_vs_pro(&self) -> Option<f64> {
        self.vs_pro.map(|d| d.mean)
    }

    pub fn bias_vs_players(&self) -> Option<f64> {
        self.vs_players.map(|d| d.mean)
    }

    pub fn bias(&self, reference: Reference) -> Option<f64> {
        self.against(reference).map(|d| d.mean)
    }

    pub fn median_bias(&self, reference: Reference) -> Option<f64> {
        self.against(reference).map(|d| d.median)
    }

    pub fn abs_bias_avg(&self, reference: Reference) -> Option<f64> {
        self.against(reference).map(|d| d.abs_mean)
    }

    pub fn abs_bias_median(&self, reference: Reference) -> Option<f64> {
        self.against(reference).map(|d| d.abs_median)
    }

    pub fn abs_bias_stddev(&self, reference: Reference) -> Option<f64> {
        self.against(reference).map(|d| d.abs_stddev)
    }
}

/// Bias statistics for every outlet with at least one CRITIC record,
/// sorted by outlet name.
pub fn compute_outlet_stats(records: &[ReviewRecord]) -> Vec<OutletBiasStat> {
    let references = game_references(records);

    let mut outlets: BTreeMap<&str, Vec<&ReviewRecord>> = BTreeMap::new();
    for r in records {
        if r.reviewer_type == ReviewerType::Critic && !r.is_aggregate() {
            outlets.entry(r.outlet_name.as_str()).or_default().push(r);
        }
    }

    outlets
        .into_iter()
        .map(|(name, reviews)| {
            let deviations = |reference: Reference| -> Vec<f64> {
                reviews
                    .iter()
                    .filter_map(|r| {
                        let base = references.get(&r.game_id)?.get(reference)?;
                        Some(r.score - base)
                    })
                    .collect()
            };
            OutletBiasStat {
                outlet_name: s!(name),
                review_count: reviews.len(),
                vs_pro: DeviationStats::from_deviations(&deviations(Reference::Pro)),
                vs_players: DeviationStats::from_deviations(&deviations(Reference::Players)),
            }
        })
        .collect()
}
