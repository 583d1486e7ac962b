// src/analysis/mod.rs
//
// Store records in, per-outlet bias statistics and text report out.
// Nothing here does I/O.

pub mod bias;
pub mod report;
pub mod stats;

pub use bias::{DeviationStats, GameReference, OutletBiasStat, compute_outlet_stats, game_references};
pub use report::{
    BiasSpread, GlobalStats, rank_by_volume_filtered, render_report, top_n_extreme, top_n_volatile,
};
