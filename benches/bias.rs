// benches/bias.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use mc_bias::{
    analysis::{compute_outlet_stats, rank_by_volume_filtered, render_report},
    config::options::AnalysisOptions,
    model::ReviewRecord,
};

/// 500 games × 40 outlets, deterministic scores.
fn synthetic_records() -> Vec<ReviewRecord> {
    let mut out = Vec::new();
    for g in 0..500u32 {
        let game = format!("https://www.metacritic.com/game/g{g}");
        let meta = 50.0 + (g % 45) as f64;
        out.push(ReviewRecord::metascore(game.as_str(), meta).expect("metascore"));
        out.push(ReviewRecord::user_score(game.as_str(), (meta - 7.0).max(0.0)).expect("user score"));
        for o in 0..40u32 {
            // Not every outlet reviews every game.
            if (g + o) % 3 == 0 {
                continue;
            }
            let score = (meta + (o as f64 - 20.0) * 0.5 + ((g * 7 + o) % 11) as f64 - 5.0).clamp(0.0, 100.0);
            out.push(ReviewRecord::critic(game.as_str(), format!("Outlet {o}"), score).expect("critic"));
        }
    }
    out
}

fn bench_bias(c: &mut Criterion) {
    let records = synthetic_records();
    let stats = compute_outlet_stats(&records);
    let opts = AnalysisOptions::default();

    c.bench_function("compute_outlet_stats", |b| {
        b.iter(|| {
            let stats = compute_outlet_stats(black_box(&records));
            black_box(stats.len())
        })
    });

    c.bench_function("rank_by_volume_filtered", |b| {
        b.iter(|| black_box(rank_by_volume_filtered(black_box(&stats), 0.8).len()))
    });

    c.bench_function("render_report", |b| {
        b.iter(|| black_box(render_report(black_box(&stats), &opts).len()))
    });
}

criterion_group!(benches, bench_bias);
criterion_main!(benches);
