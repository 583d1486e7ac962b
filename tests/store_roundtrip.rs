// tests/store_roundtrip.rs
use std::fs;

use mc_bias::analysis::compute_outlet_stats;
use mc_bias::config::options::Reference;
use mc_bias::model::{ReviewRecord, ReviewerType};
use mc_bias::store::{StorageError, Store};
use pretty_assertions::assert_eq;

fn sample() -> Vec<ReviewRecord> {
    let mut v = Vec::new();
    for (game, meta, user) in [("g1", 80.0, 7.5), ("g2", 65.0, 8.2), ("g3", 91.0, 6.0)] {
        v.push(ReviewRecord::metascore(game, meta).unwrap());
        v.push(ReviewRecord::from_user_scale(game, "[user score]", user).unwrap());
    }
    for (game, outlet, score) in [
        ("g1", "IGN", 85.0),
        ("g1", "Edge", 70.0),
        ("g2", "IGN", 60.0),
        ("g2", "GameSpot", 66.0),
        ("g3", "IGN", 95.0),
        ("g3", "Edge", 90.0),
    ] {
        v.push(ReviewRecord::critic(game, outlet, score).unwrap());
    }
    v
}

#[test]
fn reload_gives_identical_stats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("db.csv");

    let before = {
        let store = Store::open(&path).unwrap();
        let summary = store.upsert(&sample()).unwrap();
        assert_eq!(summary.inserted, 12);
        compute_outlet_stats(&store.records())
    };

    let reopened = Store::open(&path).unwrap();
    assert_eq!(reopened.len(), 12);
    let after = compute_outlet_stats(&reopened.load_all().unwrap());
    assert_eq!(before, after);
}

#[test]
fn upsert_same_record_twice_keeps_latest() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("db.csv")).unwrap();

    store.upsert(&[ReviewRecord::critic("g", "IGN", 70.0).unwrap()]).unwrap();
    let s = store.upsert(&[ReviewRecord::critic("g", "IGN", 75.0).unwrap()]).unwrap();
    assert_eq!((s.inserted, s.updated), (0, 1));

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].score, 75.0);
}

#[test]
fn outlet_a_has_zero_pro_bias_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("db.csv")).unwrap();
    store
        .upsert(&[
            ReviewRecord::critic("game-1", "OutletA", 90.0).unwrap(),
            ReviewRecord::metascore("game-1", 80.0).unwrap(),
            ReviewRecord::critic("game-2", "OutletA", 70.0).unwrap(),
            ReviewRecord::metascore("game-2", 80.0).unwrap(),
        ])
        .unwrap();

    let stats = compute_outlet_stats(&Store::open(store.path()).unwrap().records());
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].outlet_name, "OutletA");
    assert_eq!(stats[0].bias_vs_pro(), Some(0.0));
    assert_eq!(stats[0].abs_bias_avg(Reference::Pro), Some(10.0));
    assert_eq!(stats[0].bias_vs_players(), None);
}

#[test]
fn file_is_plain_csv_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.csv");
    let store = Store::open(&path).unwrap();
    store
        .upsert(&[ReviewRecord::from_user_scale("g", "someone", 7.9).unwrap()])
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("game_id,outlet_name,reviewer_type,score,review_date"));
    assert_eq!(lines.next(), Some("g,someone,USER,79.0,"));

    let back = Store::open(&path).unwrap().records();
    assert_eq!(back[0].reviewer_type, ReviewerType::User);
}

#[test]
fn corrupt_rows_surface_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.csv");

    fs::write(&path, "game_id,outlet_name,reviewer_type,score,review_date\ng,IGN,CRITIC,abc,\n").unwrap();
    assert!(matches!(Store::open(&path), Err(StorageError::Malformed { .. })));

    fs::write(&path, "game_id,outlet_name,reviewer_type,score,review_date\ng,IGN,CRITIC,150,\n").unwrap();
    assert!(matches!(Store::open(&path), Err(StorageError::Invalid { line: 2, .. })));

    fs::write(&path, "link,outlet,score\n").unwrap();
    assert!(matches!(Store::open(&path), Err(StorageError::Header { .. })));
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.csv");
    let store = Store::open(&path).unwrap();
    store.upsert(&[ReviewRecord::critic("g", "IGN", 70.0).unwrap()]).unwrap();

    fs::write(&path, "garbage\n").unwrap();
    assert!(store.load_all().is_err());
    assert_eq!(store.len(), 1);
}
