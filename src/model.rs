// src/model.rs
//! The one persisted shape: a single scored review.
//!
//! Scores always live on the 0–100 scale. Player scores published on the
//! site's native 0–10 scale go through [`ReviewRecord::from_user_scale`],
//! which multiplies by 10 before validating.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel outlet carrying the Metascore published by the site.
pub const METASCORE_OUTLET: &str = "[metascore]";
/// Sentinel outlet carrying the aggregated player score published by the site.
pub const USER_SCORE_OUTLET: &str = "[user score]";

pub const MAX_SCORE: f64 = 100.0;
pub const MAX_USER_SCALE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewerType {
    Critic,
    User,
}

impl ReviewerType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewerType::Critic => "CRITIC",
            ReviewerType::User => "USER",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} has leading or trailing whitespace")]
    Padded(&'static str),

    #[error("score is not a finite number")]
    NonFinite,

    #[error("score {score} outside 0..={max}")]
    OutOfRange { score: f64, max: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub game_id: String,
    pub outlet_name: String,
    pub reviewer_type: ReviewerType,
    pub score: f64,
    pub review_date: Option<NaiveDate>,
}

/// Uniqueness key inside the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub game_id: String,
    pub outlet_name: String,
    pub reviewer_type: ReviewerType,
}

impl ReviewRecord {
    /// Build a validated record on the 0–100 scale. Identifiers are trimmed,
    /// matching what the store reads back.
    pub fn new(
        game_id: impl Into<String>,
        outlet_name: impl Into<String>,
        reviewer_type: ReviewerType,
        score: f64,
    ) -> Result<Self, ValidationError> {
        let rec = Self {
            game_id: trimmed(game_id.into()),
            outlet_name: trimmed(outlet_name.into()),
            reviewer_type,
            score,
            review_date: None,
        };
        rec.validate()?;
        Ok(rec)
    }

    pub fn critic(
        game_id: impl Into<String>,
        outlet_name: impl Into<String>,
        score: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(game_id, outlet_name, ReviewerType::Critic, score)
    }

    /// USER record from a score on the native 0–10 scale.
    pub fn from_user_scale(
        game_id: impl Into<String>,
        outlet_name: impl Into<String>,
        raw: f64,
    ) -> Result<Self, ValidationError> {
        check_range(raw, MAX_USER_SCALE)?;
        Self::new(game_id, outlet_name, ReviewerType::User, rescale_user(raw))
    }

    /// The published Metascore of a game, stored as a CRITIC sentinel row.
    pub fn metascore(game_id: impl Into<String>, score: f64) -> Result<Self, ValidationError> {
        Self::new(game_id, METASCORE_OUTLET, ReviewerType::Critic, score)
    }

    /// The published user score of a game (already ×10), stored as a USER sentinel row.
    pub fn user_score(game_id: impl Into<String>, score: f64) -> Result<Self, ValidationError> {
        Self::new(game_id, USER_SCORE_OUTLET, ReviewerType::User, score)
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.review_date = date;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_ident(&self.game_id, "game_id")?;
        check_ident(&self.outlet_name, "outlet_name")?;
        check_range(self.score, MAX_SCORE)
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            game_id: self.game_id.clone(),
            outlet_name: self.outlet_name.clone(),
            reviewer_type: self.reviewer_type,
        }
    }

    /// True for the site-published aggregate rows rather than a real outlet.
    pub fn is_aggregate(&self) -> bool {
        is_sentinel(&self.outlet_name)
    }
}

/// 0–10 → 0–100, rounded to two decimals so `7.9` lands on `79.0`.
pub fn rescale_user(raw: f64) -> f64 {
    (raw * 1000.0).round() / 100.0
}

pub fn is_sentinel(outlet_name: &str) -> bool {
    outlet_name == METASCORE_OUTLET || outlet_name == USER_SCORE_OUTLET
}

fn trimmed(s: String) -> String {
    if s.trim().len() == s.len() { s } else { s.trim().to_owned() }
}

fn check_ident(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.trim().len() != value.len() {
        return Err(ValidationError::Padded(field));
    }
    Ok(())
}

fn check_range(score: f64, max: f64) -> Result<(), ValidationError> {
    if !score.is_finite() {
        return Err(ValidationError::NonFinite);
    }
    if !(0.0..=max).contains(&score) {
        return Err(ValidationError::OutOfRange { score, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_scale_is_multiplied_by_ten() {
        let r = ReviewRecord::from_user_scale("g", "someone", 7.9).unwrap();
        assert_eq!(r.reviewer_type, ReviewerType::User);
        assert_eq!(r.score, 79.0);
    }

    #[test]
    fn user_scale_rejects_hundred_scale_input() {
        let err = ReviewRecord::from_user_scale("g", "someone", 79.0).unwrap_err();
        assert_eq!(err, ValidationError::OutOfRange { score: 79.0, max: 10.0 });
    }

    #[test]
    fn out_of_range_and_nan_rejected() {
        assert!(matches!(
            ReviewRecord::critic("g", "IGN", 101.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            ReviewRecord::critic("g", "IGN", -1.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            ReviewRecord::critic("g", "IGN", f64::NAN).unwrap_err(),
            ValidationError::NonFinite
        );
    }

    #[test]
    fn empty_identifiers_rejected() {
        assert_eq!(
            ReviewRecord::critic(" ", "IGN", 50.0).unwrap_err(),
            ValidationError::Empty("game_id")
        );
        assert_eq!(
            ReviewRecord::critic("g", "", 50.0).unwrap_err(),
            ValidationError::Empty("outlet_name")
        );
    }

    #[test]
    fn identifiers_are_trimmed_on_construction() {
        let r = ReviewRecord::critic(" g1 ", "  IGN ", 50.0).unwrap();
        assert_eq!(r.game_id, "g1");
        assert_eq!(r.outlet_name, "IGN");
        assert_eq!(r.key(), ReviewRecord::critic("g1", "IGN", 60.0).unwrap().key());
    }

    #[test]
    fn padded_identifiers_fail_validation() {
        let mut r = ReviewRecord::critic("g1", "IGN", 50.0).unwrap();
        r.outlet_name = s!(" IGN");
        assert_eq!(r.validate().unwrap_err(), ValidationError::Padded("outlet_name"));
    }

    #[test]
    fn key_separates_reviewer_types() {
        let a = ReviewRecord::critic("g", "Same", 50.0).unwrap();
        let b = ReviewRecord::new("g", "Same", ReviewerType::User, 50.0).unwrap();
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn sentinels_are_aggregates() {
        assert!(ReviewRecord::metascore("g", 80.0).unwrap().is_aggregate());
        assert!(ReviewRecord::user_score("g", 75.0).unwrap().is_aggregate());
        assert!(!ReviewRecord::critic("g", "IGN", 80.0).unwrap().is_aggregate());
    }
}
