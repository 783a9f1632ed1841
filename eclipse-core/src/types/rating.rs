//! Renter ratings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat key/value form of a rating as held by the document store
pub type RatingMap = BTreeMap<String, f64>;

const BOOK_QUALITY: &str = "bookQuality";
const COMMUNICATION: &str = "communication";
const OVERALL_EXPERIENCE: &str = "overallExperience";

/// A renter's aggregate rating built from three sub-scores
///
/// Scores are taken as given; no range is enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    book_quality: f64,
    communication: f64,
    overall_experience: f64,
}

impl Rating {
    /// Compose a rating from its three sub-scores
    pub fn compose(book_quality: f64, communication: f64, overall_experience: f64) -> Self {
        Self {
            book_quality,
            communication,
            overall_experience,
        }
    }

    pub fn book_quality(&self) -> f64 {
        self.book_quality
    }

    pub fn communication(&self) -> f64 {
        self.communication
    }

    pub fn overall_experience(&self) -> f64 {
        self.overall_experience
    }

    /// Arithmetic mean of the three sub-scores
    pub fn average(&self) -> f64 {
        (self.book_quality + self.communication + self.overall_experience) / 3.0
    }

    /// Rebuild a rating from a stored map
    ///
    /// Returns `None` unless all three keys are present; a partial map never
    /// produces a defaulted rating.
    pub fn from_partial(map: &RatingMap) -> Option<Self> {
        Some(Self {
            book_quality: *map.get(BOOK_QUALITY)?,
            communication: *map.get(COMMUNICATION)?,
            overall_experience: *map.get(OVERALL_EXPERIENCE)?,
        })
    }

    /// The map written to the document store; inverse of [`Rating::from_partial`]
    pub fn to_persistable(&self) -> RatingMap {
        RatingMap::from([
            (BOOK_QUALITY.to_string(), self.book_quality),
            (COMMUNICATION.to_string(), self.communication),
            (OVERALL_EXPERIENCE.to_string(), self.overall_experience),
        ])
    }
}
