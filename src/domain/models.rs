use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Stat categories the projector understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Points,
    Rebounds,
    Assists,
}

impl StatType {
    /// Accepts both the provider column codes and the long names,
    /// case-insensitively.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        match input.trim().to_ascii_uppercase().as_str() {
            "PTS" | "POINTS" => Ok(StatType::Points),
            "REB" | "REBOUNDS" => Ok(StatType::Rebounds),
            "AST" | "ASSISTS" => Ok(StatType::Assists),
            other => Err(AppError::InvalidInput(format!(
                "unknown stat type '{other}' (expected PTS, REB or AST)"
            ))),
        }
    }

    /// Provider column name for this stat.
    pub fn column(&self) -> &'static str {
        match self {
            StatType::Points => "PTS",
            StatType::Rebounds => "REB",
            StatType::Assists => "AST",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One value per tracked stat column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatLine {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

impl StatLine {
    pub fn get(&self, stat: StatType) -> f64 {
        match stat {
            StatType::Points => self.points,
            StatType::Rebounds => self.rebounds,
            StatType::Assists => self.assists,
        }
    }
}

/// One historical game: raw columns plus derived context fields.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub date: NaiveDate,
    pub matchup: String,
    pub stats: StatLine,
    pub minutes: f64,
    pub opponent: String,
    /// Opponent team code standing in for the city until a real venue
    /// table exists. See DESIGN.md.
    pub city: String,
    pub home: bool,
    /// Days since the chronologically previous game; 0 for the oldest.
    pub days_rest: i64,
    pub avg_vs_opponent: StatLine,
    pub avg_in_city: StatLine,
}

/// A player's season log, most recent game first.
///
/// Built fresh per request and discarded with the response; nothing is
/// persisted or cached.
#[derive(Debug, Clone)]
pub struct GameLog {
    pub player_id: i64,
    pub player_name: String,
    pub season: String,
    pub records: Vec<GameRecord>,
}

impl GameLog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mean of `stat` over the whole log; `None` when the log is empty.
    pub fn season_average(&self, stat: StatType) -> Option<f64> {
        mean(self.records.iter().map(|r| r.stats.get(stat)))
    }

    /// Mean of `stat` over games against `opponent`; `None` when the
    /// player has not faced them this season.
    pub fn average_vs_opponent(&self, opponent: &str, stat: StatType) -> Option<f64> {
        mean(
            self.records
                .iter()
                .filter(|r| r.opponent == opponent)
                .map(|r| r.stats.get(stat)),
        )
    }

    /// Mean of `stat` over games played in `city`; `None` when the
    /// player has not played there this season.
    pub fn average_in_city(&self, city: &str, stat: StatType) -> Option<f64> {
        mean(
            self.records
                .iter()
                .filter(|r| r.city == city)
                .map(|r| r.stats.get(stat)),
        )
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Context for one projection request.
#[derive(Debug, Clone)]
pub struct ProjectionInput {
    pub stat: StatType,
    pub city: String,
    pub opponent: String,
    pub home: bool,
    pub days_rest: i64,
    pub defender: Option<String>,
    /// Signed DRIP multiplier applied to the season average.
    pub drip_rating: f64,
}

/// The five additive deltas, kept separate for transparency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Adjustments {
    pub city: f64,
    pub opponent: f64,
    pub rest: f64,
    pub home: f64,
    pub defender: f64,
}

impl Adjustments {
    pub fn total(&self) -> f64 {
        self.city + self.opponent + self.rest + self.home + self.defender
    }
}

/// Full projection breakdown: average, deltas and the final number.
#[derive(Debug, Clone)]
pub struct ProjectionResult {
    pub season_avg: f64,
    pub adjustments: Adjustments,
    pub projection: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Over,
    Under,
    Avoid,
}

impl Recommendation {
    /// Strict comparisons: landing exactly on `line ± margin` is still
    /// too close to call.
    pub fn from_projection(projection: f64, prop_line: f64, margin: f64) -> Self {
        if projection > prop_line + margin {
            Recommendation::Over
        } else if projection < prop_line - margin {
            Recommendation::Under
        } else {
            Recommendation::Avoid
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Recommendation::Over => "OVER",
            Recommendation::Under => "UNDER",
            Recommendation::Avoid => "AVOID",
        }
    }
}
