pub mod nba;

use async_trait::async_trait;

use crate::errors::AppError;

pub use nba::NbaStatsClient;

/// A player resolved from the provider's active roster.
#[derive(Debug, Clone)]
pub struct PlayerRef {
    pub id: i64,
    pub full_name: String,
}

/// One raw game row as delivered by the provider, before derivation.
#[derive(Debug, Clone)]
pub struct RawGameRow {
    pub date: String,
    pub matchup: String,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub minutes: f64,
}

/// Narrow seam over the external stats provider so the projection
/// pipeline can run against synthetic fixtures instead of the live API.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Exact case-insensitive, whitespace-trimmed roster lookup.
    /// No fuzzy matching.
    async fn resolve_player(&self, name: &str) -> Result<PlayerRef, AppError>;

    /// Raw per-game rows for one player and season, in provider order.
    async fn fetch_season_log(
        &self,
        player_id: i64,
        season: &str,
    ) -> Result<Vec<RawGameRow>, AppError>;
}
