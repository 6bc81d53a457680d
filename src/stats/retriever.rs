use std::sync::Arc;

use chrono::NaiveDate;
use log::info;

use crate::domain::models::{GameLog, GameRecord, StatLine};
use crate::errors::AppError;
use crate::providers::{RawGameRow, StatsProvider};
use crate::stats::derive::{days_rest, grouped_means, parse_game_date, parse_matchup, Matchup};

/// Fetches a player's season log and augments each game with derived
/// context: opponent, city, home flag, days of rest and group averages.
pub struct StatsRetriever {
    provider: Arc<dyn StatsProvider>,
    season: String,
}

impl StatsRetriever {
    pub fn new(provider: Arc<dyn StatsProvider>, season: impl Into<String>) -> Self {
        Self {
            provider,
            season: season.into(),
        }
    }

    /// Resolve the name, pull the raw season log, derive context fields.
    /// Resolution failure short-circuits before any game-log fetch.
    pub async fn fetch_game_log(&self, player_name: &str) -> Result<GameLog, AppError> {
        let player = self.provider.resolve_player(player_name).await?;
        info!("Resolved '{}' to player id {}", player.full_name, player.id);

        let rows = self
            .provider
            .fetch_season_log(player.id, &self.season)
            .await?;
        info!(
            "Fetched {} games for {} ({})",
            rows.len(),
            player.full_name,
            self.season
        );

        let records = build_records(rows)?;

        Ok(GameLog {
            player_id: player.id,
            player_name: player.full_name,
            season: self.season.clone(),
            records,
        })
    }
}

fn build_records(rows: Vec<RawGameRow>) -> Result<Vec<GameRecord>, AppError> {
    let mut parsed: Vec<(NaiveDate, Matchup, RawGameRow)> = rows
        .into_iter()
        .map(|row| {
            let date = parse_game_date(&row.date)?;
            let matchup = parse_matchup(&row.matchup)?;
            Ok((date, matchup, row))
        })
        .collect::<Result<_, AppError>>()?;

    // Most recent game first.
    parsed.sort_by(|a, b| b.0.cmp(&a.0));

    let dates: Vec<NaiveDate> = parsed.iter().map(|(date, _, _)| *date).collect();
    let rest = days_rest(&dates);

    let opponent_means = grouped_means(
        parsed
            .iter()
            .map(|(_, matchup, row)| (matchup.opponent.as_str(), stat_line(row))),
    );
    let city_means = grouped_means(
        parsed
            .iter()
            .map(|(_, matchup, row)| (matchup.city.as_str(), stat_line(row))),
    );

    let records = parsed
        .into_iter()
        .zip(rest)
        .map(|((date, matchup, row), days_rest)| GameRecord {
            date,
            stats: stat_line(&row),
            minutes: row.minutes,
            matchup: row.matchup,
            avg_vs_opponent: opponent_means
                .get(&matchup.opponent)
                .copied()
                .unwrap_or_default(),
            avg_in_city: city_means.get(&matchup.city).copied().unwrap_or_default(),
            opponent: matchup.opponent,
            city: matchup.city,
            home: matchup.home,
            days_rest,
        })
        .collect();

    Ok(records)
}

fn stat_line(row: &RawGameRow) -> StatLine {
    StatLine {
        points: row.points,
        rebounds: row.rebounds,
        assists: row.assists,
    }
}
