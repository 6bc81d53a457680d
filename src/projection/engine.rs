use crate::config::settings::ProjectionSettings;
use crate::domain::models::{Adjustments, GameLog, ProjectionInput, ProjectionResult};
use crate::errors::AppError;

/// Season average plus five additive context adjustments.
///
/// Pure function over an already-fetched log: no lookups, no side
/// effects, deterministic given its inputs.
pub fn compute_projection(
    log: &GameLog,
    input: &ProjectionInput,
    settings: &ProjectionSettings,
) -> Result<ProjectionResult, AppError> {
    let season_avg = log.season_average(input.stat).ok_or_else(|| {
        AppError::StatNotAvailable(format!("no games in log to average {}", input.stat))
    })?;

    // Missing history collapses to the season average, zeroing the term.
    let city_avg = log
        .average_in_city(&input.city, input.stat)
        .unwrap_or(season_avg);
    let opponent_avg = log
        .average_vs_opponent(&input.opponent, input.stat)
        .unwrap_or(season_avg);

    let adjustments = Adjustments {
        city: (city_avg - season_avg) * settings.city_weight,
        opponent: (opponent_avg - season_avg) * settings.opponent_weight,
        rest: rest_adjustment(input.days_rest, season_avg, settings),
        home: if input.home {
            settings.home_edge * season_avg
        } else {
            -settings.home_edge * season_avg
        },
        defender: input.drip_rating * season_avg,
    };

    let projection = season_avg + adjustments.total();

    Ok(ProjectionResult {
        season_avg,
        adjustments,
        projection,
    })
}

/// Bonus at the rest threshold and above, penalty on zero rest,
/// nothing in between.
fn rest_adjustment(days_rest: i64, season_avg: f64, settings: &ProjectionSettings) -> f64 {
    if days_rest >= settings.rest_threshold_days {
        settings.long_rest_bonus * season_avg
    } else if days_rest == 0 {
        -settings.zero_rest_penalty * season_avg
    } else {
        0.0
    }
}
