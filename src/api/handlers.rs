use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};

use crate::api::models::{AdjustmentBreakdown, ErrorResponse, PredictRequest, PredictResponse};
use crate::config::settings::AppConfig;
use crate::domain::models::{ProjectionInput, Recommendation, StatType};
use crate::errors::AppError;
use crate::projection::compute_projection;
use crate::providers::StatsProvider;
use crate::stats::StatsRetriever;

pub struct AppState {
    pub provider: Arc<dyn StatsProvider>,
    pub config: AppConfig,
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> impl IntoResponse {
    match run_prediction(&state, request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

async fn run_prediction(
    state: &AppState,
    request: PredictRequest,
) -> Result<PredictResponse, AppError> {
    let stat = StatType::parse(&request.stat_type)?;

    let retriever = StatsRetriever::new(
        state.provider.clone(),
        state.config.provider.season.clone(),
    );
    let log = retriever.fetch_game_log(&request.player_name).await?;

    let input = ProjectionInput {
        stat,
        city: request.city,
        opponent: request.opponent,
        home: request.home,
        days_rest: request.days_rest,
        defender: Some(request.defender),
        drip_rating: request.drip_rating,
    };

    let result = compute_projection(&log, &input, &state.config.projection)?;
    let recommendation = Recommendation::from_projection(
        result.projection,
        request.prop_line,
        state.config.projection.avoid_margin,
    );

    Ok(PredictResponse {
        player: request.player_name,
        stat: stat.to_string(),
        prop_line: request.prop_line,
        projection: round2(result.projection),
        season_avg: round2(result.season_avg),
        adjustments: AdjustmentBreakdown {
            city: round2(result.adjustments.city),
            opponent: round2(result.adjustments.opponent),
            rest: round2(result.adjustments.rest),
            home: round2(result.adjustments.home),
            defender: round2(result.adjustments.defender),
        },
        recommendation: recommendation.as_str().to_string(),
    })
}

fn error_response(err: AppError) -> Response {
    match &err {
        AppError::Other(_) => error!("Prediction failed unexpectedly: {err:?}"),
        _ => warn!("Prediction failed: {err}"),
    }

    (
        status_for(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// One status code per error kind, so clients never have to parse the
/// message string.
fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
        AppError::StatNotAvailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AppError::Provider(_) => StatusCode::BAD_GATEWAY,
        AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
