use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub player_name: String,
    pub stat_type: String,
    pub prop_line: f64,
    pub city: String,
    pub opponent: String,
    pub home: bool,
    pub days_rest: i64,
    /// Echoed back for transparency; the math uses `drip_rating` directly.
    pub defender: String,
    pub drip_rating: f64,
}

#[derive(Debug, Serialize)]
pub struct AdjustmentBreakdown {
    pub city: f64,
    pub opponent: f64,
    pub rest: f64,
    pub home: f64,
    pub defender: f64,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub player: String,
    pub stat: String,
    pub prop_line: f64,
    pub projection: f64,
    pub season_avg: f64,
    pub adjustments: AdjustmentBreakdown,
    pub recommendation: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
