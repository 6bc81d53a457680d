use axum::{routing::post, Router};
use std::sync::Arc;

use crate::api::handlers::{predict, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::settings::AppConfig;
    use crate::providers::testing::{row, FixtureProvider};
    use crate::providers::PlayerRef;

    fn app() -> Router {
        let rows = vec![
            row("2024-01-05", "LAL vs. MEM", 30.0, 10.0, 5.0),
            row("2024-01-03", "LAL @ BOS", 20.0, 6.0, 7.0),
        ];
        let provider = FixtureProvider::new(
            vec![PlayerRef {
                id: 1,
                full_name: "Test Player".to_string(),
            }],
            rows,
        );
        let state = Arc::new(AppState {
            provider: Arc::new(provider),
            config: AppConfig::new(),
        });
        create_router(state)
    }

    fn predict_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn predict_route_answers_with_full_breakdown() {
        let body = serde_json::json!({
            "player_name": "Test Player",
            "stat_type": "PTS",
            "prop_line": 20.0,
            "city": "MEM",
            "opponent": "MEM",
            "home": true,
            "days_rest": 2,
            "defender": "Jaren Jackson Jr.",
            "drip_rating": 0.0
        });

        let response = app().oneshot(predict_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["player"], "Test Player");
        assert_eq!(json["stat"], "PTS");
        // Season avg 25, MEM avg 30: city +1.0, opponent +2.0, home +1.25.
        assert_eq!(json["season_avg"], 25.0);
        assert_eq!(json["adjustments"]["city"], 1.0);
        assert_eq!(json["adjustments"]["opponent"], 2.0);
        assert_eq!(json["adjustments"]["rest"], 0.0);
        assert_eq!(json["adjustments"]["home"], 1.25);
        assert_eq!(json["adjustments"]["defender"], 0.0);
        assert_eq!(json["projection"], 29.25);
        // 29.25 > 20 + 1
        assert_eq!(json["recommendation"], "OVER");
    }

    #[tokio::test]
    async fn unknown_player_yields_404_with_error_body() {
        let body = serde_json::json!({
            "player_name": "Nobody Special",
            "stat_type": "PTS",
            "prop_line": 20.0,
            "city": "MEM",
            "opponent": "MEM",
            "home": true,
            "days_rest": 2,
            "defender": "Jaren Jackson Jr.",
            "drip_rating": 0.0
        });

        let response = app().oneshot(predict_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = json_body(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Nobody Special"));
    }
}
