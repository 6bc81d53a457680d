use std::time::Duration;

use async_trait::async_trait;
use log::info;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PlayerRef, RawGameRow, StatsProvider};
use crate::config::settings::ProviderSettings;
use crate::errors::AppError;

const ROSTER_ENDPOINT: &str = "commonallplayers";
const GAME_LOG_ENDPOINT: &str = "playergamelog";
const ROSTER_TABLE: &str = "CommonAllPlayers";
const GAME_LOG_TABLE: &str = "PlayerGameLog";

/// Client for the public stats.nba.com JSON endpoints.
///
/// Every endpoint answers with the same tabular shape: a list of named
/// result sets, each a header list plus row arrays. Columns are located
/// by header name, never by position.
pub struct NbaStatsClient {
    client: Client,
    base_url: String,
    season: String,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

impl NbaStatsClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self, AppError> {
        // stats.nba.com rejects requests without the browser-ish headers.
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            season: settings.season.clone(),
        })
    }

    async fn get_table<Q>(&self, endpoint: &str, query: &Q, table: &str) -> Result<ResultSet, AppError>
    where
        Q: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Provider(format!(
                "{url} returned status {}",
                response.status()
            )));
        }

        let body: StatsResponse = response.json().await?;
        body.result_sets
            .into_iter()
            .find(|set| set.name == table)
            .ok_or_else(|| AppError::Provider(format!("result set '{table}' missing from response")))
    }

    fn stat_column(table: &ResultSet, header: &str) -> Result<usize, AppError> {
        table
            .column(header)
            .ok_or_else(|| AppError::StatNotAvailable(header.to_string()))
    }

    fn structural_column(table: &ResultSet, header: &str) -> Result<usize, AppError> {
        table
            .column(header)
            .ok_or_else(|| AppError::Provider(format!("column '{header}' missing from game log")))
    }
}

fn str_cell(row: &[Value], idx: usize) -> &str {
    row.get(idx).and_then(Value::as_str).unwrap_or("")
}

fn num_cell(row: &[Value], idx: usize) -> f64 {
    row.get(idx).and_then(Value::as_f64).unwrap_or(0.0)
}

#[async_trait]
impl StatsProvider for NbaStatsClient {
    async fn resolve_player(&self, name: &str) -> Result<PlayerRef, AppError> {
        let query = [
            ("IsOnlyCurrentSeason", "1"),
            ("LeagueID", "00"),
            ("Season", self.season.as_str()),
        ];
        let table = self.get_table(ROSTER_ENDPOINT, &query, ROSTER_TABLE).await?;

        let id_col = Self::structural_column(&table, "PERSON_ID")?;
        let name_col = Self::structural_column(&table, "DISPLAY_FIRST_LAST")?;

        let wanted = name.trim().to_lowercase();
        for row in &table.row_set {
            let full_name = str_cell(row, name_col);
            if full_name.trim().to_lowercase() == wanted {
                return Ok(PlayerRef {
                    id: num_cell(row, id_col) as i64,
                    full_name: full_name.to_string(),
                });
            }
        }

        Err(AppError::PlayerNotFound(name.trim().to_string()))
    }

    async fn fetch_season_log(
        &self,
        player_id: i64,
        season: &str,
    ) -> Result<Vec<RawGameRow>, AppError> {
        let query = [
            ("PlayerID", player_id.to_string()),
            ("Season", season.to_string()),
            ("SeasonType", "Regular Season".to_string()),
        ];
        let table = self
            .get_table(GAME_LOG_ENDPOINT, &query, GAME_LOG_TABLE)
            .await?;

        let date_col = Self::structural_column(&table, "GAME_DATE")?;
        let matchup_col = Self::structural_column(&table, "MATCHUP")?;
        let pts_col = Self::stat_column(&table, "PTS")?;
        let reb_col = Self::stat_column(&table, "REB")?;
        let ast_col = Self::stat_column(&table, "AST")?;
        let min_col = Self::stat_column(&table, "MIN")?;

        let rows: Vec<RawGameRow> = table
            .row_set
            .iter()
            .map(|row| RawGameRow {
                date: str_cell(row, date_col).to_string(),
                matchup: str_cell(row, matchup_col).to_string(),
                points: num_cell(row, pts_col),
                rebounds: num_cell(row, reb_col),
                assists: num_cell(row, ast_col),
                minutes: num_cell(row, min_col),
            })
            .collect();

        info!("Fetched {} game rows for player {}", rows.len(), player_id);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> NbaStatsClient {
        let settings = ProviderSettings {
            base_url: server.url(),
            ..ProviderSettings::default()
        };
        NbaStatsClient::new(&settings).unwrap()
    }

    fn roster_body() -> String {
        serde_json::json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_FIRST_LAST", "ROSTERSTATUS"],
                "rowSet": [
                    [2544, "LeBron James", 1],
                    [201939, "Stephen Curry", 1]
                ]
            }]
        })
        .to_string()
    }

    fn game_log_body(headers: Vec<&str>, rows: serde_json::Value) -> String {
        serde_json::json!({
            "resultSets": [{
                "name": "PlayerGameLog",
                "headers": headers,
                "rowSet": rows
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn resolves_player_case_insensitively() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/commonallplayers")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(roster_body())
            .create_async()
            .await;

        let client = client_for(&server);
        let player = client.resolve_player("  lebron james ").await.unwrap();
        assert_eq!(player.id, 2544);
        assert_eq!(player.full_name, "LeBron James");
    }

    #[tokio::test]
    async fn unknown_player_is_player_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/commonallplayers")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(roster_body())
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.resolve_player("Michael Jordan").await.unwrap_err();
        assert!(matches!(err, AppError::PlayerNotFound(_)));
    }

    #[tokio::test]
    async fn parses_game_log_rows_by_header_name() {
        let mut server = mockito::Server::new_async().await;
        let body = game_log_body(
            vec!["SEASON_ID", "GAME_DATE", "MATCHUP", "MIN", "PTS", "REB", "AST"],
            serde_json::json!([
                ["22023", "2024-01-05", "LAL vs. MEM", 36, 28, 8, 9],
                ["22023", "2024-01-03", "LAL @ BOS", 38, 25, 7, 11]
            ]),
        );
        let _mock = server
            .mock("GET", "/playergamelog")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = client_for(&server);
        let rows = client.fetch_season_log(2544, "2023-24").await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-01-05");
        assert_eq!(rows[0].matchup, "LAL vs. MEM");
        assert_eq!(rows[0].points, 28.0);
        assert_eq!(rows[1].rebounds, 7.0);
        assert_eq!(rows[1].assists, 11.0);
        assert_eq!(rows[1].minutes, 38.0);
    }

    #[tokio::test]
    async fn missing_stat_column_is_stat_not_available() {
        let mut server = mockito::Server::new_async().await;
        let body = game_log_body(
            vec!["GAME_DATE", "MATCHUP", "MIN", "REB", "AST"],
            serde_json::json!([]),
        );
        let _mock = server
            .mock("GET", "/playergamelog")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch_season_log(2544, "2023-24").await.unwrap_err();
        match err {
            AppError::StatNotAvailable(column) => assert_eq!(column, "PTS"),
            other => panic!("expected StatNotAvailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/playergamelog")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.fetch_season_log(2544, "2023-24").await.unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
    }
}
