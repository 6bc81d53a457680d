use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::settings::AppConfig;
use crate::domain::models::{ProjectionInput, Recommendation, StatType};
use crate::projection::{compute_projection, estimate_defender};
use crate::providers::NbaStatsClient;
use crate::stats::StatsRetriever;

/// Interactive projection session on stdin/stdout.
///
/// Collects the same inputs as the HTTP endpoint plus a depth chart and
/// injury list, estimates the likely defender, then prints the full
/// adjustment breakdown.
pub struct PredictService {
    config: AppConfig,
    retriever: StatsRetriever,
}

impl PredictService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider = NbaStatsClient::new(&config.provider)?;
        let retriever = StatsRetriever::new(Arc::new(provider), config.provider.season.clone());
        Ok(Self { config, retriever })
    }

    pub async fn run(&self) -> Result<()> {
        let player_name = prompt("Enter player name (e.g. LeBron James): ")?;
        let position = prompt("What position does the player play? (e.g. SF): ")?.to_uppercase();
        let stat = StatType::parse(&prompt("What stat to predict? (PTS, REB, AST): ")?)?;
        let prop_line: f64 = prompt(&format!("Enter prop line for {stat}: "))?
            .parse()
            .context("prop line must be a number")?;
        let opponent = prompt("Opponent (3-letter team code, e.g. MEM): ")?.to_uppercase();
        let city = prompt("Game city (use team code, e.g. MEM): ")?.to_uppercase();
        let home = prompt("Is it a home game? (yes/no): ")?.eq_ignore_ascii_case("yes");
        let days_rest: i64 = prompt("How many days of rest do they have?: ")?
            .parse()
            .context("days of rest must be an integer")?;

        let depth_chart = HashMap::from([(
            position.clone(),
            prompt_list(&format!("List defenders for {position} (comma-separated): "))?,
        )]);
        let injured = prompt_list("List players OUT tonight (comma-separated): ")?;

        // Malformed DRIP entries default to 0.0 instead of aborting.
        let mut drip_ratings: HashMap<String, f64> = HashMap::new();
        for candidate in &depth_chart[&position] {
            let raw = prompt(&format!("{candidate}'s DRIP: "))?;
            drip_ratings.insert(candidate.clone(), raw.parse().unwrap_or(0.0));
        }

        let defender = estimate_defender(&position, &depth_chart, &injured).map(str::to_string);
        let drip_rating = defender
            .as_deref()
            .and_then(|name| drip_ratings.get(name))
            .copied()
            .unwrap_or(0.0);

        let log = self.retriever.fetch_game_log(&player_name).await?;

        let input = ProjectionInput {
            stat,
            city: city.clone(),
            opponent: opponent.clone(),
            home,
            days_rest,
            defender: defender.clone(),
            drip_rating,
        };
        let result = compute_projection(&log, &input, &self.config.projection)?;
        let recommendation = Recommendation::from_projection(
            result.projection,
            prop_line,
            self.config.projection.avoid_margin,
        );

        let defender_label = defender.as_deref().unwrap_or("unknown");
        println!();
        println!("Base {stat} avg: {:.2}", result.season_avg);
        println!("City adj ({city}): {:+.2}", result.adjustments.city);
        println!("Opponent adj ({opponent}): {:+.2}", result.adjustments.opponent);
        println!("Rest adj ({days_rest} days): {:+.2}", result.adjustments.rest);
        println!("Home/away adj: {:+.2}", result.adjustments.home);
        println!(
            "Defender adj ({defender_label} | DRIP {drip_rating:+.2}): {:+.2}",
            result.adjustments.defender
        );
        println!("Projected {stat}: {:.2}", result.projection);
        println!("Prop line: {prop_line:.2}");

        let label = match recommendation {
            Recommendation::Over => "OVER".green().bold(),
            Recommendation::Under => "UNDER".red().bold(),
            Recommendation::Avoid => "AVOID (too close to call)".yellow().bold(),
        };
        println!("Recommendation: {label}");

        Ok(())
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_list(message: &str) -> Result<Vec<String>> {
    let raw = prompt(message)?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(raw
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
