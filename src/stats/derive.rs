use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::models::StatLine;
use crate::errors::AppError;

/// Parsed form of the provider's `"<TEAM> vs. <OPP>"` / `"<TEAM> @ <OPP>"`
/// matchup string.
#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub opponent: String,
    pub city: String,
    pub home: bool,
}

/// Home unless the second token is `"@"`; opponent is the last token.
/// The opponent code doubles as the city code until a real venue lookup
/// exists.
pub fn parse_matchup(matchup: &str) -> Result<Matchup, AppError> {
    let parts: Vec<&str> = matchup.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(AppError::Provider(format!(
            "malformed matchup string: '{matchup}'"
        )));
    }

    let home = parts[1] != "@";
    let opponent = parts[parts.len() - 1].to_string();
    let city = opponent.clone();

    Ok(Matchup {
        opponent,
        city,
        home,
    })
}

/// The provider sends ISO dates on most endpoints but `"JAN 05, 2024"`
/// style on some older ones; accept both.
pub fn parse_game_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%b %d, %Y"))
        .map_err(|_| AppError::Provider(format!("unparseable game date: '{raw}'")))
}

/// Days of rest per game for a date-descending list: each game's delta
/// to the chronologically previous one, with the oldest game getting 0.
pub fn days_rest(dates: &[NaiveDate]) -> Vec<i64> {
    let mut rest = Vec::with_capacity(dates.len());
    for i in 0..dates.len() {
        if i + 1 < dates.len() {
            rest.push((dates[i] - dates[i + 1]).num_days());
        } else {
            rest.push(0);
        }
    }
    rest
}

/// Mean stat line per group key. Every record sharing a key gets the
/// same group mean attached.
pub fn grouped_means<'a>(
    rows: impl Iterator<Item = (&'a str, StatLine)>,
) -> HashMap<String, StatLine> {
    let mut sums: HashMap<String, (StatLine, usize)> = HashMap::new();
    for (key, line) in rows {
        let entry = sums.entry(key.to_string()).or_default();
        entry.0.points += line.points;
        entry.0.rebounds += line.rebounds;
        entry.0.assists += line.assists;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (sum, count))| {
            let n = count as f64;
            (
                key,
                StatLine {
                    points: sum.points / n,
                    rebounds: sum.rebounds / n,
                    assists: sum.assists / n,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_home_matchup() {
        let parsed = parse_matchup("LAL vs. MEM").unwrap();
        assert!(parsed.home);
        assert_eq!(parsed.opponent, "MEM");
        assert_eq!(parsed.city, "MEM");
    }

    #[test]
    fn parses_away_matchup() {
        let parsed = parse_matchup("LAL @ BOS").unwrap();
        assert!(!parsed.home);
        assert_eq!(parsed.opponent, "BOS");
    }

    #[test]
    fn rejects_malformed_matchup() {
        assert!(parse_matchup("LAL").is_err());
        assert!(parse_matchup("").is_err());
    }

    #[test]
    fn parses_both_date_formats() {
        assert_eq!(parse_game_date("2024-01-05").unwrap(), date("2024-01-05"));
        assert_eq!(parse_game_date("JAN 05, 2024").unwrap(), date("2024-01-05"));
        assert!(parse_game_date("yesterday").is_err());
    }

    #[test]
    fn days_rest_is_delta_to_previous_game_oldest_zero() {
        // Descending: Jan 10, Jan 7, Jan 6.
        let dates = vec![date("2024-01-10"), date("2024-01-07"), date("2024-01-06")];
        assert_eq!(days_rest(&dates), vec![3, 1, 0]);
    }

    #[test]
    fn days_rest_of_single_game_is_zero() {
        assert_eq!(days_rest(&[date("2024-01-10")]), vec![0]);
        assert_eq!(days_rest(&[]), Vec::<i64>::new());
    }

    #[test]
    fn grouped_means_averages_per_key() {
        let rows = vec![
            (
                "MEM",
                StatLine {
                    points: 30.0,
                    rebounds: 10.0,
                    assists: 5.0,
                },
            ),
            (
                "MEM",
                StatLine {
                    points: 20.0,
                    rebounds: 6.0,
                    assists: 7.0,
                },
            ),
            (
                "BOS",
                StatLine {
                    points: 18.0,
                    rebounds: 4.0,
                    assists: 9.0,
                },
            ),
        ];

        let means = grouped_means(rows.into_iter());
        assert_eq!(means["MEM"].points, 25.0);
        assert_eq!(means["MEM"].rebounds, 8.0);
        assert_eq!(means["MEM"].assists, 6.0);
        assert_eq!(means["BOS"].points, 18.0);
    }
}
