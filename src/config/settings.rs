#[derive(Debug, Clone)]
pub struct ProjectionSettings {
    pub city_weight: f64,
    pub opponent_weight: f64,
    pub rest_threshold_days: i64,
    pub long_rest_bonus: f64,
    pub zero_rest_penalty: f64,
    pub home_edge: f64,
    pub avoid_margin: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            city_weight: 0.2,
            opponent_weight: 0.4,
            rest_threshold_days: 3,
            long_rest_bonus: 0.05,
            zero_rest_penalty: 0.1,
            home_edge: 0.05,
            avoid_margin: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub season: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://stats.nba.com/stats".to_string(),
            user_agent: "NbaPropProjector/0.1".to_string(),
            timeout_secs: 30,
            season: "2023-24".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub projection: ProjectionSettings,
    pub provider: ProviderSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            projection: ProjectionSettings::default(),
            provider: ProviderSettings::default(),
        }
    }
}

// Config is passed explicitly (dependency injection) rather than held
// in a global, so tests can run with custom weights.
