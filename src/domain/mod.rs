pub mod models;

pub use models::{
    Adjustments, GameLog, GameRecord, ProjectionInput, ProjectionResult, Recommendation, StatLine,
    StatType,
};
