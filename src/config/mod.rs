pub mod settings;

pub use settings::{AppConfig, ProjectionSettings, ProviderSettings};
