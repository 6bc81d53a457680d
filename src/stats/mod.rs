pub mod derive;
pub mod retriever;

pub use retriever::StatsRetriever;
