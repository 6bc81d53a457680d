pub mod defender;
pub mod engine;

pub use defender::estimate_defender;
pub use engine::compute_projection;
