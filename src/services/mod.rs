pub mod predict;
pub mod server;
