pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;
