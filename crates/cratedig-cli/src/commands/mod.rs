pub mod config;
pub mod release;
pub mod search;

pub use release::run_release;
pub use search::run_search;
