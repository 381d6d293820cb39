pub mod calculator;

pub use calculator::{calculate_metrics, median_viewership};
