pub mod auth;
pub mod request_metrics;

pub use request_metrics::RequestMetrics;
