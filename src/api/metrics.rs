use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static ORDERS_PLACED: AtomicU64 = AtomicU64::new(0);
static PAYMENT_INTENTS: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_orders_placed() {
    ORDERS_PLACED.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_payment_intents() {
    PAYMENT_INTENTS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub orders_placed_total: u64,
    pub payment_intents_total: u64,
}

impl MetricsResponse {
    fn snapshot() -> Self {
        Self {
            http_requests_total: REQUEST_COUNT.load(Ordering::Relaxed),
            http_errors_total: ERROR_COUNT.load(Ordering::Relaxed),
            orders_placed_total: ORDERS_PLACED.load(Ordering::Relaxed),
            payment_intents_total: PAYMENT_INTENTS.load(Ordering::Relaxed),
        }
    }

    /// Prometheus text exposition format.
    fn render(&self) -> String {
        [
            ("http_requests_total", "Total number of HTTP requests", self.http_requests_total),
            ("http_errors_total", "Total number of HTTP error responses", self.http_errors_total),
            ("orders_placed_total", "Total number of orders placed", self.orders_placed_total),
            (
                "payment_intents_total",
                "Total number of payment intents created",
                self.payment_intents_total,
            ),
        ]
        .iter()
        .map(|(name, help, value)| {
            format!("# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus counters", content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(MetricsResponse::snapshot().render())
}
