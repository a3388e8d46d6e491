pub mod health;
pub mod metrics;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod swagger;
pub mod users;

use actix_web::{web, HttpResponse};

use crate::utils::AppError;

/// Registers every application route. Shared by `main` and the route tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(root))
    // Health check
    .route("/health", web::get().to(health::health_check))
    // Metrics
    .route("/metrics", web::get().to(metrics::get_metrics))
    // Products
    .route("/products", web::get().to(products::list_products))
    .route("/products", web::post().to(products::create_product))
    .route("/products/{id}", web::get().to(products::get_product))
    .route("/products/{id}", web::patch().to(products::update_product))
    .route("/products/{id}", web::delete().to(products::delete_product))
    // Users & roles
    .route("/user", web::get().to(users::list_users))
    .route("/user/admin/{email}", web::put().to(users::make_admin))
    .route("/user/{email}", web::put().to(users::upsert_user))
    .route("/admin/{email}", web::get().to(users::check_admin))
    .route("/userInfo/{email}", web::get().to(users::get_user_info))
    // Orders (customer)
    .route("/order", web::get().to(orders::list_my_orders))
    .route("/order", web::post().to(orders::place_order))
    .route("/order/{id}", web::get().to(orders::get_order))
    .route("/order/{id}", web::patch().to(orders::pay_order))
    .route("/order/{id}", web::delete().to(orders::cancel_order))
    // Orders (admin)
    .route("/orders", web::get().to(orders::list_all_orders))
    .route("/orders/{id}", web::delete().to(orders::delete_any_order))
    // Reviews
    .route("/review", web::get().to(reviews::list_reviews))
    .route("/review", web::post().to(reviews::add_review))
    // Payments
    .route(
        "/create-payment-intent",
        web::post().to(payments::create_payment_intent),
    );
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().body("Hello Tooltrex!")
}
