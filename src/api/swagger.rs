use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tooltrex API",
        version = "1.0.0",
        description = "Backend for the Tooltrex tool shop.\n\n**Authentication:** `PUT /user/{email}` returns a one-hour JWT. Send it as `Authorization: Bearer <token>`. A missing header yields 401, an invalid token 403. Admin routes also check the stored role.",
        contact(
            name = "Tooltrex Team",
            email = "support@tooltrex.com"
        )
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Products
        crate::api::products::list_products,
        crate::api::products::get_product,
        crate::api::products::create_product,
        crate::api::products::update_product,
        crate::api::products::delete_product,

        // Users
        crate::api::users::list_users,
        crate::api::users::upsert_user,
        crate::api::users::make_admin,
        crate::api::users::check_admin,
        crate::api::users::get_user_info,

        // Orders
        crate::api::orders::list_my_orders,
        crate::api::orders::place_order,
        crate::api::orders::get_order,
        crate::api::orders::pay_order,
        crate::api::orders::cancel_order,
        crate::api::orders::list_all_orders,
        crate::api::orders::delete_any_order,

        // Reviews
        crate::api::reviews::list_reviews,
        crate::api::reviews::add_review,

        // Payments
        crate::api::payments::create_payment_intent,
    ),
    components(
        schemas(
            // Health & Metrics
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,

            // Store outcomes
            crate::database::InsertOutcome,
            crate::database::UpdateOutcome,
            crate::database::DeleteOutcome,

            // Products
            crate::models::NewProduct,
            crate::models::StockUpdate,

            // Users
            crate::models::IdentityIssued,
            crate::models::AdminStatus,

            // Orders
            crate::models::NewOrder,
            crate::models::PaymentConfirmation,
            crate::models::PaymentRecorded,
            crate::models::OrderCancelled,

            // Payments
            crate::services::payment_service::PaymentIntentRequest,
            crate::services::payment_service::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Products", description = "Catalog browsing is public. Creating and deleting products requires an admin."),
        (name = "Users", description = "Login/registration by profile upsert, role lookup and admin promotion."),
        (name = "Orders", description = "Order placement, payment confirmation and cancellation with restock. `/orders` is the admin view."),
        (name = "Reviews", description = "Public, append-only customer reviews."),
        (name = "Payments", description = "Stripe payment intents for card checkout."),
        (name = "Health", description = "Health check and Prometheus counters."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by PUT /user/{email}"))
                        .build()
                ),
            );
        }
    }
}
