use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

use crate::{
    database::{DeleteOutcome, InsertOutcome},
    middleware::auth::Claims,
    models::{
        document_to_json, documents_to_json, NewOrder, OrderCancelled, OrderListQuery,
        PaymentConfirmation, PaymentRecorded,
    },
    services::{auth_service, order_service},
    state::AppState,
    utils::AppError,
};

/// Lists the caller's orders. `customerEmail` must match the token's identity.
#[utoipa::path(
    get,
    path = "/order",
    tag = "Orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "The caller's orders"),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential or foreign email")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_orders(
    claims: Claims,
    state: web::Data<AppState>,
    query: web::Query<OrderListQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("🛒 GET /order - by {}", claims.email);

    let orders =
        order_service::list_for(state.store.as_ref(), &claims, query.customer_email.as_deref())
            .await?;
    Ok(HttpResponse::Ok().json(documents_to_json(orders)))
}

#[utoipa::path(
    post,
    path = "/order",
    tag = "Orders",
    request_body = NewOrder,
    responses(
        (status = 200, description = "Order placed", body = InsertOutcome),
        (status = 400, description = "Invalid order")
    )
)]
pub async fn place_order(
    state: web::Data<AppState>,
    body: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    log::info!("🛒 POST /order");

    let outcome = order_service::place(state.store.as_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/order/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order"),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "No credential"),
        (status = 403, description = "Not the owner and not an admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_order(
    claims: Claims,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🛒 GET /order/{} - by {}", id, claims.email);

    let order = order_service::get(state.store.as_ref(), &claims, &id).await?;
    Ok(HttpResponse::Ok().json(document_to_json(order)))
}

#[utoipa::path(
    patch,
    path = "/order/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id")),
    request_body = PaymentConfirmation,
    responses(
        (status = 200, description = "Order marked paid and payment recorded", body = PaymentRecorded),
        (status = 400, description = "Missing transactionId or malformed id"),
        (status = 401, description = "No credential"),
        (status = 403, description = "Not the owner and not an admin"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already paid")
    ),
    security(("bearer_auth" = []))
)]
pub async fn pay_order(
    claims: Claims,
    state: web::Data<AppState>,
    id: web::Path<String>,
    payment: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    log::info!("💰 PATCH /order/{} - by {}", id, claims.email);

    let recorded =
        order_service::confirm_payment(state.store.as_ref(), &claims, &id, payment.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(recorded))
}

#[utoipa::path(
    delete,
    path = "/order/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order cancelled", body = OrderCancelled),
        (status = 401, description = "No credential"),
        (status = 403, description = "Not the owner and not an admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_order(
    claims: Claims,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /order/{} - by {}", id, claims.email);

    let cancelled = order_service::cancel(state.store.as_ref(), &claims, &id).await?;
    Ok(HttpResponse::Ok().json(cancelled))
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Every order"),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential or not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_all_orders(
    claims: Claims,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /orders - by {}", claims.email);

    let admin = auth_service::authorize(state.store.as_ref(), &claims).await?;
    let orders = order_service::list_all(state.store.as_ref(), &admin).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(orders)))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted without restocking", body = DeleteOutcome),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential or not an admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_any_order(
    claims: Claims,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /orders/{} - by {}", id, claims.email);

    let admin = auth_service::authorize(state.store.as_ref(), &claims).await?;
    let outcome = order_service::admin_delete(state.store.as_ref(), &admin, &id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
