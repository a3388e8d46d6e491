use actix_web::{web, HttpResponse};

use crate::{
    middleware::auth::Claims,
    services::payment_service::{self, PaymentIntentRequest, PaymentIntentResponse},
    state::AppState,
    utils::AppError,
};

/// Creates a card payment intent for `price` and returns its client secret.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentResponse),
        (status = 400, description = "Price missing or not positive"),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential"),
        (status = 502, description = "Payment processor error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_payment_intent(
    claims: Claims,
    state: web::Data<AppState>,
    request: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("💳 POST /create-payment-intent - by {}", claims.email);

    let response =
        payment_service::create_payment_intent(state.payments.as_ref(), &request).await?;
    Ok(HttpResponse::Ok().json(response))
}
