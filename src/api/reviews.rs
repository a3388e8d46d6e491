use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

use crate::{
    database::InsertOutcome,
    models::documents_to_json,
    services::review_service,
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    get,
    path = "/review",
    tag = "Reviews",
    responses(
        (status = 200, description = "All reviews")
    )
)]
pub async fn list_reviews(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    log::info!("⭐ GET /review");

    let reviews = review_service::list_reviews(state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(reviews)))
}

#[utoipa::path(
    post,
    path = "/review",
    tag = "Reviews",
    request_body(content = Object, description = "Free-form review document"),
    responses(
        (status = 200, description = "Review stored", body = InsertOutcome)
    )
)]
pub async fn add_review(
    state: web::Data<AppState>,
    review: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    log::info!("⭐ POST /review");

    let outcome = review_service::add_review(state.store.as_ref(), review.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
