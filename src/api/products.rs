use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

use crate::{
    database::{DeleteOutcome, InsertOutcome, UpdateOutcome},
    middleware::auth::Claims,
    models::{document_to_json, documents_to_json, NewProduct, StockUpdate},
    services::{auth_service, product_service},
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products")
    )
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    log::info!("📦 GET /products");

    let products = product_service::list_products(state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(products)))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📦 GET /products/{}", id);

    let product = product_service::get_product(state.store.as_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(document_to_json(product)))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 200, description = "Product created", body = InsertOutcome),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential or not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    claims: Claims,
    state: web::Data<AppState>,
    body: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    log::info!("📦 POST /products - by {}", claims.email);

    let admin = auth_service::authorize(state.store.as_ref(), &claims).await?;
    let outcome =
        product_service::create_product(state.store.as_ref(), &admin, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    request_body = StockUpdate,
    responses(
        (status = 200, description = "Stock updated", body = UpdateOutcome),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    claims: Claims,
    state: web::Data<AppState>,
    id: web::Path<String>,
    update: web::Json<StockUpdate>,
) -> Result<HttpResponse, AppError> {
    log::info!("📦 PATCH /products/{} - by {}", id, claims.email);

    let outcome =
        product_service::update_stock(state.store.as_ref(), &claims, &id, &update).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = DeleteOutcome),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential or not an admin"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    claims: Claims,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /products/{} - by {}", id, claims.email);

    let admin = auth_service::authorize(state.store.as_ref(), &claims).await?;
    let outcome = product_service::delete_product(state.store.as_ref(), &admin, &id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
