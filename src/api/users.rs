use actix_web::{web, HttpResponse};
use mongodb::bson::Document;

use crate::{
    database::UpdateOutcome,
    middleware::auth::Claims,
    models::{document_to_json, documents_to_json, AdminStatus, IdentityIssued},
    services::{auth_service, user_service},
    state::AppState,
    utils::AppError,
};

#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "All users"),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    claims: Claims,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    log::info!("👥 GET /user - by {}", claims.email);

    let users = user_service::list_users(state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(users)))
}

/// Login/registration: upserts the profile and returns a one-hour token.
#[utoipa::path(
    put,
    path = "/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    request_body(content = Object, description = "Profile fields to store"),
    responses(
        (status = 200, description = "Profile stored and token issued", body = IdentityIssued)
    )
)]
pub async fn upsert_user(
    state: web::Data<AppState>,
    email: web::Path<String>,
    profile: web::Json<Document>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 PUT /user/{}", email);

    let issued = auth_service::upsert_identity(
        state.store.as_ref(),
        &state.verifier,
        &email,
        profile.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(issued))
}

#[utoipa::path(
    put,
    path = "/user/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email to promote")),
    responses(
        (status = 200, description = "Role granted", body = UpdateOutcome),
        (status = 401, description = "No credential"),
        (status = 403, description = "Invalid credential or not an admin"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn make_admin(
    claims: Claims,
    state: web::Data<AppState>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("👑 PUT /user/admin/{} - by {}", email, claims.email);

    let admin = auth_service::authorize(state.store.as_ref(), &claims).await?;
    let outcome = user_service::grant_admin(state.store.as_ref(), &admin, &email).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Whether the user is an admin", body = AdminStatus)
    )
)]
pub async fn check_admin(
    state: web::Data<AppState>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let admin = auth_service::is_admin(state.store.as_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(AdminStatus { admin }))
}

#[utoipa::path(
    get,
    path = "/userInfo/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "The user profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_info(
    state: web::Data<AppState>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(state.store.as_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(document_to_json(user)))
}
