use mongodb::bson::{doc, Document};

use crate::{
    database::{DocumentStore, UpdateOutcome, USERS},
    models::ADMIN_ROLE,
    services::auth_service::AdminIdentity,
    utils::{AppError, AppResult},
};

pub async fn list_users(store: &dyn DocumentStore) -> AppResult<Vec<Document>> {
    Ok(store.find(USERS, doc! {}).await?)
}

pub async fn get_user(store: &dyn DocumentStore, email: &str) -> AppResult<Document> {
    store
        .find_one(USERS, doc! { "email": email })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", email)))
}

/// Gives `email` the admin role. Only callable with an `AdminIdentity`.
pub async fn grant_admin(
    store: &dyn DocumentStore,
    admin: &AdminIdentity,
    email: &str,
) -> AppResult<UpdateOutcome> {
    let outcome = store
        .update_one(USERS, doc! { "email": email }, doc! { "role": ADMIN_ROLE }, false)
        .await?;

    if outcome.matched_count == 0 {
        return Err(AppError::NotFound(format!("User {}", email)));
    }

    log::info!("👑 {} granted admin role by {}", email, admin.email);

    Ok(outcome)
}
