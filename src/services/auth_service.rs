use mongodb::bson::{doc, Document};

use crate::{
    database::{DocumentStore, USERS},
    middleware::auth::{Claims, TokenVerifier},
    models::{has_admin_role, IdentityIssued},
    utils::{AppError, AppResult},
};

/// Proof that the Role Authorizer accepted the caller for this request.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub email: String,
}

/// Upserts the profile for `email` and issues a fresh access token.
///
/// The body may not carry `role` or `_id`, and `email` is always the path value.
pub async fn upsert_identity(
    store: &dyn DocumentStore,
    verifier: &TokenVerifier,
    email: &str,
    mut profile: Document,
) -> AppResult<IdentityIssued> {
    if email.trim().is_empty() {
        return Err(AppError::InvalidRequest("Email is required".to_string()));
    }

    profile.remove("_id");
    profile.remove("role");
    profile.insert("email", email);

    let result = store
        .update_one(USERS, doc! { "email": email }, profile, true)
        .await?;
    let token = verifier.issue(email)?;

    log::info!("✅ Identity upserted: {}", email);

    Ok(IdentityIssued { result, token })
}

/// Admits the caller only if their stored role is `"admin"`.
///
/// A missing user record and a non-admin role are the same `Forbidden`.
pub async fn authorize(store: &dyn DocumentStore, claims: &Claims) -> AppResult<AdminIdentity> {
    let user = store
        .find_one(USERS, doc! { "email": &claims.email })
        .await?;

    match user {
        Some(user) if has_admin_role(&user) => Ok(AdminIdentity {
            email: claims.email.clone(),
        }),
        _ => {
            log::warn!("⛔ Admin check failed for {}", claims.email);
            Err(AppError::Forbidden)
        }
    }
}

pub async fn is_admin(store: &dyn DocumentStore, email: &str) -> AppResult<bool> {
    let user = store.find_one(USERS, doc! { "email": email }).await?;
    Ok(user.as_ref().map_or(false, has_admin_role))
}
