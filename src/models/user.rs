use mongodb::bson::Document;
use serde::Serialize;

use crate::database::UpdateOutcome;

pub const ADMIN_ROLE: &str = "admin";

/// True only when the stored `role` is exactly `"admin"`.
pub fn has_admin_role(user: &Document) -> bool {
    user.get_str("role").map_or(false, |role| role == ADMIN_ROLE)
}

/// Response of the upsert-identity call.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct IdentityIssued {
    pub result: UpdateOutcome,
    pub token: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminStatus {
    pub admin: bool,
}
