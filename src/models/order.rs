use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::database::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::utils::AppError;

/// Stored order, reduced to the fields the lifecycle acts on.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub customer_email: String,
    pub order_product: String,
    pub order_quantity: i64,
    #[serde(default)]
    pub paid: bool,
}

impl Order {
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.customer_email == email
    }
}

/// Upper bound on a single order line.
pub const MAX_ORDER_QUANTITY: i64 = 10_000;

/// Body of `POST /order`. Extra fields (address, phone, ...) are stored as sent.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_email: String,
    pub order_product: String,
    pub order_quantity: i64,
    pub order_price: f64,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.customer_email.trim().is_empty() {
            return Err(AppError::InvalidRequest("customerEmail is required".into()));
        }
        if self.order_product.trim().is_empty() {
            return Err(AppError::InvalidRequest("orderProduct is required".into()));
        }
        if self.order_quantity <= 0 {
            return Err(AppError::InvalidRequest("orderQuantity must be positive".into()));
        }
        if self.order_quantity > MAX_ORDER_QUANTITY {
            return Err(AppError::InvalidRequest(format!(
                "orderQuantity must not exceed {}",
                MAX_ORDER_QUANTITY
            )));
        }
        if self.order_price < 0.0 {
            return Err(AppError::InvalidRequest("orderPrice must not be negative".into()));
        }
        Ok(())
    }
}

/// Body of `PATCH /order/{id}`; the whole body becomes the payment record.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub transaction_id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentRecorded {
    pub order: UpdateOutcome,
    pub payment: InsertOutcome,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct OrderCancelled {
    pub result: DeleteOutcome,
    /// False when the referenced product could not be found after deletion.
    pub restocked: bool,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub customer_email: Option<String>,
}
