use mongodb::bson::{Bson, Document};
use serde::Deserialize;

use crate::database::StoreError;
use crate::utils::AppError;

pub const STOCK_FIELD: &str = "available_quantity";

/// Reads the stored stock level of a product document.
///
/// Integral doubles are accepted since the shell and some drivers store numbers that way.
/// A product without the field counts as out of stock.
pub fn stock_level(product: &Document) -> Result<i64, StoreError> {
    match product.get(STOCK_FIELD) {
        Some(Bson::Int32(n)) => Ok(i64::from(*n)),
        Some(Bson::Int64(n)) => Ok(*n),
        Some(Bson::Double(n))
            if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 =>
        {
            Ok(*n as i64)
        }
        None | Some(Bson::Null) => {
            log::warn!("⚠️ Product without {}, treating stock as 0", STOCK_FIELD);
            Ok(0)
        }
        Some(other) => Err(StoreError::Malformed(format!(
            "{} is not an integer: {}",
            STOCK_FIELD, other
        ))),
    }
}

/// Body of `POST /products`. Other fields (description, image, ...) are stored as sent.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub available_quantity: i64,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidRequest("name is required".into()));
        }
        if self.price < 0.0 {
            return Err(AppError::InvalidRequest("price must not be negative".into()));
        }
        validate_quantity(self.available_quantity)
    }
}

/// Body of `PATCH /products/{id}`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StockUpdate {
    pub available_quantity: i64,
}

pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity < 0 {
        return Err(AppError::InvalidRequest(
            "available_quantity must not be negative".into(),
        ));
    }
    Ok(())
}
