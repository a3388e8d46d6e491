pub mod order;
pub mod product;
pub mod user;

pub use order::*;
pub use product::*;
pub use user::*;

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::de::DeserializeOwned;

use crate::database::StoreError;
use crate::utils::AppError;

/// Renders a stored document as JSON, with `_id` as a plain hex string.
pub fn document_to_json(mut document: Document) -> serde_json::Value {
    if let Some(Bson::ObjectId(oid)) = document.get("_id") {
        let hex = oid.to_hex();
        document.insert("_id", hex);
    }
    Bson::Document(document).into_relaxed_extjson()
}

pub fn documents_to_json(documents: Vec<Document>) -> Vec<serde_json::Value> {
    documents.into_iter().map(document_to_json).collect()
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("Invalid id '{}'", id)))
}

/// Reads a stored document into a typed view of the fields we act on.
pub fn decode<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    mongodb::bson::from_document(document).map_err(|e| StoreError::Malformed(e.to_string()))
}

/// Reads a request body into its typed form; failures are client errors.
pub fn decode_body<T: DeserializeOwned>(body: &Document) -> Result<T, AppError> {
    mongodb::bson::from_document(body.clone()).map_err(|e| AppError::InvalidRequest(e.to_string()))
}
