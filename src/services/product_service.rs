use mongodb::bson::{doc, Document};

use crate::{
    database::{DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome, PRODUCTS},
    middleware::auth::Claims,
    models::{decode_body, parse_object_id, validate_quantity, NewProduct, StockUpdate},
    services::auth_service::AdminIdentity,
    utils::{AppError, AppResult},
};

pub async fn list_products(store: &dyn DocumentStore) -> AppResult<Vec<Document>> {
    Ok(store.find(PRODUCTS, doc! {}).await?)
}

pub async fn get_product(store: &dyn DocumentStore, id: &str) -> AppResult<Document> {
    let oid = parse_object_id(id)?;
    store
        .find_one(PRODUCTS, doc! { "_id": oid })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))
}

pub async fn create_product(
    store: &dyn DocumentStore,
    admin: &AdminIdentity,
    body: Document,
) -> AppResult<InsertOutcome> {
    let product: NewProduct = decode_body(&body)?;
    product.validate()?;

    let mut document = body;
    document.remove("_id");
    let outcome = store.insert_one(PRODUCTS, document).await?;

    log::info!("📦 Product '{}' created by {}", product.name, admin.email);

    Ok(outcome)
}

/// Sets `available_quantity` to the given non-negative value.
pub async fn update_stock(
    store: &dyn DocumentStore,
    claims: &Claims,
    id: &str,
    update: &StockUpdate,
) -> AppResult<UpdateOutcome> {
    let oid = parse_object_id(id)?;
    validate_quantity(update.available_quantity)?;

    let outcome = store
        .update_one(
            PRODUCTS,
            doc! { "_id": oid },
            doc! { "available_quantity": update.available_quantity },
            false,
        )
        .await?;

    if outcome.matched_count == 0 {
        return Err(AppError::NotFound(format!("Product {}", id)));
    }

    log::info!(
        "📦 Product {} stock set to {} by {}",
        id,
        update.available_quantity,
        claims.email
    );

    Ok(outcome)
}

pub async fn delete_product(
    store: &dyn DocumentStore,
    admin: &AdminIdentity,
    id: &str,
) -> AppResult<DeleteOutcome> {
    let oid = parse_object_id(id)?;
    let outcome = store.delete_one(PRODUCTS, doc! { "_id": oid }).await?;
    if outcome.deleted_count == 0 {
        return Err(AppError::NotFound(format!("Product {}", id)));
    }

    log::info!("🗑️ Product {} deleted by {}", id, admin.email);

    Ok(outcome)
}
