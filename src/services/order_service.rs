// ==================== ORDER LIFECYCLE ====================
// Created(unpaid) -> Paid -> Deleted, or Created(unpaid) -> Deleted with restock.
// Multi-write steps are sequential and not transactional: a failure after the
// first write leaves it in place.

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::{
    api::metrics::increment_orders_placed,
    database::{DeleteOutcome, DocumentStore, InsertOutcome, ORDERS, PAYMENTS, PRODUCTS},
    middleware::auth::Claims,
    models::{
        decode, decode_body, parse_object_id, stock_level, NewOrder, Order, OrderCancelled,
        PaymentConfirmation, PaymentRecorded, STOCK_FIELD,
    },
    services::auth_service::{self, AdminIdentity},
    utils::{AppError, AppResult},
};

/// Inserts a new unpaid order. The product reference is not checked and stock is untouched.
pub async fn place(store: &dyn DocumentStore, body: Document) -> AppResult<InsertOutcome> {
    let order: NewOrder = decode_body(&body)?;
    order.validate()?;

    let mut document = body;
    document.remove("_id");
    document.remove("transactionId");
    document.insert("paid", false);

    let outcome = store.insert_one(ORDERS, document).await?;
    increment_orders_placed();

    log::info!(
        "🛒 Order {} placed by {} ({} x {})",
        outcome.inserted_id,
        order.customer_email,
        order.order_quantity,
        order.order_product
    );

    Ok(outcome)
}

/// Lists the caller's own orders; `customer_email` must be the caller's email.
pub async fn list_for(
    store: &dyn DocumentStore,
    claims: &Claims,
    customer_email: Option<&str>,
) -> AppResult<Vec<Document>> {
    match customer_email {
        Some(email) if email == claims.email => {
            Ok(store.find(ORDERS, doc! { "customerEmail": email }).await?)
        }
        _ => {
            log::warn!(
                "⛔ {} tried to list orders of {:?}",
                claims.email,
                customer_email
            );
            Err(AppError::Forbidden)
        }
    }
}

pub async fn list_all(store: &dyn DocumentStore, admin: &AdminIdentity) -> AppResult<Vec<Document>> {
    log::info!("📋 Listing all orders for admin {}", admin.email);
    Ok(store.find(ORDERS, doc! {}).await?)
}

pub async fn get(store: &dyn DocumentStore, claims: &Claims, id: &str) -> AppResult<Document> {
    let (order, document) = load(store, parse_object_id(id)?).await?;
    ensure_access(store, claims, &order).await?;
    Ok(document)
}

/// Marks an unpaid order as paid, then appends the payment record.
pub async fn confirm_payment(
    store: &dyn DocumentStore,
    claims: &Claims,
    id: &str,
    payment: Document,
) -> AppResult<PaymentRecorded> {
    let confirmation: PaymentConfirmation = decode_body(&payment)?;
    if confirmation.transaction_id.trim().is_empty() {
        return Err(AppError::InvalidRequest("transactionId is required".to_string()));
    }

    let (order, _) = load(store, parse_object_id(id)?).await?;
    ensure_access(store, claims, &order).await?;

    if order.paid {
        return Err(AppError::Conflict(format!("Order {} is already paid", id)));
    }

    // The `paid: false` filter makes the flip itself reject a concurrent payment.
    let updated = store
        .update_one(
            ORDERS,
            doc! { "_id": order.id, "paid": false },
            doc! { "paid": true, "transactionId": &confirmation.transaction_id },
            false,
        )
        .await?;
    if updated.matched_count == 0 {
        return Err(AppError::Conflict(format!("Order {} is already paid", id)));
    }

    let mut record = payment;
    record.remove("_id");
    record.insert("order", order.id.to_hex());
    let recorded = store.insert_one(PAYMENTS, record).await?;

    log::info!(
        "💰 Order {} paid (transaction {})",
        id,
        confirmation.transaction_id
    );

    Ok(PaymentRecorded {
        order: updated,
        payment: recorded,
    })
}

/// Customer cancellation: deletes the order, then returns its quantity to stock.
pub async fn cancel(store: &dyn DocumentStore, claims: &Claims, id: &str) -> AppResult<OrderCancelled> {
    let (order, _) = load(store, parse_object_id(id)?).await?;
    ensure_access(store, claims, &order).await?;

    let result = store.delete_one(ORDERS, doc! { "_id": order.id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!("Order {}", id)));
    }

    let restocked = restock(store, &order.order_product, order.order_quantity).await?;

    log::info!("🗑️ Order {} cancelled by {} (restocked: {})", id, claims.email, restocked);

    Ok(OrderCancelled { result, restocked })
}

/// Admin removal from the global list. Stock is not restored on this path.
pub async fn admin_delete(
    store: &dyn DocumentStore,
    admin: &AdminIdentity,
    id: &str,
) -> AppResult<DeleteOutcome> {
    let oid = parse_object_id(id)?;
    let result = store.delete_one(ORDERS, doc! { "_id": oid }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!("Order {}", id)));
    }

    log::info!("🗑️ Order {} deleted by admin {}", id, admin.email);

    Ok(result)
}

async fn load(store: &dyn DocumentStore, id: ObjectId) -> AppResult<(Order, Document)> {
    let document = store
        .find_one(ORDERS, doc! { "_id": id })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {}", id.to_hex())))?;

    let order: Order = decode(document.clone())?;
    Ok((order, document))
}

/// Owners pass directly; anyone else must be an admin.
async fn ensure_access(store: &dyn DocumentStore, claims: &Claims, order: &Order) -> AppResult<()> {
    if order.is_owned_by(&claims.email) {
        return Ok(());
    }
    auth_service::authorize(store, claims).await.map(|_| ())
}

/// Read-modify-write of the product's stock. Returns false if the product is gone.
///
/// A sum that does not fit the stock counter is a `Conflict` and leaves the product untouched.
async fn restock(store: &dyn DocumentStore, product: &str, quantity: i64) -> AppResult<bool> {
    let Ok(product_id) = ObjectId::parse_str(product) else {
        log::warn!("⚠️ Cannot restock unknown product reference '{}'", product);
        return Ok(false);
    };

    let Some(document) = store.find_one(PRODUCTS, doc! { "_id": product_id }).await? else {
        log::warn!("⚠️ Product {} no longer exists, stock not restored", product);
        return Ok(false);
    };

    let available_quantity = stock_level(&document)?
        .checked_add(quantity)
        .filter(|total| *total >= 0)
        .ok_or_else(|| {
            log::error!("❌ Restocking {} by {} overflows the stock counter", product, quantity);
            AppError::Conflict(format!("Cannot restock product {} by {}", product, quantity))
        })?;

    store
        .update_one(
            PRODUCTS,
            doc! { "_id": product_id },
            doc! { STOCK_FIELD: available_quantity },
            false,
        )
        .await?;

    Ok(true)
}
