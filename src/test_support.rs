use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};

use crate::{
    database::{memory::MemoryStore, DocumentStore, PRODUCTS, USERS},
    middleware::auth::{Claims, TokenVerifier},
    services::payment_service::{PaymentGateway, PaymentIntent},
    state::AppState,
    utils::{AppError, AppResult},
};

pub const VERIFIER_SECRET: &str = "test-secret";

pub fn claims_for(email: &str) -> Claims {
    Claims {
        email: email.to_string(),
        iat: 0,
        exp: usize::MAX,
        jti: "test".to_string(),
    }
}

pub async fn seed_user(store: &dyn DocumentStore, email: &str, role: Option<&str>) {
    let mut user = doc! { "email": email, "name": email };
    if let Some(role) = role {
        user.insert("role", role);
    }
    store.insert_one(USERS, user).await.unwrap();
}

pub async fn seed_product(store: &dyn DocumentStore, available_quantity: i64) -> ObjectId {
    let id = ObjectId::new();
    store
        .insert_one(
            PRODUCTS,
            doc! { "_id": id, "name": "Drill", "price": 20.0, "available_quantity": available_quantity },
        )
        .await
        .unwrap();
    id
}

/// Gateway that hands out deterministic client secrets, or fails on demand.
pub struct FakeGateway {
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(&self, amount: i64, currency: &str) -> AppResult<PaymentIntent> {
        if self.fail {
            return Err(AppError::PaymentGateway("card network unavailable".into()));
        }
        Ok(PaymentIntent {
            id: format!("pi_{}_{}", amount, currency),
            client_secret: format!("pi_{}_{}_secret", amount, currency),
        })
    }
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(
        store,
        Arc::new(FakeGateway { fail: false }),
        TokenVerifier::new(VERIFIER_SECRET),
    )
}
