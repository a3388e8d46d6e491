use std::sync::Arc;

use crate::database::DocumentStore;
use crate::middleware::auth::TokenVerifier;
use crate::services::payment_service::PaymentGateway;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub payments: Arc<dyn PaymentGateway>,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        payments: Arc<dyn PaymentGateway>,
        verifier: TokenVerifier,
    ) -> Self {
        Self {
            store,
            payments,
            verifier,
        }
    }
}
