use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::metrics::increment_payment_intents;
use crate::utils::{AppError, AppResult};

pub const DEFAULT_CURRENCY: &str = "usd";

#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// External processor that creates payment intents.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `amount` is in the currency's minor unit (cents for USD).
    async fn create_intent(&self, amount: i64, currency: &str) -> AppResult<PaymentIntent>;
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Converts a decimal price into minor units, rejecting non-positive amounts.
pub fn amount_in_minor_units(price: f64) -> AppResult<i64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::InvalidRequest("price must be a positive number".to_string()));
    }
    Ok((price * 100.0).round() as i64)
}

pub async fn create_payment_intent(
    gateway: &dyn PaymentGateway,
    request: &PaymentIntentRequest,
) -> AppResult<PaymentIntentResponse> {
    let amount = amount_in_minor_units(request.price)?;

    log::info!("💳 Creating payment intent: {} {}", amount, DEFAULT_CURRENCY);

    let intent = gateway.create_intent(amount, DEFAULT_CURRENCY).await?;
    increment_payment_intents();

    log::info!("✅ Payment intent created: {}", intent.id);

    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

// ==================== STRIPE ====================

#[derive(Debug, Deserialize)]
struct StripeIntent {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(secret_key: &str, api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, amount: i64, currency: &str) -> AppResult<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let form = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .timeout(std::time::Duration::from_secs(15))
            .send()
            .await
            .map_err(|e| AppError::PaymentGateway(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(AppError::PaymentGateway(message));
        }

        let intent: StripeIntent = response
            .json()
            .await
            .map_err(|e| AppError::PaymentGateway(format!("Failed to parse response: {}", e)))?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| AppError::PaymentGateway("No client_secret in response".to_string()))?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeGateway;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};

    #[test]
    fn prices_convert_to_cents() {
        assert_eq!(amount_in_minor_units(40.0).unwrap(), 4000);
        assert_eq!(amount_in_minor_units(19.99).unwrap(), 1999);
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(amount_in_minor_units(price), Err(AppError::InvalidRequest(_))));
        }
    }

    #[tokio::test]
    async fn create_payment_intent_returns_client_secret() {
        let gateway = FakeGateway { fail: false };
        let response = create_payment_intent(&gateway, &PaymentIntentRequest { price: 40.0 })
            .await
            .unwrap();

        assert_eq!(response.client_secret, "pi_4000_usd_secret");
    }

    #[tokio::test]
    async fn gateway_failure_is_propagated() {
        let gateway = FakeGateway { fail: true };
        let err = create_payment_intent(&gateway, &PaymentIntentRequest { price: 40.0 })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PaymentGateway(_)));
    }

    async fn fake_stripe(req: HttpRequest, body: String) -> HttpResponse {
        let authorized = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer sk_test_123");

        if !authorized {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": { "message": "Invalid API Key provided" }
            }));
        }

        assert!(body.contains("amount=4000"));
        assert!(body.contains("currency=usd"));

        HttpResponse::Ok().json(serde_json::json!({
            "id": "pi_123",
            "object": "payment_intent",
            "client_secret": "pi_123_secret_abc"
        }))
    }

    async fn start_fake_stripe() -> String {
        let server = HttpServer::new(|| {
            App::new().route("/v1/payment_intents", web::post().to(fake_stripe))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    #[actix_web::test]
    async fn stripe_gateway_reads_client_secret() {
        let base = start_fake_stripe().await;
        let gateway = StripeGateway::new("sk_test_123", &base);

        let intent = gateway.create_intent(4000, "usd").await.unwrap();

        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.client_secret, "pi_123_secret_abc");
    }

    #[actix_web::test]
    async fn stripe_gateway_surfaces_error_message() {
        let base = start_fake_stripe().await;
        let gateway = StripeGateway::new("sk_wrong", &base);

        let err = gateway.create_intent(4000, "usd").await.unwrap_err();

        assert!(matches!(err, AppError::PaymentGateway(msg) if msg == "Invalid API Key provided"));
    }
}
