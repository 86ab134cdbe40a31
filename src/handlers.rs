use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;

use crate::client::StripeClient;
use crate::cors;
use crate::stripe::{CheckoutSession, LineItem, PriceData, ProductData, Recurring};

/// Inbound payload from the donate page. Fields are optional so that a
/// present-but-missing field is a validation failure with a specific
/// message, not a deserialization error.
#[derive(Debug, Deserialize)]
pub struct DonationRequest {
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub donation_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationType {
    Monthly,
    OneTime,
}

impl DonationType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "monthly" => Some(DonationType::Monthly),
            "one-time" => Some(DonationType::OneTime),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DonationType::Monthly => "monthly",
            DonationType::OneTime => "one-time",
        }
    }
}

/// Builds the Stripe session for one donation. Monthly donations are
/// subscriptions with a month interval; one-time donations are plain
/// payments. Redirect targets live on the same origin the request came from.
pub fn donation_session(kind: DonationType, amount: f64, base_url: &str) -> CheckoutSession {
    let unit_amount = (amount * 100.0).round() as i64;
    let (mode, name, description, recurring) = match kind {
        DonationType::Monthly => (
            "subscription",
            "Monthly Donation",
            "Thank you for your ongoing support!",
            Some(Recurring {
                interval: "month".to_owned(),
            }),
        ),
        DonationType::OneTime => (
            "payment",
            "One-Time Donation",
            "Thank you for your generous support!",
            None,
        ),
    };

    CheckoutSession {
        mode: mode.to_owned(),
        line_items: vec![LineItem {
            price_data: PriceData {
                currency: "usd".to_owned(),
                product_data: ProductData {
                    name: name.to_owned(),
                    description: description.to_owned(),
                },
                unit_amount,
                recurring,
            },
            quantity: 1,
        }],
        success_url: format!("{}/donate-success.html?type={}", base_url, kind.as_str()),
        cancel_url: format!("{}/donate.html", base_url),
    }
}

pub async fn create_checkout(
    req: HttpRequest,
    body: web::Bytes,
    client: web::Data<StripeClient>,
) -> HttpResponse {
    let donation: DonationRequest = match serde_json::from_slice(&body) {
        Ok(donation) => donation,
        Err(e) => {
            error!("Error: {}", e);
            return cors::json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Internal server error"}),
            );
        }
    };

    let amount = match donation.amount {
        Some(amount) if amount >= 1.0 => amount,
        _ => {
            return cors::json_response(StatusCode::BAD_REQUEST, &json!({"error": "Invalid amount"}))
        }
    };

    let kind = match donation.donation_type.as_deref().and_then(DonationType::parse) {
        Some(kind) => kind,
        None => {
            return cors::json_response(
                StatusCode::BAD_REQUEST,
                &json!({"error": "Invalid donation type"}),
            )
        }
    };

    let creds = match client.auth() {
        Some(creds) => creds,
        None => {
            error!("STRIPE_SECRET_KEY not configured");
            return cors::json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Payment system not configured"}),
            );
        }
    };

    let base_url = {
        let conn = req.connection_info();
        format!("{}://{}", conn.scheme(), conn.host())
    };
    let session = donation_session(kind, amount, &base_url);

    match session.async_post(&creds).await {
        Ok(created) => {
            if let Some(stripe_error) = created.error {
                error!("Stripe error: {:?}", stripe_error);
                let message = stripe_error
                    .message
                    .unwrap_or_else(|| "Failed to create checkout session".to_owned());
                return cors::json_response(StatusCode::BAD_REQUEST, &json!({"error": message}));
            }
            info!(
                "Created {} checkout session for {} usd",
                kind.as_str(),
                amount
            );
            cors::json_response(StatusCode::OK, &json!({"url": created.url}))
        }
        Err(e) => {
            error!("Error: {}", e);
            cors::json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Internal server error"}),
            )
        }
    }
}

/// CORS preflight for the checkout endpoint, separate from the POST handler.
pub async fn preflight() -> HttpResponse {
    cors::empty_response()
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::resource("/api/create-checkout")
            .route(web::post().to(create_checkout))
            .route(web::route().method(Method::OPTIONS).to(preflight)),
    );
}
