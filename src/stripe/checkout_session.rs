use serde::{Deserialize, Serialize};

use super::Auth;
use crate::form::{self, FormValue};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckoutSession {
    pub mode: String,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LineItem {
    pub price_data: PriceData,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PriceData {
    pub currency: String,
    pub product_data: ProductData,
    /// Minor currency units (cents for usd).
    pub unit_amount: i64,
    pub recurring: Option<Recurring>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductData {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Recurring {
    pub interval: String,
}

/// What `/v1/checkout/sessions` answers with: a session carrying the hosted
/// payment page URL, or an error envelope. Stripe returns the error in the
/// body, so both shapes deserialize from the same response type.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckoutSessionResponse {
    pub id: Option<String>,
    pub url: Option<String>,
    pub error: Option<StripeError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StripeError {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

impl CheckoutSession {
    /// Flattens the session into Stripe's bracket-notation parameters.
    /// `recurring` is omitted entirely when absent; Stripe rejects empty
    /// values for it.
    pub fn to_params(&self) -> FormValue {
        let mut params = FormValue::object();
        params.insert("mode", self.mode.as_str());

        let mut items = Vec::new();
        for item in &self.line_items {
            let mut product_data = FormValue::object();
            product_data
                .insert("name", item.price_data.product_data.name.as_str())
                .insert(
                    "description",
                    item.price_data.product_data.description.as_str(),
                );

            let mut price_data = FormValue::object();
            price_data
                .insert("currency", item.price_data.currency.as_str())
                .insert("product_data", product_data)
                .insert("unit_amount", item.price_data.unit_amount);
            if let Some(recurring) = &item.price_data.recurring {
                let mut nested = FormValue::object();
                nested.insert("interval", recurring.interval.as_str());
                price_data.insert("recurring", nested);
            }

            let mut entry = FormValue::object();
            entry
                .insert("price_data", price_data)
                .insert("quantity", item.quantity);
            items.push(entry);
        }
        params.insert("line_items", FormValue::Array(items));

        params
            .insert("success_url", self.success_url.as_str())
            .insert("cancel_url", self.cancel_url.as_str());
        params
    }

    pub async fn async_post(&self, creds: &Auth) -> Result<CheckoutSessionResponse, reqwest::Error> {
        let url = format!("{}/v1/checkout/sessions", creds.api_base);
        let request = reqwest::Client::new()
            .post(url)
            .bearer_auth(creds.secret.as_str())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(form::encode(&self.to_params()))
            .send()
            .await?;
        let json = request.json::<CheckoutSessionResponse>().await?;
        Ok(json)
    }

    pub fn post(&self, creds: &Auth) -> Result<CheckoutSessionResponse, reqwest::Error> {
        let url = format!("{}/v1/checkout/sessions", creds.api_base);
        let request = reqwest::blocking::Client::new()
            .post(url)
            .bearer_auth(creds.secret.as_str())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(form::encode(&self.to_params()))
            .send()?;
        let json = request.json::<CheckoutSessionResponse>()?;
        Ok(json)
    }
}
