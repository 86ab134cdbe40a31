use crate::stripe::Auth;
use dotenvy::dotenv;
use std::env as stdenv;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Read-only Stripe configuration, loaded once and injected into handlers.
///
/// The secret key may be absent; that is detected per request so a
/// misconfigured deployment still boots and answers with a 500 instead of
/// crashing at startup.
#[derive(Clone)]
pub struct StripeClient {
    pub api_key: Option<String>,
    pub api_base: String,
}

impl StripeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    pub fn from_env() -> Self {
        dotenv().ok();
        Self {
            api_key: stdenv::var("STRIPE_SECRET_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            api_base: stdenv::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_owned()),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Credentials for an outbound call, or `None` when the key is not set.
    pub fn auth(&self) -> Option<Auth> {
        self.api_key.as_ref().map(|key| Auth {
            secret: key.clone(),
            api_base: self.api_base.clone(),
        })
    }
}
