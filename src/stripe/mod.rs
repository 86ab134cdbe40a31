pub mod checkout_session;

pub use checkout_session::{
    CheckoutSession, CheckoutSessionResponse, LineItem, PriceData, ProductData, Recurring,
    StripeError,
};

/// Credentials and endpoint for a single Stripe call.
#[derive(Debug, Clone)]
pub struct Auth {
    pub secret: String,
    pub api_base: String,
}

impl Auth {
    pub fn new(secret: String, api_base: String) -> Self {
        Auth { secret, api_base }
    }
}
