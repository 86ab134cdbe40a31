pub mod client;
pub mod cors;
pub mod form;
pub mod handlers;
pub mod logger;
pub mod stripe;

pub use client::StripeClient;
