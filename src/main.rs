use actix_web::{middleware::Logger as ActixLogger, web, App, HttpServer};
use dotenvy::dotenv;
use justdonate::handlers;
use justdonate::logger::setup_logger;
use justdonate::StripeClient;
use log::{info, warn};
use std::env as stdenv;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    setup_logger();

    let client = StripeClient::from_env();
    if client.api_key.is_none() {
        warn!("STRIPE_SECRET_KEY not set; checkout requests will answer 500");
    }

    let host = stdenv::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
    let port = stdenv::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(8080);

    info!("{} v{} listening on {}:{}", NAME, VERSION, host, port);

    let client = web::Data::new(client);
    HttpServer::new(move || {
        App::new()
            .app_data(client.clone())
            .wrap(ActixLogger::default())
            .configure(handlers::routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
