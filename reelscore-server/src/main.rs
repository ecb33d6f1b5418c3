//! Reelscore server - HTTP surface for the movie-review backend

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reelscore_core::config::Config;
use reelscore_core::AppContext;

mod errors;
mod handlers;

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if config.tmdb_api_key.is_none() {
        warn!("TMDB_API_KEY is not set; movie search will return empty results");
    }
    let bind_address = config.bind_address.clone();

    let context = web::Data::new(AppContext::new(config)?);
    info!(%bind_address, "starting reelscore server");

    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            .configure(handlers::users::configure)
            .configure(handlers::critiques::configure)
            .configure(handlers::movies::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
