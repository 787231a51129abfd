use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warp::Filter;

mod config;
mod endpoints;
mod error;
mod sanitize;
mod store;
mod types;

use config::Config;
use endpoints::recipes_route;
use store::RecipeStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let store = Arc::new(RecipeStore::new(&config.recipes_file, config.serialize_writes));

    if !store.exists().await {
        tracing::warn!(
            path = %store.path().display(),
            "recipes file does not exist yet; requests will fail until it is created"
        );
    }

    let routes = recipes_route(store.clone()).with(warp::trace::request());

    tracing::info!("Server starting on http://{}", config.addr());
    tracing::info!("Recipes endpoint: http://{}/api/recipes", config.addr());
    tracing::info!("Serving recipes from: {}", store.path().display());
    if config.serialize_writes {
        tracing::info!("Creates are serialized");
    }

    warp::serve(routes).run(config.addr()).await;
}
