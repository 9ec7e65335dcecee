//! Storefront JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use storefront_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod addresses;
mod auth;
mod carts;
mod config;
mod extensions;
mod healthcheck;
mod orders;
mod products;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Storefront JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        // Logging is not initialized yet, so write directly to stderr.
        eprintln!("Configuration error: {e}");

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(&config.database_url).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .push(Router::with_path("validation").get(carts::validate::handler))
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(Router::with_path("checkout").post(orders::checkout::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(Router::with_path("cancel").post(orders::cancel::handler)),
                        ),
                )
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .push(Router::with_path("{product}").get(products::get::handler)),
                )
                .push(
                    Router::with_path("addresses")
                        .get(addresses::index::handler)
                        .post(addresses::create::handler)
                        .push(
                            Router::with_path("{address}")
                                .get(addresses::get::handler)
                                .delete(addresses::delete::handler),
                        ),
                )
                .push(
                    Router::new()
                        .hoop(auth::require_admin)
                        .push(
                            Router::with_path("products")
                                .post(products::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(products::update::handler)
                                        .delete(products::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("orders/{order}")
                                .push(Router::with_path("status").put(orders::status::handler))
                                .push(
                                    Router::with_path("items/{item}/fulfillment")
                                        .put(orders::fulfillment::handler),
                                ),
                        ),
                ),
        );

    let doc = OpenApi::new("Storefront API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
