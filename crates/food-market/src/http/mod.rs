//! The JSON HTTP surface.
//!
//! Handlers are thin: they check the session's role, call one client
//! operation and serialize the result. Ownership rules and the order workflow
//! live in the clients.

pub mod auth;
pub mod error;
pub mod menu;
pub mod orders;
pub mod restaurants;
pub mod session;

use crate::auth::SessionIssuer;
use crate::clients::{AccountClient, MenuClient, OrderClient};
use crate::config::Config;
use crate::lifecycle::Marketplace;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post, put},
    Router,
};
use std::{net::SocketAddr, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub use error::ApiError;

/// Shared handler state: cheap clones of the clients and the token issuer.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountClient,
    pub menu: MenuClient,
    pub orders: OrderClient,
    pub sessions: SessionIssuer,
}

impl AppState {
    pub fn new(marketplace: &Marketplace, config: &Config) -> Self {
        Self {
            accounts: marketplace.account_client.clone(),
            menu: marketplace.menu_client.clone(),
            orders: marketplace.order_client.clone(),
            sessions: SessionIssuer::new(&config.session_secret, config.session_ttl),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/auth/customer/register", post(auth::register_customer))
        .route("/api/auth/customer/login", post(auth::login_customer))
        .route("/api/auth/customer/me", get(auth::customer_profile))
        .route("/api/auth/restaurant/register", post(auth::register_restaurant))
        .route("/api/auth/restaurant/login", post(auth::login_restaurant))
        .route("/api/auth/restaurant/me", get(auth::restaurant_profile))
        .route("/api/auth/delivery/register", post(auth::register_courier))
        .route("/api/auth/delivery/login", post(auth::login_courier))
        .route("/api/auth/delivery/me", get(auth::courier_profile))
        .route("/api/restaurants", get(restaurants::list))
        .route(
            "/api/restaurants/{id}",
            get(restaurants::show).put(restaurants::update),
        )
        .route("/api/menu", post(menu::create))
        .route("/api/menu/restaurant/{id}", get(menu::list))
        .route("/api/menu/{id}", put(menu::update).delete(menu::remove))
        .route("/api/orders", post(orders::place))
        .route("/api/orders/customer", get(orders::for_customer))
        .route("/api/orders/restaurant", get(orders::for_restaurant))
        .route("/api/orders/delivery/available", get(orders::available))
        .route("/api/orders/delivery/active", get(orders::active))
        .route("/api/orders/{id}/status", put(orders::set_status))
        .route("/api/orders/{id}/accept", put(orders::accept))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serves the API until Ctrl+C or SIGTERM, then drains open connections.
pub async fn serve(config: &Config, marketplace: &Marketplace) -> std::io::Result<()> {
    let app = router(AppState::new(marketplace, config));
    let address = SocketAddr::new(config.bind_addr, config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
