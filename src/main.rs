mod domain;
mod error;
mod infra;
mod middleware;
mod routes;
mod security;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infra::pg::PgStore;
use crate::security::jwt::TokenIssuer;
use crate::store::{ProductStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = infra::db::connect().await?;
    infra::db::migrate(&db).await?;
    let jwt = TokenIssuer::from_env()?;

    let store = Arc::new(PgStore::new(db));
    let products: Arc<dyn ProductStore> = store.clone();
    let users: Arc<dyn UserStore> = store;
    let state = state::AppState::new(products, users, jwt);

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
