//! Application Startup
//!
//! Application building and server initialization, including storage
//! backend selection: PostgreSQL when a database URL is configured,
//! in-memory otherwise.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{
    cookie::{time::Duration, SameSite},
    Expiry, MemoryStore, SessionManagerLayer,
};

use crate::config::Settings;
use crate::domain::storage::Storage;
use crate::infrastructure::{database, MemoryStorage, PgStorage};
use crate::presentation::http::routes;
use crate::presentation::middleware::cors;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub settings: Arc<Settings>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let store = build_store(&settings).await?;

        let state = AppState {
            store,
            settings: Arc::new(settings.clone()),
        };

        let router = build_router(state, &settings);

        let listener = TcpListener::bind(settings.server_addr()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Select and initialize the storage backend.
async fn build_store(settings: &Settings) -> Result<Arc<dyn Storage>> {
    match &settings.database.url {
        Some(url) => {
            let pool = database::create_pool(&settings.database, url).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("Using PostgreSQL storage");
            Ok(Arc::new(PgStorage::new(pool)))
        }
        None => {
            tracing::info!("No database URL configured; using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

/// Assemble the router with session, trace, and CORS layers.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.is_production())
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            settings.session.expiry_minutes,
        )));

    routes::create_router(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors::create_cors_layer(&settings.cors))
}
