use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, patch, post},
};
use loopers_auth::{
    Argon2CredentialEncoder, AuthState, AuthenticationService, CredentialEncoder, IdentityService,
    IdentityStorage, authentication_middleware,
};
use tower_http::trace::TraceLayer;

use crate::{config::AppConfig, handlers, middleware as app_middleware};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<IdentityService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for Arc<IdentityService> {
    fn from_ref(state: &AppState) -> Self {
        state.identities.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Wires the services over `storage` using the configured Argon2 cost.
    pub fn new(cfg: &AppConfig, storage: Arc<dyn IdentityStorage>) -> anyhow::Result<Self> {
        let encoder: Arc<dyn CredentialEncoder> =
            Arc::new(Argon2CredentialEncoder::with_params(&cfg.auth.hashing)?);
        let authenticator = Arc::new(AuthenticationService::new(
            storage.clone(),
            encoder.clone(),
        ));
        Ok(Self {
            identities: Arc::new(IdentityService::new(storage, encoder)),
            auth: AuthState::new(authenticator, Arc::new(cfg.auth.clone())),
        })
    }
}

pub struct LoopersServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(cfg: &AppConfig, state: AppState) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/v1/users/signup", post(handlers::signup))
        .route("/api/v1/users/me", get(handlers::me))
        .route("/api/v1/users/password", patch(handlers::change_password))
        // Middleware stack (outermost last): request id -> trace -> body limit -> header auth
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            authentication_middleware,
        ))
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let req_id = req
                        .extensions()
                        .get::<axum::http::HeaderValue>()
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri().path(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("http.status_code", res.status().as_u16());
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(app_middleware::request_id))
        .with_state(state)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
    storage: Option<Arc<dyn IdentityStorage>>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
            storage: None,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Replaces the default in-memory identity store.
    pub fn with_storage(mut self, storage: Arc<dyn IdentityStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn build(self) -> anyhow::Result<LoopersServer> {
        let storage = self
            .storage
            .unwrap_or_else(loopers_db_memory::create_identity_storage);
        let state = AppState::new(&self.config, storage)?;
        let app = build_app(&self.config, state);

        Ok(LoopersServer {
            addr: self.addr,
            app,
        })
    }
}

impl LoopersServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
