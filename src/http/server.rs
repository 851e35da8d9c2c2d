//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect and health handlers
//! - Wire up middleware (tracing, request ID, timeout)
//! - Bind server to listener
//! - Hand path segments to the resolver
//! - Drain in-flight requests on shutdown, bounded by the grace period

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RedirectConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::RedirectReply;
use crate::observability::metrics;
use crate::release::{GitHubReleases, ReleaseError};
use crate::resolver::{RedirectRequest, Resolver};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub resolver: Resolver,
}

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
    config: Arc<RedirectConfig>,
}

impl HttpServer {
    /// Create a server that looks releases up on the configured API.
    pub fn new(config: RedirectConfig) -> Result<Self, ReleaseError> {
        let releases = GitHubReleases::new(&config.release)?;
        let resolver = Resolver::new(config.storage.clone(), Arc::new(releases));
        Ok(Self::with_resolver(config, resolver))
    }

    /// Create a server around an existing resolver.
    pub fn with_resolver(config: RedirectConfig, resolver: Resolver) -> Self {
        let router = Self::build_router(&config, AppState { resolver });
        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &RedirectConfig, state: AppState) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request.request_id()
            )
        });

        Router::new()
            .route("/healthz", get(health_handler))
            .route("/", get(redirect_root))
            .route("/{segment1}", get(redirect_one))
            .route("/{segment1}/{segment2}", get(redirect_two))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(trace)
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    ///
    /// After the signal no new connections are accepted. In-flight requests get
    /// `timeouts.shutdown_grace_secs` to finish before they are dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let (draining_tx, draining_rx) = oneshot::channel::<()>();

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
                let _ = draining_tx.send(());
            })
            .into_future();

        let deadline = async move {
            match draining_rx.await {
                Ok(()) => tokio::time::sleep(grace).await,
                Err(_) => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = serve => result?,
            () = deadline => {
                tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Grace period elapsed, dropping in-flight requests"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RedirectConfig {
        &self.config
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn redirect_root(State(state): State<AppState>) -> RedirectReply {
    redirect(&state, RedirectRequest::root()).await
}

async fn redirect_one(
    State(state): State<AppState>,
    Path(segment1): Path<String>,
) -> RedirectReply {
    redirect(&state, RedirectRequest::one(segment1)).await
}

async fn redirect_two(
    State(state): State<AppState>,
    Path((segment1, segment2)): Path<(String, String)>,
) -> RedirectReply {
    redirect(&state, RedirectRequest::two(segment1, segment2)).await
}

async fn redirect(state: &AppState, request: RedirectRequest) -> RedirectReply {
    let start_time = Instant::now();
    let reply = RedirectReply::from(state.resolver.resolve(&request).await);

    tracing::debug!(
        segment1 = request.segment1.as_deref(),
        segment2 = request.segment2.as_deref(),
        status = reply.status.as_u16(),
        location = reply.location.as_ref().and_then(|l| l.to_str().ok()),
        "Resolved redirect"
    );
    metrics::record_redirect(reply.outcome(), start_time);

    reply
}
