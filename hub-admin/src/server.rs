//! HTTP server: middleware stack, listener, and graceful shutdown

use std::time::Duration;

use axum::{http::StatusCode, Router};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::{Config, MiddlewareConfig},
    error::Result,
    middleware::{request_id_layer, request_id_propagation_layer, sensitive_headers_layer},
};

const BYTES_PER_MB: usize = 1024 * 1024;

/// Serves the admin API with the standard middleware stack
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Wrap `app` in the middleware stack
    ///
    /// Later layers wrap earlier ones: panic recovery is outermost and sees
    /// every request first, request ids are assigned before tracing opens
    /// its span, and CORS sits closest to the routes.
    pub fn layered(&self, app: Router) -> Router {
        let middleware = &self.config.middleware;
        let timeout = Duration::from_secs(self.config.service.timeout_secs);

        let app = app
            .layer(cors_layer(middleware))
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
            .layer(RequestBodyLimitLayer::new(
                middleware.body_limit_mb.saturating_mul(BYTES_PER_MB),
            ));

        with_request_tracking(app).layer(CatchPanicLayer::new())
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM
    pub async fn serve(self, app: Router) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;

        tracing::info!(
            service = %self.config.service.name,
            address = %listener.local_addr()?,
            environment = %self.config.service.environment,
            timeout_secs = self.config.service.timeout_secs,
            body_limit_mb = self.config.middleware.body_limit_mb,
            cors_mode = %self.config.middleware.cors_mode,
            "hub-admin listening"
        );

        axum::serve(listener, self.layered(app))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("hub-admin stopped");
        Ok(())
    }
}

/// Trace spans carry the request id; credentials are masked before logging
fn with_request_tracking(app: Router) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(true))
        .on_response(DefaultOnResponse::new().include_headers(true));

    app.layer(trace)
        .layer(sensitive_headers_layer())
        .layer(request_id_propagation_layer())
        .layer(request_id_layer())
}

/// `restrictive` denies cross-origin requests; anything else allows them
fn cors_layer(middleware: &MiddlewareConfig) -> CorsLayer {
    match middleware.cors_mode.as_str() {
        "restrictive" => CorsLayer::new(),
        "permissive" => CorsLayer::permissive(),
        other => {
            tracing::warn!(cors_mode = other, "unknown CORS mode, allowing all origins");
            CorsLayer::permissive()
        }
    }
}

/// Resolves on the first of SIGINT or (unix) SIGTERM
///
/// A signal that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGINT");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };

    tracing::info!(signal = received, "shutting down, draining in-flight requests");
}
