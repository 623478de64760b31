//! The gateway: read-only state plus the router built from it.

use anyhow::{Context, Result};
use axum::{Router, routing::get, routing::post};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::GatewayConfig;
use crate::runner::ProcessRunner;
use crate::scripts::ScriptResolver;

/// Everything a request handler may read. Immutable once built.
pub struct Gateway {
    config: GatewayConfig,
    resolver: ScriptResolver,
    runner: Arc<dyn ProcessRunner>,
}

impl Gateway {
    pub fn new(config: GatewayConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        let resolver = ScriptResolver::new(config.scripts_dir.clone());
        Self {
            config,
            resolver,
            runner,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn resolver(&self) -> &ScriptResolver {
        &self.resolver
    }

    pub fn runner(&self) -> &dyn ProcessRunner {
        self.runner.as_ref()
    }

    /// Bind the three endpoints. Wrong methods get a JSON 405 with `Allow`,
    /// unknown paths a JSON 404.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/status", get(api::status).fallback(api::get_only))
            .route("/simulate", post(api::simulate).fallback(api::post_only))
            .route("/chat", post(api::chat).fallback(api::post_only))
            .fallback(api::not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }

    /// Bind the configured address. Failure here is fatal to the caller.
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.addr();
        TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))
    }

    /// Serve requests on `listener` until `shutdown` resolves. In-flight
    /// requests are allowed to finish.
    pub async fn serve<F>(self: Arc<Self>, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().context("listener has no local address")?;
        tracing::info!(%addr, "gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("server error")?;

        tracing::info!("gateway stopped");
        Ok(())
    }
}
