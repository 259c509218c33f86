//! HTTP transport for the ordering service.
//!
//! - `POST /order/{collection}`: reorder (JSON array of item ids)
//! - `GET /order/{collection}`: current rank assignment
//! - `DELETE /order/{collection}`: forget the explicit order
//! - `POST /order/{collection}/reconcile`: drop ranks of deleted items
//! - `GET /items/{collection}?status=&search=`: ordered listing
//! - `GET /health`: liveness, no auth
//!
//! Every route except `/health` requires `Authorization: Bearer <token>`
//! with a token from the `[[actors]]` config.

mod error;
mod handlers;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use ordinal_core::App;
use ordinal_core::domain::Actor;
use tracing::{info, warn};

use self::error::HttpError;

/// Shared state for all handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    pub app: Arc<App>,
    /// Bearer token → actor.
    pub sessions: Arc<HashMap<String, Actor>>,
}

/// Resolve the bearer token to an [`Actor`] and hand it to the handler as an
/// extension.
async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let actor = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.sessions.get(token))
        .cloned();

    let Some(actor) = actor else {
        warn!(path = %request.uri().path(), "request without a valid session");
        return Err(HttpError::Unauthenticated);
    };

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

pub struct OrderServer {
    router: Router,
}

impl OrderServer {
    pub fn new(app: Arc<App>, sessions: HashMap<String, Actor>) -> Self {
        let state = AppState {
            app,
            sessions: Arc::new(sessions),
        };
        Self {
            router: Self::build_router(state),
        }
    }

    fn build_router(state: AppState) -> Router {
        let authenticated = Router::new()
            .route(
                "/order/{collection}",
                post(handlers::reorder)
                    .get(handlers::get_order)
                    .delete(handlers::reset_order),
            )
            .route("/order/{collection}/reconcile", post(handlers::reconcile))
            .route("/items/{collection}", get(handlers::list_items))
            .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

        Router::new()
            .merge(authenticated)
            .route("/health", get(handlers::health))
            .with_state(state)
    }

    /// Return the inner [`Router`] (useful for testing with `tower::ServiceExt`).
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, addr: &str, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "ordering API listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
