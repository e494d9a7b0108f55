use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::database::TableSource;
use crate::handlers::{protected, public};
use crate::middleware::require_bearer;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub tables: Arc<dyn TableSource>,
    /// Lifetime of tokens issued by `POST /token`
    pub token_ttl: Duration,
}

impl AppState {
    pub fn new(
        authenticator: Authenticator,
        tables: Arc<dyn TableSource>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            tables,
            token_ttl,
        }
    }

    pub fn from_config(config: &AppConfig, tables: Arc<dyn TableSource>) -> Self {
        Self::new(
            Authenticator::from_config(config),
            tables,
            Duration::minutes(config.security.access_token_expire_minutes),
        )
    }
}

pub fn app(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/token", post(public::login_for_access_token))
        // Bearer token required
        .merge(protected_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all-tables", get(protected::all_tables))
        // Joins the public POST /token; GET reads the `token` table
        .route("/token", get(protected::token_table))
        .route("/:table_name", get(protected::table_data))
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}
