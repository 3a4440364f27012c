/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use contactbook_api::{app::{build_router, AppState}, config::Config};
/// use contactbook_shared::db::pool::{create_pool, DatabaseConfig};
/// use contactbook_shared::store::postgres::PgUserStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
///
/// let state = AppState::new(Arc::new(PgUserStore::new(pool)), config);
/// state.mark_ready();
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, build_router(state)).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use contactbook_shared::store::UserStore;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub store: Arc<dyn UserStore>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Set once startup work (seeding) has finished
    ready: Arc<AtomicBool>,
}

impl AppState {
    /// Creates new application state, not yet ready
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Marks startup work as finished
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Whether startup work has finished
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET    /health
/// ├── GET    /health/live
/// ├── GET    /health/ready
/// └── /users
///     ├── GET    /                 list all
///     ├── POST   /                 create
///     ├── GET    /count            count
///     ├── GET    /search?name=     search by name
///     ├── GET    /email/:email     get by email
///     ├── GET    /:id              get by id
///     ├── PUT    /:id              replace
///     └── DELETE /:id              delete
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/health/live", get(routes::health::liveness))
        .route("/health/ready", get(routes::health::readiness));

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route("/count", get(routes::users::count_users))
        .route("/search", get(routes::users::search_users))
        .route("/email/:email", get(routes::users::get_user_by_email))
        .route(
            "/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        );

    let cors = build_cors(&state.config);

    Router::new()
        .merge(health_routes)
        .nest("/users", user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn build_cors(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
