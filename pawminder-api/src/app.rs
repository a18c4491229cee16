/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use pawminder_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use pawminder_shared::auth::middleware::{
    create_api_key_middleware, create_jwt_middleware, API_KEY_HEADER,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Key expected on the collection surface
    pub fn public_key(&self) -> &str {
        &self.config.api.public_key
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── GET  /health
/// ├── /auth
/// │   ├── POST /register
/// │   ├── POST /login
/// │   └── GET  /me                 (bearer token)
/// ├── GET  /pets/:user_id
/// ├── POST /pets
/// ├── GET  /reminders/:pet_id
/// ├── POST /reminders
/// └── /rest/v1                     (apikey header)
///     ├── GET, POST   /pets
///     ├── DELETE      /pets/:id
///     ├── GET, POST   /reminders
///     └── PATCH, DELETE /reminders/:id
/// ```
///
/// Layers, outermost first: security headers, CORS, request tracing.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let me_routes = Router::new()
        .route("/me", get(routes::auth::me))
        .layer(middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .merge(me_routes);

    let minimal_routes = Router::new()
        .route("/pets", post(routes::pets::create))
        .route("/pets/:user_id", get(routes::pets::list_for_user))
        .route("/reminders", post(routes::reminders::create))
        .route("/reminders/:pet_id", get(routes::reminders::list_for_pet));

    let rest_routes = Router::new()
        .route(
            "/pets",
            get(routes::rest::list_pets).post(routes::rest::insert_pet),
        )
        .route("/pets/:id", delete(routes::rest::delete_pet))
        .route(
            "/reminders",
            get(routes::rest::list_reminders).post(routes::rest::insert_reminder),
        )
        .route(
            "/reminders/:id",
            delete(routes::rest::delete_reminder).patch(routes::rest::update_reminder),
        )
        .layer(middleware::from_fn(create_api_key_middleware(
            state.public_key().to_string(),
        )));

    Router::new()
        .merge(health_routes)
        .merge(minimal_routes)
        .nest("/auth", auth_routes)
        .nest("/rest/v1", rest_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Permissive when origins include `*`, otherwise an explicit allow-list
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
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
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}
