//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::{BacklinkVerifier, HttpPageFetcher};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{auth, catalog, drafts, health, payments, submissions, taxonomy};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub backlink_verifier: Arc<BacklinkVerifier>,
    pub sponsor_price: Decimal,
}

/// Build the Axum application router.
pub fn build_app(
    pool: PgPool,
    jwt_secret: &str,
    jwt_issuer: String,
    directory_host: String,
    sponsor_price: Decimal,
) -> anyhow::Result<Router> {
    let jwt_service = Arc::new(JwtService::new(jwt_secret, jwt_issuer));

    let fetcher = Arc::new(HttpPageFetcher::new()?);
    let backlink_verifier = Arc::new(BacklinkVerifier::new(fetcher, directory_host));

    let app_state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
        backlink_verifier,
        sponsor_price,
    };

    // CORS: the web frontend runs as a separate service
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting for mutation endpoints: 10/sec with burst of 20 per IP.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let jwt_service_for_middleware = jwt_service.clone();

    // Mutation routes sit behind the rate limiter; reads and health do not.
    let mutation_routes = Router::new()
        .route("/api/submissions/check-duplicate", post(submissions::check_duplicate))
        .route("/api/submissions/verify-backlink", post(submissions::verify_backlink))
        .route("/api/submissions", post(submissions::create_submission))
        .route("/api/submissions/claim", post(submissions::claim))
        .route(
            "/api/drafts",
            get(drafts::load_draft)
                .put(drafts::save_draft)
                .delete(drafts::delete_draft),
        )
        .route("/api/payments", post(payments::initiate_payment))
        .route("/api/payments/:id/capture", post(payments::capture_payment))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/oauth", post(auth::oauth))
        .layer(rate_limit_layer);

    let app = Router::new()
        .route("/api/categories", get(taxonomy::list_categories))
        .route("/api/proprietary", get(taxonomy::list_proprietary))
        .route("/api/tech-stacks", get(taxonomy::list_tech_stacks))
        .route("/api/alternatives", get(catalog::list_alternatives))
        .route("/api/alternatives/:slug", get(catalog::get_alternative))
        .merge(mutation_routes)
        .route("/health", get(health::health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
