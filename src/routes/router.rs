use axum::error_handling::HandleErrorLayer;
use axum::{
    extract::{MatchedPath, Request},
    http::Method,
    middleware,
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info_span;

use crate::core::error;
use crate::core::state::AppState;
use crate::routes::{auth, comments, feed, generate, images, publish};
use crate::utils;

pub(crate) fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/publish", post(publish::post))
        .route("/feed", put(feed::put))
        .route("/comments", post(comments::post).delete(comments::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize,
        ));

    let personalized = Router::new()
        .route("/feed", get(feed::get))
        .route("/auth/session", get(auth::session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authenticate,
        ));

    let media = ServeDir::new(&state.media_dir);

    Router::new()
        .route("/", get(|| async { "Hello, World!" }))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/generate", post(generate::post))
        .route("/comments", get(comments::get))
        .route("/images/{id}", get(images::get))
        .merge(protected)
        .merge(personalized)
        .nest_service("/media", media)
        .with_state(state)
        .route_layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(HandleErrorLayer::new(error::handle_middleware_errors))
                .buffer(128)
                .rate_limit(10, Duration::from_secs(1))
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                        .allow_origin(cors::Any),
                ),
        )
}
